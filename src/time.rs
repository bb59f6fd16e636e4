use hifitime::Epoch;
use std::str::FromStr;

use crate::constants::JD;
use crate::errors::HeliopathError;

/// Transformation from dates in the format YYYY-MM-ddTHH:mm:ss to Julian Date (JD)
///
/// Argument
/// --------
/// * `dates`: a slice of dates in the format YYYY-MM-ddTHH:mm:ss
///
/// Return
/// ------
/// * a vector of floats representing the input dates in Julian Date (JD)
pub fn date_to_jd(dates: &[&str]) -> Result<Vec<JD>, HeliopathError> {
    dates
        .iter()
        .map(|x| {
            Epoch::from_str(x)
                .map(|e| e.to_jde_utc_days())
                .map_err(|_| HeliopathError::InvalidDate {
                    input: x.to_string(),
                })
        })
        .collect()
}

/// Convert a calendar epoch to the numeric Julian Date coordinate used for matching.
pub fn epoch_to_jd(epoch: &Epoch) -> JD {
    epoch.to_jde_utc_days()
}

/// Convert a slice of calendar epochs to Julian Dates.
pub fn epochs_to_jd(epochs: &[Epoch]) -> Vec<JD> {
    epochs.iter().map(epoch_to_jd).collect()
}

/// Recover a calendar epoch from a Julian Date.
pub fn jd_to_epoch(jd: JD) -> Epoch {
    Epoch::from_jde_utc(jd)
}

/// Format a Julian Date as a calendar timestamp.
///
/// Used to regenerate the timestamp of interpolated records, which keep the
/// gap's own epoch rather than a neighbor's service timestamp.
pub fn format_jd(jd: JD) -> String {
    jd_to_epoch(jd).to_string()
}
