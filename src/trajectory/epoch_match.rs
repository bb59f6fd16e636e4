use std::cmp::Ordering;

use crate::constants::JD;
use crate::horizons::response::VectorRecord;
use crate::trajectory::state_vector::StateVector;

/// Maximum accepted distance between a returned epoch and a requested epoch,
/// in days.
///
/// Planet and moon queries come back on the requested grid to within rounding,
/// so the default is tight. Spacecraft ephemerides are stored on their own
/// time grids and can come back several minutes off the request, hence the
/// looser class value. Both are ordinary values, not hidden constants: pick a
/// custom one with [`MatchTolerance::from_days`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchTolerance {
    days: f64,
}

impl MatchTolerance {
    /// Tight tolerance for bodies returned on the requested grid (~0.9 s).
    pub const DEFAULT: MatchTolerance = MatchTolerance { days: 1e-5 };

    /// Loose tolerance for spacecraft grids offset from the request (~7.2 min).
    pub const SPACECRAFT: MatchTolerance = MatchTolerance { days: 5e-3 };

    pub fn from_days(days: f64) -> Self {
        MatchTolerance { days: days.abs() }
    }

    pub fn days(&self) -> f64 {
        self.days
    }
}

/// Object class hint carried by a fetch, selecting the epoch-match tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectClass {
    MajorBody,
    SmallBody,
    Spacecraft,
}

impl ObjectClass {
    pub fn match_tolerance(self) -> MatchTolerance {
        match self {
            ObjectClass::Spacecraft => MatchTolerance::SPACECRAFT,
            ObjectClass::MajorBody | ObjectClass::SmallBody => MatchTolerance::DEFAULT,
        }
    }
}

/// Assign returned records to requested epochs.
///
/// Records are processed in service order. Each one claims the requested epoch
/// closest to it by absolute difference, provided the difference is within
/// tolerance and the slot is still free; a record contending for a taken slot
/// is dropped rather than displacing the earlier match. Records with missing
/// velocity components are dropped before matching, so downstream slots are
/// either complete states or gaps.
///
/// Return
/// ------
/// * One slot per requested epoch, `Some` where a record matched.
pub(crate) fn match_records(
    requested: &[JD],
    records: &[VectorRecord],
    tolerance: MatchTolerance,
) -> Vec<Option<StateVector>> {
    let mut slots: Vec<Option<StateVector>> = vec![None; requested.len()];

    for record in records {
        let Some(state) = StateVector::from_record(record) else {
            log::debug!(
                "dropping partial record at JD {} (missing velocity)",
                record.jd
            );
            continue;
        };

        let closest = requested
            .iter()
            .enumerate()
            .map(|(index, jd)| (index, (jd - record.jd).abs()))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        let Some((index, difference)) = closest else {
            continue;
        };

        if difference > tolerance.days() {
            log::debug!(
                "record at JD {} is {:.2e} d from the nearest request, over tolerance {:.2e} d",
                record.jd,
                difference,
                tolerance.days()
            );
            continue;
        }

        if slots[index].is_some() {
            log::debug!(
                "record at JD {} contends for an already matched epoch, dropped",
                record.jd
            );
            continue;
        }

        slots[index] = Some(state);
    }

    slots
}

#[cfg(test)]
mod epoch_match_tests {
    use super::*;

    fn record(jd: f64) -> VectorRecord {
        VectorRecord {
            jd,
            date: "A.D. 2021-Jan-01 00:00:00.0000".into(),
            x: jd,
            y: 0.0,
            z: 0.0,
            vx: Some(0.01),
            vy: Some(0.0),
            vz: Some(0.0),
            lt: None,
            rg: None,
            rr: None,
        }
    }

    #[test]
    fn test_exact_grid_matches_every_slot() {
        let requested = vec![100.0, 101.0, 102.0];
        let records = vec![record(100.0), record(101.0), record(102.0)];
        let slots = match_records(&requested, &records, MatchTolerance::DEFAULT);
        assert_eq!(slots.len(), 3);
        assert!(slots.iter().all(|s| s.is_some()));
        assert_eq!(slots[1].as_ref().unwrap().epoch, 101.0);
    }

    #[test]
    fn test_offset_grid_needs_loose_tolerance() {
        // 2.5e-3 d off the request, typical of spacecraft grids.
        let requested = vec![100.0, 101.0];
        let records = vec![record(100.0025), record(101.0025)];

        let tight = match_records(&requested, &records, MatchTolerance::DEFAULT);
        assert!(tight.iter().all(|s| s.is_none()));

        let loose = match_records(&requested, &records, MatchTolerance::SPACECRAFT);
        assert!(loose.iter().all(|s| s.is_some()));
    }

    #[test]
    fn test_no_double_matching() {
        // Both records are closest to the same requested epoch; the first wins.
        let requested = vec![100.0, 200.0];
        let records = vec![record(100.000001), record(100.000002)];
        let slots = match_records(&requested, &records, MatchTolerance::DEFAULT);
        assert_eq!(slots[0].as_ref().unwrap().epoch, 100.000001);
        assert!(slots[1].is_none());
    }

    #[test]
    fn test_matched_difference_within_tolerance() {
        let requested = vec![100.0, 101.0, 102.0];
        let records = vec![record(100.000004), record(101.2), record(102.0)];
        let slots = match_records(&requested, &records, MatchTolerance::DEFAULT);
        for (slot, jd) in slots.iter().zip(&requested) {
            if let Some(state) = slot {
                assert!((state.epoch - jd).abs() <= MatchTolerance::DEFAULT.days());
            }
        }
        assert!(slots[1].is_none(), "0.2 d off must not match");
    }

    #[test]
    fn test_partial_records_leave_gaps() {
        let requested = vec![100.0, 101.0];
        let mut partial = record(101.0);
        partial.vx = None;
        let records = vec![record(100.0), partial];
        let slots = match_records(&requested, &records, MatchTolerance::DEFAULT);
        assert!(slots[0].is_some());
        assert!(slots[1].is_none());
    }
}
