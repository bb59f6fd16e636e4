use hifitime::Epoch;

use crate::constants::{BodyId, LOW_COVERAGE_FRACTION, JD};
use crate::env_state::HeliopathEnv;
use crate::errors::HeliopathError;
use crate::horizons::query::tlist_query;
use crate::horizons::response::parse_vector_table;
use crate::horizons::response::VectorRecord;
use crate::time::epochs_to_jd;
use crate::trajectory::epoch_match::{match_records, MatchTolerance, ObjectClass};
use crate::trajectory::interpolate::fill_gaps;
use crate::trajectory::state_vector::Trajectory;

/// Fetch a complete, index-aligned trajectory for one object.
///
/// Issues a single batched vector query covering all requested epochs, then
/// reconciles the response: returned records are matched against the request
/// under the class tolerance, remaining gaps are interpolated from matched
/// neighbors, and anything unrecoverable stays an explicit absence marker.
///
/// Any remote failure (transport error, timeout, service error text, no
/// ephemeris for the object) degrades to an all-absent trajectory of the
/// requested length. It is logged and never raised; downstream plotting
/// handles "failed" and "succeeded with gaps" identically.
///
/// Argument
/// --------
/// * `env`: shared environment (HTTP client + endpoint)
/// * `object`: body identifier
/// * `class`: object class hint, selects the epoch-match tolerance
/// * `epochs`: requested calendar epochs, ascending
/// * `center`: coordinate center (site@body, e.g. `500@10`)
///
/// Return
/// ------
/// * A [`Trajectory`] with exactly `epochs.len()` points.
pub fn fetch_trajectory(
    env: &HeliopathEnv,
    object: &BodyId,
    class: ObjectClass,
    epochs: &[Epoch],
    center: &str,
) -> Trajectory {
    fetch_trajectory_jd(env, object, class, epochs_to_jd(epochs), center)
}

/// Grid-level variant of [`fetch_trajectory`], also used by the padded builder.
pub(crate) fn fetch_trajectory_jd(
    env: &HeliopathEnv,
    object: &BodyId,
    class: ObjectClass,
    requested: Vec<JD>,
    center: &str,
) -> Trajectory {
    let query = tlist_query(object, center, &requested);

    let records = env
        .post_query(&query)
        .and_then(|response| parse_vector_table(&response, object));

    let records = match records {
        Ok(records) => records,
        Err(err @ HeliopathError::NoEphemeris { .. }) => {
            log::warn!("{err}; substituting {} absent points", requested.len());
            return Trajectory::all_absent(requested);
        }
        Err(err) => {
            log::warn!(
                "vector query for {object} failed ({err}); substituting {} absent points",
                requested.len()
            );
            return Trajectory::all_absent(requested);
        }
    };

    let trajectory = reconcile(requested, &records, class.match_tolerance());

    let stats = trajectory.stats();
    log::debug!(
        "trajectory for {object}: {} matched, {} interpolated, {} absent",
        stats.matched,
        stats.interpolated,
        stats.absent
    );
    if stats.coverage() < LOW_COVERAGE_FRACTION {
        log::warn!(
            "low ephemeris coverage for {object}: {:.0}% of {} requested epochs",
            stats.coverage() * 100.0,
            trajectory.len()
        );
    }

    trajectory
}

/// Reconcile decoded records against a requested grid: epoch matching under
/// the given tolerance, then gap interpolation. Matching fully completes
/// before any interpolation runs.
///
/// This is the offline half of [`fetch_trajectory`]; it is exposed so the
/// pipeline can be driven against canned responses without a network.
pub fn reconcile(
    requested: Vec<JD>,
    records: &[VectorRecord],
    tolerance: MatchTolerance,
) -> Trajectory {
    let matched = match_records(&requested, records, tolerance);
    let points = fill_gaps(&requested, matched);
    Trajectory::new(requested, points)
}

#[cfg(test)]
mod fetch_tests {
    use super::*;
    use crate::env_state::HeliopathEnv;
    use std::time::Duration;

    #[test]
    fn test_total_remote_failure_keeps_length() {
        // Nothing listens on port 1; the query fails immediately and the
        // result must still be index-aligned with the request.
        let env = HeliopathEnv::with_endpoint("http://127.0.0.1:1", Duration::from_secs(2));
        let epochs: Vec<Epoch> = (0..4)
            .map(|day| Epoch::from_jde_utc(2459215.5 + day as f64))
            .collect();

        let trajectory = fetch_trajectory(
            &env,
            &BodyId::Int(499),
            ObjectClass::MajorBody,
            &epochs,
            "500@10",
        );

        assert_eq!(trajectory.len(), 4);
        assert!(trajectory.points().iter().all(|p| p.is_absent()));
    }
}
