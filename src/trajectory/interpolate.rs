use crate::constants::JD;
use crate::time::format_jd;
use crate::trajectory::state_vector::{StateVector, TrajectoryPoint};

/// Fill unmatched slots from their nearest matched neighbors.
///
/// Runs strictly after matching has completed: neighbor searches only ever see
/// the matched slots, never previously interpolated ones. For each gap:
///
/// * matched neighbors on both sides → linear interpolation by time fraction,
/// * a single matched neighbor → its field values copied, but the gap keeps
///   its own epoch and a timestamp regenerated from it,
/// * no matched neighbor at all → the slot stays an explicit absence marker.
///
/// Return
/// ------
/// * One [`TrajectoryPoint`] per requested epoch, same length as the input.
pub(crate) fn fill_gaps(requested: &[JD], matched: Vec<Option<StateVector>>) -> Vec<TrajectoryPoint> {
    debug_assert_eq!(requested.len(), matched.len());
    let n = requested.len();
    let mut points = Vec::with_capacity(n);

    for index in 0..n {
        match &matched[index] {
            Some(state) => points.push(TrajectoryPoint::Observed(state.clone())),
            None => {
                let left = (0..index).rev().find_map(|j| matched[j].as_ref());
                let right = (index + 1..n).find_map(|j| matched[j].as_ref());
                let epoch = requested[index];

                let point = match (left, right) {
                    (Some(before), Some(after)) => {
                        TrajectoryPoint::Interpolated(lerp_state(epoch, before, after))
                    }
                    (Some(neighbor), None) | (None, Some(neighbor)) => {
                        TrajectoryPoint::Interpolated(copy_state(epoch, neighbor))
                    }
                    (None, None) => TrajectoryPoint::Absent,
                };
                points.push(point);
            }
        }
    }

    points
}

/// Linear blend of two matched states at time `epoch`.
fn lerp_state(epoch: JD, before: &StateVector, after: &StateVector) -> StateVector {
    let span = after.epoch - before.epoch;
    if span.abs() < f64::EPSILON {
        return copy_state(epoch, before);
    }
    let fraction = (epoch - before.epoch) / span;

    StateVector {
        epoch,
        timestamp: format_jd(epoch),
        position: before.position + (after.position - before.position) * fraction,
        velocity: before.velocity + (after.velocity - before.velocity) * fraction,
        range: before.range + (after.range - before.range) * fraction,
        range_rate: before.range_rate + (after.range_rate - before.range_rate) * fraction,
    }
}

/// One-sided extrapolation: the neighbor's fields under the gap's own epoch.
fn copy_state(epoch: JD, neighbor: &StateVector) -> StateVector {
    StateVector {
        epoch,
        timestamp: format_jd(epoch),
        position: neighbor.position,
        velocity: neighbor.velocity,
        range: neighbor.range,
        range_rate: neighbor.range_rate,
    }
}
