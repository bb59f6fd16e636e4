use hifitime::Epoch;

use crate::constants::{BodyId, JD};
use crate::env_state::HeliopathEnv;
use crate::time::epochs_to_jd;
use crate::trajectory::epoch_match::ObjectClass;
use crate::trajectory::fetch::fetch_trajectory_jd;
use crate::trajectory::state_vector::{Trajectory, TrajectoryPoint};

/// Inclusive time range over which an object's ephemeris is physically
/// meaningful (Julian Dates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidityWindow {
    pub start: JD,
    pub end: JD,
}

impl ValidityWindow {
    pub fn new(start: JD, end: JD) -> Self {
        debug_assert!(start <= end, "validity window must not be inverted");
        ValidityWindow { start, end }
    }

    pub fn contains(&self, jd: JD) -> bool {
        self.start <= jd && jd <= self.end
    }
}

/// Fetch one object's trajectory aligned to a shared global timeline.
///
/// The global epoch list is partitioned into a prefix before the validity
/// window, a middle within it, and a suffix after it. Only the middle is
/// fetched; the prefix and suffix are padded with absence markers. An object
/// entirely outside its window issues no remote call at all.
///
/// The output length always equals the global list length, so callers can
/// animate heterogeneous-lifespan objects against one timeline without
/// per-object branching.
pub fn fetch_padded_trajectory(
    env: &HeliopathEnv,
    object: &BodyId,
    class: ObjectClass,
    global_epochs: &[Epoch],
    window: &ValidityWindow,
    center: &str,
) -> Trajectory {
    let global = epochs_to_jd(global_epochs);
    let (prefix, suffix) = partition(&global, window);

    if prefix == suffix {
        log::debug!(
            "{object} is entirely outside its validity window [{}, {}]; skipping fetch",
            window.start,
            window.end
        );
        return Trajectory::all_absent(global);
    }

    let middle = fetch_trajectory_jd(env, object, class, global[prefix..suffix].to_vec(), center);

    let mut points = Vec::with_capacity(global.len());
    points.extend(std::iter::repeat_n(TrajectoryPoint::Absent, prefix));
    points.extend(middle.into_points());
    points.extend(std::iter::repeat_n(
        TrajectoryPoint::Absent,
        global.len() - suffix,
    ));

    Trajectory::new(global, points)
}

/// Bounds of the in-window slice of an ascending epoch grid: `[lo, hi)`.
fn partition(global: &[JD], window: &ValidityWindow) -> (usize, usize) {
    let lo = global.partition_point(|&jd| jd < window.start);
    let hi = global.partition_point(|&jd| jd <= window.end);
    (lo, hi.max(lo))
}

#[cfg(test)]
mod window_tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_partition_splits_around_window() {
        let global: Vec<JD> = (0..10).map(|d| 100.0 + d as f64).collect();
        let window = ValidityWindow::new(103.0, 106.5);
        assert_eq!(partition(&global, &window), (3, 7));

        let open_ended = ValidityWindow::new(0.0, 1e9);
        assert_eq!(partition(&global, &open_ended), (0, 10));
    }

    #[test]
    fn test_window_contains() {
        let window = ValidityWindow::new(100.0, 105.0);
        assert!(window.contains(100.0));
        assert!(window.contains(105.0));
        assert!(!window.contains(99.999));
        assert!(!window.contains(105.001));
    }

    #[test]
    fn test_object_outside_window_pads_without_fetching() {
        // Window entirely before the grid: the middle partition is empty and
        // no remote call is issued.
        let env = HeliopathEnv::with_endpoint("http://127.0.0.1:1", Duration::from_secs(2));
        let global_epochs: Vec<Epoch> = (0..10)
            .map(|d| Epoch::from_jde_utc(2459215.5 + d as f64))
            .collect();
        let window = ValidityWindow::new(2450000.0, 2450001.0);

        let trajectory = fetch_padded_trajectory(
            &env,
            &BodyId::Int(-48),
            ObjectClass::Spacecraft,
            &global_epochs,
            &window,
            "500@10",
        );

        assert_eq!(trajectory.len(), 10);
        assert!(trajectory.points().iter().all(|p| p.is_absent()));
    }

    #[test]
    fn test_padding_preserves_global_length() {
        // Middle fetch fails (unroutable endpoint) but the padded result is
        // still aligned 1:1 with the global grid.
        let env = HeliopathEnv::with_endpoint("http://127.0.0.1:1", Duration::from_secs(2));
        let global_epochs: Vec<Epoch> = (0..6)
            .map(|d| Epoch::from_jde_utc(2459215.5 + d as f64))
            .collect();
        let window = ValidityWindow::new(2459217.0, 2459219.0);

        let trajectory = fetch_padded_trajectory(
            &env,
            &BodyId::Int(-48),
            ObjectClass::Spacecraft,
            &global_epochs,
            &window,
            "500@10",
        );

        assert_eq!(trajectory.len(), 6);
    }
}
