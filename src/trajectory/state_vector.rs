use nalgebra::Vector3;

use crate::constants::{Au, AuPerDay, AU, JD, SECONDS_PER_DAY};
use crate::horizons::response::VectorRecord;

/// Complete state of an object at one epoch, relative to the query center.
///
/// All fields are present by construction; a record the service returned with
/// missing velocity components never becomes a `StateVector`. Canonical units
/// are AU and AU/day; kilometre values are exposed through the named accessors
/// only.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    /// Epoch of this state (Julian Date)
    pub epoch: JD,
    /// Calendar timestamp: the service's own for observed records, regenerated
    /// from the epoch for interpolated ones
    pub timestamp: String,
    /// Position relative to the center (AU)
    pub position: Vector3<f64>,
    /// Velocity relative to the center (AU/day)
    pub velocity: Vector3<f64>,
    /// Distance from the center (AU)
    pub range: Au,
    /// Radial velocity with respect to the center (AU/day)
    pub range_rate: AuPerDay,
}

impl StateVector {
    /// Build a state vector from a decoded service record.
    ///
    /// Position and velocity must be present; range and range-rate are derived
    /// from them when the service omits those columns. A record without
    /// velocity yields `None` and is treated as a gap.
    pub(crate) fn from_record(record: &VectorRecord) -> Option<Self> {
        let velocity = Vector3::new(record.vx?, record.vy?, record.vz?);
        let position = record.position();
        let range = record.rg.unwrap_or_else(|| position.norm());
        let range_rate = record.rr.unwrap_or_else(|| {
            if range > 0.0 {
                position.dot(&velocity) / range
            } else {
                0.0
            }
        });

        Some(StateVector {
            epoch: record.jd,
            timestamp: record.date.clone(),
            position,
            velocity,
            range,
            range_rate,
        })
    }

    /// Velocity magnitude (AU/day).
    pub fn speed(&self) -> AuPerDay {
        self.velocity.norm()
    }

    /// Position in kilometres.
    pub fn position_km(&self) -> Vector3<f64> {
        self.position * AU
    }

    /// Distance from the center in kilometres.
    pub fn range_km(&self) -> f64 {
        self.range * AU
    }

    /// Velocity magnitude in km/s.
    pub fn speed_km_s(&self) -> f64 {
        self.speed() * AU / SECONDS_PER_DAY
    }
}

/// One slot of a trajectory: a state with its provenance, or explicit absence.
#[derive(Debug, Clone, PartialEq)]
pub enum TrajectoryPoint {
    /// Matched directly against a returned record
    Observed(StateVector),
    /// Reconstructed from matched neighbors
    Interpolated(StateVector),
    /// No data for this epoch
    Absent,
}

impl TrajectoryPoint {
    /// The state carried by this point, if any.
    pub fn state(&self) -> Option<&StateVector> {
        match self {
            TrajectoryPoint::Observed(s) | TrajectoryPoint::Interpolated(s) => Some(s),
            TrajectoryPoint::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, TrajectoryPoint::Absent)
    }
}

/// Per-fetch diagnostic counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrajectoryStats {
    pub matched: usize,
    pub interpolated: usize,
    pub absent: usize,
}

impl TrajectoryStats {
    /// Fraction of requested epochs carrying a state (matched or interpolated).
    pub fn coverage(&self) -> f64 {
        let total = self.matched + self.interpolated + self.absent;
        if total == 0 {
            return 0.0;
        }
        (self.matched + self.interpolated) as f64 / total as f64
    }
}

/// An ordered sequence of points, 1:1 index-aligned with the requested epochs.
///
/// The length always equals the requested length, including under total remote
/// failure, so callers can animate against a shared timeline without
/// per-object branching.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    requested: Vec<JD>,
    points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    pub(crate) fn new(requested: Vec<JD>, points: Vec<TrajectoryPoint>) -> Self {
        assert_eq!(
            requested.len(),
            points.len(),
            "trajectory points must align 1:1 with requested epochs"
        );
        Trajectory { requested, points }
    }

    /// A length-correct trajectory of absence markers, the degraded result of
    /// any failed fetch.
    pub fn all_absent(requested: Vec<JD>) -> Self {
        let points = vec![TrajectoryPoint::Absent; requested.len()];
        Trajectory { requested, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The epoch grid this trajectory is aligned to (Julian Dates).
    pub fn requested(&self) -> &[JD] {
        &self.requested
    }

    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&TrajectoryPoint> {
        self.points.get(index)
    }

    pub(crate) fn into_points(self) -> Vec<TrajectoryPoint> {
        self.points
    }

    pub fn stats(&self) -> TrajectoryStats {
        let mut stats = TrajectoryStats {
            matched: 0,
            interpolated: 0,
            absent: 0,
        };
        for point in &self.points {
            match point {
                TrajectoryPoint::Observed(_) => stats.matched += 1,
                TrajectoryPoint::Interpolated(_) => stats.interpolated += 1,
                TrajectoryPoint::Absent => stats.absent += 1,
            }
        }
        stats
    }
}
