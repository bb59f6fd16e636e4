use hifitime::Epoch;
use nalgebra::Vector3;

use crate::constants::{BodyId, JD};
use crate::env_state::HeliopathEnv;
use crate::horizons::query::range_query;
use crate::horizons::response::parse_vector_table;
use crate::time::epoch_to_jd;

/// Position-only polyline of one orbit, for drawing continuous orbit lines.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitPath {
    epochs: Vec<JD>,
    positions: Vec<Vector3<f64>>,
}

impl OrbitPath {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Vertex epochs (Julian Dates), parallel to [`positions`](Self::positions).
    pub fn epochs(&self) -> &[JD] {
        &self.epochs
    }

    /// Vertex positions (AU).
    pub fn positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }
}

/// Fetch an orbit polyline over a start/stop/step range.
///
/// The simpler sibling of the trajectory fetcher: one range query, no epoch
/// matching, no interpolation. The result is whatever the service yields, or
/// `None` on failure or an empty table, so callers can distinguish "nothing
/// to plot" from "this index lacks data" in an index-aligned trajectory.
///
/// Velocity columns are ignored here; a record with only a position still
/// contributes a vertex.
pub fn fetch_path(
    env: &HeliopathEnv,
    object: &BodyId,
    center: &str,
    start: &Epoch,
    stop: &Epoch,
    step: &str,
) -> Option<OrbitPath> {
    let query = range_query(object, center, epoch_to_jd(start), epoch_to_jd(stop), step);

    let records = env
        .post_query(&query)
        .and_then(|response| parse_vector_table(&response, object));

    let records = match records {
        Ok(records) => records,
        Err(err) => {
            log::warn!("orbit path query for {object} failed ({err}); no path");
            return None;
        }
    };

    if records.is_empty() {
        log::warn!("orbit path query for {object} returned an empty table; no path");
        return None;
    }

    let epochs = records.iter().map(|r| r.jd).collect();
    let positions = records.iter().map(|r| r.position()).collect();
    Some(OrbitPath { epochs, positions })
}
