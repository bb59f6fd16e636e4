//! # Trajectory acquisition
//!
//! Reconstructs continuous, index-aligned trajectories from the discrete and
//! sometimes-incomplete samples returned by the ephemeris service.
//!
//! Modules
//! -----------------
//! * [`state_vector`](crate::trajectory::state_vector) – [`StateVector`], the point-or-absent
//!   [`TrajectoryPoint`], and the length-invariant [`Trajectory`] container.
//! * [`epoch_match`](crate::trajectory::epoch_match) – Closest-first assignment of returned
//!   records to requested epochs under an object-class-aware tolerance.
//! * [`interpolate`](crate::trajectory::interpolate) – Gap filling: two-sided linear
//!   interpolation, one-sided neighbor copy, explicit absence.
//! * [`fetch`](crate::trajectory::fetch) – One batched remote query composed with matching
//!   and interpolation into a complete result.
//! * [`path`](crate::trajectory::path) – Range-query polyline fetch for continuous orbit
//!   lines, no interpolation.
//! * [`window`](crate::trajectory::window) – [`ValidityWindow`] and padding of one object's
//!   trajectory against a shared global timeline.
//!
//! Invariants
//! -----------------
//! * Every fetch returns exactly as many points as epochs were requested, even
//!   under total remote failure.
//! * A point is either a complete state vector or an explicit absence marker;
//!   partial records are dropped before matching.
//! * All positions are AU, all rates AU/day; kilometre values only exist behind
//!   explicitly named accessors.

pub mod epoch_match;
pub mod fetch;
pub mod interpolate;
pub mod path;
pub mod state_vector;
pub mod window;

pub use epoch_match::{MatchTolerance, ObjectClass};
pub use fetch::{fetch_trajectory, reconcile};
pub use path::{fetch_path, OrbitPath};
pub use state_vector::{StateVector, Trajectory, TrajectoryPoint, TrajectoryStats};
pub use window::{fetch_padded_trajectory, ValidityWindow};
