//! # Orbit refinement
//!
//! Reconciles idealized two-body orbits with the orbital plane observed in
//! actual ephemeris data.
//!
//! Modules
//! -----------------
//! * [`plane`](crate::refine::plane) – Unit plane-normal estimation from sampled positions.
//! * [`rotation`](crate::refine::rotation) – Minimal axis–angle rotation between two plane
//!   normals, with an explicit identity marker for parallel planes.
//! * [`engine`](crate::refine::engine) – The [`RefinementEngine`](crate::refine::engine::RefinementEngine):
//!   idealized-orbit registry, actual-sample source, per-pair memoized corrections, and the
//!   REFINED → IDEALIZED → DEFAULT fallback chain.
//!
//! Every tier returns AU positions over one full revolution; callers never
//! special-case units or quality by tier.

pub mod engine;
pub mod plane;
pub mod rotation;

pub use engine::{ActualSampleSource, OrbitFn, OrbitRegistry, RefinedOrbit, RefinementEngine, RefinementTier};
pub use plane::plane_normal;
pub use rotation::PlaneCorrection;
