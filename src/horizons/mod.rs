//! # Horizons vector-table queries
//!
//! Thin layer over the JPL Horizons **file API**: building batch queries and
//! decoding the text responses into typed records.
//!
//! Modules
//! -----------------
//! * [`query`](crate::horizons::query) – Batched `TLIST` and `START/STOP/STEP` query bodies
//!   in the service's `!$$SOF` batch-file syntax.
//! * [`response`](crate::horizons::response) – `$$SOE…$$EOE` block extraction and CSV decoding
//!   into [`VectorRecord`](crate::horizons::response::VectorRecord)s.
//!
//! Units & frames
//! -----------------
//! Queries pin `OUT_UNITS=AU-D` and `REF_PLANE=ECLIPTIC`, so every decoded record
//! is in astronomical units and AU/day on the ecliptic J2000 frame. Callers never
//! infer units from magnitudes.

pub mod query;
pub mod response;

pub use response::{parse_vector_table, VectorRecord};
