//! # Constants and type definitions for heliopath
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `heliopath` library.
//!
//! ## Overview
//!
//! - Astronomical constants and unit conversions (AU ↔ km, days ↔ seconds)
//! - Core type aliases used across the crate
//! - Identifiers for solar system bodies as the ephemeris service understands them
//!
//! These definitions are used by both the trajectory acquisition and the orbit
//! refinement modules.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Numerical epsilon used for floating-point comparisons
pub const EPS: f64 = 1e-6;

/// Radius of the fallback circular orbit, in astronomical units
pub const DEFAULT_ORBIT_RADIUS_AU: f64 = 1.0;

/// Coverage fraction below which a fetched trajectory is flagged as suspect
pub const LOW_COVERAGE_FRACTION: f64 = 0.5;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Julian Date (days)
pub type JD = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in astronomical units
pub type Au = f64;
/// Rate in astronomical units per day
pub type AuPerDay = f64;

// -------------------------------------------------------------------------------------------------
// Identifiers
// -------------------------------------------------------------------------------------------------

/// Identifier of a solar system body as accepted by the ephemeris service.
///
/// This can be:
/// - A numeric designation (e.g. `Int(499)` for Mars, `Int(-48)` for a spacecraft)
/// - A name or provisional designation (e.g. `"Phobos"`, `"2000 SG344"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BodyId {
    /// Integer-based designation (major bodies are positive, spacecraft negative)
    Int(i32),
    /// Name-based designation
    Name(String),
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyId::Int(n) => write!(f, "{n}"),
            BodyId::Name(s) => write!(f, "{s}"),
        }
    }
}

impl From<i32> for BodyId {
    fn from(n: i32) -> Self {
        BodyId::Int(n)
    }
}

impl From<String> for BodyId {
    fn from(s: String) -> Self {
        BodyId::Name(s)
    }
}

impl From<&str> for BodyId {
    fn from(s: &str) -> Self {
        BodyId::Name(s.to_string())
    }
}

impl std::str::FromStr for BodyId {
    type Err = std::num::ParseIntError;

    /// Try to parse a `BodyId` from a string.
    /// - Pure digits (optionally signed) → `Int(i32)`
    /// - Otherwise → `Name(String)`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i32>() {
            Ok(n) => Ok(BodyId::Int(n)),
            Err(e) => {
                let digits_only = s
                    .strip_prefix('-')
                    .unwrap_or(s)
                    .chars()
                    .all(|c| c.is_ascii_digit());
                if digits_only {
                    Err(e)
                } else {
                    Ok(BodyId::Name(s.to_string()))
                }
            }
        }
    }
}
