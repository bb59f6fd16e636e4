use nalgebra::{Unit, Vector3};

use crate::constants::EPS;
use crate::errors::HeliopathError;

/// Estimate the unit normal of an orbit's plane from sampled positions.
///
/// Three samples spaced roughly a quarter and half revolution apart are taken
/// from the input (indices 0, n/4, n/2), keeping the triangle wide enough to
/// avoid near-collinear instability. The normal is `(r2 − r1) × (r3 − r1)`,
/// normalized, with its sign fixed by the right-hand rule over the three
/// points in input order.
///
/// Argument
/// --------
/// * `samples`: ≥3 ordered positions from one orbit (AU)
///
/// Return
/// ------
/// * The unit plane normal, or [`HeliopathError::NotEnoughOrbitSamples`] /
///   [`HeliopathError::DegenerateOrbitGeometry`] when the samples cannot
///   define a plane. A degenerate cross product is reported, never divided.
pub fn plane_normal(samples: &[Vector3<f64>]) -> Result<Unit<Vector3<f64>>, HeliopathError> {
    if samples.len() < 3 {
        return Err(HeliopathError::NotEnoughOrbitSamples {
            needed: 3,
            got: samples.len(),
        });
    }

    let (r1, r2, r3) = spread_samples(samples);
    let u = r2 - r1;
    let v = r3 - r1;
    let normal = u.cross(&v);

    // Scale-invariant degeneracy test: a moon orbit a few 1e-4 AU across must
    // not read as collinear just because its cross product is small in
    // absolute terms.
    let scale = u.norm() * v.norm();
    if scale <= 0.0 {
        return Err(HeliopathError::DegenerateOrbitGeometry);
    }

    Unit::try_new(normal, EPS * scale).ok_or(HeliopathError::DegenerateOrbitGeometry)
}

/// Pick three well-separated samples: the first, one a quarter of the way
/// through, and one halfway through. Short inputs fall back to the first
/// three points.
fn spread_samples(samples: &[Vector3<f64>]) -> (Vector3<f64>, Vector3<f64>, Vector3<f64>) {
    let n = samples.len();
    let second = (n / 4).max(1);
    let third = (n / 2).max(second + 1);
    (samples[0], samples[second], samples[third])
}
