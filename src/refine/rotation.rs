use nalgebra::{Rotation3, Unit, Vector3};

use crate::constants::{Radian, EPS};

/// Minimal rotation mapping one orbit-plane normal onto another.
///
/// The identity case is an explicit variant rather than a zero-angle rotation
/// about an arbitrary axis: when the cross product of the normals is near
/// zero there is no well-defined axis to report. This also covers opposite
/// normals, since a flipped normal spans the same plane and no plane
/// alignment is needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaneCorrection {
    /// The planes already coincide.
    Identity,
    /// Rotate by `angle` about `axis` to carry the source normal onto the
    /// target normal.
    Rotation {
        axis: Unit<Vector3<f64>>,
        angle: Radian,
    },
}

impl PlaneCorrection {
    /// Solve the minimal axis–angle rotation from `from` onto `to`.
    ///
    /// `axis = normalize(from × to)`, `angle = arccos(clamp(from · to, −1, 1))`.
    pub fn between(from: &Unit<Vector3<f64>>, to: &Unit<Vector3<f64>>) -> Self {
        let cross = from.cross(to);
        match Unit::try_new(cross, EPS) {
            None => PlaneCorrection::Identity,
            Some(axis) => {
                let angle = from.dot(to).clamp(-1.0, 1.0).acos();
                PlaneCorrection::Rotation { axis, angle }
            }
        }
    }

    /// The rotation as a matrix operator; identity for the identity marker.
    pub fn to_rotation(&self) -> Rotation3<f64> {
        match self {
            PlaneCorrection::Identity => Rotation3::identity(),
            PlaneCorrection::Rotation { axis, angle } => Rotation3::from_axis_angle(axis, *angle),
        }
    }

    /// Apply the correction to a vector.
    pub fn apply(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.to_rotation() * v
    }

    /// Rotation angle in radians; zero for the identity marker.
    pub fn angle(&self) -> Radian {
        match self {
            PlaneCorrection::Identity => 0.0,
            PlaneCorrection::Rotation { angle, .. } => *angle,
        }
    }
}
