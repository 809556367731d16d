pub mod axis_angle;
pub mod euler_angles;
pub mod quaternion;
pub mod rotation_matrix;
pub mod rotation_vector;
pub mod shared;
pub mod state;

use axis_angle::AxisAngle;
use euler_angles::EulerAngles;
use nalgebra::Vector3;
use quaternion::{Quaternion, QuaternionErrors, UnitQuaternion};
use rotation_matrix::{RotationMatrix, RotationMatrixError};
use rotation_vector::RotationVector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod prelude {
    pub use crate::axis_angle::*;
    pub use crate::euler_angles::*;
    pub use crate::quaternion::*;
    pub use crate::rotation_matrix::*;
    pub use crate::rotation_vector::*;
    pub use crate::shared::*;
    pub use crate::state::*;
    pub use crate::{Rotation, RotationErrors, RotationTrait};
}

/// Errors raised when an input cannot be turned into a valid rotation.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum RotationErrors {
    #[error("{0}")]
    Quaternion(#[from] QuaternionErrors),
    #[error("{0}")]
    RotationMatrix(#[from] RotationMatrixError),
}

/// Trait defining rotation and transformation operations.
pub trait RotationTrait {
    /// Rotates a vector by the rotation (active rotation, "alibi").
    ///
    /// # Arguments
    ///
    /// * `v` - The vector to be rotated.
    ///
    /// # Returns
    ///
    /// The rotated vector.
    fn rotate(&self, v: &Vector3<f64>) -> Vector3<f64>;

    /// Transforms a vector by the rotation (passive rotation, "alias").
    /// This is the inverse of `rotate`.
    ///
    /// # Arguments
    ///
    /// * `v` - The vector to be transformed.
    ///
    /// # Returns
    ///
    /// The transformed vector.
    fn transform(&self, v: &Vector3<f64>) -> Vector3<f64>;

    fn identity() -> Self;
}

/// Any one of the five supported rotation representations, as supplied by a caller.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Rotation {
    Quaternion(Quaternion),
    EulerAngles(EulerAngles),
    AxisAngle(AxisAngle),
    RotationVector(RotationVector),
    RotationMatrix(RotationMatrix),
}

impl Default for Rotation {
    /// Provides the default value for a rotation, which is an identity quaternion.
    fn default() -> Self {
        Rotation::Quaternion(Quaternion::IDENTITY)
    }
}

impl From<Quaternion> for Rotation {
    fn from(value: Quaternion) -> Self {
        Rotation::Quaternion(value)
    }
}

impl From<EulerAngles> for Rotation {
    fn from(value: EulerAngles) -> Self {
        Rotation::EulerAngles(value)
    }
}

impl From<AxisAngle> for Rotation {
    fn from(value: AxisAngle) -> Self {
        Rotation::AxisAngle(value)
    }
}

impl From<RotationVector> for Rotation {
    fn from(value: RotationVector) -> Self {
        Rotation::RotationVector(value)
    }
}

impl From<RotationMatrix> for Rotation {
    fn from(value: RotationMatrix) -> Self {
        Rotation::RotationMatrix(value)
    }
}

impl TryFrom<&Rotation> for UnitQuaternion {
    type Error = QuaternionErrors;

    /// Converts any representation to the canonical unit quaternion.
    fn try_from(rotation: &Rotation) -> Result<Self, Self::Error> {
        match rotation {
            Rotation::Quaternion(q) => UnitQuaternion::try_from(q),
            Rotation::EulerAngles(v) => UnitQuaternion::try_from(v),
            Rotation::AxisAngle(v) => UnitQuaternion::try_from(v),
            Rotation::RotationVector(v) => UnitQuaternion::try_from(v),
            Rotation::RotationMatrix(v) => UnitQuaternion::try_from(v),
        }
    }
}

/// Wraps an angle in radians into (-pi, pi].
pub(crate) fn wrap_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    let angle = angle % TAU;
    if angle > PI {
        angle - TAU
    } else if angle <= -PI {
        angle + TAU
    } else {
        angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};
    const TOL: f64 = 1e-12;

    #[test]
    fn test_wrap_angle() {
        assert_abs_diff_eq!(wrap_angle(0.0), 0.0, epsilon = TOL);
        assert_abs_diff_eq!(wrap_angle(PI), PI, epsilon = TOL);
        assert_abs_diff_eq!(wrap_angle(-PI), PI, epsilon = TOL);
        assert_abs_diff_eq!(wrap_angle(3.0 * FRAC_PI_2), -FRAC_PI_2, epsilon = TOL);
        assert_abs_diff_eq!(wrap_angle(-3.0 * FRAC_PI_2), FRAC_PI_2, epsilon = TOL);
    }

    #[test]
    fn test_rotation_dispatch_agrees() {
        let from_euler =
            UnitQuaternion::try_from(&Rotation::from(EulerAngles::new(FRAC_PI_2, 0.0, 0.0)))
                .unwrap();
        let from_axis_angle = UnitQuaternion::try_from(&Rotation::from(AxisAngle::new(
            FRAC_PI_2,
            Vector3::new(1.0, 0.0, 0.0),
        )))
        .unwrap();
        let from_vector = UnitQuaternion::try_from(&Rotation::from(RotationVector::new(
            FRAC_PI_2, 0.0, 0.0,
        )))
        .unwrap();

        for q in [from_axis_angle, from_vector] {
            assert_abs_diff_eq!(q.w(), from_euler.w(), epsilon = TOL);
            assert_abs_diff_eq!(q.x(), from_euler.x(), epsilon = TOL);
            assert_abs_diff_eq!(q.y(), from_euler.y(), epsilon = TOL);
            assert_abs_diff_eq!(q.z(), from_euler.z(), epsilon = TOL);
        }
    }

    #[test]
    fn test_default_rotation_is_identity() {
        let q = UnitQuaternion::try_from(&Rotation::default()).unwrap();
        assert_eq!(q, UnitQuaternion::IDENTITY);
    }
}
