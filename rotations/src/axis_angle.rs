use super::*;
use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Axis substituted whenever the rotation axis is undefined.
pub const DEFAULT_AXIS: Vector3<f64> = Vector3::new(1.0, 0.0, 0.0);

/// Input axes with a squared norm below this are treated as zero.
pub const AXIS_EPSILON_SQUARED: f64 = 1e-3;

/// Quaternion vector parts shorter than this carry no axis information.
pub const VECTOR_PART_EPSILON: f64 = 1e-12;

/// Euler principal angle and axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAngle {
    /// Rotation angle in radians.
    pub angle: f64,
    /// Unit rotation axis.
    pub axis: Vector3<f64>,
}

impl AxisAngle {
    pub const IDENTITY: Self = Self { angle: 0.0, axis: DEFAULT_AXIS };

    /// Creates an angle-axis pair, normalizing the axis.
    /// An axis too short to be normalized is replaced with `DEFAULT_AXIS`.
    /// A non-finite axis is kept as is and rejected by the quaternion conversion.
    pub fn new(angle: f64, axis: Vector3<f64>) -> Self {
        if axis.norm_squared() < AXIS_EPSILON_SQUARED {
            debug!("axis {:?} too short to normalize, using default axis", axis.as_slice());
            return Self { angle, axis: DEFAULT_AXIS };
        }
        // scale by the largest component first so the norm cannot overflow
        let scaled = axis / axis.amax();
        Self { angle, axis: scaled.normalize() }
    }
}

impl Default for AxisAngle {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<&UnitQuaternion> for AxisAngle {
    /// Angle in [0, 2pi), axis is the normalized vector part.
    /// `2 * atan2(|v|, w)` equals `2 * acos(w)` for a unit quaternion
    /// but stays accurate for small angles.
    fn from(quaternion: &UnitQuaternion) -> Self {
        let q = quaternion.get_value();
        let v = q.vector();
        let norm = v.norm();
        let angle = (2.0 * norm.atan2(q.w)) % TAU;

        if norm < VECTOR_PART_EPSILON {
            return Self { angle, axis: DEFAULT_AXIS };
        }
        Self { angle, axis: v / norm }
    }
}
