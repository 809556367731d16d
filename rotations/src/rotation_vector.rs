use super::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Rotation axis scaled by the rotation angle in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RotationVector(Vector3<f64>);

impl RotationVector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Vector3::new(x, y, z))
    }

    pub fn get_value(&self) -> Vector3<f64> {
        self.0
    }

    /// Rotation angle, the magnitude of the vector.
    pub fn angle(&self) -> f64 {
        self.0.norm()
    }
}

impl From<Vector3<f64>> for RotationVector {
    fn from(value: Vector3<f64>) -> Self {
        Self(value)
    }
}

impl From<&AxisAngle> for RotationVector {
    fn from(axis_angle: &AxisAngle) -> Self {
        Self(axis_angle.axis * axis_angle.angle)
    }
}

impl From<&UnitQuaternion> for RotationVector {
    fn from(quaternion: &UnitQuaternion) -> Self {
        RotationVector::from(&AxisAngle::from(quaternion))
    }
}
