use super::*;
use log::trace;
use nalgebra::Vector3;
use serde::Serialize;

/// One rotation viewed through all five representations.
///
/// The unit quaternion is the single source of truth. Every setter replaces it
/// and recomputes the derived views before returning, and a rejected input
/// leaves the state untouched, so readers only ever see a consistent set.
/// All angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RotationState {
    quaternion: UnitQuaternion,
    euler_angles: EulerAngles,
    axis_angle: AxisAngle,
    rotation_vector: RotationVector,
    rotation_matrix: RotationMatrix,
}

impl Default for RotationState {
    fn default() -> Self {
        Self::new()
    }
}

impl From<UnitQuaternion> for RotationState {
    fn from(quaternion: UnitQuaternion) -> Self {
        let axis_angle = AxisAngle::from(&quaternion);
        Self {
            quaternion,
            euler_angles: EulerAngles::from(&quaternion),
            axis_angle,
            rotation_vector: RotationVector::from(&axis_angle),
            rotation_matrix: RotationMatrix::from(&quaternion),
        }
    }
}

impl RotationState {
    /// Creates the identity rotation.
    pub fn new() -> Self {
        Self::from(UnitQuaternion::IDENTITY)
    }

    fn commit(&mut self, quaternion: UnitQuaternion) {
        *self = Self::from(quaternion);
        trace!("rotation set to {:?}", self.quaternion);
    }

    /// Resets to the identity rotation.
    pub fn reset(&mut self) {
        self.commit(UnitQuaternion::IDENTITY);
    }

    /// Sets the rotation from any representation.
    pub fn set(&mut self, rotation: &Rotation) -> Result<(), RotationErrors> {
        let quaternion = UnitQuaternion::try_from(rotation)?;
        self.commit(quaternion);
        Ok(())
    }

    /// Sets the rotation from a quaternion, normalizing it first.
    /// Zero magnitude or non-finite input is rejected.
    pub fn set_from_quaternion(
        &mut self,
        w: f64,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<(), RotationErrors> {
        self.set(&Rotation::Quaternion(Quaternion::new(w, x, y, z)))
    }

    /// Sets the rotation from an angle about an axis.
    /// An axis too short to normalize is replaced with `DEFAULT_AXIS`.
    pub fn set_from_angle_axis(
        &mut self,
        angle: f64,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<(), RotationErrors> {
        self.set(&Rotation::AxisAngle(AxisAngle::new(angle, Vector3::new(x, y, z))))
    }

    /// Sets the rotation from roll, pitch and yaw.
    pub fn set_from_euler_angles(
        &mut self,
        roll: f64,
        pitch: f64,
        yaw: f64,
    ) -> Result<(), RotationErrors> {
        self.set(&Rotation::EulerAngles(EulerAngles::new(roll, pitch, yaw)))
    }

    /// Sets the rotation from a rotation vector. The zero vector is the identity.
    pub fn set_from_rotation_vector(
        &mut self,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<(), RotationErrors> {
        self.set(&Rotation::RotationVector(RotationVector::new(x, y, z)))
    }

    /// Sets the rotation from a validated rotation matrix.
    pub fn set_from_rotation_matrix(
        &mut self,
        matrix: &RotationMatrix,
    ) -> Result<(), RotationErrors> {
        self.set(&Rotation::RotationMatrix(*matrix))
    }

    /// Sets the rotation from nine row-major elements, validating them with
    /// `DEFAULT_TOLERANCE`.
    #[allow(clippy::too_many_arguments)]
    pub fn set_from_matrix_elements(
        &mut self,
        e11: f64,
        e12: f64,
        e13: f64,
        e21: f64,
        e22: f64,
        e23: f64,
        e31: f64,
        e32: f64,
        e33: f64,
    ) -> Result<(), RotationErrors> {
        let matrix = RotationMatrix::new(e11, e12, e13, e21, e22, e23, e31, e32, e33)?;
        self.set_from_rotation_matrix(&matrix)
    }

    pub fn quaternion(&self) -> UnitQuaternion {
        self.quaternion
    }

    pub fn euler_angles(&self) -> EulerAngles {
        self.euler_angles
    }

    pub fn angle_axis(&self) -> AxisAngle {
        self.axis_angle
    }

    pub fn rotation_vector(&self) -> RotationVector {
        self.rotation_vector
    }

    pub fn rotation_matrix(&self) -> RotationMatrix {
        self.rotation_matrix
    }
}
