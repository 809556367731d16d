use super::*;
use log::debug;
use nalgebra::{Matrix3, Vector3};
use rand::{Rng, rng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Neg;
use thiserror::Error;

/// A rotation vector shorter than this is treated as the zero rotation.
pub const ZERO_ROTATION_EPSILON: f64 = 1e-12;

/// A struct representing a quaternion for 3D rotations, scalar part first.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Errors that can occur when creating a `UnitQuaternion`.
#[derive(Debug, Clone, Error, Copy, PartialEq)]
pub enum QuaternionErrors {
    #[error("quaternion components must be finite")]
    NonFinite,
    #[error("got zero magnitude quaternion")]
    ZeroMagnitude,
}

impl Quaternion {
    /// The quaternion representing no rotation.
    pub const IDENTITY: Self = Self { w: 1.0, x: 0.0, y: 0.0, z: 0.0 };

    /// Creates a new `Quaternion`. No normalization is performed.
    ///
    /// # Arguments
    ///
    /// * `w` - The scalar component of the quaternion.
    /// * `x` - The x component of the quaternion.
    /// * `y` - The y component of the quaternion.
    /// * `z` - The z component of the quaternion.
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    // Dot product of two quaternions
    pub fn dot(&self, other: &Quaternion) -> f64 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn mag(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// The vector (imaginary) part.
    pub fn vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn is_finite(&self) -> bool {
        self.w.is_finite() && self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Scales the quaternion to unit magnitude.
    /// Components are first divided by the largest one, so any finite input
    /// normalizes without overflow.
    ///
    /// # Returns
    ///
    /// A `Result` which is `Ok` containing the normalized quaternion,
    /// or an `Err` if a component is not finite or the magnitude is zero.
    pub fn normalize(&self) -> Result<Self, QuaternionErrors> {
        if !self.is_finite() {
            return Err(QuaternionErrors::NonFinite);
        }
        let scale = self.w.abs().max(self.x.abs()).max(self.y.abs()).max(self.z.abs());
        if scale == 0.0 {
            return Err(QuaternionErrors::ZeroMagnitude);
        }
        let scaled = Quaternion::new(
            self.w / scale,
            self.x / scale,
            self.y / scale,
            self.z / scale,
        );
        // scaled magnitude is in [1, 2]
        let mag = scaled.mag();
        if scale * mag < f64::EPSILON {
            return Err(QuaternionErrors::ZeroMagnitude);
        }
        Ok(Quaternion::new(
            scaled.w / mag,
            scaled.x / mag,
            scaled.y / mag,
            scaled.z / mag,
        ))
    }
}

impl Default for Quaternion {
    /// The identity quaternion.
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}

impl fmt::Debug for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Quaternion ")?;
        writeln!(f, "   w: {: >10.6}", self.w)?;
        writeln!(f, "   x: {: >10.6}", self.x)?;
        writeln!(f, "   y: {: >10.6}", self.y)?;
        writeln!(f, "   z: {: >10.6}", self.z)
    }
}

/// A quaternion of unit magnitude. Only constructible through normalization,
/// so every value held here is a valid rotation. Deserialization goes through
/// the same normalization.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(try_from = "Quaternion", into = "Quaternion")]
pub struct UnitQuaternion(Quaternion);

impl UnitQuaternion {
    pub const IDENTITY: Self = Self(Quaternion::IDENTITY);

    /// Creates a unit quaternion, normalizing the input.
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Result<Self, QuaternionErrors> {
        Ok(Self(Quaternion::new(w, x, y, z).normalize()?))
    }

    /// Creates a random unit quaternion, uniformly distributed over orientations.
    pub fn rand() -> Self {
        let mut rng = rng();
        loop {
            let q = Quaternion::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            );
            // rejection sampling inside the unit ball keeps the distribution uniform on S3
            let mag_squared = q.dot(&q);
            if mag_squared > 1.0 || mag_squared < 1e-6 {
                continue;
            }
            if let Ok(q) = q.normalize() {
                return Self(q);
            }
        }
    }

    /// Returns the equivalent quaternion with a non-negative scalar part.
    pub fn canonical(&self) -> Self {
        if self.0.w < 0.0 { -*self } else { *self }
    }

    pub fn get_value(&self) -> Quaternion {
        self.0
    }

    pub fn w(&self) -> f64 {
        self.0.w
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }
}

impl Neg for UnitQuaternion {
    type Output = Self;

    fn neg(self) -> Self {
        // negation preserves the magnitude, no need to renormalize
        Self(-self.0)
    }
}

impl TryFrom<&Quaternion> for UnitQuaternion {
    type Error = QuaternionErrors;

    fn try_from(value: &Quaternion) -> Result<Self, QuaternionErrors> {
        let q = value.normalize()?;
        if (value.mag() - 1.0).abs() > 1e-9 {
            debug!("normalized non-unit quaternion of magnitude {}", value.mag());
        }
        Ok(Self(q))
    }
}

impl TryFrom<Quaternion> for UnitQuaternion {
    type Error = QuaternionErrors;

    fn try_from(value: Quaternion) -> Result<Self, QuaternionErrors> {
        UnitQuaternion::try_from(&value)
    }
}

impl From<&UnitQuaternion> for Quaternion {
    fn from(value: &UnitQuaternion) -> Self {
        value.0
    }
}

impl From<UnitQuaternion> for Quaternion {
    fn from(value: UnitQuaternion) -> Self {
        value.0
    }
}

impl TryFrom<&EulerAngles> for UnitQuaternion {
    type Error = QuaternionErrors;

    /// Composes the half-angle rotations about X (roll), then Y (pitch),
    /// then Z (yaw), i.e. `q = qz(yaw) * qy(pitch) * qx(roll)`.
    /// This is the exact inverse of the extraction in `EulerAngles::from`.
    fn try_from(euler_angles: &EulerAngles) -> Result<Self, QuaternionErrors> {
        let (sr, cr) = (euler_angles.roll / 2.0).sin_cos();
        let (sp, cp) = (euler_angles.pitch / 2.0).sin_cos();
        let (sy, cy) = (euler_angles.yaw / 2.0).sin_cos();

        UnitQuaternion::new(
            cr * cp * cy + sr * sp * sy,
            sr * cp * cy - cr * sp * sy,
            cr * sp * cy + sr * cp * sy,
            cr * cp * sy - sr * sp * cy,
        )
    }
}

impl TryFrom<&AxisAngle> for UnitQuaternion {
    type Error = QuaternionErrors;

    fn try_from(axis_angle: &AxisAngle) -> Result<Self, QuaternionErrors> {
        // the fields are public, so the axis may not have gone through `AxisAngle::new`
        let axis_angle = AxisAngle::new(axis_angle.angle, axis_angle.axis);
        let (s, c) = (axis_angle.angle / 2.0).sin_cos();
        UnitQuaternion::new(
            c,
            s * axis_angle.axis[0],
            s * axis_angle.axis[1],
            s * axis_angle.axis[2],
        )
    }
}

impl TryFrom<&RotationVector> for UnitQuaternion {
    type Error = QuaternionErrors;

    fn try_from(rotation_vector: &RotationVector) -> Result<Self, QuaternionErrors> {
        let v = rotation_vector.get_value();
        let angle = v.norm();
        if !angle.is_finite() {
            return Err(QuaternionErrors::NonFinite);
        }
        // sin(angle/2)/angle is undefined at zero, the zero vector is no rotation
        if angle < ZERO_ROTATION_EPSILON {
            debug!("rotation vector magnitude {angle:e} treated as identity");
            return Ok(UnitQuaternion::IDENTITY);
        }
        let (s, c) = (angle / 2.0).sin_cos();
        let s = s / angle;
        UnitQuaternion::new(c, s * v[0], s * v[1], s * v[2])
    }
}

impl TryFrom<&RotationMatrix> for UnitQuaternion {
    type Error = QuaternionErrors;

    /// Extracts the quaternion from a rotation matrix.
    /// The branch is selected by the largest of the trace and the diagonal elements,
    /// so the square root argument is always at least 1 and the divisor never
    /// approaches zero, including for rotations near 180 degrees.
    fn try_from(matrix: &RotationMatrix) -> Result<Self, QuaternionErrors> {
        let m: Matrix3<f64> = matrix.get_value();
        let trace = m[(0, 0)] + m[(1, 1)] + m[(2, 2)];

        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Quaternion::new(
                0.25 * s,
                (m[(2, 1)] - m[(1, 2)]) / s,
                (m[(0, 2)] - m[(2, 0)]) / s,
                (m[(1, 0)] - m[(0, 1)]) / s,
            )
        } else if m[(0, 0)] > m[(1, 1)] && m[(0, 0)] > m[(2, 2)] {
            debug!("matrix trace {trace} not positive, extracting from x diagonal");
            let s = (1.0 + m[(0, 0)] - m[(1, 1)] - m[(2, 2)]).sqrt() * 2.0;
            Quaternion::new(
                (m[(2, 1)] - m[(1, 2)]) / s,
                0.25 * s,
                (m[(0, 1)] + m[(1, 0)]) / s,
                (m[(0, 2)] + m[(2, 0)]) / s,
            )
        } else if m[(1, 1)] > m[(2, 2)] {
            debug!("matrix trace {trace} not positive, extracting from y diagonal");
            let s = (1.0 + m[(1, 1)] - m[(0, 0)] - m[(2, 2)]).sqrt() * 2.0;
            Quaternion::new(
                (m[(0, 2)] - m[(2, 0)]) / s,
                (m[(0, 1)] + m[(1, 0)]) / s,
                0.25 * s,
                (m[(1, 2)] + m[(2, 1)]) / s,
            )
        } else {
            debug!("matrix trace {trace} not positive, extracting from z diagonal");
            let s = (1.0 + m[(2, 2)] - m[(0, 0)] - m[(1, 1)]).sqrt() * 2.0;
            Quaternion::new(
                (m[(1, 0)] - m[(0, 1)]) / s,
                (m[(0, 2)] + m[(2, 0)]) / s,
                (m[(1, 2)] + m[(2, 1)]) / s,
                0.25 * s,
            )
        };

        Ok(UnitQuaternion::try_from(&q)?.canonical())
    }
}

impl RotationTrait for UnitQuaternion {
    /// Rotates a vector by the quaternion, v' = q v q*.
    /// aka Active Rotation or "Alibi"
    ///
    /// # Arguments
    ///
    /// * `v` - The vector to be rotated.
    ///
    /// # Returns
    ///
    /// The rotated vector.
    fn rotate(&self, v: &Vector3<f64>) -> Vector3<f64> {
        let u = self.0.vector();
        let t = 2.0 * u.cross(v);
        v + self.0.w * t + u.cross(&t)
    }

    /// Transforms a vector by the quaternion, v' = q* v q.
    /// aka Passive Rotation or "Alias"
    ///
    /// # Arguments
    ///
    /// * `v` - The vector to be transformed.
    ///
    /// # Returns
    ///
    /// The transformed vector.
    fn transform(&self, v: &Vector3<f64>) -> Vector3<f64> {
        let u = -self.0.vector();
        let t = 2.0 * u.cross(v);
        v + self.0.w * t + u.cross(&t)
    }

    fn identity() -> Self {
        Self::IDENTITY
    }
}
