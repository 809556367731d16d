use super::*;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest accepted element of `R^T R - I` for user supplied matrices.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// A struct representing a 3x3 rotation matrix.
/// Deserialized matrices are validated against `DEFAULT_TOLERANCE`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Matrix3<f64>", into = "Matrix3<f64>")]
pub struct RotationMatrix(Matrix3<f64>);

/// Errors that can occur when creating a `RotationMatrix`.
#[derive(Debug, Copy, Clone, Error, PartialEq)]
pub enum RotationMatrixError {
    #[error("rotation matrix elements must be finite")]
    NonFinite,
    #[error("rotation matrix is not orthonormal, largest |R^T R - I| element is {0:.3e}")]
    NotOrthonormal(f64),
    #[error("rotation matrix determinant is {0:.4}, a rotation must have determinant +1")]
    Reflection(f64),
}

impl RotationMatrix {
    pub const IDENTITY: Self = Self(Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0));

    /// Creates a new `RotationMatrix` from its elements in row-major order,
    /// validated against `DEFAULT_TOLERANCE`.
    ///
    /// # Arguments
    ///
    /// * `e11`, `e12`, `e13` - Elements of the first row.
    /// * `e21`, `e22`, `e23` - Elements of the second row.
    /// * `e31`, `e32`, `e33` - Elements of the third row.
    ///
    /// # Returns
    ///
    /// A `Result` which is `Ok` containing a new `RotationMatrix` if the matrix is a
    /// proper rotation, or an `Err` containing a `RotationMatrixError`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        e11: f64,
        e12: f64,
        e13: f64,
        e21: f64,
        e22: f64,
        e23: f64,
        e31: f64,
        e32: f64,
        e33: f64,
    ) -> Result<Self, RotationMatrixError> {
        Self::with_tolerance(
            Matrix3::new(e11, e12, e13, e21, e22, e23, e31, e32, e33),
            DEFAULT_TOLERANCE,
        )
    }

    /// Validates that `m` is orthonormal within `tolerance` and has a positive determinant.
    pub fn with_tolerance(m: Matrix3<f64>, tolerance: f64) -> Result<Self, RotationMatrixError> {
        if m.iter().any(|e| !e.is_finite()) {
            return Err(RotationMatrixError::NonFinite);
        }

        let error = (m.transpose() * m - Matrix3::identity()).amax();
        if error > tolerance {
            return Err(RotationMatrixError::NotOrthonormal(error));
        }

        let determinant = m.determinant();
        if determinant <= 0.0 {
            return Err(RotationMatrixError::Reflection(determinant));
        }

        Ok(Self(m))
    }

    pub fn get_value(&self) -> Matrix3<f64> {
        self.0
    }
}

impl TryFrom<Matrix3<f64>> for RotationMatrix {
    type Error = RotationMatrixError;

    fn try_from(m: Matrix3<f64>) -> Result<Self, RotationMatrixError> {
        Self::with_tolerance(m, DEFAULT_TOLERANCE)
    }
}

impl From<RotationMatrix> for Matrix3<f64> {
    fn from(value: RotationMatrix) -> Self {
        value.0
    }
}

impl Default for RotationMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<&UnitQuaternion> for RotationMatrix {
    /// Converts a `UnitQuaternion` into the active rotation matrix, so that
    /// `R * v` rotates `v` the same way `q v q*` does.
    ///
    /// # Arguments
    ///
    /// * `q` - The quaternion to be converted.
    ///
    /// # Returns
    ///
    /// A new `RotationMatrix` representing the rotation defined by the quaternion.
    fn from(q: &UnitQuaternion) -> Self {
        let (w, x, y, z) = (q.w(), q.x(), q.y(), q.z());

        let e11 = 1.0 - 2.0 * y * y - 2.0 * z * z;
        let e12 = 2.0 * x * y - 2.0 * w * z;
        let e13 = 2.0 * x * z + 2.0 * w * y;
        let e21 = 2.0 * x * y + 2.0 * w * z;
        let e22 = 1.0 - 2.0 * x * x - 2.0 * z * z;
        let e23 = 2.0 * y * z - 2.0 * w * x;
        let e31 = 2.0 * x * z - 2.0 * w * y;
        let e32 = 2.0 * y * z + 2.0 * w * x;
        let e33 = 1.0 - 2.0 * x * x - 2.0 * y * y;

        // unit quaternion in, orthonormal matrix out, no validation needed
        RotationMatrix(Matrix3::new(e11, e12, e13, e21, e22, e23, e31, e32, e33))
    }
}

impl RotationTrait for RotationMatrix {
    /// Rotates a vector by the rotation matrix.
    ///
    /// # Arguments
    ///
    /// * `v` - The vector to be rotated.
    ///
    /// # Returns
    ///
    /// The rotated vector.
    fn rotate(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.0 * v
    }

    /// Transforms a vector by the transpose of the rotation matrix.
    ///
    /// # Arguments
    ///
    /// * `v` - The vector to be transformed.
    ///
    /// # Returns
    ///
    /// The transformed vector.
    fn transform(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.0.transpose() * v
    }

    /// Creates an identity `RotationMatrix`.
    fn identity() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;
    const TOL: f64 = 1e-12;

    #[test]
    fn test_rotation_matrix_from_roll() {
        let q = UnitQuaternion::try_from(&EulerAngles::new(FRAC_PI_2, 0.0, 0.0)).unwrap();
        let m = RotationMatrix::from(&q);
        let expected = Matrix3::new(1.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 1.0, 0.0);
        assert_abs_diff_eq!(m.get_value(), expected, epsilon = TOL);
    }

    #[test]
    fn test_rotation_matrix_from_yaw() {
        let q = UnitQuaternion::try_from(&EulerAngles::new(0.0, 0.0, FRAC_PI_2)).unwrap();
        let m = RotationMatrix::from(&q);
        let expected = Matrix3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        assert_abs_diff_eq!(m.get_value(), expected, epsilon = TOL);
        assert_abs_diff_eq!(m.rotate(&Vector3::x()), Vector3::y(), epsilon = TOL);
    }

    #[test]
    fn test_rotation_matrix_orthonormal_random() {
        for _ in 0..500 {
            let m = RotationMatrix::from(&UnitQuaternion::rand()).get_value();
            assert_abs_diff_eq!(m.transpose() * m, Matrix3::identity(), epsilon = 1e-12);
            assert_abs_diff_eq!(m.determinant(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rotation_matrix_accepts_within_tolerance() {
        // four decimal places, as typed by a user
        let m = RotationMatrix::new(1.0, 0.0, 0.0, 0.0, 0.7071, -0.7071, 0.0, 0.7071, 0.7071);
        assert!(m.is_ok());
    }

    #[test]
    fn test_rotation_matrix_rejects_non_orthonormal() {
        let m = RotationMatrix::new(2.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        assert!(matches!(m, Err(RotationMatrixError::NotOrthonormal(_))));

        let m = RotationMatrix::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert!(matches!(m, Err(RotationMatrixError::NotOrthonormal(_))));
    }

    #[test]
    fn test_rotation_matrix_rejects_reflection() {
        let m = RotationMatrix::new(-1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        assert!(matches!(m, Err(RotationMatrixError::Reflection(_))));
    }

    #[test]
    fn test_rotation_matrix_rejects_non_finite() {
        let m = RotationMatrix::new(f64::NAN, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        assert_eq!(m, Err(RotationMatrixError::NonFinite));
    }

    #[test]
    fn test_rotation_matrix_custom_tolerance() {
        let m = Matrix3::new(1.0, 0.0, 0.0, 0.0, 0.7071, -0.7071, 0.0, 0.7071, 0.7071);
        assert!(RotationMatrix::with_tolerance(m, 1e-9).is_err());
        assert!(RotationMatrix::with_tolerance(m, 1e-3).is_ok());
    }

    #[test]
    fn test_rotation_matrix_deserialize_validates() {
        let inversion = ron::to_string(&(-Matrix3::<f64>::identity())).unwrap();
        assert!(ron::from_str::<RotationMatrix>(&inversion).is_err());

        let stretched = ron::to_string(&Matrix3::from_diagonal_element(2.0)).unwrap();
        assert!(ron::from_str::<RotationMatrix>(&stretched).is_err());

        let m = RotationMatrix::from(&UnitQuaternion::rand());
        let text = ron::to_string(&m).unwrap();
        assert_eq!(text, ron::to_string(&m.get_value()).unwrap());
        assert_eq!(ron::from_str::<RotationMatrix>(&text).unwrap(), m);
    }
}
