use super::*;
use log::debug;
use serde::{Deserialize, Serialize};

/// `|sin(pitch)|` at or above this is treated as gimbal lock.
pub const GIMBAL_LOCK_THRESHOLD: f64 = 1.0 - 1e-12;

/// Tait-Bryan angles in radians.
/// The rotation is roll about the fixed X axis, then pitch about the fixed Y axis,
/// then yaw about the fixed Z axis, so `R = Rz(yaw) * Ry(pitch) * Rx(roll)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EulerAngles {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl EulerAngles {
    pub fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    pub fn is_gimbal_locked(&self) -> bool {
        self.pitch.sin().abs() >= GIMBAL_LOCK_THRESHOLD
    }
}

impl From<&UnitQuaternion> for EulerAngles {
    /// Extracts roll, pitch and yaw from a unit quaternion.
    ///
    /// The asin argument is clamped to [-1, 1] against rounding error.
    /// At gimbal lock only `roll - yaw` (pitch = +90 deg) or `roll + yaw`
    /// (pitch = -90 deg) is observable, in that case yaw is reported as 0
    /// and the whole rotation about the locked axis is put in roll.
    fn from(quaternion: &UnitQuaternion) -> Self {
        let q = quaternion.get_value();
        let sin_pitch = (2.0 * (q.w * q.y - q.z * q.x)).clamp(-1.0, 1.0);
        let pitch = sin_pitch.asin();

        if sin_pitch.abs() >= GIMBAL_LOCK_THRESHOLD {
            debug!("gimbal lock at pitch {pitch}, reporting yaw as 0");
            let roll = wrap_angle(2.0 * q.x.atan2(q.w));
            return EulerAngles::new(roll, pitch, 0.0);
        }

        let roll = (2.0 * (q.w * q.x + q.y * q.z)).atan2(1.0 - 2.0 * (q.x * q.x + q.y * q.y));
        let yaw = (2.0 * (q.w * q.z + q.x * q.y)).atan2(1.0 - 2.0 * (q.y * q.y + q.z * q.z));
        EulerAngles::new(roll, pitch, yaw)
    }
}
