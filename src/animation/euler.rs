//! Euler angle helpers for authored rotations.
//!
//! Keyframe data stores rotations as `[x, y, z]` Euler angles in radians,
//! applied as intrinsic rotations about X, then Y, then Z. Tracks store
//! quaternions.

use glam::{Quat, Vec3};

/// Converts intrinsic XYZ Euler angles (radians) to a unit quaternion.
///
/// `[0, 0, 0]` maps to exactly [`Quat::IDENTITY`].
#[inline]
#[must_use]
pub fn euler_to_quat(angles: Vec3) -> Quat {
    let q = Quat::from_rotation_x(angles.x)
        * Quat::from_rotation_y(angles.y)
        * Quat::from_rotation_z(angles.z);
    q.normalize()
}

/// Inverse of [`euler_to_quat`].
#[must_use]
pub fn quat_to_euler(q: Quat) -> Vec3 {
    let (x, y, z) = q.to_euler(glam::EulerRot::XYZ);
    Vec3::new(x, y, z)
}

/// Negates samples so each one lies on the same hemisphere as its
/// predecessor. Rotations are unchanged; only the sign of the encoding flips.
pub fn align_hemispheres(samples: &mut [Quat]) {
    for i in 1..samples.len() {
        if samples[i - 1].dot(samples[i]) < 0.0 {
            samples[i] = -samples[i];
        }
    }
}
