//! Camera pose (position and orientation).

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::FrameError;

/// A camera placement in world space.
///
/// The camera looks down its local -Z axis with +Y up and +X right. Fitting
/// only ever changes `position`; `rotation` is read-only to every solver.
/// Deserialized rotations are normalized; zero-length or non-finite ones are
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPose")]
pub struct CameraPose {
    /// Camera position in world space.
    pub position: Vec3,
    /// Camera orientation in world space.
    pub rotation: Quat,
}

impl CameraPose {
    /// Creates a new pose.
    #[must_use]
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation: rotation.normalize(),
        }
    }

    /// Creates a pose at `position` looking at `target`.
    ///
    /// Falls back to the identity orientation if `target` coincides with
    /// `position`.
    #[must_use]
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let look = target - position;
        if look.length_squared() <= f32::EPSILON {
            return Self::new(position, Quat::IDENTITY);
        }
        // look_at_rh builds world-to-camera; the pose wants camera-to-world.
        let view = Mat4::look_at_rh(position, target, up);
        let (_, rotation, _) = view.inverse().to_scale_rotation_translation();
        Self::new(position, rotation)
    }

    /// Returns the camera's forward direction (local -Z).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Returns the camera's right direction (local +X).
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Returns the camera's up direction (local +Y).
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Maps a world-space point into camera space.
    #[must_use]
    pub fn to_local(&self, point: Vec3) -> Vec3 {
        self.rotation.inverse() * (point - self.position)
    }

    /// Returns the depth of a world-space point along the view direction.
    ///
    /// Positive depth is in front of the camera.
    #[must_use]
    pub fn depth(&self, point: Vec3) -> f32 {
        -self.to_local(point).z
    }

    /// Moves the camera along its own axes.
    pub fn translate_local(&mut self, right: f32, up: f32, forward: f32) {
        self.position += self.right() * right + self.up() * up + self.forward() * forward;
    }

    /// Moves the camera along its forward axis. Negative distances back off.
    pub fn dolly(&mut self, distance: f32) {
        self.position += self.forward() * distance;
    }
}

/// Pose as written in scene files, before the rotation is checked.
#[derive(Deserialize)]
struct RawPose {
    position: Vec3,
    rotation: Quat,
}

impl TryFrom<RawPose> for CameraPose {
    type Error = FrameError;

    fn try_from(raw: RawPose) -> Result<Self, Self::Error> {
        let length = raw.rotation.length();
        if !length.is_finite() || length <= f32::EPSILON {
            return Err(FrameError::InvalidPose(format!(
                "rotation {:?} cannot be normalized",
                raw.rotation
            )));
        }
        if !raw.position.is_finite() {
            return Err(FrameError::InvalidPose(format!(
                "position {:?} is not finite",
                raw.position
            )));
        }
        Ok(Self::new(raw.position, raw.rotation))
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_basis() {
        let pose = CameraPose::default();
        assert_eq!(pose.forward(), Vec3::NEG_Z);
        assert_eq!(pose.right(), Vec3::X);
        assert_eq!(pose.up(), Vec3::Y);
    }

    #[test]
    fn test_depth_in_front() {
        let pose = CameraPose::default();
        assert!((pose.depth(Vec3::new(0.0, 0.0, -10.0)) - 10.0).abs() < 1e-6);
        assert!(pose.depth(Vec3::new(0.0, 0.0, 1.0)) < 0.0);
    }

    #[test]
    fn test_to_local_rotated() {
        // Camera turned to look down +X.
        let pose = CameraPose::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2),
        );
        assert!(pose.forward().abs_diff_eq(Vec3::X, 1e-6));
        let local = pose.to_local(Vec3::new(6.0, 2.0, 3.0));
        assert!(local.abs_diff_eq(Vec3::new(0.0, 0.0, -5.0), 1e-5));
    }

    #[test]
    fn test_look_at() {
        let pose = CameraPose::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        assert!(pose.forward().abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert!((pose.depth(Vec3::ZERO) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_dolly_keeps_rotation() {
        let mut pose = CameraPose::look_at(Vec3::new(3.0, 3.0, 3.0), Vec3::ZERO, Vec3::Y);
        let rotation = pose.rotation;
        pose.dolly(1.0);
        assert_eq!(pose.rotation, rotation);
        assert!((pose.position.length() - (27.0_f32.sqrt() - 1.0)).abs() < 1e-5);
    }

    #[test]
    fn test_deserialize_normalizes_rotation() {
        let pose: CameraPose =
            serde_json::from_str(r#"{"position":[0,0,5],"rotation":[0,0,0,2]}"#).unwrap();
        assert_eq!(pose.rotation, Quat::IDENTITY);
        assert!((pose.depth(Vec3::ZERO) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_deserialize_rejects_degenerate_rotation() {
        let zero = serde_json::from_str::<CameraPose>(
            r#"{"position":[0,0,0],"rotation":[0,0,0,0]}"#,
        );
        assert!(zero.unwrap_err().to_string().contains("cannot be normalized"));
        let bad = serde_json::from_str::<CameraPose>(
            r#"{"position":[0,0,0],"rotation":[0,0,0,1e39]}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_translate_local_keeps_depth() {
        let mut pose = CameraPose::default();
        let p = Vec3::new(0.0, 0.0, -4.0);
        pose.translate_local(2.0, -1.0, 0.0);
        assert!((pose.depth(p) - 4.0).abs() < 1e-6);
        assert!(pose.to_local(p).abs_diff_eq(Vec3::new(-2.0, 1.0, -4.0), 1e-6));
    }
}
