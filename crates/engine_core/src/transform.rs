//! Transform component and utilities for spatial positioning.

use glam::{Quat, Vec3};

use crate::math::yaw_rotation;

/// A 3D transform representing position and rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Transform {
    /// Create a transform at `position` facing `yaw_degrees` (clockwise seen from above).
    pub fn from_position_yaw(position: Vec3, yaw_degrees: f32) -> Self {
        Self {
            position,
            rotation: yaw_rotation(yaw_degrees),
        }
    }

    /// Get the forward direction (negative Z in right-handed coordinates).
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get the right direction (positive X).
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get the up direction (positive Y).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn zero_yaw_faces_negative_z() {
        let t = Transform::from_position_yaw(Vec3::ZERO, 0.0);
        assert!(close(t.forward(), -Vec3::Z));
        assert!(close(t.right(), Vec3::X));
        assert!(close(t.up(), Vec3::Y));
    }

    #[test]
    fn positive_yaw_turns_toward_the_right() {
        let t = Transform::from_position_yaw(Vec3::ZERO, 90.0);
        assert!(close(t.forward(), Vec3::X));
    }
}
