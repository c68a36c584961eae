//! Transform component and utilities for spatial positioning.

use glam::{Mat4, Quat, Vec3};

/// A 3D transform representing position and rotation.
///
/// The world is right-handed with +Y up; an agent's local forward axis is -Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and heading (radians about +Y).
    pub fn from_position_heading(position: Vec3, heading: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_rotation_y(heading),
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

    /// Heading in radians: the yaw of the forward axis about +Y.
    pub fn heading(&self) -> f32 {
        let f = self.forward();
        (-f.x).atan2(-f.z)
    }

    /// Translate the transform by a delta.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Rotate around the Y axis (yaw).
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotation = Quat::from_rotation_y(angle) * self.rotation;
    }

    /// Look at a target position.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = (target - self.position).normalize_or_zero();
        if forward.length_squared() > 0.0001 && forward.cross(up).length_squared() > 1e-8 {
            self.rotation = Quat::from_mat4(&Mat4::look_at_rh(self.position, target, up)).inverse();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn heading_round_trips_through_rotation() {
        let t = Transform::from_position_heading(Vec3::ZERO, 0.75);
        assert!((t.heading() - 0.75).abs() < 1e-5);
    }

    #[test]
    fn positive_yaw_turns_forward_to_the_left() {
        let mut t = Transform::default();
        t.rotate_y(FRAC_PI_2);
        let f = t.forward();
        assert!((f.x + 1.0).abs() < 1e-5, "forward should point to -X, got {:?}", f);
    }

    #[test]
    fn look_at_points_forward_at_target() {
        let mut t = Transform::from_position(Vec3::new(0.0, 2.0, 10.0));
        let target = Vec3::new(3.0, 0.0, 0.0);
        t.look_at(target, Vec3::Y);
        let expected = (target - t.position).normalize();
        assert!(t.forward().abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn look_at_straight_down_keeps_rotation() {
        let mut t = Transform::from_position(Vec3::new(0.0, 5.0, 0.0));
        t.look_at(Vec3::ZERO, Vec3::Y);
        assert_eq!(t.rotation, Quat::IDENTITY);
    }
}
