//! Pose and direction helpers.
//!
//! Conventions: Y is up, a pose's forward axis is local +Z, and rotations
//! produced here are yaw-only. Every helper that normalizes a vector returns
//! `Option` instead of producing NaN for zero-length input.

use glam::{Quat, Vec3};

/// Position plus orientation of the agent body.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose at `position` facing +Z.
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Pose at `position` facing along `forward` (flattened onto the ground).
    ///
    /// A degenerate `forward` keeps the identity rotation.
    pub fn facing(position: Vec3, forward: Vec3) -> Self {
        let rotation = flat_look_rotation(forward).unwrap_or(Quat::IDENTITY);
        Self::new(position, rotation)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    pub fn back(&self) -> Vec3 {
        -self.forward()
    }

    /// Rotates toward `direction` by a slerp step of `t` (clamped to [0, 1]).
    ///
    /// Returns false and leaves the pose untouched when `direction` has no
    /// horizontal component.
    pub fn turn_toward(&mut self, direction: Vec3, t: f32) -> bool {
        let Some(look) = flat_look_rotation(direction) else {
            return false;
        };
        self.rotation = self.rotation.slerp(look, t.clamp(0.0, 1.0)).normalize();
        true
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Angle in degrees between two directions.
///
/// Returns `None` if either vector is zero-length or non-finite.
pub fn angle_between_deg(a: Vec3, b: Vec3) -> Option<f32> {
    let a = a.try_normalize()?;
    let b = b.try_normalize()?;
    Some(a.dot(b).clamp(-1.0, 1.0).acos().to_degrees())
}

/// Yaw-only rotation whose forward axis points along `direction` projected
/// onto the ground plane.
pub fn flat_look_rotation(direction: Vec3) -> Option<Quat> {
    let flat = Vec3::new(direction.x, 0.0, direction.z).try_normalize()?;
    Some(Quat::from_rotation_y(flat.x.atan2(flat.z)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_between_is_guarded_against_zero_vectors() {
        assert_eq!(angle_between_deg(Vec3::ZERO, Vec3::X), None);
        assert_eq!(angle_between_deg(Vec3::Z, Vec3::ZERO), None);

        let right = angle_between_deg(Vec3::Z, Vec3::X).unwrap();
        assert!((right - 90.0).abs() < 1e-3);
    }

    #[test]
    fn look_rotation_maps_forward_onto_direction() {
        let rotation = flat_look_rotation(Vec3::new(1.0, 5.0, 0.0)).unwrap();
        let forward = rotation * Vec3::Z;
        assert!((forward - Vec3::X).length() < 1e-5);

        assert!(flat_look_rotation(Vec3::Y).is_none());
    }

    #[test]
    fn turn_toward_is_partial_and_ignores_vertical_directions() {
        let mut pose = Pose::at(Vec3::ZERO);
        assert!(pose.turn_toward(Vec3::X, 0.5));
        let half = angle_between_deg(pose.forward(), Vec3::Z).unwrap();
        assert!((half - 45.0).abs() < 1e-2);

        let before = pose;
        assert!(!pose.turn_toward(Vec3::NEG_Y, 1.0));
        assert_eq!(pose, before);
    }
}
