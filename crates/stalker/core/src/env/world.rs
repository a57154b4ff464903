use bitflags::bitflags;
use glam::Vec3;

use super::ColliderId;

bitflags! {
    /// Classification of colliders for overlap filtering.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ColliderTags: u8 {
        const WALL = 1 << 0;
        const DOOR = 1 << 1;
        const TARGET = 1 << 2;
        const AGENT = 1 << 3;
    }
}

/// First collider along a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub collider: ColliderId,
    pub distance: f32,
    pub point: Vec3,
}

/// Door that the agent may knock open while searching.
pub trait DoorController {
    fn is_open(&self) -> bool;

    /// Opens the door immediately. Calling this on an open door is a no-op.
    fn force_open(&mut self);
}

/// Physics queries against the scene.
pub trait WorldOracle {
    /// First collider hit by a ray from `origin` along `direction`, limited
    /// to `max_distance`. `direction` need not be normalized.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;

    /// Colliders intersecting the sphere whose tags intersect `filter`.
    fn overlap_sphere(&self, center: Vec3, radius: f32, filter: ColliderTags) -> Vec<ColliderId>;

    /// Door component attached to `collider`, if any.
    fn door_mut(&mut self, collider: ColliderId) -> Option<&mut dyn DoorController>;
}
