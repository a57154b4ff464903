use glam::Vec3;

/// Walkable-surface sampling.
pub trait NavMeshOracle {
    /// Closest walkable point within `radius` of `point`, if any.
    fn find_reachable_point_near(&self, point: Vec3, radius: f32) -> Option<Vec3>;
}

/// Path-following body the agent steers.
///
/// The scene owns the body and integrates its motion; the controller only
/// issues destinations and speeds and reads back motion facts.
pub trait LocomotionOracle {
    fn position(&self) -> Vec3;

    fn set_destination(&mut self, point: Vec3);

    fn set_speed(&mut self, speed: f32);

    fn velocity(&self) -> Vec3;

    /// True while a path request is still being computed.
    fn path_pending(&self) -> bool;

    fn remaining_distance(&self) -> f32;

    fn stopping_distance(&self) -> f32;

    /// Path settled and within stopping distance of the destination.
    fn has_arrived(&self) -> bool {
        !self.path_pending() && self.remaining_distance() <= self.stopping_distance()
    }
}
