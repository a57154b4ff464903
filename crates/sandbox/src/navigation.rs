//! Walkable area and a straight-line path follower.

use glam::Vec3;
use stalker_core::{LocomotionOracle, NavMeshOracle};

/// Rectangular walkable floor at `y = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectNavMesh {
    min: Vec3,
    max: Vec3,
}

impl RectNavMesh {
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: Vec3::new(a.x.min(b.x), 0.0, a.z.min(b.z)),
            max: Vec3::new(a.x.max(b.x), 0.0, a.z.max(b.z)),
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.z..=self.max.z).contains(&point.z)
    }
}

impl NavMeshOracle for RectNavMesh {
    fn find_reachable_point_near(&self, point: Vec3, radius: f32) -> Option<Vec3> {
        let snapped = Vec3::new(point.x, 0.0, point.z).clamp(self.min, self.max);
        (snapped.distance(point) <= radius).then_some(snapped)
    }
}

/// Agent body moving in a straight line toward its destination.
///
/// A destination requested while at rest takes one [`PathFollower::advance`]
/// to compute, during which the path is pending and the body does not move.
#[derive(Clone, Debug, PartialEq)]
pub struct PathFollower {
    position: Vec3,
    destination: Option<Vec3>,
    speed: f32,
    velocity: Vec3,
    pending: bool,
    stopping_distance: f32,
}

impl PathFollower {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            destination: None,
            speed: 0.0,
            velocity: Vec3::ZERO,
            pending: false,
            stopping_distance: 0.1,
        }
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Integrates motion over `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if self.pending {
            self.pending = false;
            self.velocity = Vec3::ZERO;
            return;
        }
        let Some(destination) = self.destination else {
            self.velocity = Vec3::ZERO;
            return;
        };
        let offset = destination - self.position;
        let remaining = offset.length();
        if remaining <= self.stopping_distance || dt <= 0.0 {
            self.velocity = Vec3::ZERO;
            return;
        }
        let step = self.speed * dt;
        if step >= remaining {
            self.position = destination;
            self.velocity = offset / dt;
        } else {
            let direction = offset / remaining;
            self.position += direction * step;
            self.velocity = direction * self.speed;
        }
    }
}

impl LocomotionOracle for PathFollower {
    fn position(&self) -> Vec3 {
        self.position
    }

    /// Retargeting while moving keeps the current path warm; a request from
    /// rest is pending for one advance.
    fn set_destination(&mut self, point: Vec3) {
        if self.destination != Some(point) && self.velocity == Vec3::ZERO {
            self.pending = true;
        }
        self.destination = Some(point);
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn path_pending(&self) -> bool {
        self.pending
    }

    fn remaining_distance(&self) -> f32 {
        self.destination
            .map_or(0.0, |destination| destination.distance(self.position))
    }

    fn stopping_distance(&self) -> f32 {
        self.stopping_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navmesh_snaps_within_radius() {
        let mesh = RectNavMesh::new(Vec3::new(-5.0, 0.0, -5.0), Vec3::new(5.0, 0.0, 5.0));
        assert_eq!(
            mesh.find_reachable_point_near(Vec3::new(1.0, 2.0, 1.0), 3.0),
            Some(Vec3::new(1.0, 0.0, 1.0))
        );
        assert_eq!(
            mesh.find_reachable_point_near(Vec3::new(9.0, 0.0, 0.0), 3.0),
            None
        );
        assert!(mesh.contains(Vec3::new(5.0, 0.0, -5.0)));
    }

    #[test]
    fn follower_waits_for_path_then_moves_and_arrives() {
        let mut body = PathFollower::new(Vec3::ZERO);
        body.set_speed(2.0);
        body.set_destination(Vec3::new(0.0, 0.0, 1.1));
        assert!(body.path_pending());
        assert!(!body.has_arrived());

        body.advance(0.25);
        assert_eq!(body.position(), Vec3::ZERO);

        body.advance(0.25);
        assert!((body.position().z - 0.5).abs() < 1e-5);
        assert!((body.velocity().length() - 2.0).abs() < 1e-4);

        body.advance(1.0);
        assert_eq!(body.position(), Vec3::new(0.0, 0.0, 1.1));
        assert!(body.has_arrived());

        body.advance(1.0);
        assert_eq!(body.velocity(), Vec3::ZERO);
    }
}
