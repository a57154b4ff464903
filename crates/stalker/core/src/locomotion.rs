//! Facade over the scene's path follower.

use glam::Vec3;
use tracing::debug;

use crate::env::{LocomotionOracle, NavMeshOracle, RngOracle};

/// Speed above which a patrolling agent counts as walking.
pub const WALK_SPEED: f32 = 0.1;

/// Speed below which the agent counts as idle.
pub const IDLE_SPEED: f32 = 0.01;

/// Snapshot of the path follower taken once per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocomotionFacts {
    pub position: Vec3,
    pub velocity: Vec3,
    pub path_pending: bool,
    pub arrived: bool,
}

impl LocomotionFacts {
    pub fn read(locomotion: &dyn LocomotionOracle) -> Self {
        Self {
            position: locomotion.position(),
            velocity: locomotion.velocity(),
            path_pending: locomotion.path_pending(),
            arrived: locomotion.has_arrived(),
        }
    }

    /// Facts for a body that is standing still at `position` with no path.
    pub fn stationary(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            path_pending: false,
            arrived: true,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Exactly zero velocity and no path request in flight.
    pub fn is_stationary(&self) -> bool {
        self.velocity.length_squared() == 0.0 && !self.path_pending
    }

    pub fn is_idle(&self) -> bool {
        self.speed() < IDLE_SPEED
    }

    pub fn is_walking(&self) -> bool {
        self.speed() > WALK_SPEED
    }
}

/// Samples a reachable point within `radius` of `origin`.
///
/// Each attempt draws a fresh offset inside the sphere and asks the nav-mesh
/// for the closest walkable point. Returns `None` when every attempt fails;
/// the caller holds position and retries on its next patrol cycle.
pub fn find_patrol_point(
    navmesh: &dyn NavMeshOracle,
    rng: &mut dyn RngOracle,
    origin: Vec3,
    radius: f32,
    attempts: u32,
) -> Option<Vec3> {
    for attempt in 0..attempts {
        let candidate = origin + rng.inside_unit_sphere() * radius;
        if let Some(point) = navmesh.find_reachable_point_near(candidate, radius) {
            debug!(attempt, ?point, "patrol point sampled");
            return Some(point);
        }
    }
    None
}
