//! Scripted stand-in for the player.

use glam::Vec3;
use stalker_core::{ColliderId, TargetOracle};
use tracing::{info, warn};

/// Health clamped to `[0, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Health {
    current: u32,
    max: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}

/// Position keyframe: the avatar reaches `position` at `time` seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Waypoint {
    pub time: f32,
    pub position: Vec3,
}

/// Avatar following a piecewise-linear route.
#[derive(Clone, Debug)]
pub struct Avatar {
    collider: ColliderId,
    position: Vec3,
    health: Health,
    route: Vec<Waypoint>,
    damage_events: u32,
}

impl Avatar {
    pub const MAX_HEALTH: u32 = 100;

    pub fn new(collider: ColliderId, position: Vec3) -> Self {
        Self {
            collider,
            position,
            health: Health::new(Self::MAX_HEALTH),
            route: Vec::new(),
            damage_events: 0,
        }
    }

    /// Replaces the route. Waypoints are sorted by time.
    pub fn with_route(mut self, mut route: Vec<Waypoint>) -> Self {
        route.sort_by(|a, b| a.time.total_cmp(&b.time));
        self.route = route;
        self
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    /// Number of damage applications received.
    pub fn damage_events(&self) -> u32 {
        self.damage_events
    }

    pub fn teleport(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Moves to the route position at `time`. Outside the route the avatar
    /// holds the nearest endpoint.
    pub fn advance_to(&mut self, time: f32) {
        let (Some(first), Some(last)) = (self.route.first(), self.route.last()) else {
            return;
        };
        if time <= first.time {
            self.position = first.position;
            return;
        }
        if time >= last.time {
            self.position = last.position;
            return;
        }
        for pair in self.route.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if time >= a.time && time <= b.time {
                let span = b.time - a.time;
                let t = if span > 0.0 { (time - a.time) / span } else { 1.0 };
                self.position = a.position.lerp(b.position, t);
                return;
            }
        }
    }
}

impl TargetOracle for Avatar {
    fn collider(&self) -> ColliderId {
        self.collider
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn apply_damage(&mut self, amount: u32) {
        let was_alive = !self.health.is_depleted();
        self.health.take_damage(amount);
        self.damage_events += 1;
        info!(amount, health = self.health.current(), "avatar hit");
        if was_alive && self.health.is_depleted() {
            warn!("avatar died");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_is_clamped() {
        let mut health = Health::new(100);
        health.take_damage(30);
        health.take_damage(30);
        health.take_damage(30);
        health.take_damage(30);
        assert_eq!(health.current(), 0);
        assert!(health.is_depleted());
        assert_eq!(health.max(), 100);
    }

    #[test]
    fn route_interpolates_and_clamps() {
        let mut avatar = Avatar::new(ColliderId(0), Vec3::ZERO).with_route(vec![
            Waypoint {
                time: 2.0,
                position: Vec3::new(10.0, 0.0, 0.0),
            },
            Waypoint {
                time: 0.0,
                position: Vec3::ZERO,
            },
        ]);
        avatar.advance_to(1.0);
        assert_eq!(avatar.position(), Vec3::new(5.0, 0.0, 0.0));
        avatar.advance_to(9.0);
        assert_eq!(avatar.position(), Vec3::new(10.0, 0.0, 0.0));
    }
}
