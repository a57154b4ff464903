//! Static level geometry: walls, doors and the avatar's collider.

use glam::Vec3;
use stalker_core::{ColliderId, ColliderTags, DoorController, RayHit, WorldOracle};
use tracing::info;

use crate::geometry::{Aabb, ray_sphere_distance};

#[derive(Clone, Debug, PartialEq)]
pub struct Wall {
    pub id: ColliderId,
    pub bounds: Aabb,
}

/// Door slab. A closed door blocks sight; an open one does not.
#[derive(Clone, Debug, PartialEq)]
pub struct Door {
    pub id: ColliderId,
    pub bounds: Aabb,
    open: bool,
    forced: u32,
}

impl Door {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Times the agent forced this door.
    pub fn forced_count(&self) -> u32 {
        self.forced
    }
}

impl DoorController for Door {
    fn is_open(&self) -> bool {
        self.open
    }

    fn force_open(&mut self) {
        if !self.open {
            info!(door = self.id.0, "door forced open");
        }
        self.open = true;
        self.forced += 1;
    }
}

/// Sphere collider standing in for the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AvatarCollider {
    pub id: ColliderId,
    pub center: Vec3,
    pub radius: f32,
}

/// Level geometry answering the agent's physics queries.
#[derive(Clone, Debug, Default)]
pub struct Arena {
    walls: Vec<Wall>,
    doors: Vec<Door>,
    avatar: Option<AvatarCollider>,
    next_id: u32,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> ColliderId {
        let id = ColliderId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn add_wall(&mut self, bounds: Aabb) -> ColliderId {
        let id = self.allocate();
        self.walls.push(Wall { id, bounds });
        id
    }

    pub fn add_door(&mut self, bounds: Aabb, open: bool) -> ColliderId {
        let id = self.allocate();
        self.doors.push(Door {
            id,
            bounds,
            open,
            forced: 0,
        });
        id
    }

    /// Reserves the collider id the avatar will report.
    pub fn add_avatar(&mut self, center: Vec3, radius: f32) -> ColliderId {
        let id = self.allocate();
        self.avatar = Some(AvatarCollider { id, center, radius });
        id
    }

    /// Moves the avatar collider to the avatar's current position.
    pub fn sync_avatar(&mut self, center: Vec3) {
        if let Some(avatar) = self.avatar.as_mut() {
            avatar.center = center;
        }
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    #[cfg(test)]
    fn door(&self, id: ColliderId) -> Option<&Door> {
        self.doors.iter().find(|door| door.id == id)
    }
}

impl WorldOracle for Arena {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let direction = direction.try_normalize()?;

        let walls = self
            .walls
            .iter()
            .filter_map(|wall| Some((wall.id, wall.bounds.ray_distance(origin, direction, max_distance)?)));
        let doors = self.doors.iter().filter(|door| !door.open).filter_map(|door| {
            Some((door.id, door.bounds.ray_distance(origin, direction, max_distance)?))
        });
        let avatar = self.avatar.and_then(|avatar| {
            let t = ray_sphere_distance(origin, direction, avatar.center, avatar.radius, max_distance)?;
            Some((avatar.id, t))
        });

        walls
            .chain(doors)
            .chain(avatar)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(collider, distance)| RayHit {
                collider,
                distance,
                point: origin + direction * distance,
            })
    }

    fn overlap_sphere(&self, center: Vec3, radius: f32, filter: ColliderTags) -> Vec<ColliderId> {
        let mut hits = Vec::new();
        if filter.contains(ColliderTags::WALL) {
            hits.extend(
                self.walls
                    .iter()
                    .filter(|wall| wall.bounds.intersects_sphere(center, radius))
                    .map(|wall| wall.id),
            );
        }
        if filter.contains(ColliderTags::DOOR) {
            hits.extend(
                self.doors
                    .iter()
                    .filter(|door| door.bounds.intersects_sphere(center, radius))
                    .map(|door| door.id),
            );
        }
        if filter.contains(ColliderTags::TARGET) {
            if let Some(avatar) = self.avatar {
                if avatar.center.distance(center) <= radius + avatar.radius {
                    hits.push(avatar.id);
                }
            }
        }
        hits
    }

    fn door_mut(&mut self, collider: ColliderId) -> Option<&mut dyn DoorController> {
        self.doors
            .iter_mut()
            .find(|door| door.id == collider)
            .map(|door| door as &mut dyn DoorController)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> (Arena, ColliderId, ColliderId, ColliderId) {
        let mut arena = Arena::new();
        let wall = arena.add_wall(Aabb::new(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(1.0, 3.0, 2.5)));
        let door = arena.add_door(
            Aabb::new(Vec3::new(4.0, 0.0, 2.0), Vec3::new(6.0, 3.0, 2.2)),
            false,
        );
        let avatar = arena.add_avatar(Vec3::new(0.0, 0.0, 5.0), 0.4);
        (arena, wall, door, avatar)
    }

    #[test]
    fn closest_collider_wins() {
        let (mut arena, wall, door, avatar) = corridor();
        let hit = arena.raycast(Vec3::ZERO, Vec3::Z, 15.0).unwrap();
        assert_eq!(hit.collider, wall);

        arena.sync_avatar(Vec3::new(0.0, 0.0, 1.0));
        let hit = arena.raycast(Vec3::ZERO, Vec3::Z, 15.0).unwrap();
        assert_eq!(hit.collider, avatar);

        let hit = arena
            .raycast(Vec3::new(5.0, 1.0, 0.0), Vec3::Z, 15.0)
            .unwrap();
        assert_eq!(hit.collider, door);
    }

    #[test]
    fn open_doors_do_not_block_sight() {
        let (mut arena, _, door, _) = corridor();
        arena.door_mut(door).unwrap().force_open();
        assert!(arena.door(door).unwrap().is_open());
        assert_eq!(arena.raycast(Vec3::new(5.0, 1.0, 0.0), Vec3::Z, 15.0), None);
    }

    #[test]
    fn overlap_filters_by_tag() {
        let (arena, wall, door, _) = corridor();
        assert_eq!(
            arena.overlap_sphere(Vec3::new(0.0, 0.0, 1.0), 1.5, ColliderTags::WALL),
            vec![wall]
        );
        assert_eq!(
            arena.overlap_sphere(Vec3::new(5.0, 0.0, 1.0), 1.5, ColliderTags::DOOR),
            vec![door]
        );
        assert!(
            arena
                .overlap_sphere(Vec3::new(5.0, 0.0, 1.0), 1.5, ColliderTags::WALL)
                .is_empty()
        );
    }
}
