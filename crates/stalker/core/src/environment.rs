//! Door forcing and attack damage.

use glam::Vec3;
use tracing::{debug, info};

use crate::config::PursuitTuning;
use crate::env::{ColliderTags, TargetOracle, WorldOracle};

/// Result of one door probe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoorProbe {
    /// Door colliders found within the probe radius.
    pub matched: usize,
    /// Doors that were closed before the probe forced them.
    pub opened: usize,
}

impl DoorProbe {
    /// The knock cue plays once per probe that matched any door.
    pub fn should_knock(&self) -> bool {
        self.matched > 0
    }
}

/// Forces open every door within `radius` of `center`.
///
/// Colliders tagged as doors without a door component are skipped.
pub fn probe_doors(world: &mut dyn WorldOracle, center: Vec3, radius: f32) -> DoorProbe {
    let mut probe = DoorProbe::default();
    for collider in world.overlap_sphere(center, radius, ColliderTags::DOOR) {
        let Some(door) = world.door_mut(collider) else {
            debug!(?collider, "door-tagged collider has no door component");
            continue;
        };
        probe.matched += 1;
        if !door.is_open() {
            probe.opened += 1;
        }
        door.force_open();
    }
    if probe.should_knock() {
        info!(matched = probe.matched, opened = probe.opened, "doors forced open");
    }
    probe
}

/// Result of one attack attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    Hit { damage: u32 },
    OutOfRange { distance: f32 },
}

impl AttackOutcome {
    pub fn landed(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }
}

/// Applies attack damage if the target is within attack distance of
/// `agent_position` right now.
pub fn strike(
    agent_position: Vec3,
    target: &mut dyn TargetOracle,
    tuning: &PursuitTuning,
) -> AttackOutcome {
    let distance = agent_position.distance(target.position());
    if distance > tuning.attack_distance {
        return AttackOutcome::OutOfRange { distance };
    }
    target.apply_damage(tuning.attack_damage);
    debug!(damage = tuning.attack_damage, distance, "attack landed");
    AttackOutcome::Hit {
        damage: tuning.attack_damage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ColliderId, DoorController, RayHit};

    struct Door {
        open: bool,
        forced: u32,
    }

    impl DoorController for Door {
        fn is_open(&self) -> bool {
            self.open
        }

        fn force_open(&mut self) {
            self.open = true;
            self.forced += 1;
        }
    }

    /// Colliders 0 and 1 are doors; collider 9 is tagged as a door but has no
    /// component.
    struct Hallway {
        doors: Vec<Door>,
    }

    impl WorldOracle for Hallway {
        fn raycast(&self, _: Vec3, _: Vec3, _: f32) -> Option<RayHit> {
            None
        }

        fn overlap_sphere(&self, _: Vec3, _: f32, filter: ColliderTags) -> Vec<ColliderId> {
            if filter.contains(ColliderTags::DOOR) {
                vec![ColliderId(0), ColliderId(1), ColliderId(9)]
            } else {
                Vec::new()
            }
        }

        fn door_mut(&mut self, collider: ColliderId) -> Option<&mut dyn DoorController> {
            self.doors
                .get_mut(collider.0 as usize)
                .map(|door| door as &mut dyn DoorController)
        }
    }

    struct Dummy {
        position: Vec3,
        damage_taken: u32,
    }

    impl TargetOracle for Dummy {
        fn collider(&self) -> ColliderId {
            ColliderId(100)
        }

        fn position(&self) -> Vec3 {
            self.position
        }

        fn apply_damage(&mut self, amount: u32) {
            self.damage_taken += amount;
        }
    }

    #[test]
    fn probe_forces_every_door_idempotently() {
        let mut world = Hallway {
            doors: vec![
                Door {
                    open: false,
                    forced: 0,
                },
                Door {
                    open: true,
                    forced: 0,
                },
            ],
        };
        let probe = probe_doors(&mut world, Vec3::ZERO, 2.0);
        assert_eq!(
            probe,
            DoorProbe {
                matched: 2,
                opened: 1
            }
        );
        assert!(probe.should_knock());
        assert!(world.doors.iter().all(|d| d.open && d.forced == 1));

        let again = probe_doors(&mut world, Vec3::ZERO, 2.0);
        assert_eq!(again.opened, 0);
        assert!(world.doors.iter().all(|d| d.open));
    }

    #[test]
    fn strike_rechecks_range() {
        let tuning = PursuitTuning::default();
        let mut target = Dummy {
            position: Vec3::new(0.0, 0.0, 2.0),
            damage_taken: 0,
        };
        assert_eq!(
            strike(Vec3::ZERO, &mut target, &tuning),
            AttackOutcome::Hit { damage: 30 }
        );

        target.position = Vec3::new(0.0, 0.0, 3.0);
        let outcome = strike(Vec3::ZERO, &mut target, &tuning);
        assert!(!outcome.landed());
        assert_eq!(target.damage_taken, 30);
    }
}
