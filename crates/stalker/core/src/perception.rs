//! Sight and hearing checks.
//!
//! Sight is evaluated through two independent occluded cones, a long narrow
//! one along the agent's forward axis and a short wide one along its back
//! axis. Hearing ignores geometry entirely: it fires whenever the scaled
//! ambient loudness exceeds the threshold.

use glam::Vec3;
use tracing::debug;

use crate::config::PerceptionTuning;
use crate::env::{ColliderId, WorldOracle};
use crate::math::{Pose, angle_between_deg};

/// Senses reported for one tick. Never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerceptionResult {
    pub saw_by_sight: bool,
    pub saw_by_hearing: bool,
}

impl PerceptionResult {
    pub const NONE: Self = Self {
        saw_by_sight: false,
        saw_by_hearing: false,
    };

    /// True if any channel sensed the target.
    pub fn detected(&self) -> bool {
        self.saw_by_sight || self.saw_by_hearing
    }
}

/// Range and full opening angle of a sight cone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisionCone {
    pub distance: f32,
    /// Full cone angle in degrees.
    pub field_of_view: f32,
}

impl VisionCone {
    pub fn forward(tuning: &PerceptionTuning) -> Self {
        Self {
            distance: tuning.sight_distance,
            field_of_view: tuning.field_of_view,
        }
    }

    pub fn rear(tuning: &PerceptionTuning) -> Self {
        Self {
            distance: tuning.back_sight_distance,
            field_of_view: tuning.back_field_of_view,
        }
    }

    fn half_angle(&self) -> f32 {
        self.field_of_view * 0.5
    }
}

/// What a line-of-sight test needs to know about the target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SightTarget {
    pub collider: ColliderId,
    pub position: Vec3,
}

/// Occluded cone test from `eye` looking along `facing`.
///
/// The target is seen when it lies within the cone's range and half-angle
/// and the first collider hit by a ray toward it is the target's own.
pub fn can_see(
    eye: Vec3,
    facing: Vec3,
    cone: &VisionCone,
    target: &SightTarget,
    world: &dyn WorldOracle,
) -> bool {
    let to_target = target.position - eye;
    let distance = to_target.length();
    if distance.is_nan() || distance > cone.distance {
        return false;
    }
    if to_target.length_squared() == 0.0 {
        return true;
    }
    let Some(angle) = angle_between_deg(facing, to_target) else {
        return false;
    };
    if angle > cone.half_angle() {
        return false;
    }
    match world.raycast(eye, to_target, cone.distance) {
        Some(hit) => hit.collider == target.collider,
        None => false,
    }
}

/// Raw loudness sample scaled by the agent's sensitivity.
pub fn scaled_loudness(sample: f32, sensitivity: f32) -> f32 {
    sample * sensitivity
}

/// Hearing channel: strictly above the threshold.
pub fn hears(sample: Option<f32>, tuning: &PerceptionTuning) -> bool {
    sample.is_some_and(|s| scaled_loudness(s, tuning.sensitivity) > tuning.loudness_threshold)
}

/// Evaluates both sight cones and hearing for one tick.
///
/// A missing target yields [`PerceptionResult::NONE`]. Missing world queries
/// disable sight only.
pub fn sense_target(
    pose: &Pose,
    tuning: &PerceptionTuning,
    target: Option<SightTarget>,
    world: Option<&dyn WorldOracle>,
    loudness: Option<f32>,
) -> PerceptionResult {
    let Some(target) = target else {
        return PerceptionResult::NONE;
    };

    let saw_by_sight = world.is_some_and(|world| {
        let ahead = can_see(
            pose.position,
            pose.forward(),
            &VisionCone::forward(tuning),
            &target,
            world,
        );
        ahead
            || can_see(
                pose.position,
                pose.back(),
                &VisionCone::rear(tuning),
                &target,
                world,
            )
    });
    let saw_by_hearing = hears(loudness, tuning);

    if saw_by_sight || saw_by_hearing {
        debug!(saw_by_sight, saw_by_hearing, "target sensed");
    }

    PerceptionResult {
        saw_by_sight,
        saw_by_hearing,
    }
}
