//! Agent tuning.
//!
//! [`AgentConfig`] groups every numeric knob of the controller. `Default`
//! yields the reference tuning; data files may override any subset of
//! fields when the `serde` feature is enabled.

use crate::error::{ErrorSeverity, StalkerError};

/// Complete tuning of one agent.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentConfig {
    pub movement: MovementTuning,
    pub perception: PerceptionTuning,
    pub pursuit: PursuitTuning,
    pub effects: EffectTuning,
    pub audio: AudioTuning,
}

/// Speeds, turning and patrol sampling.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementTuning {
    /// Speed while patrolling and searching.
    pub patrol_speed: f32,
    /// Speed while chasing a visible agent body.
    pub chase_speed: f32,
    /// Chase speed multiplier applied while flickered out of sight.
    pub invisible_speed_multiplier: f32,
    /// Slerp factor per second for turning toward the target.
    pub turn_rate: f32,
    pub patrol_radius: f32,
    /// Seconds spent idle at a patrol point before picking the next one.
    pub patrol_period: f32,
    /// Nav-mesh sampling attempts per patrol pick.
    pub patrol_sample_attempts: u32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            patrol_speed: 2.0,
            chase_speed: 4.0,
            invisible_speed_multiplier: 2.0,
            turn_rate: 5.0,
            patrol_radius: 10.0,
            patrol_period: 5.0,
            patrol_sample_attempts: 30,
        }
    }
}

/// Vision cones and hearing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PerceptionTuning {
    pub sight_distance: f32,
    /// Full forward cone angle in degrees.
    pub field_of_view: f32,
    pub back_sight_distance: f32,
    /// Full rear cone angle in degrees.
    pub back_field_of_view: f32,
    /// Multiplier applied to the raw loudness sample.
    pub sensitivity: f32,
    /// Scaled loudness strictly above this value is heard.
    pub loudness_threshold: f32,
    /// Upper bound of the loudness meter shown to the player.
    pub meter_max: f32,
}

impl Default for PerceptionTuning {
    fn default() -> Self {
        Self {
            sight_distance: 15.0,
            field_of_view: 60.0,
            back_sight_distance: 5.0,
            back_field_of_view: 90.0,
            sensitivity: 100.0,
            loudness_threshold: 10.0,
            meter_max: 20.0,
        }
    }
}

/// Attack range, give-up hysteresis and search behavior.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PursuitTuning {
    pub attack_distance: f32,
    /// Damage applied on every tick the attack sub-condition holds.
    pub attack_damage: u32,
    pub time_to_give_up_chase: f32,
    /// Seconds of searching between door probes.
    pub door_wait_duration: f32,
    pub door_probe_radius: f32,
    /// Distance to the last known position that ends a search.
    pub search_arrival_threshold: f32,
}

impl Default for PursuitTuning {
    fn default() -> Self {
        Self {
            attack_distance: 2.0,
            attack_damage: 30,
            time_to_give_up_chase: 5.0,
            door_wait_duration: 10.0,
            door_probe_radius: 2.0,
            search_arrival_threshold: 1.0,
        }
    }
}

/// Flicker, jump-scare and warning banner timings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectTuning {
    pub min_flicker_duration: f32,
    pub max_flicker_duration: f32,
    /// Per-tick probability once the jump-scare gate is open.
    pub jumpscare_chance: f32,
    /// Chase duration the gate requires (strictly greater than).
    pub jumpscare_min_chase: f32,
    pub jumpscare_flashes: u32,
    pub jumpscare_flash_interval: f32,
    pub jumpscare_hold: f32,
    pub banner_text: String,
    pub banner_fade_duration: f32,
    pub banner_hold: f32,
}

impl Default for EffectTuning {
    fn default() -> Self {
        Self {
            min_flicker_duration: 0.1,
            max_flicker_duration: 0.5,
            jumpscare_chance: 0.3,
            jumpscare_min_chase: 15.0,
            jumpscare_flashes: 3,
            jumpscare_flash_interval: 0.1,
            jumpscare_hold: 1.0,
            banner_text: String::from("It heard you"),
            banner_fade_duration: 0.5,
            banner_hold: 2.0,
        }
    }
}

/// Vocal clip catalog.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AudioTuning {
    /// Length in seconds of each vocal clip; the index is the clip id.
    pub vocal_clip_lengths: Vec<f32>,
}

/// Invalid tuning value.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be within (0, 360] degrees, got {value}")]
    FieldOfView { field: &'static str, value: f32 },

    #[error("{field} must be a probability within [0, 1], got {value}")]
    Probability { field: &'static str, value: f32 },

    #[error("flicker duration range is inverted: min {min} > max {max}")]
    FlickerRange { min: f32, max: f32 },
}

impl StalkerError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Negative { .. } => "CONFIG_NEGATIVE",
            Self::FieldOfView { .. } => "CONFIG_FIELD_OF_VIEW",
            Self::Probability { .. } => "CONFIG_PROBABILITY",
            Self::FlickerRange { .. } => "CONFIG_FLICKER_RANGE",
        }
    }
}

pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

pub(crate) fn field_of_view(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 && value <= 360.0 {
        Ok(())
    } else {
        Err(ConfigError::FieldOfView { field, value })
    }
}

fn probability(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Probability { field, value })
    }
}

impl AgentConfig {
    /// Checks every field; the first offending field is reported.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.movement;
        non_negative("patrol_speed", m.patrol_speed)?;
        non_negative("chase_speed", m.chase_speed)?;
        non_negative("invisible_speed_multiplier", m.invisible_speed_multiplier)?;
        non_negative("turn_rate", m.turn_rate)?;
        non_negative("patrol_radius", m.patrol_radius)?;
        non_negative("patrol_period", m.patrol_period)?;

        let p = &self.perception;
        non_negative("sight_distance", p.sight_distance)?;
        field_of_view("field_of_view", p.field_of_view)?;
        non_negative("back_sight_distance", p.back_sight_distance)?;
        field_of_view("back_field_of_view", p.back_field_of_view)?;
        non_negative("sensitivity", p.sensitivity)?;
        non_negative("loudness_threshold", p.loudness_threshold)?;
        non_negative("meter_max", p.meter_max)?;

        let c = &self.pursuit;
        non_negative("attack_distance", c.attack_distance)?;
        non_negative("time_to_give_up_chase", c.time_to_give_up_chase)?;
        non_negative("door_wait_duration", c.door_wait_duration)?;
        non_negative("door_probe_radius", c.door_probe_radius)?;
        non_negative("search_arrival_threshold", c.search_arrival_threshold)?;

        let e = &self.effects;
        non_negative("min_flicker_duration", e.min_flicker_duration)?;
        non_negative("max_flicker_duration", e.max_flicker_duration)?;
        if e.min_flicker_duration > e.max_flicker_duration {
            return Err(ConfigError::FlickerRange {
                min: e.min_flicker_duration,
                max: e.max_flicker_duration,
            });
        }
        probability("jumpscare_chance", e.jumpscare_chance)?;
        non_negative("jumpscare_min_chase", e.jumpscare_min_chase)?;
        non_negative("jumpscare_flash_interval", e.jumpscare_flash_interval)?;
        non_negative("jumpscare_hold", e.jumpscare_hold)?;
        non_negative("banner_fade_duration", e.banner_fade_duration)?;
        non_negative("banner_hold", e.banner_hold)?;

        for &length in &self.audio.vocal_clip_lengths {
            non_negative("vocal_clip_lengths", length)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_tuning_is_valid() {
        assert_eq!(AgentConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_negative_distance() {
        let mut config = AgentConfig::default();
        config.perception.sight_distance = -1.0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_NEGATIVE");
    }

    #[test]
    fn rejects_inverted_flicker_range() {
        let mut config = AgentConfig::default();
        config.effects.min_flicker_duration = 0.6;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FlickerRange { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_field_of_view_and_chance() {
        let mut config = AgentConfig::default();
        config.perception.back_field_of_view = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FieldOfView { .. })
        ));

        let mut config = AgentConfig::default();
        config.effects.jumpscare_chance = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Probability { .. })
        ));
    }
}
