//! Difficulty presets and the one-shot tuning override they apply.

use strum::{Display, EnumIter, EnumString, FromRepr};

use crate::config::{AgentConfig, ConfigError, field_of_view, non_negative};
use crate::error::{ErrorSeverity, StalkerError};

/// The six tuning fields a difficulty level overrides.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyParameters {
    pub chase_speed: f32,
    pub sight_distance: f32,
    pub attack_distance: f32,
    pub field_of_view: f32,
    pub sensitivity: f32,
    pub loudness_threshold: f32,
}

impl DifficultyParameters {
    /// Current values of the six fields in `config`.
    pub fn from_config(config: &AgentConfig) -> Self {
        Self {
            chase_speed: config.movement.chase_speed,
            sight_distance: config.perception.sight_distance,
            attack_distance: config.pursuit.attack_distance,
            field_of_view: config.perception.field_of_view,
            sensitivity: config.perception.sensitivity,
            loudness_threshold: config.perception.loudness_threshold,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("chase_speed", self.chase_speed)?;
        non_negative("sight_distance", self.sight_distance)?;
        non_negative("attack_distance", self.attack_distance)?;
        field_of_view("field_of_view", self.field_of_view)?;
        non_negative("sensitivity", self.sensitivity)?;
        non_negative("loudness_threshold", self.loudness_threshold)?;
        Ok(())
    }

    /// Overwrites exactly the six fields; nothing else in `config` changes.
    pub fn apply_to(&self, config: &mut AgentConfig) {
        config.movement.chase_speed = self.chase_speed;
        config.perception.sight_distance = self.sight_distance;
        config.pursuit.attack_distance = self.attack_distance;
        config.perception.field_of_view = self.field_of_view;
        config.perception.sensitivity = self.sensitivity;
        config.perception.loudness_threshold = self.loudness_threshold;
    }
}

/// Player-selected difficulty. Persisted as its integer index.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[repr(u8)]
pub enum DifficultyLevel {
    Easy = 0,
    #[default]
    Medium = 1,
    Hard = 2,
}

impl DifficultyLevel {
    /// Level for a persisted index; unknown indices fall back to Medium.
    pub fn from_index(index: i64) -> Self {
        u8::try_from(index)
            .ok()
            .and_then(Self::from_repr)
            .unwrap_or_default()
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Everything a level configures: the agent override and the number of keys
/// the scene requires before its exit opens.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyPreset {
    pub required_keys: u32,
    pub parameters: DifficultyParameters,
}

impl DifficultyPreset {
    pub const fn builtin(level: DifficultyLevel) -> Self {
        match level {
            DifficultyLevel::Easy => Self {
                required_keys: 3,
                parameters: DifficultyParameters {
                    chase_speed: 3.0,
                    sight_distance: 10.0,
                    attack_distance: 1.5,
                    field_of_view: 50.0,
                    sensitivity: 80.0,
                    loudness_threshold: 8.0,
                },
            },
            DifficultyLevel::Medium => Self {
                required_keys: 5,
                parameters: DifficultyParameters {
                    chase_speed: 4.0,
                    sight_distance: 15.0,
                    attack_distance: 2.0,
                    field_of_view: 60.0,
                    sensitivity: 100.0,
                    loudness_threshold: 10.0,
                },
            },
            DifficultyLevel::Hard => Self {
                required_keys: 7,
                parameters: DifficultyParameters {
                    chase_speed: 5.0,
                    sight_distance: 20.0,
                    attack_distance: 2.5,
                    field_of_view: 70.0,
                    sensitivity: 120.0,
                    loudness_threshold: 12.0,
                },
            },
        }
    }
}

/// Presets for all three levels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyTable {
    pub easy: DifficultyPreset,
    pub medium: DifficultyPreset,
    pub hard: DifficultyPreset,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: DifficultyPreset::builtin(DifficultyLevel::Easy),
            medium: DifficultyPreset::builtin(DifficultyLevel::Medium),
            hard: DifficultyPreset::builtin(DifficultyLevel::Hard),
        }
    }
}

impl DifficultyTable {
    pub fn get(&self, level: DifficultyLevel) -> &DifficultyPreset {
        match level {
            DifficultyLevel::Easy => &self.easy,
            DifficultyLevel::Medium => &self.medium,
            DifficultyLevel::Hard => &self.hard,
        }
    }

    /// Validates every preset.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.easy.parameters.validate()?;
        self.medium.parameters.validate()?;
        self.hard.parameters.validate()
    }
}

/// Rejected difficulty binding.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DifficultyError {
    #[error("difficulty parameters were already applied to this agent")]
    AlreadyApplied,

    #[error("difficulty parameters must be applied before the first tick")]
    AgentStarted,

    #[error("invalid difficulty parameters: {0}")]
    Invalid(#[from] ConfigError),
}

impl StalkerError for DifficultyError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyApplied => "DIFFICULTY_ALREADY_APPLIED",
            Self::AgentStarted => "DIFFICULTY_AGENT_STARTED",
            Self::Invalid(_) => "DIFFICULTY_INVALID",
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn unknown_index_falls_back_to_medium() {
        assert_eq!(DifficultyLevel::from_index(0), DifficultyLevel::Easy);
        assert_eq!(DifficultyLevel::from_index(2), DifficultyLevel::Hard);
        assert_eq!(DifficultyLevel::from_index(7), DifficultyLevel::Medium);
        assert_eq!(DifficultyLevel::from_index(-1), DifficultyLevel::Medium);
    }

    #[test]
    fn levels_parse_case_insensitively() {
        assert_eq!("HARD".parse::<DifficultyLevel>(), Ok(DifficultyLevel::Hard));
        assert_eq!(DifficultyLevel::Easy.to_string(), "easy");
        assert!("nightmare".parse::<DifficultyLevel>().is_err());
    }

    #[test]
    fn apply_overwrites_exactly_six_fields() {
        let original = AgentConfig::default();
        let mut config = original.clone();
        let hard = DifficultyPreset::builtin(DifficultyLevel::Hard).parameters;
        hard.apply_to(&mut config);

        assert_eq!(DifficultyParameters::from_config(&config), hard);

        // Restoring the six fields yields the original config again.
        DifficultyParameters::from_config(&original).apply_to(&mut config);
        assert_eq!(config, original);
    }

    #[test]
    fn builtin_presets_are_valid_and_medium_matches_reference_tuning() {
        let table = DifficultyTable::default();
        assert_eq!(table.validate(), Ok(()));
        for level in DifficultyLevel::iter() {
            assert_eq!(*table.get(level), DifficultyPreset::builtin(level));
        }
        assert_eq!(
            table.medium.parameters,
            DifficultyParameters::from_config(&AgentConfig::default())
        );
        assert_eq!(table.get(DifficultyLevel::Hard).required_keys, 7);
    }
}
