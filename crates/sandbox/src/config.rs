//! Simulation runtime configuration.
use std::env;
use std::path::PathBuf;

use stalker_core::DifficultyLevel;

/// Settings for one `stalker-sim` run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub data_dir: PathBuf,
    pub difficulty: DifficultyLevel,
    pub seed: u64,
    /// Ticks per second.
    pub tick_rate: u32,
    /// Simulated seconds.
    pub duration: f32,
    pub log_dir: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            difficulty: DifficultyLevel::default(),
            seed: 0,
            tick_rate: 50,
            duration: 60.0,
            log_dir: None,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `STALKER_DATA_DIR` - Directory holding `stalker.ron` and `difficulty.toml` (default: `data`)
    /// - `STALKER_DIFFICULTY` - `easy`, `medium`, `hard` or a stored index (default: medium)
    /// - `STALKER_SEED` - Random seed (default: 0)
    /// - `STALKER_TICK_RATE` - Ticks per second (default: 50)
    /// - `STALKER_DURATION` - Simulated seconds (default: 60)
    /// - `STALKER_LOG_DIR` - Log file directory (default: platform cache dir)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("STALKER_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Ok(raw) = env::var("STALKER_DIFFICULTY") {
            config.difficulty = parse_difficulty(&raw);
        }

        if let Some(seed) = read_env::<u64>("STALKER_SEED") {
            config.seed = seed;
        }

        if let Some(rate) = read_env::<u32>("STALKER_TICK_RATE") {
            config.tick_rate = rate.max(1);
        }

        if let Some(duration) = read_env::<f32>("STALKER_DURATION") {
            config.duration = duration.max(0.0);
        }

        config.log_dir = env::var("STALKER_LOG_DIR").ok().map(PathBuf::from);

        config
    }

    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    pub fn tick_count(&self) -> usize {
        (self.duration * self.tick_rate as f32).round() as usize
    }
}

/// Accepts a level name or a persisted index; anything else is Medium.
pub fn parse_difficulty(raw: &str) -> DifficultyLevel {
    let raw = raw.trim();
    raw.parse::<DifficultyLevel>()
        .ok()
        .or_else(|| raw.parse::<i64>().ok().map(DifficultyLevel::from_index))
        .unwrap_or_default()
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_accepts_names_and_indices() {
        assert_eq!(parse_difficulty("HARD"), DifficultyLevel::Hard);
        assert_eq!(parse_difficulty("0"), DifficultyLevel::Easy);
        assert_eq!(parse_difficulty("9"), DifficultyLevel::Medium);
        assert_eq!(parse_difficulty("nightmare"), DifficultyLevel::Medium);
    }

    #[test]
    fn tick_count_follows_rate() {
        let config = SimConfig {
            tick_rate: 20,
            duration: 3.0,
            ..SimConfig::default()
        };
        assert_eq!(config.tick_count(), 60);
        assert_eq!(config.dt(), 0.05);
    }
}
