//! Content factory for loading tuning from a data directory.

use std::path::{Path, PathBuf};

use stalker_core::{AgentConfig, DifficultyLevel, DifficultyPreset, DifficultyTable};
use tracing::{debug, warn};

use crate::loaders::{DifficultyLoader, LoadResult, TuningLoader};

/// Tuning file name inside the data directory.
pub const TUNING_FILE: &str = "stalker.ron";

/// Difficulty table file name inside the data directory.
pub const DIFFICULTY_FILE: &str = "difficulty.toml";

/// Content factory that loads all agent content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── stalker.ron
/// └── difficulty.toml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load agent tuning from `stalker.ron`.
    pub fn load_tuning(&self) -> LoadResult<AgentConfig> {
        let path = self.data_dir.join(TUNING_FILE);
        debug!(path = %path.display(), "loading agent tuning");
        TuningLoader::load(&path)
    }

    /// Load difficulty presets from `difficulty.toml`.
    pub fn load_difficulties(&self) -> LoadResult<DifficultyTable> {
        let path = self.data_dir.join(DIFFICULTY_FILE);
        debug!(path = %path.display(), "loading difficulty presets");
        DifficultyLoader::load(&path)
    }

    /// Preset for `level`, falling back to the built-in table when
    /// `difficulty.toml` is absent. A present but malformed file is an error.
    pub fn load_preset(&self, level: DifficultyLevel) -> LoadResult<DifficultyPreset> {
        let path = self.data_dir.join(DIFFICULTY_FILE);
        if !path.exists() {
            warn!(path = %path.display(), "difficulty table missing, using built-in presets");
            return Ok(DifficultyPreset::builtin(level));
        }
        Ok(*self.load_difficulties()?.get(level))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
