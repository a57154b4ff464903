//! Difficulty preset loader.

use std::path::Path;

use anyhow::Context;
use stalker_core::DifficultyTable;

use crate::loaders::{LoadResult, read_file};

/// Loader for the three difficulty presets from TOML files.
///
/// ```toml
/// [easy]
/// required_keys = 3
///
/// [easy.parameters]
/// chase_speed = 3.0
/// sight_distance = 10.0
/// attack_distance = 1.5
/// field_of_view = 50.0
/// sensitivity = 80.0
/// loudness_threshold = 8.0
/// ```
pub struct DifficultyLoader;

impl DifficultyLoader {
    pub fn load(path: &Path) -> LoadResult<DifficultyTable> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in difficulty file {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<DifficultyTable> {
        let table: DifficultyTable = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse difficulty TOML: {}", e))?;
        table.validate().context("invalid difficulty preset")?;
        Ok(table)
    }
}
