//! Agent tuning loader.

use std::path::Path;

use anyhow::Context;
use stalker_core::AgentConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`AgentConfig`] from RON files.
///
/// Every field is optional in the file; omitted fields keep the reference
/// tuning.
pub struct TuningLoader;

impl TuningLoader {
    /// Load and validate agent tuning from a RON file.
    pub fn load(path: &Path) -> LoadResult<AgentConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in tuning file {}", path.display()))
    }

    /// Parse and validate agent tuning from RON text.
    pub fn parse(content: &str) -> LoadResult<AgentConfig> {
        let config: AgentConfig = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tuning RON: {}", e))?;
        config.validate().context("invalid agent tuning")?;
        Ok(config)
    }
}
