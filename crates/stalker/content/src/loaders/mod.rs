//! Content loaders for reading tuning data from files.

pub mod difficulty;
pub mod factory;
pub mod tuning;

pub use difficulty::DifficultyLoader;
pub use factory::{ContentFactory, DIFFICULTY_FILE, TUNING_FILE};
pub use tuning::TuningLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
