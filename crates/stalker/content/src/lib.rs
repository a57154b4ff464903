//! Data-driven tuning and difficulty content.
//!
//! This crate loads the agent's tuning (RON) and the difficulty presets
//! (TOML) from a data directory. Content is handed to the scene at startup
//! and never changes while the agent ticks.
//!
//! All loaders deserialize `stalker-core` types directly through its `serde`
//! feature and validate them before returning.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ContentFactory, DifficultyLoader, LoadResult, TuningLoader};
