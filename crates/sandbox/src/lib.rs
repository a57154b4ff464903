//! Headless reference scene for the stalker controller.
//!
//! Implements every collaborator trait of `stalker-core` with simple
//! geometry so the agent can be run, logged and tested without an engine.
pub mod arena;
pub mod avatar;
pub mod config;
pub mod geometry;
pub mod microphone;
pub mod navigation;
pub mod recorders;
pub mod rng;
pub mod scene;

pub use arena::Arena;
pub use avatar::{Avatar, Waypoint};
pub use config::SimConfig;
pub use geometry::Aabb;
pub use microphone::{Microphone, NoiseBurst, NoiseScript};
pub use navigation::{PathFollower, RectNavMesh};
pub use recorders::{AudioLog, PresentationLog};
pub use rng::SeededRng;
pub use scene::{Scene, SceneLayout, Stage};
