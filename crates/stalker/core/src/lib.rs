//! Tick-driven controller for the hostile agent of a survival-horror scene.
//!
//! `stalker-core` perceives the player through occluded sight cones and
//! ambient loudness, runs the Patrol/Chase/Search pursuit machine, forces
//! doors, lands attacks and schedules the atmospheric effects. It performs no
//! I/O: every query and side effect goes through the collaborator traits in
//! [`env`], and [`agent::StalkerAgent::tick`] is the single entry point per
//! frame.
pub mod agent;
pub mod audio;
pub mod config;
pub mod difficulty;
pub mod effects;
pub mod env;
pub mod environment;
pub mod error;
pub mod locomotion;
pub mod math;
pub mod perception;
pub mod pursuit;

pub use agent::{AgentEvent, StalkerAgent, TickReport};
pub use audio::{FootstepLoops, LoopChange, VocalCues};
pub use config::{
    AgentConfig, AudioTuning, ConfigError, EffectTuning, MovementTuning, PerceptionTuning,
    PursuitTuning,
};
pub use difficulty::{
    DifficultyError, DifficultyLevel, DifficultyParameters, DifficultyPreset, DifficultyTable,
};
pub use effects::{EffectScheduler, EffectTask};
pub use env::{
    AnimationIntents, AudioCue, AudioLoop, AudioOracle, ColliderId, ColliderTags,
    DoorController, Env, LocomotionOracle, LoudnessSampler, NavMeshOracle, OracleError,
    PresentationOracle, RayHit, RngOracle, ScriptedRng, TargetOracle, WorldOracle,
};
pub use environment::{AttackOutcome, DoorProbe};
pub use error::{ErrorSeverity, StalkerError};
pub use locomotion::LocomotionFacts;
pub use math::Pose;
pub use perception::{PerceptionResult, VisionCone};
pub use pursuit::{Command, PursuitMachine, PursuitState, Transition, TransitionCause};
