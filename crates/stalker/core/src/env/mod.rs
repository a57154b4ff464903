//! Collaborators the controller drives each tick.
//!
//! The agent never touches engine objects directly. Every query and side
//! effect goes through one of the traits re-exported here, and the [`Env`]
//! aggregate bundles them for a single tick. Any slot may be left empty: the
//! agent skips the concern that needs it and retries on the next tick.
mod audio;
mod error;
mod loudness;
mod navigation;
mod presentation;
mod rng;
mod target;
mod world;

pub use audio::{AudioCue, AudioLoop, AudioOracle};
pub use error::OracleError;
pub use loudness::{LoudnessSampler, average_loudness};
pub use navigation::{LocomotionOracle, NavMeshOracle};
pub use presentation::{AnimationIntents, PresentationOracle};
pub use rng::{RngOracle, ScriptedRng};
pub use target::{ColliderId, TargetOracle};
pub use world::{ColliderTags, DoorController, RayHit, WorldOracle};

/// Collaborators available for one tick.
///
/// Built with [`Env::empty`] and the `with_*` methods; borrows last only for
/// the duration of the tick call.
#[derive(Default)]
pub struct Env<'a> {
    target: Option<&'a mut dyn TargetOracle>,
    world: Option<&'a mut dyn WorldOracle>,
    navmesh: Option<&'a dyn NavMeshOracle>,
    locomotion: Option<&'a mut dyn LocomotionOracle>,
    loudness: Option<&'a mut dyn LoudnessSampler>,
    audio: Option<&'a mut dyn AudioOracle>,
    presentation: Option<&'a mut dyn PresentationOracle>,
}

impl<'a> Env<'a> {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: &'a mut dyn TargetOracle) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_world(mut self, world: &'a mut dyn WorldOracle) -> Self {
        self.world = Some(world);
        self
    }

    pub fn with_navmesh(mut self, navmesh: &'a dyn NavMeshOracle) -> Self {
        self.navmesh = Some(navmesh);
        self
    }

    pub fn with_locomotion(mut self, locomotion: &'a mut dyn LocomotionOracle) -> Self {
        self.locomotion = Some(locomotion);
        self
    }

    pub fn with_loudness(mut self, loudness: &'a mut dyn LoudnessSampler) -> Self {
        self.loudness = Some(loudness);
        self
    }

    pub fn with_audio(mut self, audio: &'a mut dyn AudioOracle) -> Self {
        self.audio = Some(audio);
        self
    }

    pub fn with_presentation(mut self, presentation: &'a mut dyn PresentationOracle) -> Self {
        self.presentation = Some(presentation);
        self
    }

    /// Returns the bound target.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::TargetUnavailable` if no target is bound.
    pub fn target(&mut self) -> Result<&mut (dyn TargetOracle + 'a), OracleError> {
        self.target
            .as_deref_mut()
            .ok_or(OracleError::TargetUnavailable)
    }

    pub fn world(&mut self) -> Result<&mut (dyn WorldOracle + 'a), OracleError> {
        self.world.as_deref_mut().ok_or(OracleError::WorldUnavailable)
    }

    pub fn navmesh(&self) -> Result<&'a dyn NavMeshOracle, OracleError> {
        self.navmesh.ok_or(OracleError::NavMeshUnavailable)
    }

    pub fn locomotion(&mut self) -> Result<&mut (dyn LocomotionOracle + 'a), OracleError> {
        self.locomotion
            .as_deref_mut()
            .ok_or(OracleError::LocomotionUnavailable)
    }

    pub fn loudness(&mut self) -> Result<&mut (dyn LoudnessSampler + 'a), OracleError> {
        self.loudness
            .as_deref_mut()
            .ok_or(OracleError::LoudnessUnavailable)
    }

    pub fn audio(&mut self) -> Result<&mut (dyn AudioOracle + 'a), OracleError> {
        self.audio.as_deref_mut().ok_or(OracleError::AudioUnavailable)
    }

    pub fn presentation(&mut self) -> Result<&mut (dyn PresentationOracle + 'a), OracleError> {
        self.presentation
            .as_deref_mut()
            .ok_or(OracleError::PresentationUnavailable)
    }

    /// Splits out the world and target together for a perception pass.
    pub fn world_and_target(
        &mut self,
    ) -> (
        Option<&mut (dyn WorldOracle + 'a)>,
        Option<&mut (dyn TargetOracle + 'a)>,
    ) {
        (self.world.as_deref_mut(), self.target.as_deref_mut())
    }
}
