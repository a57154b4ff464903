//! Collaborator access errors.

use crate::error::{ErrorSeverity, StalkerError};

/// A collaborator slot in [`Env`](super::Env) was left empty.
///
/// The controller treats every variant as "skip this concern for the current
/// tick"; a scene may supply the collaborator later without re-creating the
/// agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// No target is bound to the agent.
    #[error("target not available")]
    TargetUnavailable,

    #[error("world queries not available")]
    WorldUnavailable,

    #[error("navigation mesh not available")]
    NavMeshUnavailable,

    #[error("locomotion not available")]
    LocomotionUnavailable,

    #[error("loudness sampler not available")]
    LoudnessUnavailable,

    #[error("audio sink not available")]
    AudioUnavailable,

    #[error("presentation sink not available")]
    PresentationUnavailable,
}

impl StalkerError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            TargetUnavailable => "ORACLE_TARGET_UNAVAILABLE",
            WorldUnavailable => "ORACLE_WORLD_UNAVAILABLE",
            NavMeshUnavailable => "ORACLE_NAVMESH_UNAVAILABLE",
            LocomotionUnavailable => "ORACLE_LOCOMOTION_UNAVAILABLE",
            LoudnessUnavailable => "ORACLE_LOUDNESS_UNAVAILABLE",
            AudioUnavailable => "ORACLE_AUDIO_UNAVAILABLE",
            PresentationUnavailable => "ORACLE_PRESENTATION_UNAVAILABLE",
        }
    }
}
