//! Footstep loops and vocal cues.

use tracing::debug;

use crate::env::{AudioLoop, RngOracle};
use crate::locomotion::LocomotionFacts;
use crate::pursuit::PursuitState;

/// Start/stop pair produced when the desired loop changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopChange {
    pub stop: Option<AudioLoop>,
    pub start: Option<AudioLoop>,
}

impl LoopChange {
    pub fn is_empty(&self) -> bool {
        self.stop.is_none() && self.start.is_none()
    }
}

/// Tracks which footstep loop is playing so only changes reach the sink.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FootstepLoops {
    playing: Option<AudioLoop>,
}

impl FootstepLoops {
    pub fn playing(&self) -> Option<AudioLoop> {
        self.playing
    }

    /// Loop that should be playing for this tick.
    pub fn select(
        state: PursuitState,
        attacking: bool,
        locomotion: &LocomotionFacts,
    ) -> Option<AudioLoop> {
        if attacking {
            return Some(AudioLoop::Attack);
        }
        if locomotion.is_idle() {
            return None;
        }
        match state {
            PursuitState::Patrol => Some(AudioLoop::Walking),
            PursuitState::Chase | PursuitState::Search => Some(AudioLoop::Running),
        }
    }

    pub fn update(&mut self, desired: Option<AudioLoop>) -> LoopChange {
        if desired == self.playing {
            return LoopChange::default();
        }
        let change = LoopChange {
            stop: self.playing,
            start: desired,
        };
        debug!(stop = ?change.stop, start = ?change.start, "footstep loop changed");
        self.playing = desired;
        change
    }
}

/// Random vocal clips with a cooldown equal to the playing clip's length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VocalCues {
    cooldown: f32,
}

impl VocalCues {
    pub fn is_playing(&self) -> bool {
        self.cooldown > 0.0
    }

    pub fn advance(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    /// Picks a clip unless one is still playing. Returns the clip index.
    pub fn try_play(&mut self, rng: &mut dyn RngOracle, clip_lengths: &[f32]) -> Option<usize> {
        if self.is_playing() {
            return None;
        }
        let index = rng.index(clip_lengths.len())?;
        self.cooldown = clip_lengths[index];
        debug!(index, cooldown = self.cooldown, "vocal cue");
        Some(index)
    }
}
