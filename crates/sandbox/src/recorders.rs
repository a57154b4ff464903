//! Audio and presentation sinks that record what the agent asked for.

use stalker_core::{AnimationIntents, AudioCue, AudioLoop, AudioOracle, PresentationOracle};
use tracing::trace;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AudioLog {
    played: Vec<AudioCue>,
    loop_starts: Vec<AudioLoop>,
    loop_stops: Vec<AudioLoop>,
    current_loop: Option<AudioLoop>,
}

impl AudioLog {
    pub fn played(&self) -> &[AudioCue] {
        &self.played
    }

    pub fn count(&self, cue: AudioCue) -> usize {
        self.played.iter().filter(|played| **played == cue).count()
    }

    pub fn vocal_count(&self) -> usize {
        self.played
            .iter()
            .filter(|played| matches!(played, AudioCue::Vocal(_)))
            .count()
    }

    pub fn loop_starts(&self) -> &[AudioLoop] {
        &self.loop_starts
    }

    pub fn loop_stops(&self) -> &[AudioLoop] {
        &self.loop_stops
    }

    pub fn current_loop(&self) -> Option<AudioLoop> {
        self.current_loop
    }
}

impl AudioOracle for AudioLog {
    fn play(&mut self, cue: AudioCue) {
        trace!(?cue, "play");
        self.played.push(cue);
    }

    fn start_loop(&mut self, sound: AudioLoop) {
        trace!(?sound, "loop start");
        self.loop_starts.push(sound);
        self.current_loop = Some(sound);
    }

    fn stop_loop(&mut self, sound: AudioLoop) {
        trace!(?sound, "loop stop");
        self.loop_stops.push(sound);
        if self.current_loop == Some(sound) {
            self.current_loop = None;
        }
    }
}

/// Last state of every presentation channel.
#[derive(Clone, Debug, PartialEq)]
pub struct PresentationLog {
    pub intents: AnimationIntents,
    pub visible: bool,
    pub visibility_changes: u32,
    pub overlay: (bool, f32),
    pub overlay_shown_count: u32,
    pub banner_text: String,
    pub banner: (bool, f32),
    pub meter: f32,
}

impl Default for PresentationLog {
    fn default() -> Self {
        Self {
            intents: AnimationIntents::empty(),
            visible: true,
            visibility_changes: 0,
            overlay: (false, 0.0),
            overlay_shown_count: 0,
            banner_text: String::new(),
            banner: (false, 0.0),
            meter: 0.0,
        }
    }
}

impl PresentationOracle for PresentationLog {
    fn set_intents(&mut self, intents: AnimationIntents) {
        self.intents = intents;
    }

    fn set_agent_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visibility_changes += 1;
        }
        self.visible = visible;
    }

    fn set_jumpscare_overlay(&mut self, shown: bool, alpha: f32) {
        if shown && !self.overlay.0 {
            self.overlay_shown_count += 1;
        }
        self.overlay = (shown, alpha);
    }

    fn set_warning_banner(&mut self, text: &str, shown: bool, alpha: f32) {
        if self.banner_text != text {
            self.banner_text = text.to_owned();
        }
        self.banner = (shown, alpha);
    }

    fn set_loudness_meter(&mut self, value: f32) {
        self.meter = value;
    }
}
