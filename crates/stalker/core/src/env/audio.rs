/// One-shot sound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AudioCue {
    /// Door probe found at least one door.
    Knock,
    Jumpscare,
    /// Vocal clip by catalog index.
    Vocal(usize),
}

/// Looping footstep or attack sound; at most one plays at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AudioLoop {
    Walking,
    Running,
    Attack,
}

/// Sound output of the scene.
pub trait AudioOracle {
    fn play(&mut self, cue: AudioCue);

    fn start_loop(&mut self, sound: AudioLoop);

    fn stop_loop(&mut self, sound: AudioLoop);
}
