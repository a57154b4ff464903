/// Elapsed-time counters owned by the pursuit machine, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timers {
    /// Idle time at the current patrol point.
    pub patrol_wait: f32,
    /// Time in `Chase` without any detection.
    pub since_last_seen: f32,
    /// Search time since the last door probe.
    pub door_wait: f32,
    /// Detected time accumulated in the current chase episode.
    pub chase_duration: f32,
}

impl Timers {
    /// Counters for a fresh agent. `patrol_wait` starts full so the first
    /// patrol point is picked on the first tick.
    pub fn new(patrol_period: f32) -> Self {
        Self {
            patrol_wait: patrol_period,
            ..Self::default()
        }
    }
}
