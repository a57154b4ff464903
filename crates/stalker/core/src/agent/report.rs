use glam::Vec3;

use crate::env::AnimationIntents;
use crate::environment::{AttackOutcome, DoorProbe};
use crate::perception::PerceptionResult;
use crate::pursuit::{PursuitState, Transition};

/// Something observable that happened during a tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentEvent {
    StateChanged(Transition),
    Attacked(AttackOutcome),
    DoorsProbed(DoorProbe),
    PatrolPointChosen(Vec3),
    /// No reachable point was found; the agent holds position.
    PatrolSamplingFailed,
    VisibilityChanged(bool),
    JumpscareStarted,
    WarningShown,
    VocalPlayed(usize),
}

/// Summary of one tick.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    pub state: PursuitState,
    pub perception: PerceptionResult,
    pub intents: AnimationIntents,
    pub visible: bool,
    pub events: Vec<AgentEvent>,
}

impl TickReport {
    pub fn transition(&self) -> Option<Transition> {
        self.events.iter().find_map(|event| match event {
            AgentEvent::StateChanged(transition) => Some(*transition),
            _ => None,
        })
    }

    /// Damage landed this tick.
    pub fn damage_dealt(&self) -> u32 {
        self.events
            .iter()
            .map(|event| match event {
                AgentEvent::Attacked(AttackOutcome::Hit { damage }) => *damage,
                _ => 0,
            })
            .sum()
    }
}
