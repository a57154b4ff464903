use strum::Display;

/// Active pursuit mode. Exactly one is active at any time.
///
/// Attacking is not a state of its own; it is a condition evaluated on
/// every [`PursuitState::Chase`] tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum PursuitState {
    #[default]
    Patrol,
    Chase,
    Search,
}

/// Why a transition happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TransitionCause {
    /// A sight cone saw the target.
    Sighted,
    /// Only the hearing channel fired.
    Heard,
    /// Nothing sensed for longer than the give-up duration.
    LostTrail,
    /// Search arrived at the last known position.
    ReachedLastKnown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    pub from: PursuitState,
    pub to: PursuitState,
    pub cause: TransitionCause,
}
