//! Pursuit state machine: Patrol, Chase and Search with time-based
//! hysteresis. Attacking is a sub-condition of Chase.
mod machine;
mod state;
mod timers;

pub use machine::{Command, MAX_COMMANDS, Observation, PursuitMachine, Step};
pub use state::{PursuitState, Transition, TransitionCause};
pub use timers::Timers;
