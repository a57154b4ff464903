use arrayvec::ArrayVec;
use glam::Vec3;
use tracing::{debug, info, warn};

use super::{PursuitState, Timers, Transition, TransitionCause};
use crate::config::AgentConfig;
use crate::locomotion::LocomotionFacts;
use crate::perception::PerceptionResult;

/// Maximum number of commands a single step can emit.
pub const MAX_COMMANDS: usize = 8;

/// Inputs of one pursuit step.
#[derive(Clone, Copy, Debug)]
pub struct Observation {
    /// Tick delta in seconds.
    pub dt: f32,
    pub agent_position: Vec3,
    /// `None` when the target reference is unavailable this tick.
    pub target_position: Option<Vec3>,
    pub perception: PerceptionResult,
    pub locomotion: LocomotionFacts,
    /// Multiplier applied to the chase speed, driven by flicker visibility.
    pub chase_speed_factor: f32,
}

/// Side effect requested by the machine and executed by the agent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    SetDestination(Vec3),
    SetSpeed(f32),
    /// Smoothly rotate toward a point (outside attack range only).
    FaceToward(Vec3),
    /// Attack sub-condition holds this tick.
    Attack,
    ProbeDoors,
    PickPatrolPoint,
}

/// Output of one pursuit step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Step {
    pub transition: Option<Transition>,
    pub commands: ArrayVec<Command, MAX_COMMANDS>,
}

impl Step {
    fn emit(&mut self, command: Command) {
        if self.commands.try_push(command).is_err() {
            warn!(?command, "pursuit step command buffer full, dropping command");
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.commands.contains(&Command::Attack)
    }
}

/// Patrol / Chase / Search machine.
///
/// Pure value type: it owns its timers and the last known target position,
/// and turns an [`Observation`] into a [`Step`]. It never talks to the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct PursuitMachine {
    state: PursuitState,
    timers: Timers,
    last_known: Option<Vec3>,
}

impl PursuitMachine {
    pub fn new(patrol_period: f32) -> Self {
        Self {
            state: PursuitState::Patrol,
            timers: Timers::new(patrol_period),
            last_known: None,
        }
    }

    pub fn state(&self) -> PursuitState {
        self.state
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Valid only while chasing or searching.
    pub fn last_known_position(&self) -> Option<Vec3> {
        self.last_known
    }

    /// Advances the machine by one tick.
    ///
    /// Evaluated in priority order: detection, losing sight, searching,
    /// patrolling. Every transition completes within the call.
    pub fn step(&mut self, obs: &Observation, config: &AgentConfig) -> Step {
        let mut step = Step::default();

        if obs.perception.detected() {
            if let Some(target) = obs.target_position {
                self.chase(obs, target, config, &mut step);
                return step;
            }
        }

        match self.state {
            PursuitState::Chase => self.lose_sight(obs, config, &mut step),
            PursuitState::Search => self.search(obs, config, &mut step),
            PursuitState::Patrol => self.patrol(obs, config, &mut step),
        }
        step
    }

    fn enter(&mut self, to: PursuitState, cause: TransitionCause, step: &mut Step) {
        let transition = Transition {
            from: self.state,
            to,
            cause,
        };
        info!(from = %transition.from, to = %to, cause = %cause, "pursuit transition");
        self.state = to;
        step.transition = Some(transition);
    }

    fn chase(&mut self, obs: &Observation, target: Vec3, config: &AgentConfig, step: &mut Step) {
        if self.state != PursuitState::Chase {
            let cause = if obs.perception.saw_by_sight {
                TransitionCause::Sighted
            } else {
                TransitionCause::Heard
            };
            self.enter(PursuitState::Chase, cause, step);
        }

        self.timers.since_last_seen = 0.0;
        self.timers.chase_duration += obs.dt;
        self.last_known = Some(target);

        step.emit(Command::SetDestination(target));
        step.emit(Command::SetSpeed(
            config.movement.chase_speed * obs.chase_speed_factor,
        ));

        let distance = obs.agent_position.distance(target);
        if distance <= config.pursuit.attack_distance {
            step.emit(Command::Attack);
        } else {
            step.emit(Command::FaceToward(target));
        }
    }

    fn lose_sight(&mut self, obs: &Observation, config: &AgentConfig, step: &mut Step) {
        // Without a target reference the trail cannot be judged; hold.
        let Some(target) = obs.target_position else {
            return;
        };

        self.timers.since_last_seen += obs.dt;
        if self.timers.since_last_seen <= config.pursuit.time_to_give_up_chase {
            return;
        }

        self.enter(PursuitState::Search, TransitionCause::LostTrail, step);
        self.last_known = Some(target);
        self.timers.since_last_seen = 0.0;
        self.timers.chase_duration = 0.0;
        self.timers.door_wait = 0.0;

        step.emit(Command::SetDestination(target));
        step.emit(Command::SetSpeed(config.movement.patrol_speed));
    }

    fn search(&mut self, obs: &Observation, config: &AgentConfig, step: &mut Step) {
        self.timers.door_wait += obs.dt;
        if self.timers.door_wait >= config.pursuit.door_wait_duration {
            debug!(waited = self.timers.door_wait, "search door probe due");
            step.emit(Command::ProbeDoors);
            self.timers.door_wait = 0.0;
        }

        let goal = self.last_known.unwrap_or(obs.agent_position);
        if obs.agent_position.distance(goal) < config.pursuit.search_arrival_threshold {
            self.enter(PursuitState::Patrol, TransitionCause::ReachedLastKnown, step);
            self.last_known = None;
            self.timers.patrol_wait = 0.0;
            step.emit(Command::SetSpeed(config.movement.patrol_speed));
            self.patrol(obs, config, step);
        }
    }

    fn patrol(&mut self, obs: &Observation, config: &AgentConfig, step: &mut Step) {
        if !obs.locomotion.arrived {
            self.timers.patrol_wait = 0.0;
            return;
        }

        if obs.locomotion.is_stationary() {
            self.timers.patrol_wait += obs.dt;
        }
        if self.timers.patrol_wait >= config.movement.patrol_period {
            step.emit(Command::PickPatrolPoint);
            self.timers.patrol_wait = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.1;

    fn observe(agent: Vec3, target: Option<Vec3>, perception: PerceptionResult) -> Observation {
        Observation {
            dt: DT,
            agent_position: agent,
            target_position: target,
            perception,
            locomotion: LocomotionFacts::stationary(agent),
            chase_speed_factor: 1.0,
        }
    }

    fn sighted() -> PerceptionResult {
        PerceptionResult {
            saw_by_sight: true,
            saw_by_hearing: false,
        }
    }

    fn heard() -> PerceptionResult {
        PerceptionResult {
            saw_by_sight: false,
            saw_by_hearing: true,
        }
    }

    #[test]
    fn first_tick_picks_a_patrol_point() {
        let config = AgentConfig::default();
        let mut machine = PursuitMachine::new(config.movement.patrol_period);
        let step = machine.step(&observe(Vec3::ZERO, None, PerceptionResult::NONE), &config);
        assert_eq!(step.commands.as_slice(), &[Command::PickPatrolPoint]);
        assert_eq!(machine.timers().patrol_wait, 0.0);
    }

    #[test]
    fn sight_enters_chase_from_any_state() {
        let config = AgentConfig::default();
        let target = Vec3::new(0.0, 0.0, 5.0);
        let mut machine = PursuitMachine::new(config.movement.patrol_period);

        let step = machine.step(&observe(Vec3::ZERO, Some(target), sighted()), &config);
        assert_eq!(machine.state(), PursuitState::Chase);
        assert_eq!(
            step.transition.map(|t| t.cause),
            Some(TransitionCause::Sighted)
        );
        assert_eq!(
            step.commands.as_slice(),
            &[
                Command::SetDestination(target),
                Command::SetSpeed(4.0),
                Command::FaceToward(target),
            ]
        );
        assert_eq!(machine.last_known_position(), Some(target));
    }

    #[test]
    fn attack_condition_holds_every_tick_in_range() {
        let config = AgentConfig::default();
        let target = Vec3::new(0.0, 0.0, 1.5);
        let mut machine = PursuitMachine::new(config.movement.patrol_period);

        for _ in 0..3 {
            let step = machine.step(&observe(Vec3::ZERO, Some(target), heard()), &config);
            assert!(step.is_attacking());
            assert!(!step.commands.contains(&Command::FaceToward(target)));
        }
    }

    #[test]
    fn gives_up_only_after_the_give_up_duration() {
        let config = AgentConfig::default();
        let target = Vec3::new(0.0, 0.0, 8.0);
        let mut machine = PursuitMachine::new(config.movement.patrol_period);
        machine.step(&observe(Vec3::ZERO, Some(target), sighted()), &config);

        // 50 ticks of 0.1 s accumulate to 5.0 s (within float error), not yet beyond.
        let mut ticks = 0;
        let step = loop {
            ticks += 1;
            let step = machine.step(
                &observe(Vec3::ZERO, Some(target), PerceptionResult::NONE),
                &config,
            );
            if step.transition.is_some() {
                break step;
            }
            assert!(ticks < 100);
        };
        assert!((50..=52).contains(&ticks), "gave up after {ticks} ticks");
        assert_eq!(machine.state(), PursuitState::Search);
        assert_eq!(
            step.commands.as_slice(),
            &[Command::SetDestination(target), Command::SetSpeed(2.0)]
        );
        assert_eq!(machine.timers().chase_duration, 0.0);
    }

    #[test]
    fn unavailable_target_holds_chase() {
        let config = AgentConfig::default();
        let mut machine = PursuitMachine::new(config.movement.patrol_period);
        machine.step(
            &observe(Vec3::ZERO, Some(Vec3::new(0.0, 0.0, 5.0)), sighted()),
            &config,
        );

        for _ in 0..100 {
            let step = machine.step(&observe(Vec3::ZERO, None, sighted()), &config);
            assert!(step.transition.is_none());
        }
        assert_eq!(machine.state(), PursuitState::Chase);
        assert_eq!(machine.timers().since_last_seen, 0.0);
    }

    fn searching_machine(config: &AgentConfig, last_known: Vec3) -> PursuitMachine {
        let mut machine = PursuitMachine::new(config.movement.patrol_period);
        machine.step(&observe(Vec3::ZERO, Some(last_known), sighted()), config);
        while machine.state() == PursuitState::Chase {
            machine.step(
                &observe(Vec3::ZERO, Some(last_known), PerceptionResult::NONE),
                config,
            );
        }
        machine
    }

    #[test]
    fn door_probe_fires_once_per_wait_duration() {
        let config = AgentConfig::default();
        let mut machine = searching_machine(&config, Vec3::new(0.0, 0.0, 50.0));

        let mut probes = 0;
        for _ in 0..250 {
            let step = machine.step(&observe(Vec3::ZERO, None, PerceptionResult::NONE), &config);
            probes += step
                .commands
                .iter()
                .filter(|c| **c == Command::ProbeDoors)
                .count();
        }
        // 25 s of searching with a 10 s wait.
        assert_eq!(probes, 2);
        assert_eq!(machine.state(), PursuitState::Search);
    }

    #[test]
    fn search_ends_on_arrival_tick() {
        let config = AgentConfig::default();
        let last_known = Vec3::new(0.0, 0.0, 10.0);
        let mut machine = searching_machine(&config, last_known);

        let step = machine.step(
            &observe(Vec3::new(0.0, 0.0, 8.9), None, PerceptionResult::NONE),
            &config,
        );
        assert!(step.transition.is_none());

        let step = machine.step(
            &observe(Vec3::new(0.0, 0.0, 9.5), None, PerceptionResult::NONE),
            &config,
        );
        assert_eq!(
            step.transition,
            Some(Transition {
                from: PursuitState::Search,
                to: PursuitState::Patrol,
                cause: TransitionCause::ReachedLastKnown,
            })
        );
        assert_eq!(machine.last_known_position(), None);
    }

    #[test]
    fn patrol_wait_holds_while_moving() {
        let config = AgentConfig::default();
        let mut machine = PursuitMachine::new(config.movement.patrol_period);
        machine.step(&observe(Vec3::ZERO, None, PerceptionResult::NONE), &config);

        let mut moving = observe(Vec3::ZERO, None, PerceptionResult::NONE);
        moving.locomotion.arrived = false;
        moving.locomotion.velocity = Vec3::X;
        for _ in 0..100 {
            let step = machine.step(&moving, &config);
            assert!(step.commands.is_empty());
        }
        assert_eq!(machine.timers().patrol_wait, 0.0);

        // Arrived but still drifting: no accumulation.
        let mut drifting = moving;
        drifting.locomotion.arrived = true;
        machine.step(&drifting, &config);
        assert_eq!(machine.timers().patrol_wait, 0.0);
    }
}
