//! The hostile agent controller.
//!
//! [`StalkerAgent::tick`] runs one frame of the controller against the
//! collaborators in an [`Env`]:
//!
//! 1. sync pose from locomotion and sample loudness
//! 2. perception
//! 3. pursuit step and command execution
//! 4. atmospheric effects
//! 5. audio loops, vocals and animation intents
//!
//! Missing collaborators never fail a tick; the concern that needs them is
//! skipped and logged at debug level.
mod report;

pub use report::{AgentEvent, TickReport};

use glam::Vec3;
use tracing::{debug, info};

use crate::audio::{FootstepLoops, VocalCues};
use crate::config::{AgentConfig, ConfigError};
use crate::difficulty::{DifficultyError, DifficultyParameters};
use crate::effects::{EffectContext, EffectOutput, EffectScheduler, EffectTrigger};
use crate::env::{
    AnimationIntents, AudioCue, AudioOracle, Env, OracleError, PresentationOracle, RngOracle,
    TargetOracle, WorldOracle,
};
use crate::environment::{AttackOutcome, probe_doors, strike};
use crate::locomotion::{LocomotionFacts, find_patrol_point};
use crate::math::Pose;
use crate::perception::{PerceptionResult, SightTarget, scaled_loudness, sense_target};
use crate::pursuit::{Command, Observation, PursuitMachine, PursuitState, Step};

/// A single antagonist.
pub struct StalkerAgent {
    config: AgentConfig,
    pose: Pose,
    speed: f32,
    machine: PursuitMachine,
    effects: EffectScheduler,
    footsteps: FootstepLoops,
    vocals: VocalCues,
    intents: AnimationIntents,
    rng: Box<dyn RngOracle>,
    difficulty_applied: bool,
    started: bool,
    last_loudness: Option<f32>,
}

impl core::fmt::Debug for StalkerAgent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StalkerAgent")
            .field("pose", &self.pose)
            .field("speed", &self.speed)
            .field("state", &self.machine.state())
            .field("intents", &self.intents)
            .field("visible", &self.effects.visible())
            .finish_non_exhaustive()
    }
}

fn skipped(concern: &'static str, err: OracleError) {
    debug!(concern, error = %err, "collaborator unavailable, skipping");
}

fn present(env: &mut Env<'_>, concern: &'static str, f: impl FnOnce(&mut dyn PresentationOracle)) {
    match env.presentation() {
        Ok(presentation) => f(presentation),
        Err(err) => skipped(concern, err),
    }
}

fn play(env: &mut Env<'_>, concern: &'static str, f: impl FnOnce(&mut dyn AudioOracle)) {
    match env.audio() {
        Ok(audio) => f(audio),
        Err(err) => skipped(concern, err),
    }
}

impl StalkerAgent {
    /// Creates an agent at `pose`.
    ///
    /// # Errors
    ///
    /// Returns the first invalid tuning field.
    pub fn new(
        config: AgentConfig,
        pose: Pose,
        rng: Box<dyn RngOracle>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            speed: config.movement.patrol_speed,
            machine: PursuitMachine::new(config.movement.patrol_period),
            config,
            pose,
            effects: EffectScheduler::new(),
            footsteps: FootstepLoops::default(),
            vocals: VocalCues::default(),
            intents: AnimationIntents::empty(),
            rng,
            difficulty_applied: false,
            started: false,
            last_loudness: None,
        })
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    /// Speed most recently commanded to the locomotion body.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn state(&self) -> PursuitState {
        self.machine.state()
    }

    pub fn machine(&self) -> &PursuitMachine {
        &self.machine
    }

    pub fn effects(&self) -> &EffectScheduler {
        &self.effects
    }

    pub fn intents(&self) -> AnimationIntents {
        self.intents
    }

    pub fn is_visible(&self) -> bool {
        self.effects.visible()
    }

    pub fn is_running(&self) -> bool {
        self.intents.contains(AnimationIntents::RUNNING)
    }

    pub fn is_idle(&self) -> bool {
        self.intents.contains(AnimationIntents::IDLE)
    }

    pub fn is_attacking(&self) -> bool {
        self.intents.contains(AnimationIntents::ATTACKING)
    }

    pub fn is_chasing(&self) -> bool {
        self.intents.contains(AnimationIntents::CHASING)
    }

    /// Scaled loudness from the last tick that had a sample.
    pub fn last_loudness(&self) -> Option<f32> {
        self.last_loudness
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Overwrites chase speed, sight distance, attack distance, field of view,
    /// sensitivity and loudness threshold.
    ///
    /// # Errors
    ///
    /// Allowed once, before the first tick, with valid values.
    pub fn set_difficulty_parameters(
        &mut self,
        parameters: DifficultyParameters,
    ) -> Result<(), DifficultyError> {
        if self.difficulty_applied {
            return Err(DifficultyError::AlreadyApplied);
        }
        if self.started {
            return Err(DifficultyError::AgentStarted);
        }
        parameters.validate()?;
        parameters.apply_to(&mut self.config);
        self.difficulty_applied = true;
        info!(?parameters, "difficulty parameters applied");
        Ok(())
    }

    /// Damages `target` if it is within attack distance right now.
    pub fn attack(&mut self, target: &mut dyn TargetOracle) -> AttackOutcome {
        strike(self.pose.position, target, &self.config.pursuit)
    }

    /// Runs one controller frame of `dt` seconds.
    pub fn tick(&mut self, env: &mut Env<'_>, dt: f32) -> TickReport {
        let mut report = TickReport::default();
        let dt = dt.max(0.0);

        if !self.started {
            self.start(env);
        }
        self.vocals.advance(dt);

        let facts = match env.locomotion() {
            Ok(locomotion) => LocomotionFacts::read(locomotion),
            Err(err) => {
                skipped("locomotion", err);
                LocomotionFacts::stationary(self.pose.position)
            }
        };
        self.pose.position = facts.position;

        let loudness = self.sample_loudness(env);
        let perception = self.perceive(env, loudness);
        let target_position = env.target().ok().map(|target| target.position());

        let observation = Observation {
            dt,
            agent_position: self.pose.position,
            target_position,
            perception,
            locomotion: facts,
            chase_speed_factor: self
                .effects
                .chase_speed_factor(self.config.movement.invisible_speed_multiplier),
        };
        let step = self.machine.step(&observation, &self.config);
        if let Some(transition) = step.transition {
            report.events.push(AgentEvent::StateChanged(transition));
        }

        let attacking = step.is_attacking();
        let turned = self.execute(env, &step, dt, &mut report);
        if !turned {
            self.pose
                .turn_toward(facts.velocity, dt * self.config.movement.turn_rate);
        }

        self.update_effects(env, dt, perception, &mut report);
        self.update_audio(env, perception, attacking, &facts, &mut report);
        self.publish_intents(env, attacking, &facts);

        report.state = self.machine.state();
        report.perception = perception;
        report.intents = self.intents;
        report.visible = self.effects.visible();
        report
    }

    fn start(&mut self, env: &mut Env<'_>) {
        self.started = true;
        self.set_speed(env, self.config.movement.patrol_speed);
        present(env, "initial visibility", |p| p.set_agent_visible(true));
        info!(position = ?self.pose.position, "stalker agent started");
    }

    fn set_speed(&mut self, env: &mut Env<'_>, speed: f32) {
        self.speed = speed;
        match env.locomotion() {
            Ok(locomotion) => locomotion.set_speed(speed),
            Err(err) => skipped("speed", err),
        }
    }

    fn sample_loudness(&mut self, env: &mut Env<'_>) -> Option<f32> {
        let sample = match env.loudness() {
            Ok(sampler) => sampler.sample(),
            Err(err) => {
                skipped("loudness", err);
                None
            }
        };
        let sample = sample?;

        let scaled = scaled_loudness(sample, self.config.perception.sensitivity);
        self.last_loudness = Some(scaled);
        let meter = scaled.clamp(0.0, self.config.perception.meter_max);
        present(env, "loudness meter", |p| p.set_loudness_meter(meter));
        Some(sample)
    }

    fn perceive(&self, env: &mut Env<'_>, loudness: Option<f32>) -> PerceptionResult {
        let target = match env.target() {
            Ok(target) => Some(SightTarget {
                collider: target.collider(),
                position: target.position(),
            }),
            Err(err) => {
                skipped("perception", err);
                None
            }
        };
        let world = env.world().ok().map(|world| &*world as &dyn WorldOracle);
        sense_target(
            &self.pose,
            &self.config.perception,
            target,
            world,
            loudness,
        )
    }

    /// Executes pursuit commands. Returns true if the agent turned toward
    /// its target this tick.
    fn execute(&mut self, env: &mut Env<'_>, step: &Step, dt: f32, report: &mut TickReport) -> bool {
        let mut turned = false;
        for command in &step.commands {
            match *command {
                Command::SetDestination(point) => match env.locomotion() {
                    Ok(locomotion) => locomotion.set_destination(point),
                    Err(err) => skipped("destination", err),
                },
                Command::SetSpeed(speed) => self.set_speed(env, speed),
                Command::FaceToward(point) => {
                    turned = self.pose.turn_toward(
                        point - self.pose.position,
                        dt * self.config.movement.turn_rate,
                    );
                }
                Command::Attack => match env.target() {
                    Ok(target) => {
                        let outcome = strike(self.pose.position, target, &self.config.pursuit);
                        report.events.push(AgentEvent::Attacked(outcome));
                    }
                    Err(err) => skipped("attack", err),
                },
                Command::ProbeDoors => {
                    let probe = match env.world() {
                        Ok(world) => probe_doors(
                            world,
                            self.pose.position,
                            self.config.pursuit.door_probe_radius,
                        ),
                        Err(err) => {
                            skipped("door probe", err);
                            continue;
                        }
                    };
                    if probe.should_knock() {
                        play(env, "knock", |audio| audio.play(AudioCue::Knock));
                    }
                    report.events.push(AgentEvent::DoorsProbed(probe));
                }
                Command::PickPatrolPoint => self.pick_patrol_point(env, report),
            }
        }
        turned
    }

    fn pick_patrol_point(&mut self, env: &mut Env<'_>, report: &mut TickReport) {
        let navmesh = match env.navmesh() {
            Ok(navmesh) => navmesh,
            Err(err) => {
                skipped("patrol point", err);
                return;
            }
        };
        let movement = &self.config.movement;
        let Some(point) = find_patrol_point(
            navmesh,
            self.rng.as_mut(),
            self.pose.position,
            movement.patrol_radius,
            movement.patrol_sample_attempts,
        ) else {
            debug!(origin = ?self.pose.position, "no reachable patrol point, holding");
            report.events.push(AgentEvent::PatrolSamplingFailed);
            return;
        };
        match env.locomotion() {
            Ok(locomotion) => locomotion.set_destination(point),
            Err(err) => skipped("patrol destination", err),
        }
        report.events.push(AgentEvent::PatrolPointChosen(point));
    }

    fn update_effects(
        &mut self,
        env: &mut Env<'_>,
        dt: f32,
        perception: PerceptionResult,
        report: &mut TickReport,
    ) {
        let trigger = EffectTrigger {
            state: self.machine.state(),
            chase_duration: self.machine.timers().chase_duration,
            heard: perception.saw_by_hearing,
        };
        let ctx = EffectContext {
            dt,
            tuning: &self.config.effects,
            chase_speed: self.config.movement.chase_speed,
            invisible_multiplier: self.config.movement.invisible_speed_multiplier,
        };
        let out = self.effects.update(&trigger, &ctx, self.rng.as_mut());
        self.apply_effects(env, out, report);
    }

    fn apply_effects(&mut self, env: &mut Env<'_>, out: EffectOutput, report: &mut TickReport) {
        if let Some(visible) = out.visible {
            present(env, "visibility", |p| p.set_agent_visible(visible));
            report.events.push(AgentEvent::VisibilityChanged(visible));
        }
        if let Some(speed) = out.speed {
            self.set_speed(env, speed);
        }
        if let Some((shown, alpha)) = out.overlay {
            present(env, "jump-scare overlay", |p| {
                p.set_jumpscare_overlay(shown, alpha)
            });
        }
        if let Some((shown, alpha)) = out.banner {
            let text = self.config.effects.banner_text.as_str();
            present(env, "warning banner", |p| {
                p.set_warning_banner(text, shown, alpha)
            });
        }
        if let Some(cue) = out.cue {
            play(env, "effect cue", |audio| audio.play(cue));
        }
        if out.jumpscare_started {
            report.events.push(AgentEvent::JumpscareStarted);
        }
        if out.banner_started {
            report.events.push(AgentEvent::WarningShown);
        }
    }

    fn update_audio(
        &mut self,
        env: &mut Env<'_>,
        perception: PerceptionResult,
        attacking: bool,
        facts: &LocomotionFacts,
        report: &mut TickReport,
    ) {
        let audio = match env.audio() {
            Ok(audio) => audio,
            Err(err) => {
                skipped("audio", err);
                return;
            }
        };

        if perception.saw_by_hearing || attacking {
            if let Some(index) = self
                .vocals
                .try_play(self.rng.as_mut(), &self.config.audio.vocal_clip_lengths)
            {
                audio.play(AudioCue::Vocal(index));
                report.events.push(AgentEvent::VocalPlayed(index));
            }
        }

        let desired = FootstepLoops::select(self.machine.state(), attacking, facts);
        let change = self.footsteps.update(desired);
        if let Some(sound) = change.stop {
            audio.stop_loop(sound);
        }
        if let Some(sound) = change.start {
            audio.start_loop(sound);
        }
    }

    fn publish_intents(&mut self, env: &mut Env<'_>, attacking: bool, facts: &LocomotionFacts) {
        let state = self.machine.state();
        let mut intents = AnimationIntents::empty();
        intents.set(AnimationIntents::CHASING, state == PursuitState::Chase);
        intents.set(AnimationIntents::RUNNING, state != PursuitState::Patrol);
        intents.set(AnimationIntents::ATTACKING, attacking);
        intents.set(
            AnimationIntents::WALK_FORWARD,
            state == PursuitState::Patrol && facts.is_walking(),
        );
        intents.set(AnimationIntents::IDLE, facts.is_idle());

        if intents != self.intents {
            debug!(?intents, "animation intents changed");
        }
        self.intents = intents;
        present(env, "animation intents", |p| p.set_intents(intents));
    }
}
