//! Atmospheric effects.
//!
//! Every effect is an explicit phase plus remaining time, polled once per
//! tick. Tasks never touch the scene; they describe what changed in an
//! [`EffectOutput`] which the agent forwards to its collaborators.
mod banner;
mod flicker;
mod jumpscare;

pub use banner::WarningBanner;
pub use flicker::Flicker;
pub use jumpscare::Jumpscare;

use tracing::info;

use crate::config::EffectTuning;
use crate::env::{AudioCue, RngOracle};
use crate::pursuit::PursuitState;

/// Per-tick inputs shared by all effect tasks.
#[derive(Clone, Copy, Debug)]
pub struct EffectContext<'t> {
    pub dt: f32,
    pub tuning: &'t EffectTuning,
    pub chase_speed: f32,
    pub invisible_multiplier: f32,
}

/// Changes requested by effect tasks during one tick.
///
/// `None` means "unchanged". Tuples are `(shown, alpha)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectOutput {
    pub visible: Option<bool>,
    pub speed: Option<f32>,
    pub overlay: Option<(bool, f32)>,
    pub banner: Option<(bool, f32)>,
    pub cue: Option<AudioCue>,
    pub jumpscare_started: bool,
    pub banner_started: bool,
}

/// Cancellable, restartable cooperative timer.
pub trait EffectTask {
    fn start(&mut self, ctx: &EffectContext<'_>, rng: &mut dyn RngOracle, out: &mut EffectOutput);

    /// Stops the task and restores whatever it changed.
    fn cancel(&mut self, out: &mut EffectOutput);

    fn is_active(&self) -> bool;

    /// Advances the task by `ctx.dt`. Inactive tasks ignore the call.
    fn poll(&mut self, ctx: &EffectContext<'_>, rng: &mut dyn RngOracle, out: &mut EffectOutput);
}

/// What the scheduler reacts to this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectTrigger {
    pub state: PursuitState,
    pub chase_duration: f32,
    pub heard: bool,
}

/// Owns one instance of each effect kind and decides when they run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectScheduler {
    flicker: Flicker,
    jumpscare: Jumpscare,
    banner: WarningBanner,
    jumpscare_triggered: bool,
}

impl EffectScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> bool {
        self.flicker.visible()
    }

    pub fn flicker_active(&self) -> bool {
        self.flicker.is_active()
    }

    pub fn jumpscare_active(&self) -> bool {
        self.jumpscare.is_active()
    }

    pub fn jumpscare_triggered(&self) -> bool {
        self.jumpscare_triggered
    }

    pub fn banner_active(&self) -> bool {
        self.banner.is_active()
    }

    /// Chase speed multiplier for the current visibility.
    pub fn chase_speed_factor(&self, invisible_multiplier: f32) -> f32 {
        if self.visible() {
            1.0
        } else {
            invisible_multiplier
        }
    }

    /// Polls running tasks, then starts or cancels tasks for `trigger`.
    ///
    /// Tasks started this tick are first polled on the next one. The flicker
    /// is only polled while chasing; leaving the chase cancels it untouched.
    pub fn update(
        &mut self,
        trigger: &EffectTrigger,
        ctx: &EffectContext<'_>,
        rng: &mut dyn RngOracle,
    ) -> EffectOutput {
        let mut out = EffectOutput::default();

        self.jumpscare.poll(ctx, rng, &mut out);
        self.banner.poll(ctx, rng, &mut out);

        if trigger.state == PursuitState::Chase {
            if self.flicker.is_active() {
                self.flicker.poll(ctx, rng, &mut out);
            } else {
                self.flicker.start(ctx, rng, &mut out);
            }
            if trigger.chase_duration > ctx.tuning.jumpscare_min_chase
                && !self.jumpscare_triggered
                && !self.jumpscare.is_active()
                && rng.chance(ctx.tuning.jumpscare_chance)
            {
                self.jumpscare_triggered = true;
                self.jumpscare.start(ctx, rng, &mut out);
                out.jumpscare_started = true;
            }
        } else {
            self.flicker.cancel(&mut out);
            self.jumpscare.cancel(&mut out);
            self.jumpscare_triggered = false;
        }

        if trigger.heard && !self.banner.is_active() {
            info!("warning banner shown");
            self.banner.start(ctx, rng, &mut out);
            out.banner_started = true;
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;

    const DT: f32 = 0.05;

    fn ctx(tuning: &EffectTuning) -> EffectContext<'_> {
        EffectContext {
            dt: DT,
            tuning,
            chase_speed: 4.0,
            invisible_multiplier: 2.0,
        }
    }

    fn chasing(chase_duration: f32) -> EffectTrigger {
        EffectTrigger {
            state: PursuitState::Chase,
            chase_duration,
            heard: false,
        }
    }

    fn patrolling() -> EffectTrigger {
        EffectTrigger {
            state: PursuitState::Patrol,
            chase_duration: 0.0,
            heard: false,
        }
    }

    #[test]
    fn flicker_runs_only_while_chasing_and_restores_visibility() {
        let tuning = EffectTuning::default();
        let ctx = ctx(&tuning);
        // Draws of 0.0 give the minimum 0.1 s flicker duration.
        let mut rng = ScriptedRng::constant(0.0);
        let mut effects = EffectScheduler::new();

        let out = effects.update(&chasing(0.0), &ctx, &mut rng);
        assert!(effects.flicker_active());
        assert_eq!(out.visible, Some(false));
        assert_eq!(out.speed, Some(8.0));
        assert_eq!(effects.chase_speed_factor(2.0), 2.0);

        // 0.05 s later nothing toggles, 0.1 s later it does.
        let out = effects.update(&chasing(0.0), &ctx, &mut rng);
        assert_eq!(out.visible, None);
        let out = effects.update(&chasing(0.0), &ctx, &mut rng);
        assert_eq!(out.visible, Some(true));
        assert_eq!(out.speed, Some(4.0));

        effects.update(&chasing(0.0), &ctx, &mut rng);
        effects.update(&chasing(0.0), &ctx, &mut rng);
        assert!(!effects.visible());

        let out = effects.update(&patrolling(), &ctx, &mut rng);
        assert!(!effects.flicker_active());
        assert!(effects.visible());
        assert_eq!(out.visible, Some(true));
    }

    #[test]
    fn jumpscare_gate_needs_duration_flag_and_roll() {
        let tuning = EffectTuning::default();
        let ctx = ctx(&tuning);
        let mut effects = EffectScheduler::new();

        // Long enough chase but the roll fails.
        let mut rng = ScriptedRng::constant(0.9);
        let out = effects.update(&chasing(16.0), &ctx, &mut rng);
        assert!(!out.jumpscare_started);

        // Roll succeeds but the chase is too short.
        let mut rng = ScriptedRng::constant(0.0);
        let out = effects.update(&chasing(15.0), &ctx, &mut rng);
        assert!(!out.jumpscare_started);

        let out = effects.update(&chasing(15.1), &ctx, &mut rng);
        assert!(out.jumpscare_started);
        assert_eq!(out.cue, Some(AudioCue::Jumpscare));
        assert_eq!(out.overlay, Some((true, 1.0)));

        for _ in 0..200 {
            let out = effects.update(&chasing(20.0), &ctx, &mut rng);
            assert!(!out.jumpscare_started);
        }
        assert!(effects.jumpscare_triggered());
        assert!(!effects.jumpscare_active());
    }

    #[test]
    fn jumpscare_flag_resets_when_chase_ends() {
        let tuning = EffectTuning::default();
        let ctx = ctx(&tuning);
        let mut rng = ScriptedRng::constant(0.0);
        let mut effects = EffectScheduler::new();

        assert!(effects.update(&chasing(16.0), &ctx, &mut rng).jumpscare_started);
        // Leaving the chase does not cut the running sequence short.
        effects.update(&patrolling(), &ctx, &mut rng);
        assert!(effects.jumpscare_active());
        assert!(!effects.jumpscare_triggered());

        for _ in 0..100 {
            effects.update(&patrolling(), &ctx, &mut rng);
        }
        assert!(!effects.jumpscare_active());
        assert!(effects.update(&chasing(16.0), &ctx, &mut rng).jumpscare_started);
    }

    #[test]
    fn jumpscare_sequence_flashes_then_holds_then_clears() {
        let tuning = EffectTuning::default();
        let ctx = EffectContext {
            dt: 0.1,
            ..ctx(&tuning)
        };
        let mut rng = ScriptedRng::constant(0.0);
        let mut task = Jumpscare::default();
        let mut out = EffectOutput::default();
        task.start(&ctx, &mut rng, &mut out);

        let mut overlays = Vec::new();
        while task.is_active() {
            let mut out = EffectOutput::default();
            task.poll(&ctx, &mut rng, &mut out);
            overlays.extend(out.overlay);
            assert!(overlays.len() < 50);
        }
        assert_eq!(
            overlays,
            vec![
                (true, 0.0),
                (true, 1.0),
                (true, 0.0),
                (true, 1.0),
                (true, 0.0),
                (true, 1.0),
                (false, 0.0),
            ]
        );
    }

    #[test]
    fn banner_is_not_restarted_while_active() {
        let tuning = EffectTuning::default();
        let ctx = ctx(&tuning);
        let mut rng = ScriptedRng::constant(0.5);
        let mut effects = EffectScheduler::new();
        let heard = EffectTrigger {
            heard: true,
            ..patrolling()
        };

        assert!(effects.update(&heard, &ctx, &mut rng).banner_started);
        let out = effects.update(&heard, &ctx, &mut rng);
        assert!(!out.banner_started);
        assert_eq!(out.banner, Some((true, 0.1)));

        // Fade in, hold and fade out take 3 s in total.
        for _ in 0..70 {
            effects.update(&patrolling(), &ctx, &mut rng);
        }
        assert!(!effects.banner_active());
        assert!(effects.update(&heard, &ctx, &mut rng).banner_started);
    }
}
