use tracing::debug;

use super::{EffectContext, EffectOutput, EffectTask};
use crate::env::RngOracle;

/// Visibility flicker loop that runs for the whole chase.
///
/// Each cycle toggles visibility, sets the matching chase speed and waits a
/// uniformly drawn duration. At most one toggle happens per poll.
#[derive(Clone, Debug, PartialEq)]
pub struct Flicker {
    active: bool,
    visible: bool,
    remaining: f32,
}

impl Default for Flicker {
    fn default() -> Self {
        Self {
            active: false,
            visible: true,
            remaining: 0.0,
        }
    }
}

impl Flicker {
    pub fn visible(&self) -> bool {
        self.visible
    }

    fn toggle(&mut self, ctx: &EffectContext<'_>, rng: &mut dyn RngOracle, out: &mut EffectOutput) {
        self.visible = !self.visible;
        self.remaining = rng.range(
            ctx.tuning.min_flicker_duration,
            ctx.tuning.max_flicker_duration,
        );
        let speed = if self.visible {
            ctx.chase_speed
        } else {
            ctx.chase_speed * ctx.invisible_multiplier
        };
        out.visible = Some(self.visible);
        out.speed = Some(speed);
        debug!(visible = self.visible, next = self.remaining, "flicker toggled");
    }
}

impl EffectTask for Flicker {
    fn start(&mut self, ctx: &EffectContext<'_>, rng: &mut dyn RngOracle, out: &mut EffectOutput) {
        self.active = true;
        self.toggle(ctx, rng, out);
    }

    fn cancel(&mut self, out: &mut EffectOutput) {
        if !self.active {
            return;
        }
        self.active = false;
        self.visible = true;
        self.remaining = 0.0;
        out.visible = Some(true);
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn poll(&mut self, ctx: &EffectContext<'_>, rng: &mut dyn RngOracle, out: &mut EffectOutput) {
        if !self.active {
            return;
        }
        self.remaining -= ctx.dt;
        if self.remaining <= 0.0 {
            self.toggle(ctx, rng, out);
        }
    }
}
