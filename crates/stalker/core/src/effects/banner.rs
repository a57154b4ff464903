use super::{EffectContext, EffectOutput, EffectTask};
use crate::env::RngOracle;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Phase {
    #[default]
    Idle,
    FadeIn { elapsed: f32 },
    Hold { remaining: f32 },
    FadeOut { elapsed: f32 },
}

/// Warning banner shown when the agent hears the player: fade in, hold,
/// fade out. An active banner is never restarted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WarningBanner {
    phase: Phase,
}

fn fraction(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        (elapsed / duration).clamp(0.0, 1.0)
    }
}

impl EffectTask for WarningBanner {
    fn start(&mut self, _ctx: &EffectContext<'_>, _rng: &mut dyn RngOracle, out: &mut EffectOutput) {
        self.phase = Phase::FadeIn { elapsed: 0.0 };
        out.banner = Some((true, 0.0));
    }

    fn cancel(&mut self, out: &mut EffectOutput) {
        if self.is_active() {
            self.phase = Phase::Idle;
            out.banner = Some((false, 0.0));
        }
    }

    fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    fn poll(&mut self, ctx: &EffectContext<'_>, _rng: &mut dyn RngOracle, out: &mut EffectOutput) {
        let fade = ctx.tuning.banner_fade_duration;
        self.phase = match self.phase {
            Phase::Idle => return,
            Phase::FadeIn { elapsed } => {
                let elapsed = elapsed + ctx.dt;
                if elapsed >= fade {
                    out.banner = Some((true, 1.0));
                    Phase::Hold {
                        remaining: ctx.tuning.banner_hold,
                    }
                } else {
                    out.banner = Some((true, fraction(elapsed, fade)));
                    Phase::FadeIn { elapsed }
                }
            }
            Phase::Hold { remaining } => {
                let remaining = remaining - ctx.dt;
                if remaining > 0.0 {
                    Phase::Hold { remaining }
                } else {
                    Phase::FadeOut { elapsed: 0.0 }
                }
            }
            Phase::FadeOut { elapsed } => {
                let elapsed = elapsed + ctx.dt;
                if elapsed >= fade {
                    out.banner = Some((false, 0.0));
                    Phase::Idle
                } else {
                    out.banner = Some((true, 1.0 - fraction(elapsed, fade)));
                    Phase::FadeOut { elapsed }
                }
            }
        };
    }
}
