use tracing::info;

use super::{EffectContext, EffectOutput, EffectTask};
use crate::env::{AudioCue, RngOracle};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Phase {
    #[default]
    Idle,
    FlashOn { flash: u32, remaining: f32 },
    FlashOff { flash: u32, remaining: f32 },
    Hold { remaining: f32 },
}

/// One-shot jump-scare: audio cue, overlay flashes, a brief hold, then clear.
///
/// Always runs to completion once started; `cancel` does nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Jumpscare {
    phase: Phase,
}

impl Jumpscare {
    fn after_flash(ctx: &EffectContext<'_>, flash: u32, out: &mut EffectOutput) -> Phase {
        out.overlay = Some((true, 1.0));
        if flash + 1 < ctx.tuning.jumpscare_flashes {
            Phase::FlashOn {
                flash: flash + 1,
                remaining: ctx.tuning.jumpscare_flash_interval,
            }
        } else {
            Phase::Hold {
                remaining: ctx.tuning.jumpscare_hold,
            }
        }
    }
}

impl EffectTask for Jumpscare {
    fn start(&mut self, ctx: &EffectContext<'_>, _rng: &mut dyn RngOracle, out: &mut EffectOutput) {
        info!("jump-scare started");
        out.cue = Some(AudioCue::Jumpscare);
        out.overlay = Some((true, 1.0));
        self.phase = if ctx.tuning.jumpscare_flashes == 0 {
            Phase::Hold {
                remaining: ctx.tuning.jumpscare_hold,
            }
        } else {
            Phase::FlashOn {
                flash: 0,
                remaining: ctx.tuning.jumpscare_flash_interval,
            }
        };
    }

    fn cancel(&mut self, _out: &mut EffectOutput) {}

    fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    fn poll(&mut self, ctx: &EffectContext<'_>, _rng: &mut dyn RngOracle, out: &mut EffectOutput) {
        self.phase = match self.phase {
            Phase::Idle => Phase::Idle,
            Phase::FlashOn { flash, remaining } => {
                let remaining = remaining - ctx.dt;
                if remaining > 0.0 {
                    Phase::FlashOn { flash, remaining }
                } else {
                    out.overlay = Some((true, 0.0));
                    Phase::FlashOff {
                        flash,
                        remaining: ctx.tuning.jumpscare_flash_interval,
                    }
                }
            }
            Phase::FlashOff { flash, remaining } => {
                let remaining = remaining - ctx.dt;
                if remaining > 0.0 {
                    Phase::FlashOff { flash, remaining }
                } else {
                    Self::after_flash(ctx, flash, out)
                }
            }
            Phase::Hold { remaining } => {
                let remaining = remaining - ctx.dt;
                if remaining > 0.0 {
                    Phase::Hold { remaining }
                } else {
                    out.overlay = Some((false, 0.0));
                    Phase::Idle
                }
            }
        };
    }
}
