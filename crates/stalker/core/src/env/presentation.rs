use bitflags::bitflags;

bitflags! {
    /// Animation parameters driven by the controller.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct AnimationIntents: u8 {
        const WALK_FORWARD = 1 << 0;
        const RUNNING = 1 << 1;
        const ATTACKING = 1 << 2;
        const IDLE = 1 << 3;
        const CHASING = 1 << 4;
    }
}

/// Visual output of the scene: animator, renderer visibility and HUD.
pub trait PresentationOracle {
    fn set_intents(&mut self, intents: AnimationIntents);

    /// Shows or hides every renderer of the agent body.
    fn set_agent_visible(&mut self, visible: bool);

    fn set_jumpscare_overlay(&mut self, shown: bool, alpha: f32);

    fn set_warning_banner(&mut self, text: &str, shown: bool, alpha: f32);

    /// Loudness meter value, already clamped to the meter range.
    fn set_loudness_meter(&mut self, value: f32);
}
