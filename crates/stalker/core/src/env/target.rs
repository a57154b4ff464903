use glam::Vec3;

/// Opaque handle of a physics collider in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColliderId(pub u32);

/// The pursued player avatar.
pub trait TargetOracle {
    /// Collider a line-of-sight ray must hit first for the target to be seen.
    fn collider(&self) -> ColliderId;

    fn position(&self) -> Vec3;

    /// Forwards damage to the avatar's health component.
    fn apply_damage(&mut self, amount: u32);
}
