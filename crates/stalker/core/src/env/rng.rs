//! Randomness source for patrol sampling, flicker durations, the jump-scare
//! roll and vocal clip selection.
//!
//! The agent owns its generator so a scene can seed it for replay and tests
//! can script exact draws with [`ScriptedRng`].

use std::collections::VecDeque;

use glam::Vec3;

/// Stateful uniform generator.
pub trait RngOracle {
    /// Uniform value in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// Uniform value in `[min, max]`; returns `min` when the range is empty.
    fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + (max - min) * self.next_f32()
    }

    /// True with probability `p`.
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Point inside the unit sphere by rejection sampling.
    ///
    /// Falls back to the origin if every candidate is rejected.
    fn inside_unit_sphere(&mut self) -> Vec3 {
        for _ in 0..16 {
            let v = Vec3::new(
                self.range(-1.0, 1.0),
                self.range(-1.0, 1.0),
                self.range(-1.0, 1.0),
            );
            if v.length_squared() <= 1.0 {
                return v;
            }
        }
        Vec3::ZERO
    }

    /// Uniform index below `len`, or `None` for an empty collection.
    fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let i = (self.next_f32() * len as f32) as usize;
        Some(i.min(len - 1))
    }
}

/// Replays a fixed sequence of draws, then repeats `fallback` forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    draws: VecDeque<f32>,
    fallback: f32,
}

impl ScriptedRng {
    pub fn new(draws: impl IntoIterator<Item = f32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback: 0.0,
        }
    }

    /// Generator that always returns `value`.
    pub fn constant(value: f32) -> Self {
        Self {
            draws: VecDeque::new(),
            fallback: value,
        }
    }

    pub fn with_fallback(mut self, fallback: f32) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn push(&mut self, value: f32) {
        self.draws.push_back(value);
    }
}

impl RngOracle for ScriptedRng {
    fn next_f32(&mut self) -> f32 {
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_draws_then_fallback() {
        let mut rng = ScriptedRng::new([0.1, 0.9]).with_fallback(0.5);
        assert_eq!(rng.next_f32(), 0.1);
        assert!(!rng.chance(0.3));
        assert_eq!(rng.next_f32(), 0.5);
    }

    #[test]
    fn index_and_range_edges() {
        let mut rng = ScriptedRng::constant(0.999_999);
        assert_eq!(rng.index(0), None);
        assert_eq!(rng.index(3), Some(2));
        assert_eq!(rng.range(4.0, 4.0), 4.0);

        let mut rng = ScriptedRng::constant(0.5);
        assert!((rng.range(0.1, 0.5) - 0.3).abs() < 1e-6);
        assert_eq!(rng.inside_unit_sphere(), Vec3::ZERO);
    }
}
