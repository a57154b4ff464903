//! Synthetic microphone fed from a noise script.

use std::collections::VecDeque;

use stalker_core::{LoudnessSampler, env::average_loudness};

/// Samples averaged per loudness reading.
pub const DEFAULT_WINDOW: usize = 64;

/// Ring of recent samples.
///
/// Reports `None` until a full window has been recorded, the same way a
/// device that has not produced data yet does.
#[derive(Clone, Debug)]
pub struct Microphone {
    window: usize,
    buffer: VecDeque<f32>,
}

impl Default for Microphone {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl Microphone {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            buffer: VecDeque::with_capacity(window),
        }
    }

    pub fn push_samples(&mut self, samples: impl IntoIterator<Item = f32>) {
        for sample in samples {
            if self.buffer.len() == self.window {
                self.buffer.pop_front();
            }
            self.buffer.push_back(sample);
        }
    }

    /// Records one window of a square wave at `amplitude`.
    pub fn push_level(&mut self, amplitude: f32) {
        let window = self.window;
        self.push_samples((0..window).map(|i| if i % 2 == 0 { amplitude } else { -amplitude }));
    }
}

impl LoudnessSampler for Microphone {
    fn sample(&mut self) -> Option<f32> {
        if self.buffer.len() < self.window {
            return None;
        }
        Some(average_loudness(self.buffer.make_contiguous()))
    }
}

/// Constant amplitude over `[start, end)` seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseBurst {
    pub start: f32,
    pub end: f32,
    pub amplitude: f32,
}

/// Ambient noise as a list of bursts; silent outside them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoiseScript {
    bursts: Vec<NoiseBurst>,
}

impl NoiseScript {
    pub fn new(bursts: Vec<NoiseBurst>) -> Self {
        Self { bursts }
    }

    pub fn silent() -> Self {
        Self::default()
    }

    /// Loudest active burst at `time`.
    pub fn amplitude_at(&self, time: f32) -> f32 {
        self.bursts
            .iter()
            .filter(|burst| time >= burst.start && time < burst.end)
            .map(|burst| burst.amplitude.abs())
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_until_window_fills() {
        let mut mic = Microphone::new(4);
        mic.push_samples([0.5, -0.5]);
        assert_eq!(mic.sample(), None);
        mic.push_samples([0.5, -0.5, 0.1, -0.1]);
        let level = mic.sample().unwrap();
        assert!((level - 0.3).abs() < 1e-6);
    }

    #[test]
    fn square_wave_averages_to_amplitude() {
        let mut mic = Microphone::default();
        mic.push_level(0.125);
        assert_eq!(mic.sample(), Some(0.125));
    }

    #[test]
    fn loudest_burst_wins() {
        let script = NoiseScript::new(vec![
            NoiseBurst {
                start: 1.0,
                end: 3.0,
                amplitude: 0.05,
            },
            NoiseBurst {
                start: 2.0,
                end: 2.5,
                amplitude: 0.2,
            },
        ]);
        assert_eq!(script.amplitude_at(0.5), 0.0);
        assert_eq!(script.amplitude_at(1.5), 0.05);
        assert_eq!(script.amplitude_at(2.2), 0.2);
        assert_eq!(script.amplitude_at(3.0), 0.0);
    }
}
