/// Microphone level source.
pub trait LoudnessSampler {
    /// Mean absolute amplitude of the most recent sample window, or `None`
    /// when no input device is available.
    fn sample(&mut self) -> Option<f32>;
}

/// Mean absolute amplitude of `window`; zero for an empty window.
pub fn average_loudness(window: &[f32]) -> f32 {
    if window.is_empty() {
        return 0.0;
    }
    window.iter().map(|s| s.abs()).sum::<f32>() / window.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_absolute_amplitude() {
        assert_eq!(average_loudness(&[]), 0.0);
        assert!((average_loudness(&[0.5, -0.5, 0.25, -0.25]) - 0.375).abs() < 1e-6);
    }
}
