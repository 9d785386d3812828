//! Sine oscillator

use std::f32::consts::TAU;

/// Sine at `phase`, measured in cycles (1.0 = one period)
pub fn sine(phase: f32) -> f32 {
    (phase.rem_euclid(1.0) * TAU).sin()
}

/// `duration` seconds of a fixed-frequency sine in -1.0..=1.0
pub fn oscillator(frequency: f32, duration: f32, sample_rate: u32) -> Vec<f32> {
    let num_samples = (duration.max(0.0) * sample_rate as f32) as usize;
    let step = frequency / sample_rate as f32;

    (0..num_samples).map(|i| sine(step * i as f32)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SAMPLE_RATE: u32 = 22050;

    #[test]
    fn test_oscillator_length() {
        let samples = oscillator(440.0, 0.3, TEST_SAMPLE_RATE);
        assert_eq!(samples.len(), (0.3 * TEST_SAMPLE_RATE as f32) as usize);
    }

    #[test]
    fn test_oscillator_range() {
        let samples = oscillator(523.0, 0.05, TEST_SAMPLE_RATE);
        assert!(samples.iter().all(|&s| (-1.0..=1.0).contains(&s)));
    }

    #[test]
    fn test_sine_starts_at_zero() {
        let samples = oscillator(300.0, 0.01, TEST_SAMPLE_RATE);
        assert!(samples[0].abs() < 1e-6);
        assert!(samples[1] > 0.0);
    }

    #[test]
    fn test_sine_zero_crossings_match_frequency() {
        // 1 second at 200 Hz crosses upward 200 times
        let samples = oscillator(200.0, 1.0, TEST_SAMPLE_RATE);
        let upward = samples
            .windows(2)
            .filter(|w| w[0] < 0.0 && w[1] >= 0.0)
            .count();
        assert!((upward as i32 - 200).abs() <= 1);
    }

    #[test]
    fn test_negative_duration_is_empty() {
        assert!(oscillator(440.0, -1.0, TEST_SAMPLE_RATE).is_empty());
    }

    #[test]
    fn test_phase_wraps() {
        assert!((sine(1.25) - sine(0.25)).abs() < 1e-5);
        assert!((sine(-0.75) - 1.0).abs() < 1e-5);
    }
}
