//! Gain envelope
//!
//! Cues fade with an exponential ramp from a start gain to an end gain over
//! the whole buffer, the curve Web Audio calls `exponentialRampToValueAtTime`.

/// `start * (end / start)^t` for `t` from 0 to 1 over the buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    start: f32,
    end: f32,
}

impl Envelope {
    /// Exponential ramp; both gains are kept strictly positive
    pub fn exponential(start: f32, end: f32) -> Self {
        const FLOOR: f32 = 1e-4;
        Self {
            start: start.max(FLOOR),
            end: end.max(FLOOR),
        }
    }

    /// Gain at normalized position `t` in `0.0..=1.0`
    pub fn gain_at(&self, t: f32) -> f32 {
        self.start * (self.end / self.start).powf(t.clamp(0.0, 1.0))
    }

    /// Scale `samples` in place, first sample at `start`, last at `end`
    pub fn apply(&self, samples: &mut [f32]) {
        let last = samples.len().saturating_sub(1).max(1) as f32;
        for (i, sample) in samples.iter_mut().enumerate() {
            *sample *= self.gain_at(i as f32 / last);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(env: Envelope, len: usize) -> Vec<f32> {
        let mut samples = vec![1.0; len];
        env.apply(&mut samples);
        samples
    }

    #[test]
    fn test_exponential_endpoints() {
        let gains = curve(Envelope::exponential(0.1, 0.01), 6615);
        assert!((gains[0] - 0.1).abs() < 1e-6);
        assert!((gains.last().unwrap() - 0.01).abs() < 1e-5);
    }

    #[test]
    fn test_exponential_is_monotonic() {
        let gains = curve(Envelope::exponential(0.2, 0.01), 17640);
        assert!(gains.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_exponential_midpoint_is_geometric_mean() {
        let env = Envelope::exponential(0.1, 0.01);
        let mid = env.gain_at(0.5);
        assert!((mid - (0.1f32 * 0.01).sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_exponential_rejects_zero() {
        let env = Envelope::exponential(0.0, 0.0);
        assert!(env.gain_at(0.0) > 0.0);
        assert!(env.gain_at(1.0).is_finite());
    }

    #[test]
    fn test_flat_ramp_keeps_signal() {
        let mut samples = vec![1.0, -1.0, 0.5];
        Envelope::exponential(0.5, 0.5).apply(&mut samples);
        for (got, want) in samples.iter().zip([0.5, -0.5, 0.25]) {
            assert!((got - want).abs() < 1e-6);
        }
    }

    #[test]
    fn test_empty_samples() {
        let mut samples: Vec<f32> = vec![];
        Envelope::exponential(0.1, 0.01).apply(&mut samples);
        assert!(samples.is_empty());
    }
}
