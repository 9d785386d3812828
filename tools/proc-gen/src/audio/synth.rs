//! High-level synthesizer API

use super::envelope::Envelope;
use super::oscillators::{oscillator, sine};

/// Renders short cues at a fixed sample rate
///
/// # Example
/// ```
/// use proc_gen::audio::*;
///
/// let synth = Synth::new(SAMPLE_RATE);
/// let tone = synth.tone(440.0, 0.3, Envelope::exponential(0.1, 0.01));
/// assert_eq!(tone.len(), (0.3 * SAMPLE_RATE as f32) as usize);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Synth {
    sample_rate: u32,
}

impl Synth {
    /// Create a new synthesizer with the given sample rate
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate.max(1),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// A single sine tone shaped by `envelope`
    pub fn tone(&self, frequency: f32, duration: f32, envelope: Envelope) -> Vec<f32> {
        let mut samples = oscillator(frequency, duration, self.sample_rate);
        envelope.apply(&mut samples);
        samples
    }

    /// Step through `frequencies`, holding each for `step` seconds
    ///
    /// The sound lasts `duration` seconds; the last note holds once the list
    /// runs out. Phase is continuous across note changes so there is no click
    /// at each step, and one envelope spans the whole sound.
    pub fn note_sequence(
        &self,
        frequencies: &[f32],
        step: f32,
        duration: f32,
        envelope: Envelope,
    ) -> Vec<f32> {
        let Some(&last) = frequencies.last() else {
            return Vec::new();
        };

        let rate = self.sample_rate as f32;
        let num_samples = (duration.max(0.0) * rate) as usize;
        let step_samples = ((step * rate) as usize).max(1);

        let mut phase = 0.0f32;
        let mut samples = Vec::with_capacity(num_samples);
        for i in 0..num_samples {
            let freq = frequencies.get(i / step_samples).copied().unwrap_or(last);
            samples.push(sine(phase));
            phase = (phase + freq / rate).fract();
        }

        envelope.apply(&mut samples);
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SAMPLE_RATE;

    fn upward_crossings(samples: &[f32]) -> usize {
        samples
            .windows(2)
            .filter(|w| w[0] < 0.0 && w[1] >= 0.0)
            .count()
    }

    #[test]
    fn test_tone_is_shaped() {
        let synth = Synth::new(SAMPLE_RATE);
        let tone = synth.tone(300.0, 0.3, Envelope::exponential(0.1, 0.01));

        assert!(tone.iter().all(|s| s.abs() <= 0.1 + 1e-6));
        let tail = &tone[tone.len() - 200..];
        assert!(tail.iter().all(|s| s.abs() <= 0.012));
    }

    #[test]
    fn test_note_sequence_steps_upward() {
        let synth = Synth::new(SAMPLE_RATE);
        let seq = synth.note_sequence(
            &[200.0, 400.0, 800.0],
            0.2,
            0.8,
            Envelope::exponential(1.0, 1.0),
        );

        let step = (0.2 * SAMPLE_RATE as f32) as usize;
        assert_eq!(seq.len(), (0.8 * SAMPLE_RATE as f32) as usize);

        let first = upward_crossings(&seq[..step]);
        let second = upward_crossings(&seq[step..2 * step]);
        let third = upward_crossings(&seq[2 * step..3 * step]);
        let held = upward_crossings(&seq[3 * step..]);

        assert!((first as i32 - 40).abs() <= 1);
        assert!((second as i32 - 80).abs() <= 1);
        assert!((third as i32 - 160).abs() <= 1);
        // Last note holds for the remaining 0.2 s
        assert!((held as i32 - 160).abs() <= 1);
    }

    #[test]
    fn test_note_sequence_empty() {
        let synth = Synth::new(SAMPLE_RATE);
        assert!(
            synth
                .note_sequence(&[], 0.2, 0.8, Envelope::exponential(0.2, 0.01))
                .is_empty()
        );
    }
}
