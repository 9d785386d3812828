//! Procedural tone synthesis
//!
//! Oscillators, gain envelopes and a small `Synth` that renders short cues
//! into f32 buffers, plus PCM conversion and optional WAV export.
//!
//! # Example
//! ```no_run
//! use proc_gen::audio::*;
//!
//! let synth = Synth::new(SAMPLE_RATE);
//! let blip = synth.tone(510.0, 0.3, Envelope::exponential(0.1, 0.01));
//! let arpeggio = synth.note_sequence(
//!     &[523.0, 659.0, 784.0],
//!     0.2,
//!     0.8,
//!     Envelope::exponential(0.2, 0.01),
//! );
//!
//! #[cfg(feature = "wav-export")]
//! write_wav(&arpeggio, SAMPLE_RATE, std::path::Path::new("fanfare.wav"))?;
//! # let _ = blip;
//! # Ok::<(), std::io::Error>(())
//! ```

mod envelope;
mod export;
mod oscillators;
mod synth;

/// Default render rate for cues (22.05kHz)
pub const SAMPLE_RATE: u32 = 22050;

pub use envelope::Envelope;
pub use oscillators::{oscillator, sine};
pub use synth::Synth;

pub use export::{apply_gain, to_pcm_i16};

#[cfg(feature = "wav-export")]
pub use export::write_wav;

/// A rendered mono cue
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AudioBuffer {
    pub sample_rate: u32,
    /// Nominally within [-1, 1]; gain may push past it before quantization
    pub samples: Vec<f32>,
}

impl AudioBuffer {
    pub fn new(sample_rate: u32) -> Self {
        Self::from_samples(sample_rate, Vec::new())
    }

    pub fn from_samples(sample_rate: u32, samples: Vec<f32>) -> Self {
        Self {
            sample_rate,
            samples,
        }
    }

    /// Length in seconds; zero for a buffer without a rate
    pub fn duration(&self) -> f32 {
        match self.sample_rate {
            0 => 0.0,
            rate => self.samples.len() as f32 / rate as f32,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Largest absolute sample value
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |m, s| m.max(s.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer() {
        let buf = AudioBuffer::new(SAMPLE_RATE);
        assert!(buf.is_empty());
        assert_eq!(buf.duration(), 0.0);
        assert_eq!(buf.peak(), 0.0);
    }

    #[test]
    fn test_half_second_duration() {
        let buf = AudioBuffer::from_samples(SAMPLE_RATE, vec![0.0; SAMPLE_RATE as usize / 2]);
        assert!((buf.duration() - 0.5).abs() < 0.001);
        assert_eq!(AudioBuffer::from_samples(0, vec![0.0; 4]).duration(), 0.0);
    }

    #[test]
    fn test_peak_uses_magnitude() {
        let buf = AudioBuffer::from_samples(SAMPLE_RATE, vec![0.1, -0.6, 0.3]);
        assert!((buf.peak() - 0.6).abs() < 1e-6);
    }
}
