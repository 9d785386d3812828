//! Audio feedback boundary
//!
//! The soul emits two kinds of cue: a short tone when a parameter moves and a
//! fanfare when a rare form is discovered. Cues are rendered into mono f32
//! buffers with the proc-gen [`Synth`] and handed to an [`AudioSink`].
//!
//! [`AudioChannel`] owns the sink for the session. It is the only place that
//! sees [`AudioError`]: failures are logged and dropped so that a missing or
//! broken output never reaches scoring, meshing or the emotion machine.

use proc_gen::audio::{AudioBuffer, Envelope, Synth, apply_gain};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use swirlsoul_shared::ParameterAxis;
use tracing::{debug, warn};

use crate::config::AudioConfig;
use crate::error::AudioError;

/// Length of a parameter tone in seconds
pub const TONE_DURATION: f32 = 0.3;

/// Ascending fanfare notes (C5, E5, G5)
pub const FANFARE_NOTES: [f32; 3] = [523.0, 659.0, 784.0];
pub const FANFARE_STEP: f32 = 0.2;
pub const FANFARE_DURATION: f32 = 0.8;

/// A discrete sound request from the soul
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "cue", rename_all = "snake_case")]
pub enum AudioCue {
    ParameterTone { axis: ParameterAxis, value: f32 },
    Fanfare,
}

/// Per-axis base pitch of a parameter tone
pub fn base_frequency(axis: ParameterAxis) -> f32 {
    match axis {
        ParameterAxis::Color => 300.0,
        ParameterAxis::Length => 250.0,
        ParameterAxis::Width => 200.0,
        ParameterAxis::Layers => 350.0,
        ParameterAxis::Face => 200.0,
    }
}

impl AudioCue {
    /// Pitch of a parameter tone; `None` for the fanfare
    pub fn frequency(&self) -> Option<f32> {
        match *self {
            AudioCue::ParameterTone { axis, value } => Some(base_frequency(axis) + 3.0 * value),
            AudioCue::Fanfare => None,
        }
    }

    pub fn render(&self, synth: &Synth) -> AudioBuffer {
        let samples = match self {
            AudioCue::ParameterTone { .. } => synth.tone(
                self.frequency().unwrap_or_default(),
                TONE_DURATION,
                Envelope::exponential(0.1, 0.01),
            ),
            AudioCue::Fanfare => synth.note_sequence(
                &FANFARE_NOTES,
                FANFARE_STEP,
                FANFARE_DURATION,
                Envelope::exponential(0.2, 0.01),
            ),
        };
        AudioBuffer::from_samples(synth.sample_rate(), samples)
    }
}

/// Destination for rendered cues
pub trait AudioSink {
    fn play(&mut self, buffer: &AudioBuffer) -> Result<(), AudioError>;

    /// Release the underlying resource; further plays may fail
    fn close(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _buffer: &AudioBuffer) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Keeps every played buffer in memory
///
/// Clones share the same storage, so a caller can hand one clone to an
/// [`AudioChannel`] and inspect the other.
#[derive(Debug, Default, Clone)]
pub struct CaptureSink {
    buffers: Arc<Mutex<Vec<AudioBuffer>>>,
    closed: Arc<Mutex<bool>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffers(&self) -> Vec<AudioBuffer> {
        self.buffers
            .lock()
            .map(|b| b.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.buffers.lock().map(|b| b.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        self.closed.lock().map(|c| *c).unwrap_or(true)
    }
}

impl AudioSink for CaptureSink {
    fn play(&mut self, buffer: &AudioBuffer) -> Result<(), AudioError> {
        if self.is_closed() {
            return Err(AudioError::Closed);
        }
        if let Ok(mut buffers) = self.buffers.lock() {
            buffers.push(buffer.clone());
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), AudioError> {
        if let Ok(mut closed) = self.closed.lock() {
            *closed = true;
        }
        Ok(())
    }
}

/// Writes each cue to a numbered WAV file in a directory
#[cfg(feature = "wav-export")]
#[derive(Debug)]
pub struct WavSink {
    dir: std::path::PathBuf,
    next: usize,
}

#[cfg(feature = "wav-export")]
impl WavSink {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Result<Self, AudioError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| AudioError::Write {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir, next: 0 })
    }
}

#[cfg(feature = "wav-export")]
impl AudioSink for WavSink {
    fn play(&mut self, buffer: &AudioBuffer) -> Result<(), AudioError> {
        let path = self.dir.join(format!("cue-{:03}.wav", self.next));
        proc_gen::audio::write_wav(&buffer.samples, buffer.sample_rate, &path)
            .map_err(|source| AudioError::Write { path, source })?;
        self.next += 1;
        Ok(())
    }
}

/// Session-scoped audio output
///
/// Open it at session start, close it at the end (or let it drop). A closed
/// or disabled channel accepts cues and does nothing.
pub struct AudioChannel {
    sink: Option<Box<dyn AudioSink>>,
    synth: Synth,
    volume: f32,
    played: usize,
    failures: usize,
}

impl AudioChannel {
    pub fn open(sink: Box<dyn AudioSink>, config: &AudioConfig) -> Self {
        let sink = if config.enabled {
            Some(sink)
        } else {
            debug!("Audio disabled in config; cues will be dropped");
            None
        };
        Self {
            sink,
            synth: Synth::new(config.sample_rate),
            volume: config.volume(),
            played: 0,
            failures: 0,
        }
    }

    /// A channel with no output
    pub fn disabled() -> Self {
        Self {
            sink: None,
            synth: Synth::new(proc_gen::audio::SAMPLE_RATE),
            volume: 0.0,
            played: 0,
            failures: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.sink.is_some()
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
    }

    pub fn master_volume(&self) -> f32 {
        self.volume
    }

    /// Cues successfully handed to the sink
    pub fn played(&self) -> usize {
        self.played
    }

    /// Cues the sink rejected
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Render and play a cue; errors are logged, never returned
    pub fn play(&mut self, cue: &AudioCue) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };

        let mut buffer = cue.render(&self.synth);
        apply_gain(&mut buffer.samples, self.volume);

        match sink.play(&buffer) {
            Ok(()) => self.played += 1,
            Err(e) => {
                self.failures += 1;
                warn!("Dropping audio cue {:?}: {}", cue, e);
            }
        }
    }

    pub fn close(&mut self) {
        if let Some(mut sink) = self.sink.take() {
            if let Err(e) = sink.close() {
                warn!("Failed to close audio sink: {}", e);
            }
            debug!("Audio channel closed after {} cues", self.played);
        }
    }
}

impl Default for AudioChannel {
    fn default() -> Self {
        Self::disabled()
    }
}

impl Drop for AudioChannel {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for AudioChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioChannel")
            .field("open", &self.is_open())
            .field("volume", &self.volume)
            .field("played", &self.played)
            .field("failures", &self.failures)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenSink;

    impl AudioSink for BrokenSink {
        fn play(&mut self, _buffer: &AudioBuffer) -> Result<(), AudioError> {
            Err(AudioError::NoDevice)
        }
    }

    #[test]
    fn test_tone_frequencies() {
        let tone = |axis, value| AudioCue::ParameterTone { axis, value }.frequency();
        assert_eq!(tone(ParameterAxis::Color, 70.0), Some(510.0));
        assert_eq!(tone(ParameterAxis::Length, 0.0), Some(250.0));
        assert_eq!(tone(ParameterAxis::Width, 100.0), Some(500.0));
        assert_eq!(tone(ParameterAxis::Layers, 10.0), Some(380.0));
        assert_eq!(tone(ParameterAxis::Face, 4.0), Some(212.0));
        assert_eq!(AudioCue::Fanfare.frequency(), None);
    }

    #[test]
    fn test_render_lengths() {
        let synth = Synth::new(22050);
        let tone = AudioCue::ParameterTone {
            axis: ParameterAxis::Color,
            value: 50.0,
        }
        .render(&synth);
        assert!((tone.duration() - TONE_DURATION).abs() < 1e-3);
        assert!(tone.peak() <= 0.1 + 1e-4);

        let fanfare = AudioCue::Fanfare.render(&synth);
        assert!((fanfare.duration() - FANFARE_DURATION).abs() < 1e-3);
        assert!(fanfare.peak() <= 0.2 + 1e-4);
    }

    #[test]
    fn test_channel_applies_volume() {
        let capture = CaptureSink::new();
        let config = AudioConfig {
            master_volume: 0.5,
            ..AudioConfig::default()
        };
        let mut channel = AudioChannel::open(Box::new(capture.clone()), &config);
        channel.play(&AudioCue::Fanfare);

        let buffers = capture.buffers();
        assert_eq!(buffers.len(), 1);
        assert!(buffers[0].peak() <= 0.1 + 1e-4);
        assert_eq!(channel.played(), 1);
    }

    #[test]
    fn test_failures_are_swallowed() {
        let mut channel = AudioChannel::open(Box::new(BrokenSink), &AudioConfig::default());
        channel.play(&AudioCue::Fanfare);
        channel.play(&AudioCue::Fanfare);
        assert_eq!(channel.played(), 0);
        assert_eq!(channel.failures(), 2);
    }

    #[test]
    fn test_disabled_config_drops_cues() {
        let capture = CaptureSink::new();
        let config = AudioConfig {
            enabled: false,
            ..AudioConfig::default()
        };
        let mut channel = AudioChannel::open(Box::new(capture.clone()), &config);
        assert!(!channel.is_open());
        channel.play(&AudioCue::Fanfare);
        assert!(capture.is_empty());
    }

    #[test]
    fn test_close_on_drop() {
        let capture = CaptureSink::new();
        {
            let _channel = AudioChannel::open(Box::new(capture.clone()), &AudioConfig::default());
        }
        assert!(capture.is_closed());
    }

    #[test]
    fn test_closed_channel_is_silent() {
        let capture = CaptureSink::new();
        let mut channel = AudioChannel::open(Box::new(capture.clone()), &AudioConfig::default());
        channel.close();
        channel.play(&AudioCue::Fanfare);
        assert!(capture.is_empty());
        assert_eq!(channel.failures(), 0);
    }

    #[cfg(feature = "wav-export")]
    #[test]
    fn test_wav_sink_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let sink = WavSink::new(dir.path().join("cues")).unwrap();
        let mut channel = AudioChannel::open(Box::new(sink), &AudioConfig::default());
        channel.play(&AudioCue::Fanfare);
        assert!(dir.path().join("cues/cue-000.wav").exists());
    }
}
