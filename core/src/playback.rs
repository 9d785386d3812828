//! Real audio output through the default device
//!
//! Cues are resampled to the device rate, duplicated across its channels and
//! pushed to a ring buffer that the cpal callback drains. When the ring is
//! empty the callback writes silence.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use proc_gen::audio::AudioBuffer;
use ringbuf::{
    HeapRb,
    traits::{Consumer, Producer, Split},
};
use tracing::{debug, error};

use crate::audio::AudioSink;
use crate::error::AudioError;

/// About two seconds of stereo at 48 kHz, enough for a fanfare plus tones
const RING_BUFFER_SIZE: usize = 48_000 * 2 * 2;

/// Output to the host's default device
pub struct DeviceSink {
    producer: ringbuf::HeapProd<f32>,
    stream: Option<cpal::Stream>,
    sample_rate: u32,
    channels: usize,
}

impl DeviceSink {
    pub fn open() -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;

        let config = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceConfig(e.to_string()))?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;

        let ring = HeapRb::<f32>::new(RING_BUFFER_SIZE);
        let (producer, mut consumer) = ring.split();

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => device.build_output_stream(
                &config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    for sample in data.iter_mut() {
                        *sample = consumer.try_pop().unwrap_or(0.0);
                    }
                },
                |err| error!("Audio stream error: {}", err),
                None,
            ),
            cpal::SampleFormat::I16 => device.build_output_stream(
                &config.into(),
                move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                    for sample in data.iter_mut() {
                        let f = consumer.try_pop().unwrap_or(0.0);
                        *sample = (f * 32767.0).clamp(-32768.0, 32767.0) as i16;
                    }
                },
                |err| error!("Audio stream error: {}", err),
                None,
            ),
            cpal::SampleFormat::U16 => device.build_output_stream(
                &config.into(),
                move |data: &mut [u16], _: &cpal::OutputCallbackInfo| {
                    for sample in data.iter_mut() {
                        let f = consumer.try_pop().unwrap_or(0.0);
                        *sample = (f * 32767.0 + 32768.0).clamp(0.0, 65535.0) as u16;
                    }
                },
                |err| error!("Audio stream error: {}", err),
                None,
            ),
            other => return Err(AudioError::UnsupportedFormat(format!("{other:?}"))),
        }
        .map_err(|e| AudioError::BuildStream(e.to_string()))?;

        stream.play().map_err(|e| AudioError::Play(e.to_string()))?;
        debug!("Audio stream started at {} Hz, {} channels", sample_rate, channels);

        Ok(Self {
            producer,
            stream: Some(stream),
            sample_rate,
            channels,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

/// Nearest-sample resample of a mono buffer into interleaved frames
fn interleave(buffer: &AudioBuffer, rate: u32, channels: usize) -> Vec<f32> {
    if buffer.is_empty() || buffer.sample_rate == 0 || rate == 0 || channels == 0 {
        return Vec::new();
    }
    let frames = (buffer.len() as u64 * rate as u64 / buffer.sample_rate as u64) as usize;
    let step = buffer.sample_rate as f64 / rate as f64;

    let mut out = Vec::with_capacity(frames * channels);
    for frame in 0..frames {
        let src = ((frame as f64 * step) as usize).min(buffer.len() - 1);
        let s = buffer.samples[src];
        out.extend(std::iter::repeat_n(s, channels));
    }
    out
}

impl AudioSink for DeviceSink {
    fn play(&mut self, buffer: &AudioBuffer) -> Result<(), AudioError> {
        if self.stream.is_none() {
            return Err(AudioError::Closed);
        }
        let samples = interleave(buffer, self.sample_rate, self.channels);
        let pushed = self.producer.push_slice(&samples);
        if pushed < samples.len() {
            debug!(
                "Audio buffer overflow: dropped {} samples",
                samples.len() - pushed
            );
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), AudioError> {
        if let Some(stream) = self.stream.take() {
            stream.pause().map_err(|e| AudioError::Play(e.to_string()))?;
        }
        Ok(())
    }
}
