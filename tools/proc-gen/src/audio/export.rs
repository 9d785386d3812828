//! Gain, PCM quantization and WAV output for rendered cues

#[cfg(feature = "wav-export")]
use std::path::Path;

/// Quantize to signed 16-bit, saturating outside [-1, 1]
pub fn to_pcm_i16(samples: &[f32]) -> Vec<i16> {
    const FULL_SCALE: f32 = i16::MAX as f32;
    samples
        .iter()
        .map(|&s| (s.clamp(-1.0, 1.0) * FULL_SCALE) as i16)
        .collect()
}

/// Scale samples in place
pub fn apply_gain(samples: &mut [f32], gain: f32) {
    samples.iter_mut().for_each(|s| *s *= gain);
}

/// Write a mono 16-bit WAV file from f32 samples
#[cfg(feature = "wav-export")]
pub fn write_wav(samples: &[f32], sample_rate: u32, path: &Path) -> std::io::Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec).map_err(std::io::Error::other)?;
    for sample in to_pcm_i16(samples) {
        writer.write_sample(sample).map_err(std::io::Error::other)?;
    }
    writer.finalize().map_err(std::io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pcm_saturates() {
        let pcm = to_pcm_i16(&[0.0, 0.25, 1.0, -3.0]);
        assert_eq!(pcm, vec![0, 8191, i16::MAX, -i16::MAX]);
    }

    #[test]
    fn test_apply_gain() {
        let mut samples = vec![1.0, -0.5];
        apply_gain(&mut samples, 0.8);
        assert!((samples[0] - 0.8).abs() < 1e-6);
        assert!((samples[1] + 0.4).abs() < 1e-6);
    }

    #[cfg(feature = "wav-export")]
    #[test]
    fn test_written_wav_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cue.wav");
        write_wav(&[0.0, 0.5, -0.5], 22050, &path).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 22050);
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.len(), 3);
    }
}
