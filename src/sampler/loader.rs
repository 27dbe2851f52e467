// WAV loading - decode to mono f32 for the voice pool

use crate::sampler::{SamplerError, SamplerResult};
use hound::{SampleFormat, WavReader};
use std::path::Path;

/// A decoded sample, mono f32 regardless of the source file's layout.
pub struct Sample {
    pub name: String,
    pub data: Vec<f32>,
    pub sample_rate: u32,
}

/// Load and decode one WAV file. Supported: 16/24/32-bit integer and
/// 32-bit float; multi-channel files are downmixed by averaging.
pub fn load_wav(path: &Path) -> SamplerResult<Sample> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader
            .into_samples::<f32>()
            .collect::<Result<_, _>>()?,
        (SampleFormat::Int, 16) => reader
            .into_samples::<i16>()
            .map(|s| s.map(|v| v as f32 / i16::MAX as f32))
            .collect::<Result<_, _>>()?,
        (SampleFormat::Int, bits @ (24 | 32)) => {
            let scale = (1i64 << (bits - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
        (format, bits) => {
            return Err(SamplerError::UnsupportedFormat { format, bits });
        }
    };

    Ok(Sample {
        name: path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
        data: downmix(&interleaved, channels),
        sample_rate: spec.sample_rate,
    })
}

/// Average interleaved channels into one mono stream.
fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn write_wav(path: &Path, spec: hound::WavSpec, frames: usize) {
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..frames {
            let v = (TAU * 440.0 * i as f32 / spec.sample_rate as f32).sin();
            for _ in 0..spec.channels {
                match spec.sample_format {
                    SampleFormat::Float => writer.write_sample(v).unwrap(),
                    SampleFormat::Int => writer
                        .write_sample((v * i16::MAX as f32) as i16)
                        .unwrap(),
                }
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_load_i16_mono() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(
            &path,
            hound::WavSpec {
                channels: 1,
                sample_rate: 44100,
                bits_per_sample: 16,
                sample_format: SampleFormat::Int,
            },
            1000,
        );

        let sample = load_wav(&path).unwrap();
        assert_eq!(sample.name, "tone");
        assert_eq!(sample.sample_rate, 44100);
        assert_eq!(sample.data.len(), 1000);
        assert!(sample.data.iter().all(|v| v.abs() <= 1.0));
    }

    #[test]
    fn test_load_float_stereo_downmixes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_wav(
            &path,
            hound::WavSpec {
                channels: 2,
                sample_rate: 48000,
                bits_per_sample: 32,
                sample_format: SampleFormat::Float,
            },
            500,
        );

        let sample = load_wav(&path).unwrap();
        // 500 stereo frames -> 500 mono samples
        assert_eq!(sample.data.len(), 500);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_wav(&dir.path().join("nope.wav")).is_err());
    }

    #[test]
    fn test_downmix_averages() {
        let mono = downmix(&[0.5, -0.5, 1.0, 0.0], 2);
        assert_eq!(mono, vec![0.0, 0.5]);
    }
}
