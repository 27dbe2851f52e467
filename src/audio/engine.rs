// Audio engine - cpal real-time callback
//
// The callback owns the command consumer, the sound bank and the voice
// pool outright, so there is nothing to lock: it drains pending play
// commands, then mixes every active voice into the output buffer. All
// mixing happens in f32; the stream is built generically over the device's
// preferred format (f32/i16/u16) and converts on write.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use ringbuf::traits::Consumer;

use crate::audio::{AudioError, AudioResult};
use crate::messaging::channels::CommandConsumer;
use crate::messaging::command::Command;
use crate::sampler::{SoundBank, VoicePool};

/// Upper bound on simultaneous voices. Presses faster than samples decay
/// steal the oldest voice instead of growing the mix.
const MAX_VOICES: usize = 32;

pub struct AudioEngine {
    _device: Device,
    _stream: Stream,
    sample_rate: f32,
}

impl AudioEngine {
    /// Open the default output device and start the stream. The engine
    /// plays whatever arrives on `command_rx` until it is dropped.
    pub fn new(command_rx: CommandConsumer, bank: SoundBank) -> AudioResult<Self> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;

        let supported_config = device.default_output_config()?;
        let sample_format = supported_config.sample_format();
        let sample_rate = supported_config.sample_rate().0 as f32;
        let channels = supported_config.channels() as usize;
        let config: StreamConfig = supported_config.into();

        log::info!(
            "audio output: {} ({} Hz, {} channels, {:?})",
            device.name().unwrap_or_else(|_| "unknown".to_string()),
            sample_rate,
            channels,
            sample_format
        );

        let stream = match sample_format {
            SampleFormat::F32 => {
                Self::build_stream::<f32>(&device, &config, channels, command_rx, bank, sample_rate)
            }
            SampleFormat::I16 => {
                Self::build_stream::<i16>(&device, &config, channels, command_rx, bank, sample_rate)
            }
            SampleFormat::U16 => {
                Self::build_stream::<u16>(&device, &config, channels, command_rx, bank, sample_rate)
            }
            other => return Err(AudioError::UnsupportedFormat(other)),
        }?;

        stream.play()?;

        Ok(Self {
            _device: device,
            _stream: stream,
            sample_rate,
        })
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Build the output stream for one concrete sample type.
    fn build_stream<T>(
        device: &Device,
        config: &StreamConfig,
        channels: usize,
        mut command_rx: CommandConsumer,
        bank: SoundBank,
        output_rate: f32,
    ) -> AudioResult<Stream>
    where
        T: SizedSample + FromSample<f32> + Send + 'static,
    {
        let mut voices = VoicePool::new(MAX_VOICES);

        let stream = device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                // Real-time zone: no allocation, no I/O, no locks

                while let Some(cmd) = command_rx.try_pop() {
                    match cmd {
                        Command::PlaySample { note, rate } => {
                            // Unmapped note: the key stays silent
                            if let Some(slot) = bank.get(note) {
                                voices.trigger(
                                    slot.sample.clone(),
                                    rate,
                                    output_rate,
                                    slot.gain,
                                );
                            }
                        }
                    }
                }

                for frame in data.chunks_mut(channels) {
                    let value = soft_clip(voices.next_sample());
                    // Mono mix written to every channel
                    for channel_sample in frame.iter_mut() {
                        *channel_sample = Sample::from_sample::<f32>(value);
                    }
                }

                voices.prune();
            },
            move |err| {
                // Runs outside the audio callback; logging is fine here
                log::error!("audio stream error: {err}");
            },
            None,
        )?;

        Ok(stream)
    }
}

/// Soft saturation so stacked voices cannot hard-clip the output.
fn soft_clip(sample: f32) -> f32 {
    sample.tanh()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_clip_bounds_output() {
        assert!(soft_clip(10.0) <= 1.0);
        assert!(soft_clip(-10.0) >= -1.0);
        // Small signals pass nearly unchanged
        assert!((soft_clip(0.1) - 0.1).abs() < 0.001);
    }
}
