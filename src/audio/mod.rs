// Audio backend - cpal output stream and the sink the piano core talks to

pub mod engine;

pub use engine::AudioEngine;

use crate::messaging::channels::CommandProducer;
use crate::messaging::command::Command;
use crate::notes::Note;
use crate::piano::SampleSink;
use ringbuf::traits::Producer;
use thiserror::Error;

/// Audio backend errors. Only surfaced at startup; once the stream runs,
/// problems are logged from the error callback and playback degrades to
/// silence.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device found")]
    NoDevice,

    #[error("failed to query output config: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("unsupported device sample format: {0:?}")]
    UnsupportedFormat(cpal::SampleFormat),
}

pub type AudioResult<T> = Result<T, AudioError>;

/// Production [`SampleSink`]: forwards play requests over the lock-free
/// channel into the audio callback. A full channel drops the command with a
/// log line; the trigger path never fails.
pub struct ChannelSink {
    tx: CommandProducer,
}

impl ChannelSink {
    pub fn new(tx: CommandProducer) -> Self {
        Self { tx }
    }
}

impl SampleSink for ChannelSink {
    fn play_sample(&mut self, note: Note, rate: f32) {
        if self
            .tx
            .try_push(Command::PlaySample { note, rate })
            .is_err()
        {
            log::warn!("command channel full, dropping note {note}");
        }
    }
}
