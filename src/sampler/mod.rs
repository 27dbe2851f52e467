// Sampler - one WAV per note, played back at a rate multiplier

pub mod bank;
pub mod loader;
pub mod voice;

pub use bank::{BankSlot, SoundBank};
pub use loader::{Sample, load_wav};
pub use voice::{SamplerVoice, VoicePool};

use thiserror::Error;

/// Sample loading errors. These never reach the trigger path: the bank logs
/// them at load time and the affected key simply stays silent.
#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV decode error: {0}")]
    Wav(#[from] hound::Error),

    #[error("unsupported WAV format: {bits}-bit {format:?}")]
    UnsupportedFormat {
        format: hound::SampleFormat,
        bits: u16,
    },

    #[error("bank manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
}

pub type SamplerResult<T> = Result<T, SamplerError>;
