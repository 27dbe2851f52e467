// Clavier - a small virtual piano with a note recorder and timed playback

pub mod audio;
pub mod messaging;
pub mod notes;
pub mod piano;
pub mod sampler;
pub mod timer;
pub mod ui;

// Re-export commonly used types for convenience
pub use audio::{AudioEngine, ChannelSink};
pub use messaging::{Command, create_command_channel};
pub use notes::{CHROMATIC_LAYOUT, NATURAL_LAYOUT, Note};
pub use piano::{
    KEY_DWELL, NOTE_INTERVAL, NullSink, Piano, PitchShift, RecordedSequence, Recorder, SampleSink,
};
pub use sampler::SoundBank;
pub use timer::TimerQueue;
