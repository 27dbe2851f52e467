// Command types - UI thread → audio callback

use crate::notes::Note;

/// What the audio side can be asked to do. Fire-and-forget: there is no
/// reply channel, and a command that cannot be honoured (unknown sample,
/// full voice pool) degrades to silence on the audio side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Start one sample voice for `note` at the given rate multiplier.
    PlaySample { note: Note, rate: f32 },
}
