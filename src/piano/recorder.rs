// Note recorder - captures presses in arrival order while armed

use crate::notes::Note;
use std::sync::Arc;

/// The immutable outcome of one recording session.
///
/// Hand-off from the recorder is by value and never mutated afterwards;
/// clones share the same backing storage so playback can hold onto a
/// snapshot while the owner keeps another.
#[derive(Debug, Clone)]
pub struct RecordedSequence {
    notes: Arc<[Note]>,
}

impl RecordedSequence {
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl From<Vec<Note>> for RecordedSequence {
    fn from(notes: Vec<Note>) -> Self {
        Self {
            notes: notes.into(),
        }
    }
}

/// One-take note recorder: idle ⇄ armed.
///
/// While armed, `capture` appends every press in strict call order - no
/// dedup, no reordering. `capture` while idle is a silent no-op, not an
/// error. Each new session starts from an empty buffer.
#[derive(Debug, Default)]
pub struct Recorder {
    armed: bool,
    take: Vec<Note>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Arm the recorder, discarding anything left from a previous session.
    pub fn start(&mut self) {
        self.armed = true;
        self.take.clear();
    }

    /// Disarm and hand off the captured take.
    pub fn stop(&mut self) -> RecordedSequence {
        self.armed = false;
        std::mem::take(&mut self.take).into()
    }

    /// Append a pressed note, if armed.
    pub fn capture(&mut self, note: Note) {
        if self.armed {
            self.take.push(note);
        }
    }

    /// Flip between armed and idle, matching the single record button.
    /// Returns the finished take when this toggle stopped a session.
    pub fn toggle(&mut self) -> Option<RecordedSequence> {
        if self.armed {
            Some(self.stop())
        } else {
            self.start();
            None
        }
    }

    /// Notes captured so far in the in-progress session.
    pub fn pending(&self) -> &[Note] {
        &self.take
    }
}
