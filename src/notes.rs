// Note catalog - the closed set of playable keys
// One octave of semitone names; layouts pick which keys the surface exposes

use serde::{Deserialize, Serialize};

/// A playable note, one of the 12 semitone names of a single octave.
///
/// The catalog is closed on purpose: every component takes a `Note`, so an
/// unknown or out-of-range note is unrepresentable rather than a runtime
/// error case. Serialized as the display name, so manifests read naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Note {
    C,
    #[serde(rename = "C#")]
    Cs,
    D,
    #[serde(rename = "D#")]
    Ds,
    E,
    F,
    #[serde(rename = "F#")]
    Fs,
    G,
    #[serde(rename = "G#")]
    Gs,
    A,
    #[serde(rename = "A#")]
    As,
    B,
}

/// The 7 natural notes, in keyboard order.
pub const NATURAL_LAYOUT: [Note; 7] = [
    Note::C,
    Note::D,
    Note::E,
    Note::F,
    Note::G,
    Note::A,
    Note::B,
];

/// The full chromatic octave, in keyboard order.
pub const CHROMATIC_LAYOUT: [Note; 12] = [
    Note::C,
    Note::Cs,
    Note::D,
    Note::Ds,
    Note::E,
    Note::F,
    Note::Fs,
    Note::G,
    Note::Gs,
    Note::A,
    Note::As,
    Note::B,
];

impl Note {
    /// Display name, e.g. "C" or "C#".
    pub fn name(self) -> &'static str {
        match self {
            Note::C => "C",
            Note::Cs => "C#",
            Note::D => "D",
            Note::Ds => "D#",
            Note::E => "E",
            Note::F => "F",
            Note::Fs => "F#",
            Note::G => "G",
            Note::Gs => "G#",
            Note::A => "A",
            Note::As => "A#",
            Note::B => "B",
        }
    }

    /// True for the sharps, drawn as black keys.
    pub fn is_accidental(self) -> bool {
        matches!(self, Note::Cs | Note::Ds | Note::Fs | Note::Gs | Note::As)
    }

    /// Semitone index within the octave (C = 0 .. B = 11).
    pub fn semitone(self) -> usize {
        // Variants are declared in chromatic order
        self as usize
    }

    /// File stem used by the sample path convention (`<dir>/<stem>.wav`).
    /// Same as `name()`; kept separate so the bank convention has one home.
    pub fn sample_stem(self) -> &'static str {
        self.name()
    }

    /// Parse a display name back into a note ("C#", "A", ...).
    pub fn from_name(name: &str) -> Option<Note> {
        CHROMATIC_LAYOUT.iter().copied().find(|n| n.name() == name)
    }
}

impl std::fmt::Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
