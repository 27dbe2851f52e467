// Sound bank - maps each catalog note to a loaded sample
// Convention: <dir>/<note name>.wav, one file per key ("C.wav", "C#.wav", ...)
// An optional bank.json manifest overrides file names and per-note gain

use crate::notes::{CHROMATIC_LAYOUT, Note};
use crate::sampler::loader::{Sample, load_wav};
use crate::sampler::SamplerResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const MANIFEST_FILE: &str = "bank.json";

/// Serializable bank manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankManifest {
    pub name: String,
    pub samples: Vec<SampleEntry>,
}

/// One manifest line: which file to use for a note, and how loud.
/// The note field deserializes through the closed catalog, so a manifest
/// naming an unknown note fails to parse instead of half-loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleEntry {
    pub note: Note,
    /// Path to the WAV, relative to the bank directory.
    pub file: PathBuf,
    /// Volume multiplier applied when the note is triggered.
    #[serde(default = "default_gain")]
    pub gain: f32,
}

fn default_gain() -> f32 {
    1.0
}

impl BankManifest {
    /// The path-convention manifest: every chromatic note mapped to
    /// `<name>.wav` at unit gain.
    pub fn by_convention() -> Self {
        Self {
            name: "default".to_string(),
            samples: CHROMATIC_LAYOUT
                .iter()
                .map(|&note| SampleEntry {
                    note,
                    file: PathBuf::from(format!("{}.wav", note.sample_stem())),
                    gain: 1.0,
                })
                .collect(),
        }
    }

    pub fn load(path: &Path) -> SamplerResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, path: &Path) -> SamplerResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// A loaded mapping for one note.
#[derive(Clone)]
pub struct BankSlot {
    pub sample: Arc<Sample>,
    pub gain: f32,
}

/// All samples for the keyboard, ready for the audio callback.
pub struct SoundBank {
    slots: HashMap<Note, BankSlot>,
}

impl SoundBank {
    /// Load a bank directory.
    ///
    /// Uses `bank.json` when present, the path convention otherwise. Load
    /// failures are not fatal anywhere: a bad manifest falls back to the
    /// convention, and each missing or undecodable file is logged and
    /// skipped, leaving that key silent but still pressable.
    pub fn load_dir(dir: &Path) -> Self {
        let manifest_path = dir.join(MANIFEST_FILE);
        let manifest = if manifest_path.is_file() {
            match BankManifest::load(&manifest_path) {
                Ok(manifest) => manifest,
                Err(e) => {
                    log::warn!(
                        "unreadable bank manifest {}: {e}, using path convention",
                        manifest_path.display()
                    );
                    BankManifest::by_convention()
                }
            }
        } else {
            BankManifest::by_convention()
        };

        Self::from_manifest(dir, &manifest)
    }

    pub fn from_manifest(dir: &Path, manifest: &BankManifest) -> Self {
        let mut slots = HashMap::new();

        for entry in &manifest.samples {
            let note = entry.note;
            let path = dir.join(&entry.file);
            match load_wav(&path) {
                Ok(sample) => {
                    slots.insert(
                        note,
                        BankSlot {
                            sample: Arc::new(sample),
                            gain: entry.gain,
                        },
                    );
                }
                Err(e) => {
                    log::warn!("no sample for {note}: {} ({e})", path.display());
                }
            }
        }

        log::info!(
            "sound bank {:?}: {} of {} samples loaded",
            manifest.name,
            slots.len(),
            manifest.samples.len()
        );

        Self { slots }
    }

    pub fn get(&self, note: Note) -> Option<&BankSlot> {
        self.slots.get(&note)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_tone(path: &Path) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..100i32 {
            writer.write_sample((i * 50) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_manifest_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);

        let manifest = BankManifest::by_convention();
        manifest.save(&path).unwrap();
        let loaded = BankManifest::load(&path).unwrap();

        assert_eq!(loaded.name, "default");
        assert_eq!(loaded.samples.len(), CHROMATIC_LAYOUT.len());
        assert_eq!(loaded.samples[0].note, Note::C);
        assert_eq!(loaded.samples[0].file, PathBuf::from("C.wav"));
        assert_eq!(loaded.samples[0].gain, 1.0);
        // Sharps serialize as their display names
        assert_eq!(loaded.samples[1].note, Note::Cs);
        assert_eq!(loaded.samples[1].file, PathBuf::from("C#.wav"));
    }

    #[test]
    fn test_gain_defaults_when_absent() {
        let json = r#"{ "name": "t", "samples": [{ "note": "A#", "file": "As.wav" }] }"#;
        let manifest: BankManifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.samples[0].note, Note::As);
        assert_eq!(manifest.samples[0].gain, 1.0);
    }

    #[test]
    fn test_unknown_note_fails_to_parse() {
        let json = r#"{ "name": "t", "samples": [{ "note": "X", "file": "X.wav" }] }"#;
        assert!(serde_json::from_str::<BankManifest>(json).is_err());
    }

    #[test]
    fn test_load_dir_by_convention() {
        let dir = tempfile::tempdir().unwrap();
        write_tone(&dir.path().join("C.wav"));
        write_tone(&dir.path().join("C#.wav"));

        let bank = SoundBank::load_dir(dir.path());
        assert_eq!(bank.len(), 2);
        assert!(bank.get(Note::C).is_some());
        assert!(bank.get(Note::Cs).is_some());
        // Missing files leave silent keys, not errors
        assert!(bank.get(Note::D).is_none());
    }

    #[test]
    fn test_load_dir_with_manifest_overrides() {
        let dir = tempfile::tempdir().unwrap();
        write_tone(&dir.path().join("weird-name.wav"));

        let manifest = BankManifest {
            name: "custom".to_string(),
            samples: vec![SampleEntry {
                note: Note::G,
                file: PathBuf::from("weird-name.wav"),
                gain: 0.5,
            }],
        };
        manifest.save(&dir.path().join(MANIFEST_FILE)).unwrap();

        let bank = SoundBank::load_dir(dir.path());
        assert_eq!(bank.len(), 1);
        let slot = bank.get(Note::G).unwrap();
        assert_eq!(slot.gain, 0.5);
        assert_eq!(slot.sample.name, "weird-name");
    }

    #[test]
    fn test_bad_manifest_falls_back_to_convention() {
        let dir = tempfile::tempdir().unwrap();
        write_tone(&dir.path().join("D.wav"));
        std::fs::write(dir.path().join(MANIFEST_FILE), "{ not json").unwrap();

        let bank = SoundBank::load_dir(dir.path());
        assert_eq!(bank.len(), 1);
        assert!(bank.get(Note::D).is_some());
    }

    #[test]
    fn test_empty_dir_gives_empty_bank() {
        let dir = tempfile::tempdir().unwrap();
        let bank = SoundBank::load_dir(dir.path());
        assert!(bank.is_empty());
    }
}
