// Piano core - ties the key surface, recorder, playback and timers together
// Single-threaded: the UI calls press/toggle/play and drives tick(now)

pub mod active;
pub mod pitch;
pub mod playback;
pub mod recorder;

pub use active::ActiveKey;
pub use pitch::PitchShift;
pub use playback::{NOTE_INTERVAL, Playback};
pub use recorder::{RecordedSequence, Recorder};

use crate::notes::{CHROMATIC_LAYOUT, Note};
use crate::timer::TimerQueue;
use std::time::{Duration, Instant};

/// How long a pressed key stays visually active before it clears itself.
pub const KEY_DWELL: Duration = Duration::from_millis(300);

/// Everything the piano defers to a timer, as plain data.
///
/// Steps carry the epoch/generation they were scheduled under so that a
/// step from a superseded state is recognised when it fires and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Dwell expiry for the active key.
    ClearKey { epoch: u64 },
    /// Replay note `index` of the running playback.
    PlayNote { generation: u64, index: usize },
    /// End of playback: authoritative return to a neutral keyboard.
    FinishPlayback { generation: u64 },
}

/// The audio capability the core talks to. Fire-and-forget: implementations
/// must swallow their own failures (a missing sample means silence, never a
/// broken trigger path).
pub trait SampleSink {
    fn play_sample(&mut self, note: Note, rate: f32);
}

/// Sink for running without any audio backend; keys still light up.
pub struct NullSink;

impl SampleSink for NullSink {
    fn play_sample(&mut self, _note: Note, _rate: f32) {}
}

/// The piano: key input surface, one-slot recorder, playback scheduler and
/// the single active-key cell, all driven by one timer queue.
///
/// Nothing here blocks or spawns; the owner calls [`Piano::tick`] with the
/// current time (once per UI frame) and due steps run then.
pub struct Piano {
    layout: &'static [Note],
    active: ActiveKey,
    recorder: Recorder,
    playback: Playback,
    pitch: PitchShift,
    timers: TimerQueue<Step>,
    recorded: Option<RecordedSequence>,
    sink: Box<dyn SampleSink>,
}

impl Piano {
    pub fn new(sink: Box<dyn SampleSink>) -> Self {
        Self::with_note_interval(sink, NOTE_INTERVAL)
    }

    /// Piano whose playback uses a non-default note spacing.
    pub fn with_note_interval(sink: Box<dyn SampleSink>, interval: Duration) -> Self {
        Self {
            layout: &CHROMATIC_LAYOUT,
            active: ActiveKey::new(),
            recorder: Recorder::new(),
            playback: Playback::with_interval(interval),
            pitch: PitchShift::default(),
            timers: TimerQueue::new(),
            recorded: None,
            sink,
        }
    }

    /// The ordered keys the surface should render.
    pub fn layout(&self) -> &'static [Note] {
        self.layout
    }

    pub fn active_key(&self) -> Option<Note> {
        self.active.get()
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_armed()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn pitch(&self) -> PitchShift {
        self.pitch
    }

    /// The last finished take, if any.
    pub fn recorded(&self) -> Option<&RecordedSequence> {
        self.recorded.as_ref()
    }

    /// Whether there is a non-empty take to replay (the play control is
    /// disabled otherwise).
    pub fn has_recording(&self) -> bool {
        self.recorded.as_ref().is_some_and(|take| !take.is_empty())
    }

    /// Notes captured so far while armed, for the recorder panel.
    pub fn pending_capture(&self) -> &[Note] {
        self.recorder.pending()
    }

    /// When the next timer step comes due; lets the UI repaint just in time
    /// instead of polling.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// A key was pressed on the surface.
    ///
    /// Every press triggers sound and the active-key flash; while the
    /// recorder is armed it is also captured. Rapid repeats of one key each
    /// count in full.
    pub fn press(&mut self, now: Instant, note: Note) {
        self.recorder.capture(note);
        self.trigger(now, note);
    }

    /// Flip the recorder. Stopping a session replaces the stored take; the
    /// slot holds the latest take only.
    pub fn toggle_recording(&mut self) {
        if let Some(take) = self.recorder.toggle() {
            log::debug!("recording stopped with {} notes", take.len());
            self.recorded = Some(take);
        } else {
            log::debug!("recording started");
        }
    }

    pub fn toggle_pitch(&mut self) {
        self.pitch.toggle();
    }

    /// Replay the stored take starting at `now`. No-op (returning false)
    /// when there is nothing to play; a playback already underway is
    /// superseded.
    pub fn play_recorded(&mut self, now: Instant) -> bool {
        let Some(take) = self.recorded.as_ref() else {
            return false;
        };
        let started = self.playback.start(&mut self.timers, now, take);
        if started {
            log::debug!("playback of {} notes started", take.len());
        }
        started
    }

    /// Run every step that came due by `now`, in deadline order.
    pub fn tick(&mut self, now: Instant) {
        while let Some(step) = self.timers.pop_due(now) {
            match step {
                Step::ClearKey { epoch } => {
                    self.active.clear_if_current(epoch);
                }
                Step::PlayNote { generation, index } => {
                    if !self.playback.is_current(generation) {
                        continue;
                    }
                    // Index always resolves for a live generation; guard
                    // anyway so a stale queue entry cannot panic
                    if let Some(note) = self.playback.note_at(index) {
                        self.trigger(now, note);
                    }
                }
                Step::FinishPlayback { generation } => {
                    if self.playback.finish(generation) {
                        // Wins over any pending dwell clear, including the
                        // last note's
                        self.active.force_clear();
                    }
                }
            }
        }
    }

    /// Sound the note at the current pitch rate, flash its key, and arm the
    /// dwell clear. Shared by live presses and replayed steps; the rate is
    /// read here, at fire time.
    fn trigger(&mut self, now: Instant, note: Note) {
        self.sink.play_sample(note, self.pitch.rate());
        let epoch = self.active.set(note);
        self.timers.schedule(now + KEY_DWELL, Step::ClearKey { epoch });
    }
}
