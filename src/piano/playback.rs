// Playback scheduler - replays a recorded take at a fixed note interval
// Generation counter makes steps from a superseded playback inert

use super::Step;
use crate::piano::recorder::RecordedSequence;
use crate::notes::Note;
use crate::timer::TimerQueue;
use std::time::{Duration, Instant};

/// Spacing between replayed notes. Capture timing is not stored; replay
/// reconstructs it as `index * NOTE_INTERVAL`.
pub const NOTE_INTERVAL: Duration = Duration::from_millis(500);

/// Schedules one playback of a [`RecordedSequence`].
///
/// `start` lays out every step up front: note i fires at `i * interval`
/// after the call, and one final clear fires at `len * interval`. Each step
/// carries the generation it was scheduled under; calling `start` again
/// while steps are still pending bumps the generation, so the leftovers of
/// the old playback are recognised as stale when they fire and do nothing.
#[derive(Debug)]
pub struct Playback {
    generation: u64,
    interval: Duration,
    current: Option<RecordedSequence>,
}

impl Playback {
    pub fn new() -> Self {
        Self::with_interval(NOTE_INTERVAL)
    }

    /// Playback with a non-default note spacing.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            generation: 0,
            interval,
            current: None,
        }
    }

    /// True while a playback has scheduled steps that did not finish yet.
    pub fn is_playing(&self) -> bool {
        self.current.is_some()
    }

    /// Whether `generation` belongs to the playback currently underway.
    pub fn is_current(&self, generation: u64) -> bool {
        self.current.is_some() && self.generation == generation
    }

    /// The note a given step index refers to, within the current playback.
    pub fn note_at(&self, index: usize) -> Option<Note> {
        self.current
            .as_ref()
            .and_then(|take| take.notes().get(index).copied())
    }

    /// Schedule a full replay of `take` starting at `now`.
    ///
    /// An empty take is a graceful no-op: nothing is scheduled and the
    /// return value says so. Any playback still pending is superseded.
    pub fn start(
        &mut self,
        timers: &mut TimerQueue<Step>,
        now: Instant,
        take: &RecordedSequence,
    ) -> bool {
        if take.is_empty() {
            return false;
        }

        self.generation += 1;
        self.current = Some(take.clone());
        let generation = self.generation;

        for index in 0..take.len() {
            timers.schedule(
                now + self.interval * index as u32,
                Step::PlayNote { generation, index },
            );
        }
        // Scheduled last, after every note at an earlier or equal offset:
        // the authoritative return to a neutral keyboard
        timers.schedule(
            now + self.interval * take.len() as u32,
            Step::FinishPlayback { generation },
        );

        true
    }

    /// Mark the playback for `generation` finished. Stale generations are
    /// ignored. Returns whether this ended the current playback.
    pub fn finish(&mut self, generation: u64) -> bool {
        if self.is_current(generation) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new()
    }
}
