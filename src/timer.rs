// Timer queue - wall-clock deadlines for the piano core
// Entries with the same deadline fire in the order they were scheduled

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

/// A pending entry: deadline plus a scheduling sequence number that breaks
/// ties so same-deadline entries pop FIFO.
struct Entry<T> {
    fire_at: Instant,
    seq: u64,
    action: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the earliest entry on top
        (other.fire_at, other.seq).cmp(&(self.fire_at, self.seq))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Single-threaded timer queue.
///
/// Nothing fires on its own: the owner calls [`TimerQueue::pop_due`] from its
/// event loop (one `tick` per UI frame is enough for this crate's coarse
/// timing). Actions are plain data so a stale action can be detected by
/// whoever scheduled it instead of needing cancellation here.
pub struct TimerQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Schedule `action` to become due at `fire_at`.
    pub fn schedule(&mut self, fire_at: Instant, action: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            fire_at,
            seq,
            action,
        });
    }

    /// Pop the earliest entry that is due at `now`, if any.
    /// Call in a loop to drain everything that came due.
    pub fn pop_due(&mut self, now: Instant) -> Option<T> {
        if self.heap.peek()?.fire_at <= now {
            self.heap.pop().map(|e| e.action)
        } else {
            None
        }
    }

    /// Deadline of the earliest pending entry.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|e| e.fire_at)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every pending entry.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
