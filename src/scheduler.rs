//! Deferred re-invocations of the playback controller.
//!
//! The controller has no timers of its own. It asks a `Scheduler` to hand a
//! `Timer` back after a delay, and whoever drives the controller delivers due
//! timers to `PlaybackController::on_timer` on the same thread.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

/// A scheduled re-check. `episode` identifies the stretch of `Playing` that
/// armed it; a timer from an older episode is inert when it fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Timer {
    /// Check whether the current track has run out.
    EndCheck { episode: u64 },
    /// Push the engine position to the seek bar.
    RefreshPosition { episode: u64 },
}

impl Timer {
    pub fn episode(&self) -> u64 {
        match *self {
            Timer::EndCheck { episode } | Timer::RefreshPosition { episode } => episode,
        }
    }
}

pub trait Scheduler {
    /// Deliver `timer` back to the controller once `delay` has passed.
    fn schedule_after(&mut self, delay: Duration, timer: Timer);
}

#[derive(Debug)]
struct Entry {
    deadline: Instant,
    seq: u64,
    timer: Timer,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so the max-heap pops the earliest deadline first; `seq`
    // keeps timers with equal deadlines in scheduling order.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Wall-clock timer queue polled by the runtime loop.
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_at(&mut self, deadline: Instant, timer: Timer) {
        self.seq += 1;
        self.heap.push(Entry {
            deadline,
            seq: self.seq,
            timer,
        });
    }

    /// Remove and return the earliest timer whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<Timer> {
        if self.heap.peek()?.deadline > now {
            return None;
        }
        self.heap.pop().map(|e| e.timer)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|e| e.deadline)
    }
}

impl Scheduler for TimerQueue {
    fn schedule_after(&mut self, delay: Duration, timer: Timer) {
        self.schedule_at(Instant::now() + delay, timer);
    }
}

#[cfg(test)]
mod tests;
