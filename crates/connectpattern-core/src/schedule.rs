//! Fire-once timers on the widget's virtual clock.
//!
//! The host advances the clock; nothing here spawns threads or sleeps.

use crate::animation::TransitionKind;
use std::time::Duration;

/// Work deferred to a later point on the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Resolve the released gesture.
    DeliverResult,
    /// Ask for a transition again once layout may be ready.
    RetryTransition {
        kind: TransitionKind,
        delay: Duration,
        attempt: u32,
    },
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    due: Duration,
    seq: u64,
    action: Deferred,
}

/// Clock plus pending timers, fired in due order (ties in scheduling order).
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_seq: u64,
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule_after(&mut self, delay: Duration, action: Deferred) {
        let timer = Timer {
            due: self.now + delay,
            seq: self.next_seq,
            action,
        };
        self.next_seq += 1;
        self.timers.push(timer);
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Due time of the earliest timer.
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.iter().map(|timer| timer.due).min()
    }

    /// Remove the earliest timer due at or before `until`, moving the clock
    /// to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<Deferred> {
        let (position, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= until)
            .min_by_key(|(_, timer)| (timer.due, timer.seq))?;
        let timer = self.timers.remove(position);
        self.now = self.now.max(timer.due);
        Some(timer.action)
    }

    /// Move the clock forward. The clock never runs backwards.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
