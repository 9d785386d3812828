//! Keyed one-shot timers on a virtual clock

use serde::Serialize;
use smallvec::SmallVec;
use std::time::Duration;

/// Concern a pending timer belongs to; at most one timer per key is live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKey {
    /// Return to idle after an update or bulk-replace reaction
    EmotionReversion,
    /// Switch from proud to happy after a discovery
    DiscoveryAnnouncement,
    /// Next idle/sleepy toggle
    Breathing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    key: TimerKey,
    deadline: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    pending: SmallVec<[Pending; 3]>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `key` at `deadline`, replacing any pending timer for that key
    ///
    /// Returns true if a pending timer was replaced.
    pub fn schedule(&mut self, key: TimerKey, deadline: Duration) -> bool {
        let replaced = self.cancel(key);
        self.pending.push(Pending { key, deadline });
        replaced
    }

    /// Returns true if a pending timer was removed
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.key != key);
        self.pending.len() != before
    }

    pub fn deadline(&self, key: TimerKey) -> Option<Duration> {
        self.pending
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.deadline)
    }

    /// Earliest deadline of any pending timer
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.deadline).min()
    }

    /// Remove and return the earliest timer due at or before `now`
    ///
    /// Equal deadlines pop in key order.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TimerKey, Duration)> {
        let (index, due) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline <= now)
            .min_by_key(|(_, p)| (p.deadline, p.key))?;
        let due = *due;
        self.pending.remove(index);
        Some((due.key, due.deadline))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
