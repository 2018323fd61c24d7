//! Virtual-clock timer queue. Every timed component owns one and drives it
//! from whatever clock the host provides (a tokio sleep loop in the preview
//! app, plain integers in tests).

use std::collections::BTreeMap;

/// Milliseconds since the page was mounted.
pub type Millis = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle {
    due: Millis,
    seq: u64,
}

impl TimerHandle {
    pub fn due(&self) -> Millis {
        self.due
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<E> {
    pub at: Millis,
    pub event: E,
}

#[derive(Debug)]
pub struct TimerQueue<E> {
    now: Millis,
    next_seq: u64,
    entries: BTreeMap<(Millis, u64), E>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            entries: BTreeMap::new(),
        }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn after(&mut self, delay_ms: Millis, event: E) -> TimerHandle {
        let handle = TimerHandle {
            due: self.now.saturating_add(delay_ms),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.entries.insert((handle.due, handle.seq), event);
        handle
    }

    /// Safe to call with a handle that already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.entries.remove(&(handle.due, handle.seq)).is_some()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.contains_key(&(handle.due, handle.seq))
    }

    /// Releases the earliest timer due at or before `until`, moving the clock
    /// to its deadline so follow-up timers are measured from the firing
    /// instant rather than from `until`.
    pub fn pop_due(&mut self, until: Millis) -> Option<Fired<E>> {
        let (&(due, seq), _) = self.entries.first_key_value()?;
        if due > until {
            return None;
        }
        let event = self.entries.remove(&(due, seq))?;
        self.now = self.now.max(due);
        Some(Fired { at: due, event })
    }

    /// Moves the clock forward without firing anything. Never moves backwards.
    pub fn advance_to(&mut self, now: Millis) {
        self.now = self.now.max(now);
    }

    /// Fires everything due up to `now` in deadline order, then settles the
    /// clock at `now`.
    pub fn drain_until(&mut self, now: Millis) -> Vec<Fired<E>> {
        let mut fired = Vec::new();
        while let Some(next) = self.pop_due(now) {
            fired.push(next);
        }
        self.advance_to(now);
        fired
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.entries.keys().next().map(|(due, _)| *due)
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "tests/scheduler_tests.rs"]
mod tests;
