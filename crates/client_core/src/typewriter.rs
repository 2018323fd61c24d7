//! Headline that types and deletes job titles forever.
//!
//! The transition itself is the pure [`tick`] function; [`Typewriter`] only
//! owns the timer slot and reschedules after whatever speed the last tick
//! produced.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scheduler::{Millis, TimerHandle, TimerQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterTimings {
    pub type_ms: Millis,
    pub hold_ms: Millis,
    pub delete_ms: Millis,
    pub next_word_ms: Millis,
}

impl Default for TypewriterTimings {
    fn default() -> Self {
        Self {
            type_ms: 150,
            hold_ms: 1500,
            delete_ms: 75,
            next_word_ms: 500,
        }
    }
}

/// Shortest delay the driver will schedule. A zero delay would re-fire at the
/// same instant forever.
pub const MIN_DELAY_MS: Millis = 1;

impl TypewriterTimings {
    /// Raises every zero delay to [`MIN_DELAY_MS`].
    pub fn clamped(self) -> Self {
        Self {
            type_ms: self.type_ms.max(MIN_DELAY_MS),
            hold_ms: self.hold_ms.max(MIN_DELAY_MS),
            delete_ms: self.delete_ms.max(MIN_DELAY_MS),
            next_word_ms: self.next_word_ms.max(MIN_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypewriterState {
    pub title_index: usize,
    /// Counted in chars.
    pub typed_len: usize,
    pub deleting: bool,
    /// Delay before the next tick.
    pub speed_ms: Millis,
}

impl TypewriterState {
    pub fn initial(timings: &TypewriterTimings) -> Self {
        Self {
            title_index: 0,
            typed_len: 0,
            deleting: false,
            speed_ms: timings.type_ms,
        }
    }
}

fn title_len(titles: &[String], index: usize) -> usize {
    titles
        .get(index % titles.len().max(1))
        .map_or(0, |title| title.chars().count())
}

pub fn tick(
    state: &TypewriterState,
    titles: &[String],
    timings: &TypewriterTimings,
) -> TypewriterState {
    if titles.is_empty() {
        return *state;
    }
    let title_index = state.title_index % titles.len();
    let full = title_len(titles, title_index);
    let typed_len = state.typed_len.min(full);

    if !state.deleting {
        if typed_len == full {
            TypewriterState {
                title_index,
                typed_len: full,
                deleting: true,
                speed_ms: timings.hold_ms,
            }
        } else {
            TypewriterState {
                title_index,
                typed_len: typed_len + 1,
                deleting: false,
                speed_ms: timings.type_ms,
            }
        }
    } else if typed_len == 0 {
        TypewriterState {
            title_index: (title_index + 1) % titles.len(),
            typed_len: 0,
            deleting: false,
            speed_ms: timings.next_word_ms,
        }
    } else {
        TypewriterState {
            title_index,
            typed_len: typed_len - 1,
            deleting: true,
            speed_ms: timings.delete_ms,
        }
    }
}

pub struct Typewriter {
    titles: Vec<String>,
    timings: TypewriterTimings,
    state: TypewriterState,
    timers: TimerQueue<()>,
    slot: Option<TimerHandle>,
}

impl Typewriter {
    pub fn new(titles: Vec<String>, timings: TypewriterTimings) -> Self {
        let timings = timings.clamped();
        let state = TypewriterState::initial(&timings);
        Self {
            titles,
            timings,
            state,
            timers: TimerQueue::new(),
            slot: None,
        }
    }

    /// (Re)starts the loop from the first title with nothing typed.
    pub fn start(&mut self, now: Millis) {
        self.cancel_slot();
        self.timers.advance_to(now);
        self.state = TypewriterState::initial(&self.timings);
        if self.titles.is_empty() {
            return;
        }
        debug!(at = now, titles = self.titles.len(), "typewriter started");
        self.slot = Some(self.timers.after(self.state.speed_ms, ()));
    }

    pub fn stop(&mut self) {
        self.cancel_slot();
    }

    pub fn is_running(&self) -> bool {
        self.slot.is_some()
    }

    /// Runs every tick due up to `now`; returns how many fired.
    pub fn advance_to(&mut self, now: Millis) -> usize {
        let mut ticks = 0;
        while self.timers.pop_due(now).is_some() {
            self.state = tick(&self.state, &self.titles, &self.timings);
            self.slot = Some(self.timers.after(self.state.speed_ms, ()));
            ticks += 1;
        }
        self.timers.advance_to(now);
        ticks
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    pub fn state(&self) -> &TypewriterState {
        &self.state
    }

    pub fn current_title(&self) -> Option<&str> {
        if self.titles.is_empty() {
            return None;
        }
        self.titles
            .get(self.state.title_index % self.titles.len())
            .map(String::as_str)
    }

    pub fn text(&self) -> String {
        self.current_title()
            .map(|title| title.chars().take(self.state.typed_len).collect())
            .unwrap_or_default()
    }

    /// The caret pulses while typing and while holding a complete title;
    /// it stays solid while deleting and on an empty line.
    pub fn caret_blinking(&self) -> bool {
        let full = title_len(&self.titles, self.state.title_index);
        if self.state.deleting {
            self.state.typed_len == full
        } else {
            self.state.typed_len > 0
        }
    }

    fn cancel_slot(&mut self) {
        if let Some(handle) = self.slot.take() {
            self.timers.cancel(handle);
        }
    }
}

#[cfg(test)]
#[path = "tests/typewriter_tests.rs"]
mod tests;
