//! Intro overlay: cycles the greeting list, then slides the overlay away,
//! reveals the page and finally detaches the overlay.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scheduler::{Fired, Millis, TimerHandle, TimerQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntroPhase {
    Greeting,
    Finishing,
    ContentShown,
    OverlayRemoved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroTimings {
    pub step_ms: Millis,
    pub finish_delay_ms: Millis,
    /// Measured from the finishing instant.
    pub content_delay_ms: Millis,
    /// Measured from the finishing instant, not from content reveal.
    pub overlay_delay_ms: Millis,
}

impl Default for IntroTimings {
    fn default() -> Self {
        Self {
            step_ms: 200,
            finish_delay_ms: 800,
            content_delay_ms: 150,
            overlay_delay_ms: 1200,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntroEvent {
    Advance,
    Finish,
    ShowContent,
    RemoveOverlay,
}

/// A phase the sequencer entered and the instant it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub at: Millis,
    pub phase: IntroPhase,
}

pub struct IntroSequencer {
    greetings: Vec<String>,
    timings: IntroTimings,
    index: usize,
    phase: IntroPhase,
    finished: bool,
    content_shown: bool,
    overlay_removed: bool,
    timers: TimerQueue<IntroEvent>,
    step_timer: Option<TimerHandle>,
}

impl IntroSequencer {
    pub fn new(greetings: Vec<String>, timings: IntroTimings) -> Self {
        Self {
            greetings,
            timings,
            index: 0,
            phase: IntroPhase::Greeting,
            finished: false,
            content_shown: false,
            overlay_removed: false,
            timers: TimerQueue::new(),
            step_timer: None,
        }
    }

    /// Arms whatever transitions are still outstanding. A remount after the
    /// finishing instant re-arms the reveals that have not fired yet, measured
    /// from `now`.
    pub fn mount(&mut self, now: Millis) {
        self.timers.clear();
        self.step_timer = None;
        self.timers.advance_to(now);
        if !self.finished {
            self.schedule_step();
            return;
        }
        if !self.content_shown {
            self.timers
                .after(self.timings.content_delay_ms, IntroEvent::ShowContent);
        }
        if !self.overlay_removed {
            self.timers
                .after(self.timings.overlay_delay_ms, IntroEvent::RemoveOverlay);
        }
    }

    /// Cancels every pending transition. Already-entered phases stay put.
    pub fn unmount(&mut self) {
        self.timers.clear();
        self.step_timer = None;
    }

    pub fn advance_to(&mut self, now: Millis) -> Vec<PhaseChange> {
        let mut changes = Vec::new();
        while let Some(Fired { at, event }) = self.timers.pop_due(now) {
            self.handle(at, event, &mut changes);
        }
        self.timers.advance_to(now);
        changes
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_greeting(&self) -> Option<&str> {
        self.greetings.get(self.index).map(String::as_str)
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    /// True from the moment the overlay starts sliding out.
    pub fn intro_finished(&self) -> bool {
        self.finished
    }

    pub fn content_shown(&self) -> bool {
        self.content_shown
    }

    pub fn overlay_present(&self) -> bool {
        !self.overlay_removed
    }

    fn schedule_step(&mut self) {
        if let Some(handle) = self.step_timer.take() {
            self.timers.cancel(handle);
        }
        let handle = if self.index + 1 < self.greetings.len() {
            self.timers.after(self.timings.step_ms, IntroEvent::Advance)
        } else {
            self.timers
                .after(self.timings.finish_delay_ms, IntroEvent::Finish)
        };
        self.step_timer = Some(handle);
    }

    fn handle(&mut self, at: Millis, event: IntroEvent, changes: &mut Vec<PhaseChange>) {
        match event {
            IntroEvent::Advance => {
                self.step_timer = None;
                if self.finished || self.index + 1 >= self.greetings.len() {
                    return;
                }
                self.index += 1;
                debug!(at, index = self.index, "intro greeting advanced");
                self.schedule_step();
            }
            IntroEvent::Finish => {
                self.step_timer = None;
                if self.finished {
                    return;
                }
                self.finished = true;
                self.enter(at, IntroPhase::Finishing, changes);
                // Both reveals hang off the finishing instant.
                self.timers
                    .after(self.timings.content_delay_ms, IntroEvent::ShowContent);
                self.timers
                    .after(self.timings.overlay_delay_ms, IntroEvent::RemoveOverlay);
            }
            IntroEvent::ShowContent => self.show_content(at, changes),
            IntroEvent::RemoveOverlay => {
                if self.overlay_removed {
                    return;
                }
                self.show_content(at, changes);
                self.overlay_removed = true;
                self.enter(at, IntroPhase::OverlayRemoved, changes);
            }
        }
    }

    fn show_content(&mut self, at: Millis, changes: &mut Vec<PhaseChange>) {
        if self.content_shown {
            return;
        }
        self.content_shown = true;
        self.enter(at, IntroPhase::ContentShown, changes);
    }

    fn enter(&mut self, at: Millis, phase: IntroPhase, changes: &mut Vec<PhaseChange>) {
        debug!(at, ?phase, "intro phase entered");
        self.phase = self.phase.max(phase);
        changes.push(PhaseChange { at, phase });
    }
}

#[cfg(test)]
#[path = "tests/intro_tests.rs"]
mod tests;
