//! The whole page: wires the intro gate to the rest of the components and
//! produces a render model after every input.

use std::sync::Arc;

use serde::Serialize;
use shared::{
    content::Catalog,
    domain::{StepId, WorkItemId},
};
use text_generation::TextGenerator;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::{
    accordion::AccordionSet,
    assistant::{AssistantSession, IgnoreReason, RequestState, SendOutcome, SessionConfig},
    config::Settings,
    cursor::{CursorFollower, Indicator, PointerTarget},
    gallery::{ScrollLock, WorkGallery},
    intro::{IntroPhase, IntroSequencer},
    navigation::{self, NavItem, View},
    reveal::{Geometry, Glyph, ScrollReveal},
    scheduler::Millis,
    typewriter::Typewriter,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub greeting: Option<String>,
    pub overlay_present: bool,
    /// Overlay is sliding (or has slid) out of view.
    pub overlay_slid: bool,
    pub content_visible: bool,
    pub typed_title: String,
    pub caret_blinking: bool,
    pub heading: Vec<Glyph>,
    pub cursor: Indicator,
    pub open_steps: Vec<StepId>,
    pub selected_work: Option<String>,
    pub header_condensed: bool,
    pub view: View,
    pub transcript_len: usize,
    pub assistant: RequestState,
}

pub struct Page {
    catalog: Catalog,
    intro: IntroSequencer,
    typewriter: Typewriter,
    reveal: ScrollReveal,
    cursor: CursorFollower,
    steps: AccordionSet,
    gallery: WorkGallery,
    assistant: Arc<AssistantSession>,
    scroll_y: f64,
    view: View,
}

impl Page {
    pub fn new(settings: &Settings, catalog: Catalog, generator: Arc<dyn TextGenerator>) -> Self {
        let mut session = SessionConfig::for_profile(&catalog.profile);
        session.temperature = settings.assistant.temperature;
        session.max_output_tokens = settings.assistant.max_output_tokens;
        session.thinking_budget = settings.assistant.thinking_budget;

        Self {
            intro: IntroSequencer::new(settings.greetings.clone(), settings.intro),
            typewriter: Typewriter::new(settings.titles.clone(), settings.typewriter),
            reveal: ScrollReveal::new(settings.reveal_heading.clone()),
            cursor: CursorFollower::new(settings.cursor_size),
            steps: AccordionSet::new(),
            gallery: WorkGallery::new(),
            assistant: AssistantSession::new(generator, session),
            scroll_y: 0.0,
            view: View::default(),
            catalog,
        }
    }

    pub fn mount(&mut self, now: Millis) {
        info!(at = now, "page mounted");
        self.intro.mount(now);
        if self.intro.content_shown() {
            self.typewriter.start(now);
        }
    }

    /// Cancels every pending timer and releases the scroll lock. An
    /// assistant request already in flight is left to finish on its own.
    pub fn unmount(&mut self, lock: &mut dyn ScrollLock) {
        self.intro.unmount();
        self.typewriter.stop();
        self.gallery.unmount(lock);
        info!("page unmounted");
    }

    /// Runs every timer due up to `now`. The typewriter starts at the exact
    /// instant content is shown, even when that instant lies inside a large
    /// jump.
    pub fn advance_to(&mut self, now: Millis) {
        for change in self.intro.advance_to(now) {
            if change.phase == IntroPhase::ContentShown {
                self.typewriter.start(change.at);
            }
        }
        self.typewriter.advance_to(now);
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        match (self.intro.next_deadline(), self.typewriter.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn on_scroll(&mut self, scroll_y: f64, heading: Geometry) {
        self.scroll_y = scroll_y;
        self.reveal.on_scroll(heading);
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64, target: &dyn PointerTarget) {
        self.cursor.on_pointer_move(x, y, target);
    }

    /// Unknown step ids are ignored.
    pub fn toggle_step(&mut self, id: &StepId) -> bool {
        if self.catalog.step(id).is_none() {
            debug!(step = %id, "ignoring toggle for unknown step");
            return false;
        }
        self.steps.toggle(id)
    }

    pub fn open_work(&mut self, id: WorkItemId, lock: &mut dyn ScrollLock) {
        self.gallery.select(id, lock);
    }

    pub fn close_work(&mut self, lock: &mut dyn ScrollLock) {
        self.gallery.deselect(lock);
    }

    pub fn navigate(&mut self, item: &NavItem) -> View {
        self.view = navigation::target_view(item, self.view);
        self.view
    }

    pub fn ask(&self, prompt: &str) -> Result<JoinHandle<SendOutcome>, IgnoreReason> {
        self.assistant.submit(prompt)
    }

    pub fn assistant(&self) -> &Arc<AssistantSession> {
        &self.assistant
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn content_visible(&self) -> bool {
        self.intro.content_shown()
    }

    pub fn intro_phase(&self) -> IntroPhase {
        self.intro.phase()
    }

    pub fn frame(&self) -> Frame {
        let content_visible = self.intro.content_shown();
        Frame {
            greeting: self
                .intro
                .overlay_present()
                .then(|| self.intro.current_greeting().map(str::to_string))
                .flatten(),
            overlay_present: self.intro.overlay_present(),
            overlay_slid: self.intro.intro_finished(),
            content_visible,
            typed_title: self.typewriter.text(),
            caret_blinking: self.typewriter.caret_blinking(),
            heading: self.reveal.glyphs().collect(),
            cursor: self.cursor.indicator(content_visible),
            open_steps: self.steps.open_steps(),
            selected_work: self
                .gallery
                .selected_item(&self.catalog)
                .map(|item| item.title.clone()),
            header_condensed: navigation::header_condensed(self.scroll_y),
            view: self.view,
            transcript_len: self.assistant.transcript_len(),
            assistant: self.assistant.state(),
        }
    }
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
