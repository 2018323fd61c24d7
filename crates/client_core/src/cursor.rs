//! Custom pointer indicator that follows the mouse and grows over
//! interactive elements.

use serde::Serialize;

pub const DEFAULT_INDICATOR_SIZE: f64 = 12.0;
const HOVER_SCALE: f64 = 2.5;

/// The element directly under the pointer, as seen through the DOM boundary.
pub trait PointerTarget {
    fn tag_name(&self) -> &str;
    /// Resolved `cursor` value from computed style.
    fn computed_cursor(&self) -> &str;
    fn parent(&self) -> Option<&dyn PointerTarget>;
}

fn is_link_or_button(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("a") || tag.eq_ignore_ascii_case("button")
}

pub fn is_interactive(target: &dyn PointerTarget) -> bool {
    if target.computed_cursor().eq_ignore_ascii_case("pointer") {
        return true;
    }
    let mut current = Some(target);
    while let Some(element) = current {
        if is_link_or_button(element.tag_name()) {
            return true;
        }
        current = element.parent();
    }
    false
}

/// Owned element chain, used by drivers that have no live DOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSnapshot {
    pub tag: String,
    pub cursor: String,
    pub parent: Option<Box<ElementSnapshot>>,
}

impl ElementSnapshot {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            cursor: "auto".into(),
            parent: None,
        }
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = cursor.into();
        self
    }

    pub fn inside(mut self, parent: ElementSnapshot) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }
}

impl PointerTarget for ElementSnapshot {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn computed_cursor(&self) -> &str {
        &self.cursor
    }

    fn parent(&self) -> Option<&dyn PointerTarget> {
        self.parent
            .as_deref()
            .map(|parent| parent as &dyn PointerTarget)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub hovering: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    Normal,
    Difference,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Indicator {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
    pub blend: BlendMode,
    pub fill: &'static str,
    pub opacity: f64,
}

#[derive(Debug, Clone)]
pub struct CursorFollower {
    pointer: PointerState,
    size: f64,
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self::new(DEFAULT_INDICATOR_SIZE)
    }
}

impl CursorFollower {
    pub fn new(size: f64) -> Self {
        Self {
            pointer: PointerState::default(),
            size,
        }
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64, target: &dyn PointerTarget) {
        self.pointer = PointerState {
            x,
            y,
            hovering: is_interactive(target),
        };
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn indicator(&self, visible: bool) -> Indicator {
        let half = self.size / 2.0;
        let hovering = self.pointer.hovering;
        Indicator {
            translate_x: self.pointer.x - half,
            translate_y: self.pointer.y - half,
            scale: if hovering { HOVER_SCALE } else { 1.0 },
            blend: if hovering {
                BlendMode::Difference
            } else {
                BlendMode::Normal
            },
            fill: if hovering { "#ffffff" } else { "#000000" },
            opacity: if visible { 1.0 } else { 0.0 },
        }
    }
}

#[cfg(test)]
#[path = "tests/cursor_tests.rs"]
mod tests;
