//! Scroll-driven per-character reveal of a section heading.
//!
//! Everything is derived from live geometry on each scroll event; nothing
//! about the layout is cached between events.

use serde::Serialize;

/// Fraction of the viewport height where revealing starts.
pub const START_TRIGGER: f64 = 0.95;
/// Fraction of the viewport height where the heading is fully revealed.
pub const END_TRIGGER: f64 = 0.60;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Top edge of the reference heading relative to the viewport.
    pub top: f64,
    pub viewport_height: f64,
}

pub fn progress(geometry: Geometry) -> f64 {
    let Geometry {
        top,
        viewport_height,
    } = geometry;
    if !top.is_finite() || !viewport_height.is_finite() || viewport_height <= 0.0 {
        return 0.0;
    }
    let start = viewport_height * START_TRIGGER;
    let end = viewport_height * END_TRIGGER;
    ((start - top) / (start - end)).clamp(0.0, 1.0)
}

/// The `+ 1` lets the last character reach full opacity before the far edge
/// of the band; the result is capped so it never exceeds `text_len`.
pub fn reveal_count_for_progress(progress: f64, text_len: usize) -> usize {
    let progress = if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let count = (progress * (text_len as f64 + 1.0)).floor() as usize;
    count.min(text_len)
}

pub fn reveal_count(geometry: Geometry, text_len: usize) -> usize {
    reveal_count_for_progress(progress(geometry), text_len)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Glyph {
    pub ch: char,
    pub revealed: bool,
}

#[derive(Debug, Clone)]
pub struct ScrollReveal {
    text: String,
    len: usize,
    count: usize,
}

impl ScrollReveal {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self { text, len, count: 0 }
    }

    pub fn on_scroll(&mut self, geometry: Geometry) -> usize {
        self.count = reveal_count(geometry, self.len);
        self.count
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.count == self.len
    }

    pub fn glyphs(&self) -> impl Iterator<Item = Glyph> + '_ {
        self.text.chars().enumerate().map(|(index, ch)| Glyph {
            ch,
            revealed: index < self.count,
        })
    }
}

#[cfg(test)]
#[path = "tests/reveal_tests.rs"]
mod tests;
