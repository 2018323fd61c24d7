//! Work gallery with a detail modal. While the modal is open the page must
//! not scroll; the previous overflow value is restored verbatim on close.

use shared::{
    content::{Catalog, WorkItem},
    domain::WorkItemId,
};
use tracing::debug;

pub const LOCKED_OVERFLOW: &str = "hidden";

/// The page-wide `overflow` setting. Only the gallery writes to it.
pub trait ScrollLock {
    fn overflow(&self) -> String;
    fn set_overflow(&mut self, value: &str);
}

/// In-memory body style for drivers without a real document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyStyle {
    pub overflow: String,
}

impl BodyStyle {
    pub fn with_overflow(value: impl Into<String>) -> Self {
        Self {
            overflow: value.into(),
        }
    }
}

impl ScrollLock for BodyStyle {
    fn overflow(&self) -> String {
        self.overflow.clone()
    }

    fn set_overflow(&mut self, value: &str) {
        self.overflow = value.to_string();
    }
}

#[derive(Debug, Default)]
pub struct WorkGallery {
    selected: Option<WorkItemId>,
    saved_overflow: Option<String>,
}

impl WorkGallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, id: WorkItemId, lock: &mut dyn ScrollLock) {
        if self.saved_overflow.is_none() {
            self.saved_overflow = Some(lock.overflow());
            lock.set_overflow(LOCKED_OVERFLOW);
        }
        debug!(work_item = %id, "work item selected");
        self.selected = Some(id);
    }

    pub fn deselect(&mut self, lock: &mut dyn ScrollLock) {
        self.selected = None;
        if let Some(previous) = self.saved_overflow.take() {
            lock.set_overflow(&previous);
        }
    }

    pub fn unmount(&mut self, lock: &mut dyn ScrollLock) {
        self.deselect(lock);
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected_id(&self) -> Option<&WorkItemId> {
        self.selected.as_ref()
    }

    /// `None` when nothing is selected or the id no longer exists in the
    /// catalog; the modal then renders nothing.
    pub fn selected_item<'c>(&self, catalog: &'c Catalog) -> Option<&'c WorkItem> {
        let id = self.selected.as_ref()?;
        let item = catalog.work_item(id);
        if item.is_none() {
            debug!(work_item = %id, "selected work item not in catalog");
        }
        item
    }
}

#[cfg(test)]
#[path = "tests/gallery_tests.rs"]
mod tests;
