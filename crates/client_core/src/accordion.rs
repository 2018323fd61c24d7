use std::collections::HashSet;

use shared::domain::StepId;

/// Open/closed state of the service step panels. Any number may be open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccordionSet {
    open: HashSet<StepId>,
}

impl AccordionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the panel is open afterwards.
    pub fn toggle(&mut self, id: &StepId) -> bool {
        if self.open.remove(id) {
            false
        } else {
            self.open.insert(id.clone());
            true
        }
    }

    pub fn is_open(&self, id: &StepId) -> bool {
        self.open.contains(id)
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Sorted for stable rendering.
    pub fn open_steps(&self) -> Vec<StepId> {
        let mut steps: Vec<_> = self.open.iter().cloned().collect();
        steps.sort();
        steps
    }
}

#[cfg(test)]
#[path = "tests/accordion_tests.rs"]
mod tests;
