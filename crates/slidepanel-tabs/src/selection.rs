//! Selection Coordinator
//!
//! Tracks which tab is selected. At most one tab is selected at a time, and
//! selecting never opens or closes the panel by itself.

#[derive(Debug, Clone, Default)]
pub struct SelectionCoordinator {
    len: usize,
    selected: Option<usize>,
}

impl SelectionCoordinator {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            selected: None,
        }
    }

    /// Select the tab at `index`.
    ///
    /// The previous selection is always cleared. An index past the end leaves
    /// nothing selected and returns `None`.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        self.selected = (index < self.len).then_some(index);

        match self.selected {
            Some(index) => tracing::debug!(index, "Tab selected"),
            None => tracing::debug!(index, tabs = self.len, "Selection out of range"),
        }

        self.selected
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
