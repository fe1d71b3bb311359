//! Expand/collapse state for the source excerpt list.
//!
//! Pure presentation state: one flag for the "Source Documents" section and
//! one per excerpt card. Several cards can be open at once.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Disclosure {
    section_open: bool,
    items: Vec<bool>,
}

impl Disclosure {
    /// Collapsed section over `count` cards, each card open.
    pub fn new(count: usize) -> Self {
        Self {
            section_open: false,
            items: vec![true; count],
        }
    }

    pub fn is_section_open(&self) -> bool {
        self.section_open
    }

    pub fn toggle_section(&mut self) {
        self.section_open = !self.section_open;
    }

    /// Whether card `index` is expanded. Out-of-range cards read as closed.
    pub fn is_item_open(&self, index: usize) -> bool {
        self.items.get(index).copied().unwrap_or(false)
    }

    pub fn toggle_item(&mut self, index: usize) {
        if let Some(open) = self.items.get_mut(index) {
            *open = !*open;
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
