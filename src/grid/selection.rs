use std::collections::BTreeSet;

use crate::row::{Row, RowKey};

/// Ids of selected real rows. Placeholders can never be selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one row; returns whether it is now selected
    pub fn toggle(&mut self, key: &RowKey) -> bool {
        match key {
            RowKey::Placeholder(_) => false,
            RowKey::Real(id) => {
                if self.ids.remove(id) {
                    false
                } else {
                    self.ids.insert(id.clone());
                    true
                }
            }
        }
    }

    /// Clear when every visible row is already selected, otherwise select them all
    pub fn toggle_all(&mut self, visible: &[&Row]) {
        let all_selected = !visible.is_empty() && visible.iter().all(|r| self.ids.contains(&r.id));
        if all_selected {
            self.ids.clear();
        } else {
            self.ids = visible.iter().map(|r| r.id.clone()).collect();
        }
    }

    pub fn is_selected(&self, key: &RowKey) -> bool {
        match key {
            RowKey::Real(id) => self.ids.contains(id),
            RowKey::Placeholder(_) => false,
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub(crate) fn take(&mut self) -> BTreeSet<String> {
        std::mem::take(&mut self.ids)
    }
}
