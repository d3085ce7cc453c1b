use std::collections::HashMap;

use rayon::prelude::*;
use tracing::debug;

use crate::row::Row;
use crate::schema::{Column, ColumnSet};

/// Sorting direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

/// Search, per-column filters and sort. Lives as long as the grid view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    search: String,
    filters: HashMap<String, String>,
    sort: Option<SortState>,
}

/// Lowercased terms, computed once per pass over the rows
struct Matcher<'a> {
    search: Option<String>,
    filters: Vec<(&'a str, String)>,
}

impl<'a> Matcher<'a> {
    fn matches(&self, row: &Row, columns: &ColumnSet) -> bool {
        let cell = |column: &Column| row.value(column).to_string().to_lowercase();

        if let Some(term) = &self.search {
            if !columns.iter().any(|c| cell(c).contains(term.as_str())) {
                return false;
            }
        }

        self.filters.iter().all(|(col, term)| {
            columns
                .get(col)
                .map_or(false, |c| cell(c).contains(term.as_str()))
        })
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
    }

    pub fn filter(&self, column: &str) -> &str {
        self.filters.get(column).map(String::as_str).unwrap_or("")
    }

    /// Set a column filter; empty text removes it
    pub fn set_filter(&mut self, column: &str, text: &str) {
        if text.is_empty() {
            self.filters.remove(column);
        } else {
            self.filters.insert(column.to_string(), text.to_string());
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.search.clear();
    }

    pub fn is_filtered(&self) -> bool {
        !self.search.is_empty() || !self.filters.is_empty()
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Same column flips the direction, a new column starts ascending
    pub fn toggle_sort(&mut self, column: &str) -> SortDirection {
        let direction = match &self.sort {
            Some(state) if state.column == column => state.direction.toggled(),
            _ => SortDirection::Ascending,
        };
        self.sort = Some(SortState {
            column: column.to_string(),
            direction,
        });
        direction
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    fn matcher(&self) -> Matcher<'_> {
        let search = if self.search.is_empty() {
            None
        } else {
            Some(self.search.to_lowercase())
        };
        let filters = self
            .filters
            .iter()
            .map(|(col, term)| (col.as_str(), term.to_lowercase()))
            .collect();
        Matcher { search, filters }
    }

    /// Does a single row pass the search and every column filter
    pub fn matches(&self, row: &Row, columns: &ColumnSet) -> bool {
        self.matcher().matches(row, columns)
    }

    /// Filter then sort real rows.
    /// Uses parallel processing for large row sets
    pub fn apply<'a>(&self, rows: &'a [Row], columns: &ColumnSet, parallel_threshold: usize) -> Vec<&'a Row> {
        let use_parallel = rows.len() >= parallel_threshold;

        let mut visible: Vec<&'a Row> = if self.is_filtered() {
            let matcher = self.matcher();
            if use_parallel {
                rows.par_iter().filter(|row| matcher.matches(row, columns)).collect()
            } else {
                rows.iter().filter(|row| matcher.matches(row, columns)).collect()
            }
        } else {
            rows.iter().collect()
        };

        if let Some(state) = &self.sort {
            let Some(column) = columns.get(&state.column) else {
                return visible;
            };

            let cmp_fn = |a: &&Row, b: &&Row| {
                let base = a.value(column).compare(&b.value(column));
                match state.direction {
                    SortDirection::Ascending => base,
                    SortDirection::Descending => base.reverse(),
                }
            };

            if use_parallel {
                visible.par_sort_by(cmp_fn);
            } else {
                visible.sort_by(cmp_fn);
            }
        }

        debug!(
            total = rows.len(),
            visible = visible.len(),
            sorted = self.sort.is_some(),
            "applied view"
        );
        visible
    }
}
