use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::grid::Grid;
use crate::schema::{Column, ColumnSet};

pub const DEFAULT_MIN_ROWS: usize = 200;

/// Row count at which filtering and sorting switch to rayon
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Visible rows are padded with placeholders up to this count
    pub min_rows: usize,
    pub parallel_threshold: usize,
    /// Cap for auto-sized columns in text rendering
    pub max_col_width: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_rows: DEFAULT_MIN_ROWS,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            max_col_width: 30,
        }
    }
}

/// A grid definition read from TOML:
///
/// ```toml
/// title = "Billing"
///
/// [grid]
/// min_rows = 50
///
/// [[columns]]
/// id = "charge"
/// label = "Charge"
/// kind = "currency"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridSpec {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub grid: GridConfig,
    pub columns: Vec<Column>,
}

impl GridSpec {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn into_grid(self) -> Result<Grid, ConfigError> {
        let columns = ColumnSet::new(self.columns)?;
        let mut grid = Grid::new(columns, self.grid);
        if let Some(title) = self.title {
            grid = grid.with_title(&title);
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SPEC: &str = r##"
title = "Timecards"

[grid]
min_rows = 25

[[columns]]
id = "worked_on"
label = "Date"
kind = "date_mm_dd"

[[columns]]
id = "hours"
label = "Hours"
kind = "number"
width = 6

[[columns]]
id = "status"
label = "Status"
kind = "select"
editable = false
options = [
    { value = "Approved", color = "#2e7d32" },
    { value = "Pending" },
]
"##;

    #[test]
    fn test_parse_spec() {
        let spec = GridSpec::parse(SPEC).unwrap();
        assert_eq!(spec.title.as_deref(), Some("Timecards"));
        assert_eq!(spec.grid.min_rows, 25);
        assert_eq!(spec.grid.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
        assert_eq!(spec.columns.len(), 3);
        assert_eq!(spec.columns[0].kind, ColumnKind::DateMmDd);
        assert_eq!(spec.columns[1].width, Some(6));
        assert!(spec.columns[1].editable);
        assert!(!spec.columns[2].editable);
        assert_eq!(spec.columns[2].options[1].color, None);
    }

    #[test]
    fn test_missing_grid_table_uses_defaults() {
        let spec = GridSpec::parse("[[columns]]\nid = \"a\"\nlabel = \"A\"\n").unwrap();
        assert_eq!(spec.grid, GridConfig::default());
        assert_eq!(spec.columns[0].kind, ColumnKind::Text);
    }

    #[test]
    fn test_from_file_builds_grid() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        write!(file, "{}", SPEC).unwrap();

        let grid = GridSpec::from_file(file.path()).unwrap().into_grid().unwrap();
        assert_eq!(grid.title(), Some("Timecards"));
        assert_eq!(grid.config().min_rows, 25);
        assert_eq!(grid.columns().len(), 3);
    }

    #[test]
    fn test_duplicate_columns_fail_to_build() {
        let spec = GridSpec::parse(
            "[[columns]]\nid = \"a\"\nlabel = \"A\"\n[[columns]]\nid = \"a\"\nlabel = \"B\"\n",
        )
        .unwrap();
        assert!(matches!(spec.into_grid(), Err(ConfigError::Schema(_))));
    }

    #[test]
    fn test_unknown_kind_is_a_parse_error() {
        let err = GridSpec::parse("[[columns]]\nid = \"a\"\nlabel = \"A\"\nkind = \"blob\"\n");
        assert!(matches!(err, Err(ConfigError::Parse { .. })));
    }
}
