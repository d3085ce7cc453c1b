use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::date::{format_mm_dd, format_mm_dd_yy, format_month};
use crate::error::SchemaError;
use crate::value::{format_currency, parse_numeric, split_choices, DateCell, Value};

/// How a date column is shown in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    MmDdYy,
    MmDd,
    Month,
}

impl DateFormat {
    pub fn format(&self, raw: &str) -> String {
        match self {
            DateFormat::MmDdYy => format_mm_dd_yy(raw),
            DateFormat::MmDd => format_mm_dd(raw),
            DateFormat::Month => format_month(raw),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    #[default]
    Text,
    Number,
    Currency,
    DateMmDdYy,
    DateMmDd,
    DateMonth,
    Select,
    MultiSelect,
}

impl ColumnKind {
    pub fn date_format(&self) -> Option<DateFormat> {
        match self {
            ColumnKind::DateMmDdYy => Some(DateFormat::MmDdYy),
            ColumnKind::DateMmDd => Some(DateFormat::MmDd),
            ColumnKind::DateMonth => Some(DateFormat::Month),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Number | ColumnKind::Currency)
    }
}

/// One entry of a select column, with the color its badge is drawn in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOption {
    pub value: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl ColumnOption {
    pub fn new(value: &str, color: &str) -> Self {
        Self {
            value: value.to_string(),
            color: Some(color.to_string()),
        }
    }
}

fn default_editable() -> bool {
    true
}

/// Column descriptor. `id` is both the row field key and the sort/filter key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub kind: ColumnKind,
    /// Fixed display width in characters
    #[serde(default)]
    pub width: Option<usize>,
    #[serde(default)]
    pub options: Vec<ColumnOption>,
    #[serde(default = "default_editable")]
    pub editable: bool,
    #[serde(default)]
    pub required: bool,
}

impl Column {
    pub fn new(id: &str, label: &str, kind: ColumnKind) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            width: None,
            options: Vec::new(),
            editable: true,
            required: false,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_options(mut self, options: Vec<ColumnOption>) -> Self {
        self.options = options;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value of an untouched cell: zero for amounts, empty for the rest
    pub fn default_value(&self) -> Value {
        match self.kind {
            ColumnKind::Number => Value::Number(0.0),
            ColumnKind::Currency => Value::Currency(0.0),
            ColumnKind::DateMmDdYy | ColumnKind::DateMmDd | ColumnKind::DateMonth => {
                Value::Date(DateCell::Unparsed(String::new()))
            }
            ColumnKind::Select => Value::Choice(String::new()),
            ColumnKind::MultiSelect => Value::MultiChoice(Default::default()),
            ColumnKind::Text => Value::Text(String::new()),
        }
    }

    /// Turn raw text (an edit buffer or an imported field) into this column's value type.
    /// Never fails: bad amounts become 0 and bad dates are kept as typed.
    pub fn coerce(&self, raw: &str) -> Value {
        match self.kind {
            ColumnKind::Number => Value::Number(parse_numeric(raw).unwrap_or(0.0)),
            ColumnKind::Currency => Value::Currency(parse_numeric(raw).unwrap_or(0.0)),
            ColumnKind::DateMmDdYy | ColumnKind::DateMmDd | ColumnKind::DateMonth => {
                Value::Date(DateCell::from_input(raw))
            }
            ColumnKind::Select => Value::Choice(raw.to_string()),
            ColumnKind::MultiSelect => Value::MultiChoice(split_choices(raw)),
            ColumnKind::Text => Value::Text(raw.to_string()),
        }
    }

    /// Text shown in a cell
    pub fn display(&self, value: &Value) -> String {
        match (self.kind.date_format(), value) {
            (Some(format), Value::Date(DateCell::Parsed(_))) => format.format(&value.to_string()),
            (_, Value::Currency(n)) => format_currency(*n),
            _ => value.to_string(),
        }
    }

    pub fn option_color(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|opt| opt.value == value)
            .and_then(|opt| opt.color.as_deref())
    }
}

/// Ordered columns with unique ids
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSet {
    columns: Vec<Column>,
}

impl ColumnSet {
    pub fn new(columns: Vec<Column>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if column.id.trim().is_empty() {
                return Err(SchemaError::EmptyId(column.label.clone()));
            }
            if !seen.insert(column.id.as_str()) {
                return Err(SchemaError::DuplicateColumn(column.id.clone()));
            }
        }
        Ok(Self { columns })
    }

    pub fn get(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = ColumnSet::new(vec![
            Column::new("charge", "Charge", ColumnKind::Currency),
            Column::new("charge", "Charge again", ColumnKind::Number),
        ]);
        assert_eq!(result, Err(SchemaError::DuplicateColumn("charge".to_string())));
    }

    #[test]
    fn test_empty_id_rejected() {
        let result = ColumnSet::new(vec![Column::new(" ", "Blank", ColumnKind::Text)]);
        assert_eq!(result, Err(SchemaError::EmptyId("Blank".to_string())));
    }

    #[test]
    fn test_defaults_per_kind() {
        assert_eq!(Column::new("u", "U", ColumnKind::Number).default_value(), Value::Number(0.0));
        assert_eq!(Column::new("c", "C", ColumnKind::Currency).default_value().to_string(), "0");
        assert_eq!(Column::new("d", "D", ColumnKind::DateMmDd).default_value().to_string(), "");
        assert_eq!(Column::new("t", "T", ColumnKind::Text).default_value().to_string(), "");
    }

    #[test]
    fn test_coerce_numbers_default_to_zero() {
        let units = Column::new("units", "Units", ColumnKind::Number);
        assert_eq!(units.coerce("3"), Value::Number(3.0));
        assert_eq!(units.coerce("three"), Value::Number(0.0));

        let charge = Column::new("charge", "Charge", ColumnKind::Currency);
        assert_eq!(charge.coerce("$1,200.50"), Value::Currency(1200.5));
    }

    #[test]
    fn test_coerce_dates_and_choices() {
        let dos = Column::new("dos", "DOS", ColumnKind::DateMmDdYy);
        assert_eq!(dos.coerce("03-15-25").to_string(), "2025-03-15");
        assert_eq!(dos.coerce("whenever").to_string(), "whenever");

        let mods = Column::new("mods", "Modifiers", ColumnKind::MultiSelect);
        assert_eq!(mods.coerce("59, 25").to_string(), "25,59");

        let status = Column::new("status", "Status", ColumnKind::Select);
        assert_eq!(status.coerce("Paid"), Value::Choice("Paid".to_string()));
    }

    #[test]
    fn test_display_formats() {
        let dos = Column::new("dos", "DOS", ColumnKind::DateMmDdYy);
        assert_eq!(dos.display(&dos.coerce("2025-03-15")), "03-15-25");

        let month = Column::new("m", "Month", ColumnKind::DateMonth);
        assert_eq!(month.display(&month.coerce("2025-11-02")), "Nov");

        let charge = Column::new("charge", "Charge", ColumnKind::Currency);
        assert_eq!(charge.display(&Value::Currency(1500.0)), "$1,500.00");
    }

    #[test]
    fn test_option_color() {
        let status = Column::new("status", "Status", ColumnKind::Select)
            .with_options(vec![ColumnOption::new("Paid", "#2e7d32")]);
        assert_eq!(status.option_color("Paid"), Some("#2e7d32"));
        assert_eq!(status.option_color("Denied"), None);
    }
}
