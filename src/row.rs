use std::collections::HashMap;

use crate::schema::{Column, ColumnSet};
use crate::value::Value;

/// A real data row: an id plus typed values keyed by column id
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: String,
    pub fields: HashMap<String, Value>,
}

impl Row {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            fields: HashMap::new(),
        }
    }

    /// A row with a fresh id and every column at its default
    pub fn blank(columns: &ColumnSet) -> Self {
        let fields = columns
            .iter()
            .map(|c| (c.id.clone(), c.default_value()))
            .collect();
        Self {
            id: new_row_id(),
            fields,
        }
    }

    pub fn with(mut self, column: &str, value: Value) -> Self {
        self.fields.insert(column.to_string(), value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    pub fn set(&mut self, column: &str, value: Value) {
        self.fields.insert(column.to_string(), value);
    }

    /// Cell value, falling back to the column default for missing fields
    pub fn value(&self, column: &Column) -> Value {
        self.get(&column.id)
            .cloned()
            .unwrap_or_else(|| column.default_value())
    }

    /// Stringified stored field; missing fields read as empty.
    /// Views should go through [`Row::value`] so missing fields show the column default.
    pub fn text(&self, column: &str) -> String {
        self.get(column).map(|v| v.to_string()).unwrap_or_default()
    }
}

/// Identity of a row shown in the grid
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowKey {
    Real(String),
    /// Padding row, indexed from the first placeholder
    Placeholder(usize),
}

impl RowKey {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, RowKey::Placeholder(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayRow<'a> {
    Real(&'a Row),
    Placeholder(usize),
}

impl<'a> DisplayRow<'a> {
    pub fn key(&self) -> RowKey {
        match self {
            DisplayRow::Real(row) => RowKey::Real(row.id.clone()),
            DisplayRow::Placeholder(idx) => RowKey::Placeholder(*idx),
        }
    }

    pub fn value(&self, column: &Column) -> Value {
        match self {
            DisplayRow::Real(row) => row.value(column),
            DisplayRow::Placeholder(_) => column.default_value(),
        }
    }

    pub fn as_real(&self) -> Option<&'a Row> {
        match self {
            DisplayRow::Real(row) => Some(row),
            DisplayRow::Placeholder(_) => None,
        }
    }
}

/// Fresh id for rows created inside the grid
pub fn new_row_id() -> String {
    format!("row-{:016x}", rand::random::<u64>())
}
