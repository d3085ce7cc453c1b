use crate::row::Row;
use crate::value::Value;

/// Where the grid reads rows from and sends every mutation.
///
/// The grid never owns rows. Whoever implements this (usually a domain
/// adapter) decides what a mutation means for storage.
pub trait GridData {
    fn rows(&self) -> &[Row];

    /// Replace the whole row set
    fn replace_rows(&mut self, rows: Vec<Row>);

    /// Append one row. Returns the row back when single-row adds are not
    /// supported, in which case the grid falls back to `replace_rows`.
    fn add_row(&mut self, row: Row) -> Result<(), Row> {
        Err(row)
    }

    fn delete_row(&mut self, id: &str);

    /// Change a single field of an existing row
    fn update_row(&mut self, id: &str, column: &str, value: Value);
}

/// Plain in-memory rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VecData {
    pub rows: Vec<Row>,
}

impl VecData {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

impl GridData for VecData {
    fn rows(&self) -> &[Row] {
        &self.rows
    }

    fn replace_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }

    fn add_row(&mut self, row: Row) -> Result<(), Row> {
        self.rows.push(row);
        Ok(())
    }

    fn delete_row(&mut self, id: &str) {
        self.rows.retain(|r| r.id != id);
    }

    fn update_row(&mut self, id: &str, column: &str, value: Value) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.id == id) {
            row.set(column, value);
        }
    }
}
