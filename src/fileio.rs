use std::fs;
use std::path::Path;

use crate::error::{GridError, ImportError};
use crate::row::{new_row_id, Row};
use crate::schema::ColumnSet;

pub const CSV_MIME: &str = "text/csv";

/// An export ready to hand to a download or write to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime: &'static str,
    pub contents: String,
}

impl ExportFile {
    pub fn write_to(&self, path: &Path) -> Result<(), GridError> {
        fs::write(path, &self.contents)?;
        Ok(())
    }
}

/// `<title>.csv`, or `data.csv` for an untitled grid
pub fn export_file_name(title: Option<&str>) -> String {
    let stem = title.map(str::trim).filter(|t| !t.is_empty()).unwrap_or("data");
    format!("{}.csv", stem)
}

/// Serialize rows under a header of column labels.
/// Values are written in their plain stringified form.
pub fn export_csv(columns: &ColumnSet, rows: &[&Row]) -> Result<String, GridError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    csv_writer.write_record(columns.iter().map(|c| c.label.as_str()))?;

    for row in rows {
        csv_writer.write_record(columns.iter().map(|c| row.value(c).to_string()))?;
    }

    let bytes = csv_writer
        .into_inner()
        .map_err(|e| GridError::from(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Parse CSV text into new rows.
///
/// The header must name every column id (extra headers are ignored). Fields
/// are coerced per column; a short record leaves the remaining columns at
/// their default. Every row gets a fresh id.
pub fn import_csv(columns: &ColumnSet, text: &str) -> Result<Vec<Row>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::Fields)
        .from_reader(text.as_bytes());

    let records = csv_reader
        .records()
        .collect::<Result<Vec<csv::StringRecord>, csv::Error>>()?;

    let Some((header, data)) = records.split_first() else {
        return Err(ImportError::TooFewLines);
    };
    if data.is_empty() {
        return Err(ImportError::TooFewLines);
    }

    let mut positions = Vec::with_capacity(columns.len());
    let mut missing = Vec::new();
    for column in columns.iter() {
        match header.iter().position(|h| h == column.id) {
            Some(idx) => positions.push((column, idx)),
            None => missing.push(column.id.clone()),
        }
    }

    if !missing.is_empty() {
        return Err(ImportError::MissingColumns(missing));
    }

    let rows = data
        .iter()
        .map(|record| {
            let fields = positions
                .iter()
                .map(|(column, idx)| {
                    let value = record
                        .get(*idx)
                        .map(|raw| column.coerce(raw))
                        .unwrap_or_else(|| column.default_value());
                    (column.id.clone(), value)
                })
                .collect();
            Row {
                id: new_row_id(),
                fields,
            }
        })
        .collect();

    Ok(rows)
}

/// Read an uploaded file and parse it with [`import_csv`]
pub fn import_file(columns: &ColumnSet, path: &Path) -> Result<Vec<Row>, ImportError> {
    let text = fs::read_to_string(path)?;
    import_csv(columns, &text)
}
