use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::GridConfig;
use crate::error::{GridError, ImportError};
use crate::fileio::{self, ExportFile, CSV_MIME};
use crate::row::{DisplayRow, Row, RowKey};
use crate::schema::ColumnSet;

use super::data::GridData;
use super::edit::EditBuffer;
use super::selection::Selection;
use super::view::{SortDirection, ViewState};

/// What a committed edit turned into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// A placeholder edit created this new row
    Added { id: String },
    Updated { id: String, column: String },
}

/// Spreadsheet-style grid state over rows owned by someone else.
///
/// Holds the column schema and everything ephemeral about the view: search,
/// filters, sort, selection and the single in-flight edit. Rows are read from
/// (and mutations sent to) a [`GridData`] on each call.
#[derive(Debug, Clone)]
pub struct Grid {
    columns: ColumnSet,
    config: GridConfig,
    title: Option<String>,
    view: ViewState,
    selection: Selection,
    edit: Option<EditBuffer>,
}

impl Grid {
    pub fn new(columns: ColumnSet, config: GridConfig) -> Self {
        Self {
            columns,
            config,
            title: None,
            view: ViewState::new(),
            selection: Selection::new(),
            edit: None,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    // === View ===

    pub fn set_search(&mut self, search: &str) {
        debug!(search, "search changed");
        self.view.set_search(search);
    }

    pub fn set_filter(&mut self, column: &str, text: &str) -> Result<(), GridError> {
        if self.columns.get(column).is_none() {
            return Err(GridError::UnknownColumn(column.to_string()));
        }
        debug!(column, text, "filter changed");
        self.view.set_filter(column, text);
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.view.clear_filters();
    }

    pub fn toggle_sort(&mut self, column: &str) -> Result<SortDirection, GridError> {
        if self.columns.get(column).is_none() {
            return Err(GridError::UnknownColumn(column.to_string()));
        }
        let direction = self.view.toggle_sort(column);
        debug!(column, ?direction, "sort changed");
        Ok(direction)
    }

    pub fn clear_sort(&mut self) {
        self.view.clear_sort();
    }

    /// Real rows that pass the current filters, in sort order
    pub fn visible_rows<'a>(&self, rows: &'a [Row]) -> Vec<&'a Row> {
        self.view.apply(rows, &self.columns, self.config.parallel_threshold)
    }

    /// Number of padding rows needed to show `real_count` rows
    pub fn placeholder_count(&self, real_count: usize) -> usize {
        self.config.min_rows.saturating_sub(real_count)
    }

    /// Visible real rows followed by enough placeholders to reach `min_rows`
    pub fn display_rows<'a>(&self, rows: &'a [Row]) -> Vec<DisplayRow<'a>> {
        let visible = self.visible_rows(rows);
        let padding = self.placeholder_count(visible.len());

        let mut display: Vec<DisplayRow<'a>> = Vec::with_capacity(visible.len() + padding);
        display.extend(visible.into_iter().map(DisplayRow::Real));
        display.extend((0..padding).map(DisplayRow::Placeholder));
        display
    }

    // === Editing ===

    /// Start editing one cell, replacing any edit already in progress
    pub fn begin_edit(&mut self, rows: &[Row], key: RowKey, column: &str) -> Result<(), GridError> {
        let col = self
            .columns
            .get(column)
            .ok_or_else(|| GridError::UnknownColumn(column.to_string()))?;

        if !col.editable {
            return Err(GridError::ReadOnlyColumn(column.to_string()));
        }

        let initial = match &key {
            RowKey::Real(id) => rows
                .iter()
                .find(|r| &r.id == id)
                .map(|r| r.value(col).to_string())
                .ok_or_else(|| GridError::UnknownRow(id.clone()))?,
            RowKey::Placeholder(_) => col.default_value().to_string(),
        };

        self.edit = Some(EditBuffer::new(key, column, initial));
        Ok(())
    }

    pub fn edit_buffer(&self) -> Option<&EditBuffer> {
        self.edit.as_ref()
    }

    pub fn edit_buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        self.edit.as_mut()
    }

    pub fn is_editing(&self, key: &RowKey, column: &str) -> bool {
        self.edit.as_ref().is_some_and(|e| e.is_for(key, column))
    }

    pub fn set_edit_text(&mut self, text: &str) {
        if let Some(edit) = self.edit.as_mut() {
            edit.set_text(text);
        }
    }

    pub fn toggle_edit_choice(&mut self, choice: &str) {
        if let Some(edit) = self.edit.as_mut() {
            edit.toggle_choice(choice);
        }
    }

    /// Drop the edit without touching any row
    pub fn cancel_edit(&mut self) -> Option<EditBuffer> {
        self.edit.take()
    }

    /// Coerce the buffer and send it on.
    ///
    /// A real row gets a single-field update. A placeholder becomes a new
    /// real row with every other field at its default; it is added with
    /// `add_row`, or appended through `replace_rows` when adds aren't supported.
    pub fn commit_edit(&mut self, data: &mut dyn GridData) -> Option<EditOutcome> {
        let edit = self.edit.take()?;
        let column = self.columns.get(&edit.column)?;
        let value = column.coerce(&edit.text);

        match edit.row {
            RowKey::Real(id) => {
                data.update_row(&id, &column.id, value);
                Some(EditOutcome::Updated {
                    id,
                    column: edit.column,
                })
            }
            RowKey::Placeholder(_) => {
                let mut row = Row::blank(&self.columns);
                row.set(&column.id, value);
                let id = row.id.clone();

                if let Err(row) = data.add_row(row) {
                    let mut rows = data.rows().to_vec();
                    rows.push(row);
                    data.replace_rows(rows);
                }

                info!(id = %id, column = %column.id, "row created from placeholder");
                Some(EditOutcome::Added { id })
            }
        }
    }

    // === Selection ===

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn toggle_selected(&mut self, key: &RowKey) -> bool {
        self.selection.toggle(key)
    }

    /// Select every row that passes the filters, or clear if they already are
    pub fn toggle_select_all(&mut self, rows: &[Row]) {
        let visible = self.visible_rows(rows);
        self.selection.toggle_all(&visible);
    }

    /// Delete every selected row, one callback per row. Returns the count.
    pub fn delete_selected(&mut self, data: &mut dyn GridData) -> usize {
        let ids = self.selection.take();
        for id in &ids {
            data.delete_row(id);
        }
        if !ids.is_empty() {
            info!(count = ids.len(), "deleted selected rows");
        }
        ids.len()
    }

    // === CSV ===

    /// Filtered and sorted real rows as CSV
    pub fn export(&self, rows: &[Row]) -> Result<ExportFile, GridError> {
        let visible = self.visible_rows(rows);
        let contents = fileio::export_csv(&self.columns, &visible)?;
        let file_name = fileio::export_file_name(self.title());
        info!(file = %file_name, rows = visible.len(), "exported rows");

        Ok(ExportFile {
            file_name,
            mime: CSV_MIME,
            contents,
        })
    }

    /// Parse CSV text and append every row in one `replace_rows` call.
    /// On any error nothing is appended.
    pub fn import(&mut self, text: &str, data: &mut dyn GridData) -> Result<usize, ImportError> {
        let imported = fileio::import_csv(&self.columns, text).map_err(|e| {
            warn!(error = %e, "import rejected");
            e
        })?;
        Ok(self.append(imported, data))
    }

    pub fn import_file(&mut self, path: &Path, data: &mut dyn GridData) -> Result<usize, ImportError> {
        let imported = fileio::import_file(&self.columns, path).map_err(|e| {
            warn!(error = %e, path = %path.display(), "import rejected");
            e
        })?;
        Ok(self.append(imported, data))
    }

    fn append(&self, imported: Vec<Row>, data: &mut dyn GridData) -> usize {
        let count = imported.len();
        let mut rows = data.rows().to_vec();
        rows.extend(imported);
        data.replace_rows(rows);
        info!(count, "imported rows");
        count
    }
}
