use crate::row::RowKey;
use crate::value::split_choices;

/// The one in-flight cell edit. Multi-select edits keep a comma-joined buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub row: RowKey,
    pub column: String,
    pub text: String,
}

impl EditBuffer {
    pub fn new(row: RowKey, column: &str, initial: String) -> Self {
        Self {
            row,
            column: column.to_string(),
            text: initial,
        }
    }

    pub fn is_for(&self, row: &RowKey, column: &str) -> bool {
        &self.row == row && self.column == column
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn choices(&self) -> Vec<String> {
        split_choices(&self.text).into_iter().collect()
    }

    /// Add or remove one option of a multi-select buffer
    pub fn toggle_choice(&mut self, choice: &str) {
        let mut choices = split_choices(&self.text);
        if !choices.remove(choice) {
            choices.insert(choice.to_string());
        }
        self.text = choices.into_iter().collect::<Vec<_>>().join(",");
    }
}
