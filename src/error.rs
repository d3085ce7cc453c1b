use thiserror::Error;

/// Errors raised by grid operations that the caller asked for explicitly
#[derive(Error, Debug)]
pub enum GridError {
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Column is not editable: {0}")]
    ReadOnlyColumn(String),

    #[error("Unknown row: {0}")]
    UnknownRow(String),

    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Export produced invalid UTF-8: {source}")]
    Utf8 {
        #[from]
        source: std::string::FromUtf8Error,
    },
}

/// Reasons an import is discarded as a whole
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("File must contain a header row and at least one data row")]
    TooFewLines,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Duplicate column id: {0}")]
    DuplicateColumn(String),

    #[error("Column id must not be empty (label: {0})")]
    EmptyId(String),
}

/// Failures reported by a data-access collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Data source unavailable: {0}")]
    Unavailable(String),

    #[error("Row not found: {0}")]
    NotFound(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read grid spec: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to parse grid spec: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    #[error("{tab} is not available to {role}")]
    TabNotAvailable { tab: String, role: String },
}
