//! Headless spreadsheet-style grid for medical billing tables.
//!
//! The [`grid::Grid`] holds view state (search, filters, sort, selection, the
//! in-flight edit) over rows owned by a [`grid::GridData`] implementation,
//! typically a domain [`adapter::TableAdapter`].

pub mod adapter;
pub mod config;
pub mod dashboard;
pub mod date;
pub mod error;
pub mod fileio;
pub mod grid;
pub mod render;
pub mod row;
pub mod schema;
pub mod value;

pub use config::{GridConfig, GridSpec};
pub use grid::{Grid, GridData, VecData};
pub use row::{Row, RowKey};
pub use schema::{Column, ColumnKind, ColumnSet};
pub use value::Value;
