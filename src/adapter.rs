//! Domain adapters: a fixed column schema, aggregate metrics over the current
//! rows, and the bridge between grid mutations and a data-access store.

pub mod billing;
pub mod receivables;
pub mod store;

use std::fmt::Debug;

use tracing::{error, info};

use crate::config::GridConfig;
use crate::error::{SchemaError, StoreError};
use crate::grid::{Grid, GridData};
use crate::row::Row;
use crate::schema::{Column, ColumnSet};
use crate::value::Value;

pub use billing::{Billing, BillingMetrics};
pub use receivables::{AgingBuckets, Receivables, ReceivablesMetrics};
pub use store::MemoryStore;

/// A table kind: what it is called, its columns, and what it totals up
pub trait Domain {
    type Metrics: Debug + Clone + PartialEq;

    fn title(&self) -> &'static str;
    fn columns(&self) -> Vec<Column>;
    fn metrics(&self, rows: &[Row]) -> Self::Metrics;
}

/// Which slice of data a view is showing
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Scope {
    pub clinic_id: String,
    pub provider_id: Option<String>,
    /// `YYYY-MM`
    pub month: Option<String>,
}

impl Scope {
    pub fn clinic(clinic_id: &str) -> Self {
        Self {
            clinic_id: clinic_id.to_string(),
            ..Self::default()
        }
    }

    pub fn with_provider(mut self, provider_id: &str) -> Self {
        self.provider_id = Some(provider_id.to_string());
        self
    }

    pub fn with_month(mut self, month: &str) -> Self {
        self.month = Some(month.to_string());
        self
    }

    /// Does a row stored under `other` belong in this view
    pub fn covers(&self, other: &Scope) -> bool {
        self.clinic_id == other.clinic_id
            && self.provider_id.as_ref().map_or(true, |p| other.provider_id.as_ref() == Some(p))
            && self.month.as_ref().map_or(true, |m| other.month.as_ref() == Some(m))
    }
}

/// Remote reads and writes for one entity. No transactional guarantees.
pub trait Store {
    fn fetch(&self, scope: &Scope) -> Result<Vec<Row>, StoreError>;
    fn save(&mut self, scope: &Scope, row: &Row) -> Result<(), StoreError>;
    fn remove(&mut self, scope: &Scope, id: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Ready,
    /// Shown as an error panel in place of the table
    Failed(String),
}

/// Owns the rows of one domain table for the current scope.
///
/// Every grid mutation is applied to the local rows first, then forwarded to
/// the store, then the rows are refreshed from the store. A store failure is
/// logged and leaves the adapter in [`LoadStatus::Failed`]; nothing is retried.
pub struct TableAdapter<D: Domain, S: Store> {
    domain: D,
    store: S,
    scope: Scope,
    columns: ColumnSet,
    rows: Vec<Row>,
    status: LoadStatus,
}

impl<D: Domain, S: Store> TableAdapter<D, S> {
    pub fn new(domain: D, store: S, scope: Scope) -> Result<Self, SchemaError> {
        let columns = ColumnSet::new(domain.columns())?;
        let mut adapter = Self {
            domain,
            store,
            scope,
            columns,
            rows: Vec::new(),
            status: LoadStatus::Ready,
        };
        adapter.reload();
        Ok(adapter)
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn error_panel(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(msg) => Some(msg),
            LoadStatus::Ready => None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn metrics(&self) -> D::Metrics {
        self.domain.metrics(&self.rows)
    }

    /// A fresh grid over this adapter's columns
    pub fn grid(&self, config: GridConfig) -> Grid {
        Grid::new(self.columns.clone(), config).with_title(self.domain.title())
    }

    /// Point the view at a different clinic/provider/month.
    /// Rows are loaded for the new scope; an unchanged scope keeps what is loaded.
    pub fn set_scope(&mut self, scope: Scope) {
        if scope == self.scope {
            return;
        }
        self.scope = scope;
        self.reload();
    }

    pub fn reload(&mut self) {
        match self.store.fetch(&self.scope) {
            Ok(rows) => {
                info!(
                    table = self.domain.title(),
                    clinic = %self.scope.clinic_id,
                    rows = rows.len(),
                    "loaded rows"
                );
                self.rows = rows;
                self.status = LoadStatus::Ready;
            }
            Err(e) => self.fail("load", e),
        }
    }

    fn fail(&mut self, action: &str, e: StoreError) {
        error!(table = self.domain.title(), action, error = %e, "data access failed");
        self.status = LoadStatus::Failed(format!("Could not {} {}: {}", action, self.domain.title(), e));
    }

    /// Run one store write, then refresh on success
    fn persist<F>(&mut self, action: &str, write: F)
    where
        F: FnOnce(&mut S, &Scope) -> Result<(), StoreError>,
    {
        match write(&mut self.store, &self.scope) {
            Ok(()) => self.reload(),
            Err(e) => self.fail(action, e),
        }
    }
}

impl<D: Domain, S: Store> GridData for TableAdapter<D, S> {
    fn rows(&self) -> &[Row] {
        &self.rows
    }

    fn replace_rows(&mut self, rows: Vec<Row>) {
        let stale: Vec<String> = self
            .rows
            .iter()
            .filter(|old| !rows.iter().any(|r| r.id == old.id))
            .map(|old| old.id.clone())
            .collect();
        self.rows = rows;

        let rows = self.rows.clone();
        self.persist("save", move |store, scope| {
            for id in &stale {
                store.remove(scope, id)?;
            }
            for row in &rows {
                store.save(scope, row)?;
            }
            Ok(())
        });
    }

    fn add_row(&mut self, row: Row) -> Result<(), Row> {
        self.rows.push(row.clone());
        self.persist("add", move |store, scope| store.save(scope, &row));
        Ok(())
    }

    fn delete_row(&mut self, id: &str) {
        self.rows.retain(|r| r.id != id);
        self.persist("delete", |store, scope| store.remove(scope, id));
    }

    fn update_row(&mut self, id: &str, column: &str, value: Value) {
        let Some(idx) = self.rows.iter().position(|r| r.id == id) else {
            self.fail("update", StoreError::NotFound(id.to_string()));
            return;
        };
        self.rows[idx].set(column, value);

        let row = self.rows[idx].clone();
        self.persist("update", move |store, scope| store.save(scope, &row));
    }
}

/// Sum of one amount column over the rows
pub(crate) fn total(rows: &[Row], column: &str) -> f64 {
    rows.iter()
        .filter_map(|r| r.get(column).and_then(Value::as_number))
        .sum()
}

#[cfg(test)]
mod test;
