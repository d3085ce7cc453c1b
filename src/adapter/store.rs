use crate::error::StoreError;
use crate::row::Row;

use super::{Scope, Store};

/// Rows kept in memory, each tagged with the scope it was saved under
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<(Scope, Row)>,
    offline: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(scope: &Scope, rows: Vec<Row>) -> Self {
        Self {
            entries: rows.into_iter().map(|r| (scope.clone(), r)).collect(),
            offline: false,
        }
    }

    /// While offline every call fails with `StoreError::Unavailable`
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline {
            Err(StoreError::Unavailable("store is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Store for MemoryStore {
    fn fetch(&self, scope: &Scope) -> Result<Vec<Row>, StoreError> {
        self.check_online()?;
        Ok(self
            .entries
            .iter()
            .filter(|(saved_under, _)| scope.covers(saved_under))
            .map(|(_, row)| row.clone())
            .collect())
    }

    fn save(&mut self, scope: &Scope, row: &Row) -> Result<(), StoreError> {
        self.check_online()?;
        match self.entries.iter_mut().find(|(_, r)| r.id == row.id) {
            Some(entry) => entry.1 = row.clone(),
            None => self.entries.push((scope.clone(), row.clone())),
        }
        Ok(())
    }

    fn remove(&mut self, _scope: &Scope, id: &str) -> Result<(), StoreError> {
        self.check_online()?;
        let before = self.entries.len();
        self.entries.retain(|(_, r)| r.id != id);
        if self.entries.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
