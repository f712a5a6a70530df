//! In-memory employee repository.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{EngineError, EngineResult};
use crate::models::EmployeeRecord;

use super::{EmployeeRepository, RecordUpdate};

/// An [`EmployeeRepository`] backed by a map in memory.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    records: RwLock<BTreeMap<String, EmployeeRecord>>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> EngineError {
    EngineError::StorageError {
        message: "record lock poisoned".to_string(),
    }
}

impl EmployeeRepository for InMemoryRepository {
    fn load(&self, employee_id: &str) -> EngineResult<Option<EmployeeRecord>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.get(employee_id).cloned())
    }

    fn save(&self, employee_id: &str, record: EmployeeRecord) -> EngineResult<()> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.insert(employee_id.to_string(), record);
        Ok(())
    }

    fn update(&self, employee_id: &str, apply: RecordUpdate<'_>) -> EngineResult<EmployeeRecord> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        let record = apply(records.get(employee_id).cloned())?;
        records.insert(employee_id.to_string(), record.clone());
        Ok(record)
    }

    fn delete(&self, employee_id: &str) -> EngineResult<bool> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        Ok(records.remove(employee_id).is_some())
    }

    fn list(&self) -> EngineResult<Vec<EmployeeRecord>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.values().cloned().collect())
    }
}
