//! JSON file employee repository.
//!
//! All records live in one JSON object keyed by employee identifier. The
//! file is read once on open and rewritten after every mutation. A rewrite
//! goes to a sibling staging file that is renamed over the document, so the
//! document on disk is always either the old or the new version.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::EmployeeRecord;

use super::{EmployeeRepository, RecordUpdate};

/// An [`EmployeeRepository`] persisted to a single JSON document.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    records: RwLock<BTreeMap<String, EmployeeRecord>>,
}

impl JsonFileRepository {
    /// Opens the repository at `path`. A missing file starts empty and is
    /// created on the first save.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use compensation_engine::store::{EmployeeRepository, JsonFileRepository};
    ///
    /// let repo = JsonFileRepository::open("./data/employees.json")?;
    /// println!("{} records", repo.list()?.len());
    /// # Ok::<(), compensation_engine::error::EngineError>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref().to_path_buf();

        let records = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| EngineError::StorageError {
                message: format!("failed to read {}: {}", path.display(), e),
            })?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| EngineError::StorageError {
                    message: format!("failed to parse {}: {}", path.display(), e),
                })?
            }
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), records = records.len(), "Opened record store");

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, records: &BTreeMap<String, EmployeeRecord>) -> EngineResult<()> {
        let content =
            serde_json::to_string_pretty(records).map_err(|e| EngineError::StorageError {
                message: format!("failed to serialize records: {}", e),
            })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| EngineError::StorageError {
                message: format!("failed to create {}: {}", parent.display(), e),
            })?;
        }

        let staging = self.staging_path();
        write_synced(&staging, content.as_bytes()).map_err(|e| EngineError::StorageError {
            message: format!("failed to write {}: {}", staging.display(), e),
        })?;

        fs::rename(&staging, &self.path).map_err(|e| {
            let _ = fs::remove_file(&staging);
            EngineError::StorageError {
                message: format!("failed to replace {}: {}", self.path.display(), e),
            }
        })?;

        debug!(path = %self.path.display(), records = records.len(), "Persisted record store");
        Ok(())
    }

    /// `<document>.tmp` next to the document, so the rename stays on one
    /// filesystem.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("records.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn write_synced(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    file.sync_all()
}

fn poisoned() -> EngineError {
    EngineError::StorageError {
        message: "record lock poisoned".to_string(),
    }
}

impl EmployeeRepository for JsonFileRepository {
    fn load(&self, employee_id: &str) -> EngineResult<Option<EmployeeRecord>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.get(employee_id).cloned())
    }

    fn save(&self, employee_id: &str, record: EmployeeRecord) -> EngineResult<()> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        let previous = records.insert(employee_id.to_string(), record);

        if let Err(err) = self.persist(&records) {
            // keep memory in step with the file
            match previous {
                Some(previous) => records.insert(employee_id.to_string(), previous),
                None => records.remove(employee_id),
            };
            return Err(err);
        }
        Ok(())
    }

    fn update(&self, employee_id: &str, apply: RecordUpdate<'_>) -> EngineResult<EmployeeRecord> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        let record = apply(records.get(employee_id).cloned())?;
        let previous = records.insert(employee_id.to_string(), record.clone());

        if let Err(err) = self.persist(&records) {
            match previous {
                Some(previous) => records.insert(employee_id.to_string(), previous),
                None => records.remove(employee_id),
            };
            return Err(err);
        }
        Ok(record)
    }

    fn delete(&self, employee_id: &str) -> EngineResult<bool> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        let Some(previous) = records.remove(employee_id) else {
            return Ok(false);
        };

        if let Err(err) = self.persist(&records) {
            records.insert(employee_id.to_string(), previous);
            return Err(err);
        }
        Ok(true)
    }

    fn list(&self) -> EngineResult<Vec<EmployeeRecord>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.values().cloned().collect())
    }
}
