//! Employee record storage for the Compensation Engine.
//!
//! Persistence sits behind the [`EmployeeRepository`] trait so the
//! calculator stays independent of the storage medium. Two implementations
//! are provided: an in-memory map and a single JSON document on disk.

mod json_file;
mod memory;

pub use json_file::JsonFileRepository;
pub use memory::InMemoryRepository;

use crate::error::EngineResult;
use crate::models::EmployeeRecord;

/// Produces the new record from the current one, if any.
///
/// Used by [`EmployeeRepository::update`]; returning an error leaves the
/// stored record untouched.
pub type RecordUpdate<'a> =
    Box<dyn FnOnce(Option<EmployeeRecord>) -> EngineResult<EmployeeRecord> + 'a>;

/// Keyed storage for employee records.
pub trait EmployeeRepository: Send + Sync {
    /// Returns the record for `employee_id`, or `None` when absent.
    fn load(&self, employee_id: &str) -> EngineResult<Option<EmployeeRecord>>;

    /// Inserts or replaces the record stored under `employee_id`.
    fn save(&self, employee_id: &str, record: EmployeeRecord) -> EngineResult<()>;

    /// Reads, transforms and writes back the record under `employee_id` as
    /// one step. No other write to the store can land between the read and
    /// the write. Returns the record that was stored.
    fn update(&self, employee_id: &str, apply: RecordUpdate<'_>) -> EngineResult<EmployeeRecord>;

    /// Removes the record, returning whether one existed.
    fn delete(&self, employee_id: &str) -> EngineResult<bool>;

    /// Returns every stored record ordered by identifier.
    fn list(&self) -> EngineResult<Vec<EmployeeRecord>>;
}
