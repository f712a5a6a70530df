//! Application state for the Compensation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::EmployeeRepository;

/// Shared application state.
///
/// Holds the loaded calculator configuration and the employee record store.
#[derive(Clone)]
pub struct AppState {
    /// The loaded calculator configuration.
    config: Arc<ConfigLoader>,
    /// The employee record store.
    repository: Arc<dyn EmployeeRepository>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: ConfigLoader, repository: Arc<dyn EmployeeRepository>) -> Self {
        Self {
            config: Arc::new(config),
            repository,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the employee record store.
    pub fn repository(&self) -> &dyn EmployeeRepository {
        self.repository.as_ref()
    }
}
