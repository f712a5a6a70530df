//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the calculator
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AnnualisationMode, CalculatorConfig, NegativeRemainderPolicy};

/// Loads and provides access to calculator configuration.
///
/// # File Format
///
/// ```text
/// annualisation: legacy        # legacy | corrected
/// negative_remainder: reject   # allow | clamp_to_zero | reject
/// defaults:
///   basic_percentage: "50"
///   hra_percentage: "40"
///   conveyance_allowance: "1600"
///   fixed_allowance: "0"
/// ```
///
/// # Example
///
/// ```no_run
/// use compensation_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/calculator.yaml").unwrap();
/// println!("Annualisation: {:?}", loader.annualisation());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: CalculatorConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// Returns `ConfigNotFound` if the file cannot be read and
    /// `ConfigParseError` if it is not valid configuration.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses configuration from YAML text. `origin` names the source in
    /// error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> EngineResult<Self> {
        let config: CalculatorConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: CalculatorConfig) -> Self {
        Self { config }
    }

    /// Returns the underlying calculator configuration.
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Returns the configured annualisation mode.
    pub fn annualisation(&self) -> AnnualisationMode {
        self.config.annualisation
    }

    /// Returns the configured negative remainder policy.
    pub fn negative_remainder(&self) -> NegativeRemainderPolicy {
        self.config.negative_remainder
    }
}
