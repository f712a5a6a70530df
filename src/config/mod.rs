//! Configuration loading and management for the Compensation Engine.
//!
//! This module loads the calculator configuration from YAML: the
//! annualisation mode, the policy for negative derived fixed allowances and
//! the defaults used to seed new compensation inputs.
//!
//! # Example
//!
//! ```no_run
//! use compensation_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/calculator.yaml").unwrap();
//! println!("Default basic: {}%", config.config().defaults.basic_percentage);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AnnualisationMode, CalculatorConfig, CompensationDefaults, NegativeRemainderPolicy};
