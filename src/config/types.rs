//! Configuration types for the compensation calculator.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How annual amounts are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnualisationMode {
    /// Annual amounts are rounded independently from the annual CTC, so they
    /// can differ from 12 x the monthly amounts. Matches figures already
    /// stored by earlier versions.
    #[default]
    Legacy,
    /// Every annual amount is exactly 12 x its monthly amount.
    Corrected,
}

impl AnnualisationMode {
    /// Returns the snake_case name used in audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnualisationMode::Legacy => "legacy",
            AnnualisationMode::Corrected => "corrected",
        }
    }
}

/// What to do when a revision leaves a negative fixed allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeRemainderPolicy {
    /// Keep the negative amount and record a warning.
    Allow,
    /// Replace the negative amount with zero and record a warning.
    ClampToZero,
    /// Fail the revision.
    #[default]
    Reject,
}

impl NegativeRemainderPolicy {
    /// Returns the snake_case name used in audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            NegativeRemainderPolicy::Allow => "allow",
            NegativeRemainderPolicy::ClampToZero => "clamp_to_zero",
            NegativeRemainderPolicy::Reject => "reject",
        }
    }
}

/// Values used to seed a new employee's compensation input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationDefaults {
    /// Default percentage of CTC allocated to Basic.
    pub basic_percentage: Decimal,
    /// Default percentage of Basic allocated to HRA.
    pub hra_percentage: Decimal,
    /// Default monthly conveyance allowance.
    pub conveyance_allowance: Decimal,
    /// Default monthly fixed allowance.
    #[serde(default)]
    pub fixed_allowance: Decimal,
}

impl Default for CompensationDefaults {
    fn default() -> Self {
        Self {
            basic_percentage: Decimal::new(50, 0),
            hra_percentage: Decimal::new(40, 0),
            conveyance_allowance: Decimal::new(1600, 0),
            fixed_allowance: Decimal::ZERO,
        }
    }
}

/// The complete calculator configuration.
///
/// # Example
///
/// ```
/// use compensation_engine::config::{AnnualisationMode, CalculatorConfig, NegativeRemainderPolicy};
///
/// let config = CalculatorConfig::default();
/// assert_eq!(config.annualisation, AnnualisationMode::Legacy);
/// assert_eq!(config.negative_remainder, NegativeRemainderPolicy::Reject);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// How annual amounts are derived.
    #[serde(default)]
    pub annualisation: AnnualisationMode,
    /// Policy for negative derived fixed allowances.
    #[serde(default)]
    pub negative_remainder: NegativeRemainderPolicy,
    /// Defaults for new compensation inputs.
    #[serde(default)]
    pub defaults: CompensationDefaults,
}
