//! Compensation input model and related types.
//!
//! This module defines the [`CompensationInput`] an employee's salary
//! structure is derived from, and the [`SalaryBasis`] a percentage applies to.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::CalculatorConfig;

/// The base a percentage component is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryBasis {
    /// Percentage of the cost to company.
    Ctc,
    /// Percentage of the Basic component.
    Basic,
}

impl SalaryBasis {
    /// Returns the snake_case name used in audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            SalaryBasis::Ctc => "ctc",
            SalaryBasis::Basic => "basic",
        }
    }
}

/// The inputs a salary structure is derived from.
///
/// Percentages are not range-checked; values above 100 or below zero are
/// carried through the calculation unchanged.
///
/// # Example
///
/// ```
/// use compensation_engine::models::CompensationInput;
/// use rust_decimal::Decimal;
///
/// let input = CompensationInput {
///     annual_ctc: Decimal::new(600000, 0),
///     basic_percentage: Decimal::new(40, 0),
///     hra_percentage: Decimal::new(50, 0),
///     conveyance_allowance: Decimal::new(1600, 0),
///     fixed_allowance: Decimal::new(2000, 0),
/// };
/// assert!(input.annual_ctc > Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationInput {
    /// Annual cost to company.
    pub annual_ctc: Decimal,
    /// Percentage of CTC allocated to Basic.
    pub basic_percentage: Decimal,
    /// Percentage of Basic allocated to House Rent Allowance.
    pub hra_percentage: Decimal,
    /// Fixed monthly conveyance allowance.
    pub conveyance_allowance: Decimal,
    /// Fixed monthly allowance.
    pub fixed_allowance: Decimal,
}

impl CompensationInput {
    /// Creates an input for `annual_ctc` with the configured default
    /// percentages and allowances.
    pub fn with_defaults(annual_ctc: Decimal, config: &CalculatorConfig) -> Self {
        let defaults = &config.defaults;
        Self {
            annual_ctc,
            basic_percentage: defaults.basic_percentage,
            hra_percentage: defaults.hra_percentage,
            conveyance_allowance: defaults.conveyance_allowance,
            fixed_allowance: defaults.fixed_allowance,
        }
    }

    /// Returns an all-zero input.
    pub fn zero() -> Self {
        Self {
            annual_ctc: Decimal::ZERO,
            basic_percentage: Decimal::ZERO,
            hra_percentage: Decimal::ZERO,
            conveyance_allowance: Decimal::ZERO,
            fixed_allowance: Decimal::ZERO,
        }
    }
}
