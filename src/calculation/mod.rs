//! Calculation logic for the Compensation Engine.
//!
//! This module contains the compensation calculator: currency rounding,
//! percentage component amounts on a CTC or Basic basis, the full monthly and
//! annual breakdown, the fixed-allowance remainder used by salary revisions,
//! and input validation.

mod breakdown;
mod component_amount;
mod revision;
mod rounding;
mod validation;

pub use breakdown::{
    BreakdownCalculation, calculate_breakdown, compute_breakdown, compute_breakdown_with,
};
pub use component_amount::{
    ComponentAmountResult, annual_amount_of, calculate_percentage_component, monthly_amount_of,
};
pub use revision::{
    FixedAllowanceResult, RevisionCalculation, apply_revision, derive_fixed_allowance,
};
pub use rounding::{MONTHS_PER_YEAR, PERCENT, round_half_up};
pub use validation::{MAX_AMOUNT, MAX_PERCENTAGE, validate_amounts, validate_for_save};
