//! Percentage component amounts.
//!
//! This module derives the monthly and annual amounts of a percentage-based
//! salary component (Basic, HRA) from a compensation input. Percentages of
//! Basic are applied to the *rounded* Basic amount, so the result is a
//! two-stage rounding rather than a single algebraic product.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::AnnualisationMode;
use crate::models::{AuditStep, CompensationInput, ComponentKind, SalaryBasis};

use super::rounding::{MONTHS_PER_YEAR, PERCENT, round_half_up};

/// Returns the monthly amount of `percentage` applied to `basis`.
///
/// - [`SalaryBasis::Ctc`]: `round(annual_ctc x percentage / 100 / 12)`
/// - [`SalaryBasis::Basic`]: the monthly Basic is computed and rounded
///   first, then `round(basic_monthly x percentage / 100)`
///
/// Negative inputs are not rejected and produce negative amounts. Products
/// saturate at the `Decimal` bounds rather than overflowing; see
/// [`validate_amounts`](super::validate_amounts) for the supported range.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::monthly_amount_of;
/// use compensation_engine::models::{CompensationInput, SalaryBasis};
/// use rust_decimal::Decimal;
///
/// let input = CompensationInput {
///     annual_ctc: Decimal::new(600000, 0),
///     basic_percentage: Decimal::new(40, 0),
///     hra_percentage: Decimal::new(50, 0),
///     conveyance_allowance: Decimal::ZERO,
///     fixed_allowance: Decimal::ZERO,
/// };
///
/// assert_eq!(
///     monthly_amount_of(&input, input.basic_percentage, SalaryBasis::Ctc),
///     Decimal::new(20000, 0)
/// );
/// assert_eq!(
///     monthly_amount_of(&input, input.hra_percentage, SalaryBasis::Basic),
///     Decimal::new(10000, 0)
/// );
/// ```
pub fn monthly_amount_of(
    input: &CompensationInput,
    percentage: Decimal,
    basis: SalaryBasis,
) -> Decimal {
    match basis {
        SalaryBasis::Ctc => round_half_up(
            input.annual_ctc.saturating_mul(percentage) / PERCENT / MONTHS_PER_YEAR,
        ),
        SalaryBasis::Basic => {
            let basic_monthly = monthly_amount_of(input, input.basic_percentage, SalaryBasis::Ctc);
            round_half_up(basic_monthly.saturating_mul(percentage) / PERCENT)
        }
    }
}

/// Returns the annual amount of `percentage` applied to `basis`.
///
/// Computed from the annual CTC directly, not as 12 x the monthly amount:
///
/// - [`SalaryBasis::Ctc`]: `round(annual_ctc x percentage / 100)`
/// - [`SalaryBasis::Basic`]: `round(round(annual_ctc x basic_percentage / 100)
///   x percentage / 100)`
///
/// The result may differ from `12 x monthly_amount_of(..)` by the rounding
/// residue of each month.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::{annual_amount_of, monthly_amount_of};
/// use compensation_engine::models::{CompensationInput, SalaryBasis};
/// use rust_decimal::Decimal;
///
/// let mut input = CompensationInput::zero();
/// input.annual_ctc = Decimal::new(100000, 0);
///
/// let hundred = Decimal::new(100, 0);
/// let annual = annual_amount_of(&input, hundred, SalaryBasis::Ctc);
/// let monthly = monthly_amount_of(&input, hundred, SalaryBasis::Ctc);
///
/// assert_eq!(annual, Decimal::new(100000, 0));
/// assert_eq!(monthly * Decimal::from(12), Decimal::new(99996, 0));
/// ```
pub fn annual_amount_of(
    input: &CompensationInput,
    percentage: Decimal,
    basis: SalaryBasis,
) -> Decimal {
    match basis {
        SalaryBasis::Ctc => round_half_up(input.annual_ctc.saturating_mul(percentage) / PERCENT),
        SalaryBasis::Basic => {
            let basic_annual = annual_amount_of(input, input.basic_percentage, SalaryBasis::Ctc);
            round_half_up(basic_annual.saturating_mul(percentage) / PERCENT)
        }
    }
}

/// The amounts of a percentage component, including the audit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentAmountResult {
    /// The component that was calculated.
    pub component: ComponentKind,
    /// The monthly amount.
    pub monthly: Decimal,
    /// The annual amount.
    pub annual: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the monthly and annual amounts of a percentage component.
///
/// In [`AnnualisationMode::Legacy`] the annual amount comes from
/// [`annual_amount_of`]; in [`AnnualisationMode::Corrected`] it is
/// `12 x monthly`.
pub fn calculate_percentage_component(
    input: &CompensationInput,
    component: ComponentKind,
    percentage: Decimal,
    basis: SalaryBasis,
    mode: AnnualisationMode,
    step_number: u32,
) -> ComponentAmountResult {
    let monthly = monthly_amount_of(input, percentage, basis);
    let annual = match mode {
        AnnualisationMode::Legacy => annual_amount_of(input, percentage, basis),
        AnnualisationMode::Corrected => monthly.saturating_mul(MONTHS_PER_YEAR),
    };

    let reasoning = match (basis, mode) {
        (SalaryBasis::Ctc, AnnualisationMode::Legacy) => format!(
            "round({} x {}% / 12) = {} monthly; round({} x {}%) = {} annual",
            input.annual_ctc, percentage, monthly, input.annual_ctc, percentage, annual
        ),
        (SalaryBasis::Basic, AnnualisationMode::Legacy) => format!(
            "round(basic monthly x {}%) = {} monthly; round(basic annual x {}%) = {} annual",
            percentage, monthly, percentage, annual
        ),
        (SalaryBasis::Ctc, AnnualisationMode::Corrected) => format!(
            "round({} x {}% / 12) = {} monthly; {} x 12 = {} annual",
            input.annual_ctc, percentage, monthly, monthly, annual
        ),
        (SalaryBasis::Basic, AnnualisationMode::Corrected) => format!(
            "round(basic monthly x {}%) = {} monthly; {} x 12 = {} annual",
            percentage, monthly, monthly, annual
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: format!("{}_component", rule_prefix(component)),
        rule_name: component.label().to_string(),
        input: serde_json::json!({
            "annual_ctc": input.annual_ctc.to_string(),
            "percentage": percentage.to_string(),
            "basis": basis.as_str(),
            "annualisation": mode.as_str()
        }),
        output: serde_json::json!({
            "monthly": monthly.to_string(),
            "annual": annual.to_string()
        }),
        reasoning,
    };

    ComponentAmountResult {
        component,
        monthly,
        annual,
        audit_step,
    }
}

fn rule_prefix(component: ComponentKind) -> &'static str {
    match component {
        ComponentKind::Basic => "basic",
        ComponentKind::Hra => "hra",
        ComponentKind::Conveyance => "conveyance",
        ComponentKind::FixedAllowance => "fixed_allowance",
    }
}
