//! Compensation breakdown calculation.
//!
//! This module assembles the full salary breakdown from a compensation
//! input: Basic and HRA from their percentages, the two fixed monthly
//! allowances as given, and the rounded monthly and annual CTC totals.

use rust_decimal::Decimal;

use crate::config::AnnualisationMode;
use crate::models::{
    AuditStep, AuditWarning, CompensationBreakdown, CompensationInput, ComponentKind, LineItem,
    SalaryBasis,
};

use super::component_amount::calculate_percentage_component;
use super::rounding::{MONTHS_PER_YEAR, round_half_up};

/// A breakdown together with the audit steps and warnings that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownCalculation {
    /// The computed breakdown.
    pub breakdown: CompensationBreakdown,
    /// One step per line item, then one for the totals.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised while computing.
    pub warnings: Vec<AuditWarning>,
}

/// Computes the salary breakdown with legacy annualisation.
///
/// This is a pure function: the same input always yields the same
/// breakdown, and no input is rejected.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::compute_breakdown;
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
///
/// let breakdown = compute_breakdown(&input);
/// assert_eq!(breakdown.total_monthly_ctc, Decimal::new(33600, 0));
/// assert_eq!(breakdown.total_annual_ctc, Decimal::new(403200, 0));
/// ```
pub fn compute_breakdown(input: &CompensationInput) -> CompensationBreakdown {
    compute_breakdown_with(input, AnnualisationMode::Legacy)
}

/// Computes the salary breakdown with the given annualisation mode.
pub fn compute_breakdown_with(
    input: &CompensationInput,
    mode: AnnualisationMode,
) -> CompensationBreakdown {
    calculate_breakdown(input, mode, 1).breakdown
}

/// Computes the salary breakdown and records an audit step for every line.
///
/// Step numbers start at `first_step`. In legacy mode a low-severity warning
/// is raised when the annual total differs from 12 x the monthly total.
pub fn calculate_breakdown(
    input: &CompensationInput,
    mode: AnnualisationMode,
    first_step: u32,
) -> BreakdownCalculation {
    let mut audit_steps = Vec::with_capacity(5);
    let mut step_number = first_step;

    let basic = calculate_percentage_component(
        input,
        ComponentKind::Basic,
        input.basic_percentage,
        SalaryBasis::Ctc,
        mode,
        step_number,
    );
    audit_steps.push(basic.audit_step);
    step_number += 1;

    let hra = calculate_percentage_component(
        input,
        ComponentKind::Hra,
        input.hra_percentage,
        SalaryBasis::Basic,
        mode,
        step_number,
    );
    audit_steps.push(hra.audit_step);
    step_number += 1;

    let conveyance = fixed_monthly_line(
        ComponentKind::Conveyance,
        input.conveyance_allowance,
        step_number,
    );
    audit_steps.push(conveyance.1);
    step_number += 1;

    let fixed_allowance = fixed_monthly_line(
        ComponentKind::FixedAllowance,
        input.fixed_allowance,
        step_number,
    );
    audit_steps.push(fixed_allowance.1);
    step_number += 1;

    let basic = LineItem::new(ComponentKind::Basic, basic.monthly, basic.annual);
    let hra = LineItem::new(ComponentKind::Hra, hra.monthly, hra.annual);
    let conveyance = conveyance.0;
    let fixed_allowance = fixed_allowance.0;

    let total_monthly_ctc = round_half_up(sum(&[
        basic.monthly,
        hra.monthly,
        conveyance.monthly,
        fixed_allowance.monthly,
    ]));
    let total_annual_ctc = match mode {
        AnnualisationMode::Legacy => round_half_up(sum(&[
            basic.annual,
            hra.annual,
            conveyance.annual,
            fixed_allowance.annual,
        ])),
        AnnualisationMode::Corrected => total_monthly_ctc.saturating_mul(MONTHS_PER_YEAR),
    };

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "ctc_totals".to_string(),
        rule_name: "CTC Totals".to_string(),
        input: serde_json::json!({
            "monthly": [
                basic.monthly.to_string(),
                hra.monthly.to_string(),
                conveyance.monthly.to_string(),
                fixed_allowance.monthly.to_string()
            ],
            "annual": [
                basic.annual.to_string(),
                hra.annual.to_string(),
                conveyance.annual.to_string(),
                fixed_allowance.annual.to_string()
            ],
            "annualisation": mode.as_str()
        }),
        output: serde_json::json!({
            "total_monthly_ctc": total_monthly_ctc.to_string(),
            "total_annual_ctc": total_annual_ctc.to_string()
        }),
        reasoning: format!(
            "Monthly CTC ${} and annual CTC ${}",
            total_monthly_ctc, total_annual_ctc
        ),
    });

    let mut warnings = Vec::new();
    let twelve_monthly = total_monthly_ctc.saturating_mul(MONTHS_PER_YEAR);
    let residue = total_annual_ctc.saturating_sub(twelve_monthly);
    if !residue.is_zero() {
        warnings.push(AuditWarning {
            code: "ANNUALISATION_RESIDUE".to_string(),
            message: format!(
                "Annual CTC ${} differs from 12 x monthly CTC ${} by {}",
                total_annual_ctc, twelve_monthly, residue
            ),
            severity: "low".to_string(),
        });
    }

    BreakdownCalculation {
        breakdown: CompensationBreakdown {
            basic,
            hra,
            conveyance,
            fixed_allowance,
            total_monthly_ctc,
            total_annual_ctc,
        },
        audit_steps,
        warnings,
    }
}

fn sum(amounts: &[Decimal]) -> Decimal {
    amounts
        .iter()
        .fold(Decimal::ZERO, |total, amount| total.saturating_add(*amount))
}

/// A fixed monthly allowance is taken as given; its annual amount is 12 x.
fn fixed_monthly_line(
    component: ComponentKind,
    monthly: Decimal,
    step_number: u32,
) -> (LineItem, AuditStep) {
    let annual = monthly.saturating_mul(MONTHS_PER_YEAR);
    let rule_id = match component {
        ComponentKind::Conveyance => "conveyance_allowance",
        _ => "fixed_allowance",
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: component.label().to_string(),
        input: serde_json::json!({ "monthly": monthly.to_string() }),
        output: serde_json::json!({
            "monthly": monthly.to_string(),
            "annual": annual.to_string()
        }),
        reasoning: format!("${} x 12 = ${}", monthly, annual),
    };

    (LineItem::new(component, monthly, annual), audit_step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn reference_input() -> CompensationInput {
        CompensationInput {
            annual_ctc: dec("600000"),
            basic_percentage: dec("40"),
            hra_percentage: dec("50"),
            conveyance_allowance: dec("1600"),
            fixed_allowance: dec("2000"),
        }
    }

    #[test]
    fn test_reference_breakdown() {
        let breakdown = compute_breakdown(&reference_input());

        assert_eq!(breakdown.basic.monthly, dec("20000"));
        assert_eq!(breakdown.basic.annual, dec("240000"));
        assert_eq!(breakdown.hra.monthly, dec("10000"));
        assert_eq!(breakdown.hra.annual, dec("120000"));
        assert_eq!(breakdown.conveyance.monthly, dec("1600"));
        assert_eq!(breakdown.conveyance.annual, dec("19200"));
        assert_eq!(breakdown.fixed_allowance.monthly, dec("2000"));
        assert_eq!(breakdown.fixed_allowance.annual, dec("24000"));
        assert_eq!(breakdown.total_monthly_ctc, dec("33600"));
        assert_eq!(breakdown.total_annual_ctc, dec("403200"));
    }

    #[test]
    fn test_zero_ctc_gives_all_zero_breakdown() {
        let breakdown = compute_breakdown(&CompensationInput::zero());

        for line in breakdown.line_items() {
            assert!(line.monthly.is_zero());
            assert!(line.annual.is_zero());
        }
        assert!(breakdown.total_monthly_ctc.is_zero());
        assert!(breakdown.total_annual_ctc.is_zero());
    }

    #[test]
    fn test_compute_breakdown_is_idempotent() {
        let input = reference_input();
        assert_eq!(compute_breakdown(&input), compute_breakdown(&input));
    }

    #[test]
    fn test_fractional_allowances_are_rounded_in_totals() {
        let mut input = reference_input();
        input.conveyance_allowance = dec("1600.40");
        input.fixed_allowance = dec("2000.20");

        let breakdown = compute_breakdown(&input);

        assert_eq!(breakdown.conveyance.annual, dec("19204.80"));
        assert_eq!(breakdown.total_monthly_ctc, dec("33601"));
        // 240000 + 120000 + 19204.80 + 24002.40 = 403207.20
        assert_eq!(breakdown.total_annual_ctc, dec("403207"));
    }

    #[test]
    fn test_legacy_preserves_annualisation_residue() {
        let input = CompensationInput {
            annual_ctc: dec("100000"),
            basic_percentage: dec("50"),
            hra_percentage: dec("50"),
            conveyance_allowance: Decimal::ZERO,
            fixed_allowance: Decimal::ZERO,
        };

        let calculation = calculate_breakdown(&input, AnnualisationMode::Legacy, 1);
        let breakdown = &calculation.breakdown;

        // basic 4167 / 50000, hra 2084 / 25000
        assert_eq!(breakdown.basic.monthly, dec("4167"));
        assert_eq!(breakdown.basic.annual, dec("50000"));
        assert_eq!(breakdown.hra.monthly, dec("2084"));
        assert_eq!(breakdown.hra.annual, dec("25000"));
        assert_eq!(breakdown.total_monthly_ctc, dec("6251"));
        assert_eq!(breakdown.total_annual_ctc, dec("75000"));

        assert_eq!(calculation.warnings.len(), 1);
        assert_eq!(calculation.warnings[0].code, "ANNUALISATION_RESIDUE");
        assert_eq!(calculation.warnings[0].severity, "low");
    }

    #[test]
    fn test_corrected_annual_is_twelve_monthly() {
        let input = CompensationInput {
            annual_ctc: dec("100000"),
            basic_percentage: dec("50"),
            hra_percentage: dec("50"),
            conveyance_allowance: dec("1600.5"),
            fixed_allowance: Decimal::ZERO,
        };

        let calculation = calculate_breakdown(&input, AnnualisationMode::Corrected, 1);
        let breakdown = &calculation.breakdown;

        for line in breakdown.line_items() {
            assert!(line.annualisation_residue().is_zero());
        }
        assert_eq!(
            breakdown.total_annual_ctc,
            breakdown.total_monthly_ctc * dec("12")
        );
        assert!(calculation.warnings.is_empty());
    }

    #[test]
    fn test_audit_steps_are_numbered_from_first_step() {
        let calculation = calculate_breakdown(&reference_input(), AnnualisationMode::Legacy, 4);

        let numbers: Vec<u32> = calculation
            .audit_steps
            .iter()
            .map(|step| step.step_number)
            .collect();
        assert_eq!(numbers, vec![4, 5, 6, 7, 8]);

        let rules: Vec<&str> = calculation
            .audit_steps
            .iter()
            .map(|step| step.rule_id.as_str())
            .collect();
        assert_eq!(
            rules,
            vec![
                "basic_component",
                "hra_component",
                "conveyance_allowance",
                "fixed_allowance",
                "ctc_totals"
            ]
        );
    }

    #[test]
    fn test_totals_step_reports_both_totals() {
        let calculation = calculate_breakdown(&reference_input(), AnnualisationMode::Legacy, 1);
        let totals = calculation.audit_steps.last().unwrap();

        assert_eq!(
            totals.output["total_monthly_ctc"].as_str().unwrap(),
            "33600"
        );
        assert_eq!(
            totals.output["total_annual_ctc"].as_str().unwrap(),
            "403200"
        );
        assert!(calculation.warnings.is_empty());
    }

    #[test]
    fn test_amounts_at_decimal_max_return_a_breakdown() {
        let input = CompensationInput {
            annual_ctc: dec("1000000000000000000000000000"),
            basic_percentage: dec("100"),
            hra_percentage: dec("100"),
            conveyance_allowance: Decimal::MAX,
            fixed_allowance: Decimal::MAX,
        };

        for mode in [AnnualisationMode::Legacy, AnnualisationMode::Corrected] {
            let calculation = calculate_breakdown(&input, mode, 1);
            assert_eq!(calculation.breakdown.conveyance.annual, Decimal::MAX);
            assert_eq!(calculation.breakdown.total_monthly_ctc, Decimal::MAX);
            assert_eq!(calculation.audit_steps.len(), 5);
        }
    }

    #[test]
    fn test_negative_inputs_are_not_rejected() {
        let mut input = reference_input();
        input.fixed_allowance = dec("-40000");

        let breakdown = compute_breakdown(&input);
        assert_eq!(breakdown.total_monthly_ctc, dec("-8400"));
        assert_eq!(breakdown.total_annual_ctc, dec("-100800"));
    }
}
