//! Salary revision calculation.
//!
//! In a revision the fixed allowance is not entered directly. It is the
//! remainder that makes the monthly components add up to the new monthly
//! CTC:
//!
//! ```text
//! fixed = round(new_annual_ctc / 12) - basic_monthly - hra_monthly - conveyance
//! ```
//!
//! The remainder goes negative when Basic, HRA and conveyance together
//! exceed the monthly CTC. What happens then is decided by a
//! [`NegativeRemainderPolicy`].

use rust_decimal::Decimal;

use crate::config::{AnnualisationMode, NegativeRemainderPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditWarning, CompensationBreakdown, CompensationInput, SalaryBasis,
    SalaryRevision,
};

use super::breakdown::calculate_breakdown;
use super::component_amount::monthly_amount_of;
use super::rounding::{MONTHS_PER_YEAR, round_half_up};
use super::validation::validate_amounts;

/// The derived fixed allowance of a revision, including the audit step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedAllowanceResult {
    /// The monthly fixed allowance after the policy was applied.
    pub fixed_allowance: Decimal,
    /// The remainder before the policy was applied.
    pub raw_remainder: Decimal,
    /// The audit step recording this derivation.
    pub audit_step: AuditStep,
    /// Set when the remainder was negative and the policy let it through.
    pub warning: Option<AuditWarning>,
}

/// Derives the monthly fixed allowance for a compensation whose
/// `fixed_allowance` field is ignored.
///
/// # Errors
///
/// Returns [`EngineError::NegativeFixedAllowance`] when the remainder is
/// negative and `policy` is [`NegativeRemainderPolicy::Reject`].
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::derive_fixed_allowance;
/// use compensation_engine::config::NegativeRemainderPolicy;
/// use compensation_engine::models::CompensationInput;
/// use rust_decimal::Decimal;
///
/// let input = CompensationInput {
///     annual_ctc: Decimal::new(120000, 0),
///     basic_percentage: Decimal::new(50, 0),
///     hra_percentage: Decimal::new(50, 0),
///     conveyance_allowance: Decimal::ZERO,
///     fixed_allowance: Decimal::ZERO,
/// };
///
/// let result = derive_fixed_allowance(&input, NegativeRemainderPolicy::Reject, 1).unwrap();
/// assert_eq!(result.fixed_allowance, Decimal::new(2500, 0));
/// ```
pub fn derive_fixed_allowance(
    input: &CompensationInput,
    policy: NegativeRemainderPolicy,
    step_number: u32,
) -> EngineResult<FixedAllowanceResult> {
    let monthly_ctc = round_half_up(input.annual_ctc / MONTHS_PER_YEAR);
    let basic_monthly = monthly_amount_of(input, input.basic_percentage, SalaryBasis::Ctc);
    let hra_monthly = monthly_amount_of(input, input.hra_percentage, SalaryBasis::Basic);
    let raw_remainder = monthly_ctc
        .saturating_sub(basic_monthly)
        .saturating_sub(hra_monthly)
        .saturating_sub(input.conveyance_allowance);

    let negative = raw_remainder < Decimal::ZERO;
    let (fixed_allowance, warning) = match (negative, policy) {
        (false, _) => (raw_remainder, None),
        (true, NegativeRemainderPolicy::Reject) => {
            return Err(EngineError::NegativeFixedAllowance {
                amount: raw_remainder,
            });
        }
        (true, NegativeRemainderPolicy::ClampToZero) => (
            Decimal::ZERO,
            Some(AuditWarning {
                code: "NEGATIVE_FIXED_ALLOWANCE_CLAMPED".to_string(),
                message: format!(
                    "Derived fixed allowance ${} was clamped to $0",
                    raw_remainder
                ),
                severity: "medium".to_string(),
            }),
        ),
        (true, NegativeRemainderPolicy::Allow) => (
            raw_remainder,
            Some(AuditWarning {
                code: "NEGATIVE_FIXED_ALLOWANCE".to_string(),
                message: format!(
                    "Derived fixed allowance ${} is negative; components exceed the monthly CTC",
                    raw_remainder
                ),
                severity: "high".to_string(),
            }),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "fixed_allowance_remainder".to_string(),
        rule_name: "Fixed Allowance Remainder".to_string(),
        input: serde_json::json!({
            "annual_ctc": input.annual_ctc.to_string(),
            "monthly_ctc": monthly_ctc.to_string(),
            "basic_monthly": basic_monthly.to_string(),
            "hra_monthly": hra_monthly.to_string(),
            "conveyance_allowance": input.conveyance_allowance.to_string(),
            "policy": policy.as_str()
        }),
        output: serde_json::json!({
            "raw_remainder": raw_remainder.to_string(),
            "fixed_allowance": fixed_allowance.to_string()
        }),
        reasoning: format!(
            "${} - ${} - ${} - ${} = ${}",
            monthly_ctc, basic_monthly, hra_monthly, input.conveyance_allowance, raw_remainder
        ),
    };

    Ok(FixedAllowanceResult {
        fixed_allowance,
        raw_remainder,
        audit_step,
        warning,
    })
}

/// The outcome of applying a revision to a compensation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionCalculation {
    /// The revised input with the derived fixed allowance.
    pub revised: CompensationInput,
    /// The breakdown of the revised input.
    pub breakdown: CompensationBreakdown,
    /// Audit steps: the remainder derivation, then the breakdown.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings from the remainder and the breakdown.
    pub warnings: Vec<AuditWarning>,
}

/// Applies a validated revision: replaces CTC, percentages and conveyance,
/// derives the fixed allowance and computes the new breakdown.
///
/// # Errors
///
/// Returns [`EngineError::AmountOutOfRange`] when a revised amount is outside
/// the supported range, and [`EngineError::NegativeFixedAllowance`] when the
/// policy rejects a negative remainder.
pub fn apply_revision(
    revision: &SalaryRevision,
    policy: NegativeRemainderPolicy,
    mode: AnnualisationMode,
) -> EngineResult<RevisionCalculation> {
    let mut revised = CompensationInput {
        annual_ctc: revision.new_annual_ctc,
        basic_percentage: revision.basic_percentage,
        hra_percentage: revision.hra_percentage,
        conveyance_allowance: revision.conveyance_allowance,
        fixed_allowance: Decimal::ZERO,
    };
    validate_amounts(&revised)?;

    let remainder = derive_fixed_allowance(&revised, policy, 1)?;
    revised.fixed_allowance = remainder.fixed_allowance;

    let calculation = calculate_breakdown(&revised, mode, 2);

    let mut audit_steps = Vec::with_capacity(calculation.audit_steps.len() + 1);
    audit_steps.push(remainder.audit_step);
    audit_steps.extend(calculation.audit_steps);

    let mut warnings: Vec<AuditWarning> = remainder.warning.into_iter().collect();
    warnings.extend(calculation.warnings);

    Ok(RevisionCalculation {
        revised,
        breakdown: calculation.breakdown,
        audit_steps,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn input(annual_ctc: &str, basic: &str, hra: &str, conveyance: &str) -> CompensationInput {
        CompensationInput {
            annual_ctc: dec(annual_ctc),
            basic_percentage: dec(basic),
            hra_percentage: dec(hra),
            conveyance_allowance: dec(conveyance),
            fixed_allowance: Decimal::ZERO,
        }
    }

    fn revision(new_annual_ctc: &str, basic: &str, hra: &str, conveyance: &str) -> SalaryRevision {
        SalaryRevision {
            new_annual_ctc: dec(new_annual_ctc),
            basic_percentage: dec(basic),
            hra_percentage: dec(hra),
            conveyance_allowance: dec(conveyance),
            effective_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            reason: None,
        }
    }

    #[test]
    fn test_remainder_reference_case() {
        // round(120000 / 12) - round(120000 x 50% / 12) - round(5000 x 50%) = 2500
        let result = derive_fixed_allowance(
            &input("120000", "50", "50", "0"),
            NegativeRemainderPolicy::Reject,
            1,
        )
        .unwrap();

        assert_eq!(result.fixed_allowance, dec("2500"));
        assert_eq!(result.raw_remainder, dec("2500"));
        assert!(result.warning.is_none());
        assert_eq!(result.audit_step.rule_id, "fixed_allowance_remainder");
        assert!(result.audit_step.reasoning.contains("$10000 - $5000 - $2500 - $0 = $2500"));
    }

    #[test]
    fn test_remainder_subtracts_conveyance() {
        let result = derive_fixed_allowance(
            &input("600000", "40", "50", "1600"),
            NegativeRemainderPolicy::Reject,
            1,
        )
        .unwrap();

        // 50000 - 20000 - 10000 - 1600
        assert_eq!(result.fixed_allowance, dec("18400"));
    }

    #[test]
    fn test_negative_remainder_rejected() {
        let result = derive_fixed_allowance(
            &input("120000", "80", "50", "1600"),
            NegativeRemainderPolicy::Reject,
            1,
        );

        // 10000 - 8000 - 4000 - 1600 = -3600
        match result {
            Err(EngineError::NegativeFixedAllowance { amount }) => {
                assert_eq!(amount, dec("-3600"));
            }
            other => panic!("Expected NegativeFixedAllowance, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_remainder_clamped() {
        let result = derive_fixed_allowance(
            &input("120000", "80", "50", "1600"),
            NegativeRemainderPolicy::ClampToZero,
            1,
        )
        .unwrap();

        assert!(result.fixed_allowance.is_zero());
        assert_eq!(result.raw_remainder, dec("-3600"));
        let warning = result.warning.unwrap();
        assert_eq!(warning.code, "NEGATIVE_FIXED_ALLOWANCE_CLAMPED");
        assert_eq!(warning.severity, "medium");
    }

    #[test]
    fn test_negative_remainder_allowed() {
        let result = derive_fixed_allowance(
            &input("120000", "80", "50", "1600"),
            NegativeRemainderPolicy::Allow,
            1,
        )
        .unwrap();

        assert_eq!(result.fixed_allowance, dec("-3600"));
        assert_eq!(result.warning.unwrap().code, "NEGATIVE_FIXED_ALLOWANCE");
        assert_eq!(result.audit_step.input["policy"].as_str().unwrap(), "allow");
    }

    #[test]
    fn test_zero_remainder_is_not_negative() {
        let result = derive_fixed_allowance(
            &input("120000", "100", "0", "0"),
            NegativeRemainderPolicy::Reject,
            1,
        )
        .unwrap();

        assert!(result.fixed_allowance.is_zero());
        assert!(result.warning.is_none());
    }

    #[test]
    fn test_apply_revision_builds_breakdown() {
        let outcome = apply_revision(
            &revision("120000", "50", "50", "0"),
            NegativeRemainderPolicy::Reject,
            AnnualisationMode::Legacy,
        )
        .unwrap();

        assert_eq!(outcome.revised.fixed_allowance, dec("2500"));
        assert_eq!(outcome.breakdown.fixed_allowance.annual, dec("30000"));
        assert_eq!(outcome.breakdown.total_monthly_ctc, dec("10000"));
        assert_eq!(outcome.breakdown.total_annual_ctc, dec("120000"));
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_apply_revision_audit_steps_are_sequential() {
        let outcome = apply_revision(
            &revision("600000", "40", "50", "1600"),
            NegativeRemainderPolicy::Reject,
            AnnualisationMode::Legacy,
        )
        .unwrap();

        let numbers: Vec<u32> = outcome.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(outcome.audit_steps[0].rule_id, "fixed_allowance_remainder");
    }

    #[test]
    fn test_apply_revision_monthly_total_matches_monthly_ctc() {
        let outcome = apply_revision(
            &revision("100000", "50", "50", "0"),
            NegativeRemainderPolicy::Reject,
            AnnualisationMode::Legacy,
        )
        .unwrap();

        // round(100000 / 12) = 8333; basic 4167, hra 2084, fixed 2082
        assert_eq!(outcome.revised.fixed_allowance, dec("2082"));
        assert_eq!(outcome.breakdown.total_monthly_ctc, dec("8333"));
    }

    #[test]
    fn test_apply_revision_propagates_rejection() {
        let result = apply_revision(
            &revision("120000", "80", "50", "1600"),
            NegativeRemainderPolicy::Reject,
            AnnualisationMode::Legacy,
        );

        assert!(matches!(
            result,
            Err(EngineError::NegativeFixedAllowance { .. })
        ));
    }

    #[test]
    fn test_apply_revision_clamp_carries_warning() {
        let outcome = apply_revision(
            &revision("120000", "80", "50", "1600"),
            NegativeRemainderPolicy::ClampToZero,
            AnnualisationMode::Corrected,
        )
        .unwrap();

        assert!(outcome.revised.fixed_allowance.is_zero());
        // 8000 + 4000 + 1600 exceeds the 10000 monthly CTC
        assert_eq!(outcome.breakdown.total_monthly_ctc, dec("13600"));
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].code, "NEGATIVE_FIXED_ALLOWANCE_CLAMPED");
    }

    #[test]
    fn test_apply_revision_rejects_ctc_beyond_supported_range() {
        let result = apply_revision(
            &revision("1000000000000000000000000000", "100", "0", "0"),
            NegativeRemainderPolicy::Allow,
            AnnualisationMode::Legacy,
        );

        match result {
            Err(EngineError::AmountOutOfRange { field, .. }) => {
                assert_eq!(field, "annual_ctc");
            }
            other => panic!("Expected AmountOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_remainder_at_decimal_max_saturates() {
        let mut input = input("0", "100", "0", "0");
        input.annual_ctc = Decimal::MAX;
        input.conveyance_allowance = Decimal::MIN;

        let result = derive_fixed_allowance(&input, NegativeRemainderPolicy::Allow, 1).unwrap();
        assert_eq!(result.raw_remainder, Decimal::MAX);
    }
}
