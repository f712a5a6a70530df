//! Breakdown and calculation result models for the Compensation Engine.
//!
//! This module contains the [`CompensationBreakdown`] produced by the
//! calculator, and the [`CalculationResult`] / [`RevisionResult`] envelopes
//! that add identifiers, timestamps and an audit trace around it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CompensationInput;
use crate::config::AnnualisationMode;

/// A salary line item.
///
/// # Example
///
/// ```
/// use compensation_engine::models::ComponentKind;
///
/// assert_eq!(ComponentKind::Hra.label(), "House Rent Allowance");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Basic pay, a percentage of CTC.
    Basic,
    /// House Rent Allowance, a percentage of Basic.
    Hra,
    /// Fixed monthly conveyance allowance.
    Conveyance,
    /// Fixed allowance, given directly or derived as a remainder.
    FixedAllowance,
}

impl ComponentKind {
    /// Returns the display label for the component.
    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::Basic => "Basic",
            ComponentKind::Hra => "House Rent Allowance",
            ComponentKind::Conveyance => "Conveyance Allowance",
            ComponentKind::FixedAllowance => "Fixed Allowance",
        }
    }
}

/// Monthly and annual amounts of one salary component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Which component this line describes.
    pub component: ComponentKind,
    /// The monthly amount.
    pub monthly: Decimal,
    /// The annual amount.
    pub annual: Decimal,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(component: ComponentKind, monthly: Decimal, annual: Decimal) -> Self {
        Self {
            component,
            monthly,
            annual,
        }
    }

    /// Returns `annual - 12 x monthly`, the residue left by rounding the
    /// annual and monthly figures independently.
    pub fn annualisation_residue(&self) -> Decimal {
        self.annual
            .saturating_sub(self.monthly.saturating_mul(Decimal::from(12)))
    }
}

/// A full monthly/annual salary breakdown.
///
/// # Example
///
/// ```
/// use compensation_engine::calculation::compute_breakdown;
/// use compensation_engine::models::CompensationInput;
///
/// let breakdown = compute_breakdown(&CompensationInput::zero());
/// assert!(breakdown.total_annual_ctc.is_zero());
/// assert_eq!(breakdown.line_items().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationBreakdown {
    /// Basic pay.
    pub basic: LineItem,
    /// House Rent Allowance.
    pub hra: LineItem,
    /// Conveyance allowance.
    pub conveyance: LineItem,
    /// Fixed allowance.
    pub fixed_allowance: LineItem,
    /// Rounded sum of the monthly amounts.
    pub total_monthly_ctc: Decimal,
    /// Rounded sum of the annual amounts.
    pub total_annual_ctc: Decimal,
}

impl CompensationBreakdown {
    /// Returns the line items in display order.
    pub fn line_items(&self) -> [&LineItem; 4] {
        [&self.basic, &self.hra, &self.conveyance, &self.fixed_allowance]
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag results that were produced but may need attention, such
/// as a clamped fixed allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The result of a breakdown calculation, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The employee the calculation is for, when it came from a stored record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// How annual figures were derived.
    pub annualisation: AnnualisationMode,
    /// The inputs the breakdown was computed from.
    pub input: CompensationInput,
    /// The computed breakdown.
    pub breakdown: CompensationBreakdown,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

/// The result of applying a salary revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The employee the revision applies to, when it came from a stored record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// Annual CTC before the revision.
    pub previous_annual_ctc: Decimal,
    /// The revised inputs, with the derived fixed allowance filled in.
    pub revised: CompensationInput,
    /// The breakdown of the revised inputs.
    pub breakdown: CompensationBreakdown,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
