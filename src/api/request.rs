//! Request types for the Compensation Engine API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{AnnualisationMode, CalculatorConfig};
use crate::models::{CompensationInput, EmployeeRecord, SalaryRevisionRequest};

/// Query parameters accepted by the breakdown endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreakdownQuery {
    /// Overrides the configured annualisation mode.
    #[serde(default)]
    pub annualisation: Option<AnnualisationMode>,
}

/// Request body for the `/compensation/revision` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionCalculationRequest {
    /// The compensation before the revision.
    pub current: CompensationInput,
    /// The revision to apply.
    pub revision: SalaryRevisionRequest,
}

/// Request body for `PUT /employees/{id}`.
///
/// Only the annual CTC is required; omitted percentages and allowances are
/// taken from the configured defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRecordRequest {
    /// Display name.
    pub name: String,
    /// Department the employee belongs to.
    #[serde(default)]
    pub department: Option<String>,
    /// Job title.
    #[serde(default)]
    pub designation: Option<String>,
    /// The date the employee joined.
    pub date_of_joining: NaiveDate,
    /// Annual cost to company.
    pub annual_ctc: Decimal,
    /// Percentage of CTC allocated to Basic.
    #[serde(default)]
    pub basic_percentage: Option<Decimal>,
    /// Percentage of Basic allocated to HRA.
    #[serde(default)]
    pub hra_percentage: Option<Decimal>,
    /// Fixed monthly conveyance allowance.
    #[serde(default)]
    pub conveyance_allowance: Option<Decimal>,
    /// Fixed monthly allowance.
    #[serde(default)]
    pub fixed_allowance: Option<Decimal>,
}

impl EmployeeRecordRequest {
    /// Builds the compensation input, filling gaps from `config`.
    pub fn compensation(&self, config: &CalculatorConfig) -> CompensationInput {
        let defaults = CompensationInput::with_defaults(self.annual_ctc, config);
        CompensationInput {
            annual_ctc: self.annual_ctc,
            basic_percentage: self.basic_percentage.unwrap_or(defaults.basic_percentage),
            hra_percentage: self.hra_percentage.unwrap_or(defaults.hra_percentage),
            conveyance_allowance: self
                .conveyance_allowance
                .unwrap_or(defaults.conveyance_allowance),
            fixed_allowance: self.fixed_allowance.unwrap_or(defaults.fixed_allowance),
        }
    }

    /// Builds the record stored under `id`, keeping the revision summary of
    /// the record it replaces.
    pub fn into_record(
        self,
        id: &str,
        config: &CalculatorConfig,
        existing: Option<EmployeeRecord>,
    ) -> EmployeeRecord {
        let compensation = self.compensation(config);
        EmployeeRecord {
            id: id.to_string(),
            name: self.name,
            department: self.department,
            designation: self.designation,
            date_of_joining: self.date_of_joining,
            compensation,
            last_revision: existing.and_then(|record| record.last_revision),
        }
    }
}
