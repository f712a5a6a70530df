//! Employee record model.
//!
//! This module defines the [`EmployeeRecord`] that owns a compensation
//! input, together with the summary of its most recent salary revision.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CompensationInput;

/// Summary of the last salary revision applied to a record.
///
/// Only the most recent revision is kept; the record is updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionSummary {
    /// The date the revision takes effect.
    pub effective_date: NaiveDate,
    /// Annual CTC before the revision.
    pub previous_annual_ctc: Decimal,
    /// Annual CTC after the revision.
    pub new_annual_ctc: Decimal,
    /// Free-text reason for the revision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// An employee together with the compensation structure it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Department the employee belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Job title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    /// The date the employee joined.
    pub date_of_joining: NaiveDate,
    /// The salary structure inputs.
    pub compensation: CompensationInput,
    /// The most recent salary revision, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_revision: Option<RevisionSummary>,
}
