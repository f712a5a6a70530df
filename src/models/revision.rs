//! Salary revision models.
//!
//! A [`SalaryRevisionRequest`] arrives with every field optional so that a
//! missing field can be reported by name; [`SalaryRevisionRequest::validate`]
//! turns it into a complete [`SalaryRevision`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A salary revision as submitted, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRevisionRequest {
    /// The new annual cost to company.
    #[serde(default)]
    pub new_annual_ctc: Option<Decimal>,
    /// Percentage of the new CTC allocated to Basic.
    #[serde(default)]
    pub basic_percentage: Option<Decimal>,
    /// Percentage of Basic allocated to HRA.
    #[serde(default)]
    pub hra_percentage: Option<Decimal>,
    /// Fixed monthly conveyance allowance.
    #[serde(default)]
    pub conveyance_allowance: Option<Decimal>,
    /// The date the revision takes effect.
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
    /// Free-text reason for the revision.
    #[serde(default)]
    pub reason: Option<String>,
}

/// A complete, validated salary revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRevision {
    /// The new annual cost to company.
    pub new_annual_ctc: Decimal,
    /// Percentage of the new CTC allocated to Basic.
    pub basic_percentage: Decimal,
    /// Percentage of Basic allocated to HRA.
    pub hra_percentage: Decimal,
    /// Fixed monthly conveyance allowance.
    pub conveyance_allowance: Decimal,
    /// The date the revision takes effect.
    pub effective_date: NaiveDate,
    /// Free-text reason for the revision.
    pub reason: Option<String>,
}

fn required<T>(value: Option<T>, field: &str) -> EngineResult<T> {
    value.ok_or_else(|| EngineError::InvalidRevision {
        field: field.to_string(),
        message: "is required".to_string(),
    })
}

impl SalaryRevisionRequest {
    /// Checks that every required field is present and that the new CTC is
    /// positive.
    ///
    /// Fields are checked in declaration order and the first missing one is
    /// reported. A blank `reason` is normalised to `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use compensation_engine::models::SalaryRevisionRequest;
    ///
    /// let err = SalaryRevisionRequest::default().validate().unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Invalid revision field 'new_annual_ctc': is required"
    /// );
    /// ```
    pub fn validate(self) -> EngineResult<SalaryRevision> {
        let new_annual_ctc = required(self.new_annual_ctc, "new_annual_ctc")?;
        let basic_percentage = required(self.basic_percentage, "basic_percentage")?;
        let hra_percentage = required(self.hra_percentage, "hra_percentage")?;
        let conveyance_allowance = required(self.conveyance_allowance, "conveyance_allowance")?;
        let effective_date = required(self.effective_date, "effective_date")?;

        if new_annual_ctc <= Decimal::ZERO {
            return Err(EngineError::InvalidRevision {
                field: "new_annual_ctc".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        let reason = self
            .reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        Ok(SalaryRevision {
            new_annual_ctc,
            basic_percentage,
            hra_percentage,
            conveyance_allowance,
            effective_date,
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn complete_request() -> SalaryRevisionRequest {
        SalaryRevisionRequest {
            new_annual_ctc: Some(dec("120000")),
            basic_percentage: Some(dec("50")),
            hra_percentage: Some(dec("50")),
            conveyance_allowance: Some(dec("0")),
            effective_date: NaiveDate::from_ymd_opt(2026, 4, 1),
            reason: Some("Annual appraisal".to_string()),
        }
    }

    #[test]
    fn test_complete_request_validates() {
        let revision = complete_request().validate().unwrap();

        assert_eq!(revision.new_annual_ctc, dec("120000"));
        assert_eq!(revision.basic_percentage, dec("50"));
        assert_eq!(
            revision.effective_date,
            NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()
        );
        assert_eq!(revision.reason.as_deref(), Some("Annual appraisal"));
    }

    #[test]
    fn test_missing_field_is_reported_by_name() {
        let mut request = complete_request();
        request.hra_percentage = None;

        match request.validate().unwrap_err() {
            EngineError::InvalidRevision { field, message } => {
                assert_eq!(field, "hra_percentage");
                assert_eq!(message, "is required");
            }
            other => panic!("Expected InvalidRevision, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_effective_date_is_rejected() {
        let mut request = complete_request();
        request.effective_date = None;

        match request.validate().unwrap_err() {
            EngineError::InvalidRevision { field, .. } => assert_eq!(field, "effective_date"),
            other => panic!("Expected InvalidRevision, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_ctc_is_rejected() {
        let mut request = complete_request();
        request.new_annual_ctc = Some(Decimal::ZERO);

        match request.validate().unwrap_err() {
            EngineError::InvalidRevision { field, message } => {
                assert_eq!(field, "new_annual_ctc");
                assert_eq!(message, "must be greater than zero");
            }
            other => panic!("Expected InvalidRevision, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_reason_becomes_none() {
        let mut request = complete_request();
        request.reason = Some("   ".to_string());

        let revision = request.validate().unwrap();
        assert!(revision.reason.is_none());
    }

    #[test]
    fn test_deserialize_partial_request() {
        let json = r#"{ "new_annual_ctc": "720000", "effective_date": "2026-04-01" }"#;

        let request: SalaryRevisionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.new_annual_ctc, Some(dec("720000")));
        assert!(request.basic_percentage.is_none());
    }
}
