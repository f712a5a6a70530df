//! Validation of compensation inputs.
//!
//! The calculator accepts any input. Callers check that amounts are within
//! the supported range before calculating, and that a record is complete
//! before it is persisted.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::CompensationInput;

/// Largest supported magnitude of a monetary amount (10^15).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Largest supported magnitude of a percentage.
pub const MAX_PERCENTAGE: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);

/// Checks that every amount and percentage of `input` is within the range
/// the calculator supports without saturating.
///
/// Negative values and percentages above 100 are still accepted.
///
/// # Errors
///
/// Returns [`EngineError::AmountOutOfRange`] for the first field whose
/// magnitude exceeds [`MAX_AMOUNT`] or [`MAX_PERCENTAGE`].
pub fn validate_amounts(input: &CompensationInput) -> EngineResult<()> {
    let fields = [
        ("annual_ctc", input.annual_ctc, MAX_AMOUNT),
        ("basic_percentage", input.basic_percentage, MAX_PERCENTAGE),
        ("hra_percentage", input.hra_percentage, MAX_PERCENTAGE),
        ("conveyance_allowance", input.conveyance_allowance, MAX_AMOUNT),
        ("fixed_allowance", input.fixed_allowance, MAX_AMOUNT),
    ];

    for (field, value, limit) in fields {
        if value.abs() > limit {
            return Err(EngineError::AmountOutOfRange {
                field: field.to_string(),
                limit,
                value,
            });
        }
    }
    Ok(())
}

/// Checks that a compensation input can be saved.
///
/// `annual_ctc` must be greater than zero and every field must pass
/// [`validate_amounts`]. Percentages above 100 and negative allowances are
/// accepted.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::validate_for_save;
/// use compensation_engine::models::CompensationInput;
///
/// assert!(validate_for_save(&CompensationInput::zero()).is_err());
/// ```
pub fn validate_for_save(input: &CompensationInput) -> EngineResult<()> {
    if input.annual_ctc <= Decimal::ZERO {
        return Err(EngineError::InvalidCompensation {
            field: "annual_ctc".to_string(),
            message: format!("must be greater than zero, got {}", input.annual_ctc),
        });
    }
    validate_amounts(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn with_ctc(annual_ctc: &str) -> CompensationInput {
        CompensationInput {
            annual_ctc: dec(annual_ctc),
            ..CompensationInput::zero()
        }
    }

    #[test]
    fn test_positive_ctc_is_valid() {
        assert!(validate_for_save(&with_ctc("600000")).is_ok());
        assert!(validate_for_save(&with_ctc("0.01")).is_ok());
    }

    #[test]
    fn test_zero_ctc_is_rejected() {
        match validate_for_save(&with_ctc("0")) {
            Err(EngineError::InvalidCompensation { field, message }) => {
                assert_eq!(field, "annual_ctc");
                assert!(message.contains("greater than zero"));
            }
            other => panic!("Expected InvalidCompensation, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_ctc_is_rejected() {
        assert!(validate_for_save(&with_ctc("-1")).is_err());
    }

    #[test]
    fn test_max_amount_is_ten_to_the_fifteen() {
        assert_eq!(MAX_AMOUNT, Decimal::from(1_000_000_000_000_000i64));
        assert_eq!(MAX_PERCENTAGE, dec("1000"));
    }

    #[test]
    fn test_amounts_at_the_limit_are_accepted() {
        let input = CompensationInput {
            annual_ctc: MAX_AMOUNT,
            basic_percentage: MAX_PERCENTAGE,
            hra_percentage: -MAX_PERCENTAGE,
            conveyance_allowance: -MAX_AMOUNT,
            fixed_allowance: MAX_AMOUNT,
        };
        assert!(validate_amounts(&input).is_ok());
    }

    #[test]
    fn test_ctc_beyond_limit_is_out_of_range() {
        let input = with_ctc("1000000000000000000000000000");

        match validate_amounts(&input) {
            Err(EngineError::AmountOutOfRange { field, limit, .. }) => {
                assert_eq!(field, "annual_ctc");
                assert_eq!(limit, MAX_AMOUNT);
            }
            other => panic!("Expected AmountOutOfRange, got {:?}", other),
        }
        assert!(validate_for_save(&input).is_err());
    }

    #[test]
    fn test_allowance_at_decimal_min_is_out_of_range() {
        let input = CompensationInput {
            conveyance_allowance: Decimal::MIN,
            ..with_ctc("600000")
        };

        match validate_amounts(&input) {
            Err(EngineError::AmountOutOfRange { field, .. }) => {
                assert_eq!(field, "conveyance_allowance");
            }
            other => panic!("Expected AmountOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_percentage_beyond_limit_is_out_of_range() {
        let input = CompensationInput {
            hra_percentage: dec("1000.01"),
            ..with_ctc("600000")
        };

        match validate_amounts(&input) {
            Err(EngineError::AmountOutOfRange { field, .. }) => {
                assert_eq!(field, "hra_percentage");
            }
            other => panic!("Expected AmountOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_percentages_are_accepted() {
        let input = CompensationInput {
            annual_ctc: dec("600000"),
            basic_percentage: dec("140"),
            hra_percentage: dec("-10"),
            conveyance_allowance: dec("1600"),
            fixed_allowance: dec("0"),
        };
        assert!(validate_for_save(&input).is_ok());
    }
}
