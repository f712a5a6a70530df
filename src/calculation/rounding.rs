//! Currency rounding.

use rust_decimal::Decimal;

/// Months in a year; monthly amounts are annual amounts divided by this.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Divisor turning a percentage into a fraction.
pub const PERCENT: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

const HALF: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Rounds to the nearest whole currency unit, ties towards positive infinity.
///
/// This is `floor(x + 0.5)`: `2.5` rounds to `3` and `-2.5` rounds to `-2`.
/// The addition saturates, so values at the edge of the `Decimal` range
/// stay there instead of overflowing.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::round_half_up;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_half_up(Decimal::new(25, 1)), Decimal::new(3, 0));
/// assert_eq!(round_half_up(Decimal::new(-25, 1)), Decimal::new(-2, 0));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.saturating_add(HALF).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_rounds_ties_up() {
        assert_eq!(round_half_up(dec("0.5")), dec("1"));
        assert_eq!(round_half_up(dec("2.5")), dec("3"));
        assert_eq!(round_half_up(dec("8333.5")), dec("8334"));
    }

    #[test]
    fn test_negative_ties_round_towards_positive_infinity() {
        assert_eq!(round_half_up(dec("-2.5")), dec("-2"));
        assert_eq!(round_half_up(dec("-2.51")), dec("-3"));
    }

    #[test]
    fn test_rounds_to_nearest() {
        assert_eq!(round_half_up(dec("8333.333333")), dec("8333"));
        assert_eq!(round_half_up(dec("4166.6667")), dec("4167"));
        assert_eq!(round_half_up(dec("-0.4")), dec("0"));
    }

    #[test]
    fn test_whole_values_unchanged() {
        assert_eq!(round_half_up(dec("20000")), dec("20000"));
        assert_eq!(round_half_up(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_extreme_values_saturate() {
        assert_eq!(round_half_up(Decimal::MAX), Decimal::MAX);
        assert!(round_half_up(Decimal::MIN).is_sign_negative());
    }

    #[test]
    fn test_result_has_no_fractional_digits() {
        assert_eq!(round_half_up(dec("10.75")).scale(), 0);
    }
}
