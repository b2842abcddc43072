//! Shared numeric helpers used across the calculation modules.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up
/// rounding.
///
/// This follows standard financial rounding conventions where values at
/// exactly 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use forecast_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Division that short-circuits a zero denominator to `None` instead of
/// letting it reach the UI as a panic or a nonsense figure.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use forecast_core::calculations::common::checked_ratio;
///
/// assert_eq!(checked_ratio(dec!(10), dec!(4)), Some(dec!(2.5)));
/// assert_eq!(checked_ratio(dec!(10), dec!(0)), None);
/// ```
pub fn checked_ratio(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        None
    } else {
        Some(numerator / denominator)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(10.114)), dec!(10.11));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(10.115)), dec!(10.12));
    }

    #[test]
    fn round_half_up_rounds_negative_values_away_from_zero() {
        assert_eq!(round_half_up(dec!(-10.115)), dec!(-10.12));
    }

    #[test]
    fn round_half_up_preserves_already_rounded_values() {
        assert_eq!(round_half_up(dec!(10.11)), dec!(10.11));
    }

    // =========================================================================
    // checked_ratio tests
    // =========================================================================

    #[test]
    fn checked_ratio_divides_nonzero_denominator() {
        assert_eq!(checked_ratio(dec!(9), dec!(3)), Some(dec!(3)));
    }

    #[test]
    fn checked_ratio_short_circuits_zero_denominator() {
        assert_eq!(checked_ratio(dec!(9), Decimal::ZERO), None);
    }

    #[test]
    fn checked_ratio_allows_negative_denominator() {
        assert_eq!(checked_ratio(dec!(9), dec!(-3)), Some(dec!(-3)));
    }
}
