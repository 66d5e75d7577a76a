//! Common utility functions for tax calculations.
//!
//! This module provides shared functionality used by the liability
//! worksheet, including rounding and other common operations.

use rust_decimal::Decimal;

/// Rounds a decimal value to the nearest whole rupee using half-up rounding.
///
/// Return amounts carry no paise, so every intermediate tax figure is
/// rounded to a whole rupee. Values at exactly .50 round away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itr_core::calculations::common::round_rupee;
///
/// assert_eq!(round_rupee(dec!(2500.49)), dec!(2500));
/// assert_eq!(round_rupee(dec!(2500.50)), dec!(2501));
/// assert_eq!(round_rupee(dec!(2501.00)), dec!(2501));
/// assert_eq!(round_rupee(dec!(-2500.50)), dec!(-2501)); // Away from zero
/// ```
pub fn round_rupee(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itr_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100), dec!(200)), dec!(200));
/// assert_eq!(max(dec!(-100), dec!(-200)), dec!(-100));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_rupee tests
    // =========================================================================

    #[test]
    fn round_rupee_rounds_down_below_midpoint() {
        let result = round_rupee(dec!(67500.49));

        assert_eq!(result, dec!(67500));
    }

    #[test]
    fn round_rupee_rounds_up_at_midpoint() {
        let result = round_rupee(dec!(67500.50));

        assert_eq!(result, dec!(67501));
    }

    #[test]
    fn round_rupee_rounds_up_above_midpoint() {
        let result = round_rupee(dec!(67500.51));

        assert_eq!(result, dec!(67501));
    }

    #[test]
    fn round_rupee_handles_negative_values() {
        let result = round_rupee(dec!(-120.50));

        assert_eq!(result, dec!(-121)); // Away from zero
    }

    #[test]
    fn round_rupee_preserves_whole_rupees() {
        let result = round_rupee(dec!(62400));

        assert_eq!(result, dec!(62400));
    }

    #[test]
    fn round_rupee_handles_zero() {
        let result = round_rupee(dec!(0));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn round_rupee_handles_sub_rupee_values() {
        let result = round_rupee(dec!(0.04));

        assert_eq!(result, dec!(0));
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        let result = max(dec!(100), dec!(200));

        assert_eq!(result, dec!(200));
    }

    #[test]
    fn max_returns_first_when_larger() {
        let result = max(dec!(200), dec!(100));

        assert_eq!(result, dec!(200));
    }

    #[test]
    fn max_handles_equal_values() {
        let result = max(dec!(150), dec!(150));

        assert_eq!(result, dec!(150));
    }

    #[test]
    fn max_clamps_negative_against_zero() {
        let result = max(dec!(-50000), dec!(0));

        assert_eq!(result, dec!(0));
    }
}
