//! Shared rounding helpers for deduction calculations.

use rust_decimal::Decimal;

/// Rounds a monetary value to exactly two decimal places, half away from zero.
///
/// Values at exactly 0.005 round up to 0.01. Applied once to accumulated
/// totals, never to per-bracket intermediates.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use inss_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(119.324)), dec!(119.32));
/// assert_eq!(round_half_up(dec!(119.325)), dec!(119.33));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a percentage to exactly one decimal place, half away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use inss_core::calculations::common::round_tenth;
///
/// assert_eq!(round_tenth(dec!(33.333)), dec!(33.3));
/// assert_eq!(round_tenth(dec!(66.666)), dec!(66.7));
/// ```
pub fn round_tenth(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
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
        let result = round_half_up(dec!(78.374));

        assert_eq!(result, dec!(78.37));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        let result = round_half_up(dec!(78.375));

        assert_eq!(result, dec!(78.38));
    }

    #[test]
    fn round_half_up_rounds_up_above_midpoint() {
        let result = round_half_up(dec!(78.376));

        assert_eq!(result, dec!(78.38));
    }

    #[test]
    fn round_half_up_preserves_already_rounded_values() {
        let result = round_half_up(dec!(78.38));

        assert_eq!(result, dec!(78.38));
    }

    #[test]
    fn round_half_up_handles_zero() {
        let result = round_half_up(dec!(0.00));

        assert_eq!(result, dec!(0.00));
    }

    #[test]
    fn round_half_up_handles_sub_cent_values() {
        let result = round_half_up(dec!(0.001));

        assert_eq!(result, dec!(0.00));
    }

    // =========================================================================
    // round_tenth tests
    // =========================================================================

    #[test]
    fn round_tenth_rounds_down_below_midpoint() {
        let result = round_tenth(dec!(33.333));

        assert_eq!(result, dec!(33.3));
    }

    #[test]
    fn round_tenth_rounds_up_at_midpoint() {
        let result = round_tenth(dec!(25.05));

        assert_eq!(result, dec!(25.1));
    }

    #[test]
    fn round_tenth_handles_exact_percentages() {
        let result = round_tenth(dec!(25.0));

        assert_eq!(result, dec!(25.0));
    }
}
