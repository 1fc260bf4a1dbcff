//! Decimal helpers shared by the analytics modules.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Truncates toward zero at reporting precision (two decimal places).
/// Truncation, not rounding: a value already at two decimals passes
/// through unchanged, so repeated computation is idempotent.
pub fn truncate_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_DECIMAL_PRECISION, RoundingStrategy::ToZero)
}

/// Fixed two-decimal string for the presentation layer. The value is
/// truncated first, so formatting only pads trailing zeros.
pub fn display_amount(value: Decimal) -> String {
    format!("{:.2}", truncate_display(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_truncates_toward_zero_both_signs() {
        assert_eq!(truncate_display(dec!(18.1818)), dec!(18.18));
        assert_eq!(truncate_display(dec!(-18.1818)), dec!(-18.18));
        assert_eq!(truncate_display(dec!(13.6363)), dec!(13.63));
        assert_eq!(truncate_display(dec!(-13.6363)), dec!(-13.63));
    }

    #[test]
    fn test_truncation_is_idempotent() {
        let once = truncate_display(dec!(7.9999));
        assert_eq!(truncate_display(once), once);
    }

    #[test]
    fn test_display_amount_pads_trailing_zeros() {
        assert_eq!(display_amount(dec!(5)), "5.00");
        assert_eq!(display_amount(dec!(5.1)), "5.10");
        assert_eq!(display_amount(dec!(-0.5)), "-0.50");
        assert_eq!(display_amount(Decimal::ZERO), "0.00");
    }
}
