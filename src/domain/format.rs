//! Truncation and display of prices.
//!
//! Debounce comparisons use [`truncate`]; message text uses
//! [`format_display`]. The two differ only in trailing zero padding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Drop every fractional digit past `places`. Never rounds.
///
/// Values that already have `places` or fewer fractional digits are
/// returned unchanged.
#[must_use]
pub fn truncate(value: Decimal, places: u32) -> Decimal {
    value.round_dp_with_strategy(places, RoundingStrategy::ToZero)
}

/// Truncate to `places` and render with exactly `places` fractional digits.
///
/// `0.12` at 5 places renders as `0.12000`; `2` renders as `2.00000`.
#[must_use]
pub fn format_display(value: Decimal, places: u32) -> String {
    let mut padded = truncate(value, places);
    padded.rescale(places);
    padded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn truncate_does_not_round_up() {
        assert_eq!(truncate(dec!(0.123456789), 5), dec!(0.12345));
        assert_eq!(truncate(dec!(0.099999), 3), dec!(0.099));
    }

    #[test]
    fn truncate_keeps_short_values() {
        let short = truncate(dec!(0.12), 5);
        assert_eq!(short, dec!(0.12));
        assert_eq!(short.scale(), 2);
    }

    #[test]
    fn truncate_compares_numerically_across_scales() {
        assert_eq!(truncate(dec!(0.123450), 5), truncate(dec!(0.12345), 5));
        assert_eq!(truncate(dec!(0.123459), 5), dec!(0.12345));
    }

    #[test]
    fn display_pads_to_places() {
        assert_eq!(format_display(dec!(0.12), 5), "0.12000");
        assert_eq!(format_display(dec!(0.05), 5), "0.05000");
    }

    #[test]
    fn display_truncates_long_values() {
        assert_eq!(format_display(dec!(0.123456789), 5), "0.12345");
    }

    #[test]
    fn display_adds_fraction_to_whole_numbers() {
        assert_eq!(format_display(dec!(2), 5), "2.00000");
        assert_eq!(format_display(dec!(3), 2), "3.00");
    }

    #[test]
    fn zero_places_renders_integer_part() {
        assert_eq!(format_display(dec!(0.98), 0), "0");
    }
}
