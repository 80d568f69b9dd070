//! Market capitalization derived from price and fixed supply.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const BILLION: Decimal = dec!(1000000000);
const MILLION: Decimal = dec!(1000000);

/// Raw capitalization together with its abbreviated rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketCap {
    /// `price * total_supply`, unrounded.
    pub raw: Decimal,
    /// `$1.23B` / `$456.78M` style string.
    pub formatted: String,
}

impl MarketCap {
    /// Compute the capitalization for `price` at `total_supply` tokens.
    ///
    /// Unlike prices, the abbreviated figure is rounded to two places.
    #[must_use]
    pub fn compute(price: Decimal, total_supply: u64) -> Self {
        let raw = price * Decimal::from(total_supply);
        let formatted = if raw >= BILLION {
            format!("${}B", two_places(raw / BILLION))
        } else {
            format!("${}M", two_places(raw / MILLION))
        };
        Self { raw, formatted }
    }
}

fn two_places(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    rounded
}
