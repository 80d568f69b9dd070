//! Token economics used for capitalization and display.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    /// Circulating supply multiplied into the market cap.
    #[serde(default = "default_total_supply")]
    pub total_supply: u64,
    /// Fractional digits kept when comparing and displaying prices.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

const fn default_total_supply() -> u64 {
    1_000_000_000
}

const fn default_decimal_places() -> u32 {
    5
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            total_supply: default_total_supply(),
            decimal_places: default_decimal_places(),
        }
    }
}
