//! Price source configuration.

use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::application::PlausibilityBounds;

/// Selectors tried in order when none are configured.
pub const DEFAULT_SELECTORS: &[&str] = &[
    "strong._ngcontent-ng-c1534065909",
    "div.token-price",
    "div.big-price",
    r#"span[class*="ng-tns"][class*="ng-star-inserted"]"#,
];

/// Where and how to read the price.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Page that renders the token price. Required.
    #[serde(default)]
    pub url: String,
    /// CSS selectors, tried in order.
    #[serde(default = "default_selectors")]
    pub selectors: Vec<String>,
    #[serde(default = "default_page_load_timeout_ms")]
    pub page_load_timeout_ms: u64,
    /// How long each selector may wait for elements to appear.
    #[serde(default = "default_selector_timeout_ms")]
    pub selector_timeout_ms: u64,
    /// Exclusive lower bound for an accepted price.
    #[serde(default = "default_min_price")]
    pub min_price: Decimal,
    /// Exclusive upper bound for an accepted price.
    #[serde(default = "default_max_price")]
    pub max_price: Decimal,
}

fn default_selectors() -> Vec<String> {
    DEFAULT_SELECTORS.iter().map(|s| (*s).to_string()).collect()
}

const fn default_page_load_timeout_ms() -> u64 {
    15_000
}

const fn default_selector_timeout_ms() -> u64 {
    3_000
}

fn default_min_price() -> Decimal {
    dec!(0.001)
}

fn default_max_price() -> Decimal {
    Decimal::ONE
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            selectors: default_selectors(),
            page_load_timeout_ms: default_page_load_timeout_ms(),
            selector_timeout_ms: default_selector_timeout_ms(),
            min_price: default_min_price(),
            max_price: default_max_price(),
        }
    }
}

impl SourceConfig {
    #[must_use]
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_millis(self.page_load_timeout_ms)
    }

    #[must_use]
    pub fn selector_timeout(&self) -> Duration {
        Duration::from_millis(self.selector_timeout_ms)
    }

    #[must_use]
    pub fn bounds(&self) -> PlausibilityBounds {
        PlausibilityBounds {
            min: self.min_price,
            max: self.max_price,
        }
    }
}
