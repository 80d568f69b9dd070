//! Multi-strategy price extraction from a rendered page.
//!
//! Strategies are tried in order against a single page load. The first
//! strategy to produce a plausible price wins; anything else (load failure,
//! missing selectors, unparseable text) collapses into an
//! [`ExtractionError`] that the poll loop treats as "try again next tick".

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, trace};

use crate::domain::Price;
use crate::error::ExtractionError;
use crate::port::{Page, Renderer};

static DECIMAL_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+\.\d+)").expect("decimal number pattern is valid"));

/// Exclusive sanity bounds for extracted prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlausibilityBounds {
    pub min: Price,
    pub max: Price,
}

impl Default for PlausibilityBounds {
    fn default() -> Self {
        Self {
            min: dec!(0.001),
            max: Decimal::ONE,
        }
    }
}

impl PlausibilityBounds {
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        self.min < price && price < self.max
    }
}

/// Parse a price out of element text.
///
/// The text must carry a `$` or start with `0.`; currency symbols and
/// thousands separators are removed and the first `digits.digits` run is
/// parsed. Bounds are not checked here.
#[must_use]
pub fn parse_price_text(text: &str) -> Option<Price> {
    if !(text.contains('$') || text.trim().starts_with("0.")) {
        return None;
    }
    let cleaned = text.replace(['$', ','], "");
    let number = DECIMAL_NUMBER.captures(&cleaned)?.get(1)?.as_str();
    Decimal::from_str(number).ok()
}

/// One way of locating the price on a page.
#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    /// Label used in logs.
    fn name(&self) -> &str;

    /// Return the first plausible price this strategy can find, if any.
    async fn extract(&self, page: &dyn Page, bounds: &PlausibilityBounds) -> Option<Price>;
}

/// Scan every element matching a CSS selector.
#[derive(Debug, Clone)]
pub struct SelectorStrategy {
    selector: String,
    wait: Duration,
}

impl SelectorStrategy {
    #[must_use]
    pub fn new(selector: impl Into<String>, wait: Duration) -> Self {
        Self {
            selector: selector.into(),
            wait,
        }
    }
}

#[async_trait]
impl ExtractionStrategy for SelectorStrategy {
    fn name(&self) -> &str {
        &self.selector
    }

    async fn extract(&self, page: &dyn Page, bounds: &PlausibilityBounds) -> Option<Price> {
        let elements = match page.query_all(&self.selector, self.wait).await {
            Ok(elements) => elements,
            Err(e) => {
                debug!(selector = %self.selector, error = %e, "Selector produced no elements");
                return None;
            }
        };

        for element in elements {
            let text = match element.text().await {
                Ok(text) => text,
                Err(e) => {
                    trace!(selector = %self.selector, error = %e, "Skipping unreadable element");
                    continue;
                }
            };
            match parse_price_text(&text) {
                Some(price) if bounds.contains(price) => return Some(price),
                Some(price) => {
                    trace!(selector = %self.selector, %price, "Rejected implausible price");
                }
                None => {}
            }
        }
        None
    }
}

/// Loads the target page and runs strategies in order.
pub struct PriceExtractor {
    renderer: Arc<dyn Renderer>,
    url: String,
    page_load_timeout: Duration,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    bounds: PlausibilityBounds,
}

impl PriceExtractor {
    #[must_use]
    pub fn new(renderer: Arc<dyn Renderer>, url: impl Into<String>) -> Self {
        Self {
            renderer,
            url: url.into(),
            page_load_timeout: Duration::from_secs(15),
            strategies: Vec::new(),
            bounds: PlausibilityBounds::default(),
        }
    }

    #[must_use]
    pub fn with_page_load_timeout(mut self, timeout: Duration) -> Self {
        self.page_load_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: PlausibilityBounds) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: Box<dyn ExtractionStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Append one [`SelectorStrategy`] per selector, keeping order.
    #[must_use]
    pub fn with_selectors<I, S>(mut self, selectors: I, wait: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.strategies.extend(
            selectors
                .into_iter()
                .map(|s| Box::new(SelectorStrategy::new(s, wait)) as Box<dyn ExtractionStrategy>),
        );
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn strategy_count(&self) -> usize {
        self.strategies.len()
    }

    /// Load the page, scan it, and release it regardless of the outcome.
    pub async fn extract(&self) -> Result<Price, ExtractionError> {
        let page = self
            .renderer
            .load(&self.url, self.page_load_timeout)
            .await
            .map_err(ExtractionError::PageLoad)?;

        let found = self.extract_from(page.as_ref()).await;
        page.release().await;
        found
    }

    /// Run the strategies against an already loaded page.
    pub async fn extract_from(&self, page: &dyn Page) -> Result<Price, ExtractionError> {
        for strategy in &self.strategies {
            if let Some(price) = strategy.extract(page, &self.bounds).await {
                debug!(strategy = strategy.name(), %price, "Price extracted");
                return Ok(price);
            }
        }
        Err(ExtractionError::NotFound {
            strategies: self.strategies.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dollar_prefixed_text() {
        assert_eq!(parse_price_text("$0.05123"), Some(dec!(0.05123)));
        assert_eq!(parse_price_text("Price: $0.5"), Some(dec!(0.5)));
    }

    #[test]
    fn parses_bare_fraction() {
        assert_eq!(parse_price_text("  0.0421 "), Some(dec!(0.0421)));
    }

    #[test]
    fn strips_thousands_separators() {
        assert_eq!(parse_price_text("$1,234.56"), Some(dec!(1234.56)));
    }

    #[test]
    fn requires_currency_marker_or_fraction_prefix() {
        assert_eq!(parse_price_text("24h vol 0.05"), None);
        assert_eq!(parse_price_text("12.5%"), None);
    }

    #[test]
    fn requires_decimal_point() {
        assert_eq!(parse_price_text("$5"), None);
    }

    #[test]
    fn takes_first_number() {
        assert_eq!(parse_price_text("$0.031 (+2.5%)"), Some(dec!(0.031)));
    }

    #[test]
    fn bounds_are_exclusive() {
        let bounds = PlausibilityBounds::default();
        assert!(!bounds.contains(dec!(0.001)));
        assert!(bounds.contains(dec!(0.0011)));
        assert!(bounds.contains(dec!(0.999)));
        assert!(!bounds.contains(dec!(1)));
        assert!(!bounds.contains(dec!(1234.56)));
    }
}
