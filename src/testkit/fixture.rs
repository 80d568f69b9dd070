//! Canonical wiring for tests.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

use crate::application::{PriceExtractor, WatchContext, WatchSettings};
use crate::port::{Destination, Publisher, Renderer};

pub const TEST_URL: &str = "https://example.test/token/FPIBANK";
pub const TEST_CHANNEL: &str = "@price_FPIBANK";

/// Selectors used by [`extractor`], tried in this order.
pub const PRIMARY: &str = "strong.price";
pub const SECONDARY: &str = "div.token-price";

/// Extractor over `renderer` with the [`PRIMARY`] then [`SECONDARY`] selectors.
pub fn extractor(renderer: Arc<dyn Renderer>) -> PriceExtractor {
    PriceExtractor::new(renderer, TEST_URL)
        .with_page_load_timeout(Duration::from_secs(1))
        .with_selectors([PRIMARY, SECONDARY], Duration::from_millis(10))
}

/// Context with default settings publishing to [`TEST_CHANNEL`].
pub fn context(renderer: Arc<dyn Renderer>, publisher: Arc<dyn Publisher>) -> WatchContext {
    context_with(renderer, publisher, WatchSettings::default())
}

pub fn context_with(
    renderer: Arc<dyn Renderer>,
    publisher: Arc<dyn Publisher>,
    settings: WatchSettings,
) -> WatchContext {
    WatchContext::new(
        extractor(renderer),
        publisher,
        Destination::new(TEST_CHANNEL),
        settings,
    )
}

/// A fixed instant, offset by `secs`.
pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}
