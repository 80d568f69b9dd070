//! Channel message composition.

use serde::Deserialize;

use super::update::Decision;

/// Final text handed to the publisher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMessage {
    pub text: String,
}

/// Fixed parts of the three-line update message.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageTemplate {
    /// Label in front of the price, e.g. `FPIBANK`.
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Appended directly after the price.
    #[serde(default = "default_currency_suffix")]
    pub currency_suffix: String,
    /// Last line of every message.
    #[serde(default = "default_channel_tag")]
    pub channel_tag: String,
    #[serde(default = "default_true")]
    pub show_price_indicator: bool,
    #[serde(default = "default_true")]
    pub show_mcap_indicator: bool,
}

fn default_symbol() -> String {
    "FPIBANK".into()
}

fn default_currency_suffix() -> String {
    "$".into()
}

fn default_channel_tag() -> String {
    "@price_FPIBANK".into()
}

const fn default_true() -> bool {
    true
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            currency_suffix: default_currency_suffix(),
            channel_tag: default_channel_tag(),
            show_price_indicator: default_true(),
            show_mcap_indicator: default_true(),
        }
    }
}

impl MessageTemplate {
    /// Assemble the message from already formatted price and capitalization.
    #[must_use]
    pub fn compose(&self, price: &str, market_cap: &str, decision: &Decision) -> FormattedMessage {
        let price_glyph = if self.show_price_indicator {
            decision.price_indicator.glyph()
        } else {
            ""
        };
        let mcap_glyph = if self.show_mcap_indicator {
            decision.mcap_indicator.glyph()
        } else {
            ""
        };

        FormattedMessage {
            text: format!(
                "{price_glyph}{symbol} = {price}{suffix}\n\
                 {mcap_glyph}MCap = {market_cap}\n\
                 {tag}",
                symbol = self.symbol,
                suffix = self.currency_suffix,
                tag = self.channel_tag,
            ),
        }
    }
}
