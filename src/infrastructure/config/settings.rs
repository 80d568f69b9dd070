//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for sensitive values like `TELEGRAM_BOT_TOKEN`.
//!
//! # Example
//!
//! ```no_run
//! use pricebeacon::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::logging::LoggingConfig;
use super::source::SourceConfig;
use super::telegram::TelegramAppConfig;
use super::token::TokenConfig;
use super::watch::WatchConfig;
use crate::adapter::outbound::webdriver::WebDriverConfig;
use crate::application::WatchSettings;
use crate::domain::{DecisionPolicy, MessageTemplate};
use crate::error::{ConfigError, Result};

/// Largest supported number of fractional digits.
pub const MAX_DECIMAL_PLACES: u32 = 18;

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Target page and extraction settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Browser automation endpoint.
    #[serde(default)]
    pub webdriver: WebDriverConfig,

    #[serde(default)]
    pub token: TokenConfig,

    /// Poll interval, heartbeat and overlap limits.
    #[serde(default)]
    pub watch: WatchConfig,

    /// Message layout.
    #[serde(default)]
    pub message: MessageTemplate,

    #[serde(default)]
    pub telegram: TelegramAppConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Log messages instead of publishing them.
    #[serde(default)]
    pub dry_run: bool,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Telegram credentials are taken from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with(content, |_| {})
    }

    /// Parse configuration, letting the caller adjust values (e.g. CLI
    /// flags) before validation runs.
    ///
    /// # Errors
    ///
    /// Same as [`Config::parse_toml`].
    #[allow(clippy::result_large_err)]
    pub fn parse_toml_with<F>(content: &str, overrides: F) -> Result<Self>
    where
        F: FnOnce(&mut Self),
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.telegram.apply_env();
        overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.source.url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "source.url" }.into());
        }
        if let Err(e) = url::Url::parse(&self.source.url) {
            return Err(invalid("source.url", e.to_string()));
        }
        if self.source.selectors.iter().all(|s| s.trim().is_empty()) {
            return Err(invalid("source.selectors", "at least one selector is required"));
        }
        if self.source.page_load_timeout_ms == 0 {
            return Err(invalid("source.page_load_timeout_ms", "must be greater than 0"));
        }
        if self.source.min_price < Decimal::ZERO {
            return Err(invalid("source.min_price", "must be 0 or greater"));
        }
        if self.source.min_price >= self.source.max_price {
            return Err(invalid("source.max_price", "must be greater than min_price"));
        }

        if let Err(e) = url::Url::parse(&self.webdriver.url) {
            return Err(invalid("webdriver.url", e.to_string()));
        }

        if self.token.total_supply == 0 {
            return Err(invalid("token.total_supply", "must be greater than 0"));
        }
        if self.token.decimal_places > MAX_DECIMAL_PLACES {
            return Err(invalid(
                "token.decimal_places",
                format!("must be at most {MAX_DECIMAL_PLACES}"),
            ));
        }

        if self.watch.poll_interval_secs == 0 {
            return Err(invalid("watch.poll_interval_secs", "must be greater than 0"));
        }
        if self.watch.max_in_flight == 0 {
            return Err(invalid("watch.max_in_flight", "must be greater than 0"));
        }

        if self.telegram.enabled && !self.dry_run {
            if self.telegram.bot_token.is_none() {
                return Err(ConfigError::MissingField {
                    field: "TELEGRAM_BOT_TOKEN",
                }
                .into());
            }
            if self.telegram.channel_id.is_none() {
                return Err(ConfigError::MissingField {
                    field: "telegram.channel_id",
                }
                .into());
            }
        }
        Ok(())
    }

    /// Debounce and heartbeat parameters for the decider.
    #[must_use]
    pub fn policy(&self) -> DecisionPolicy {
        DecisionPolicy {
            decimal_places: self.token.decimal_places,
            heartbeat: self.watch.heartbeat(),
        }
    }

    /// Everything the watch cycle needs besides its collaborators.
    #[must_use]
    pub fn watch_settings(&self) -> WatchSettings {
        WatchSettings {
            policy: self.policy(),
            template: self.message.clone(),
            total_supply: self.token.total_supply,
            rollback_on_publish_failure: self.watch.rollback_on_publish_failure,
        }
    }

    /// Channel the messages go to, or the tag line when none is configured.
    #[must_use]
    pub fn destination(&self) -> String {
        self.telegram
            .channel_id
            .clone()
            .unwrap_or_else(|| self.message.channel_tag.clone())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
    .into()
}
