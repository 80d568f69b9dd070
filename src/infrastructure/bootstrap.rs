//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::publisher::LogPublisher;
#[cfg(feature = "telegram")]
use crate::adapter::outbound::publisher::telegram::{TelegramConfig, TelegramPublisher};
use crate::adapter::outbound::webdriver::WebDriverRenderer;
use crate::application::{IntervalScheduler, PollLoop, PriceExtractor, WatchContext};
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::{Destination, Publisher, Renderer};

/// Build the renderer from configuration.
#[allow(clippy::result_large_err)]
pub fn build_renderer(config: &Config) -> Result<Arc<dyn Renderer>> {
    Ok(Arc::new(WebDriverRenderer::new(config.webdriver.clone())?))
}

/// Build the extractor with the configured selectors and bounds.
#[must_use]
pub fn build_extractor(config: &Config, renderer: Arc<dyn Renderer>) -> PriceExtractor {
    PriceExtractor::new(renderer, config.source.url.clone())
        .with_page_load_timeout(config.source.page_load_timeout())
        .with_bounds(config.source.bounds())
        .with_selectors(
            config
                .source
                .selectors
                .iter()
                .filter(|s| !s.trim().is_empty())
                .cloned(),
            config.source.selector_timeout(),
        )
}

/// Build the publisher from configuration.
///
/// Dry runs and a disabled Telegram section fall back to the log publisher.
#[cfg(feature = "telegram")]
#[allow(clippy::result_large_err)]
pub fn build_publisher(config: &Config) -> Result<Arc<dyn Publisher>> {
    if config.dry_run || !config.telegram.enabled {
        info!(dry_run = config.dry_run, "Publishing to log");
        return Ok(Arc::new(LogPublisher));
    }

    let bot_token = config
        .telegram
        .bot_token
        .clone()
        .ok_or(ConfigError::MissingField {
            field: "TELEGRAM_BOT_TOKEN",
        })?;
    let channel_id = config
        .telegram
        .channel_id
        .clone()
        .ok_or(ConfigError::MissingField {
            field: "telegram.channel_id",
        })?;

    Ok(Arc::new(TelegramPublisher::new(&TelegramConfig {
        bot_token,
        channel_id,
    })))
}

/// Build the publisher from configuration (non-telegram variant).
#[cfg(not(feature = "telegram"))]
#[allow(clippy::result_large_err)]
pub fn build_publisher(config: &Config) -> Result<Arc<dyn Publisher>> {
    if config.telegram.enabled && !config.dry_run {
        return Err(ConfigError::InvalidValue {
            field: "telegram.enabled",
            reason: "built without the telegram feature".to_string(),
        }
        .into());
    }
    info!(dry_run = config.dry_run, "Publishing to log");
    Ok(Arc::new(LogPublisher))
}

/// Wire the watch context from its collaborators.
#[must_use]
pub fn build_context(
    config: &Config,
    renderer: Arc<dyn Renderer>,
    publisher: Arc<dyn Publisher>,
) -> WatchContext {
    WatchContext::new(
        build_extractor(config, renderer),
        publisher,
        Destination::new(config.destination()),
        config.watch_settings(),
    )
}

/// Build the poll loop around a shared context.
#[must_use]
pub fn build_poll_loop(config: &Config, context: Arc<WatchContext>) -> PollLoop {
    PollLoop::new(
        context,
        IntervalScheduler::new(config.watch.poll_interval(), config.watch.max_in_flight),
    )
}

/// Build everything needed for `run` against real backends.
#[allow(clippy::result_large_err)]
pub fn build_runtime(config: &Config) -> Result<(Arc<WatchContext>, PollLoop)> {
    let renderer = build_renderer(config)?;
    let publisher = build_publisher(config)?;
    let context = Arc::new(build_context(config, renderer, publisher));
    let poll = build_poll_loop(config, Arc::clone(&context));
    info!(
        url = %config.source.url,
        strategies = context.extractor().strategy_count(),
        destination = %context.destination(),
        interval_secs = config.watch.poll_interval_secs,
        "Runtime assembled"
    );
    Ok((context, poll))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::telegram::TelegramAppConfig;

    fn config() -> Config {
        let mut config = Config::default();
        config.source.url = "https://example.com".into();
        config
    }

    #[test]
    fn dry_run_publishes_to_log() {
        let mut config = config();
        config.dry_run = true;
        config.telegram = TelegramAppConfig {
            enabled: true,
            channel_id: Some("@chan".into()),
            bot_token: None,
        };
        assert_eq!(build_publisher(&config).unwrap().name(), "log");
    }

    #[test]
    fn disabled_telegram_publishes_to_log() {
        assert_eq!(build_publisher(&config()).unwrap().name(), "log");
    }

    #[cfg(feature = "telegram")]
    #[test]
    fn enabled_telegram_builds_bot_publisher() {
        let mut config = config();
        config.telegram = TelegramAppConfig {
            enabled: true,
            channel_id: Some("@chan".into()),
            bot_token: Some("123:abc".into()),
        };
        assert_eq!(build_publisher(&config).unwrap().name(), "telegram");

        config.telegram.bot_token = None;
        assert!(build_publisher(&config).is_err());
    }

    #[test]
    fn extractor_skips_blank_selectors() {
        let mut config = config();
        config.source.selectors = vec!["div.a".into(), "  ".into(), "div.b".into()];
        let renderer = build_renderer(&config).unwrap();
        let extractor = build_extractor(&config, renderer);
        assert_eq!(extractor.strategy_count(), 2);
        assert_eq!(extractor.url(), "https://example.com");
    }

    #[test]
    fn context_targets_configured_destination() {
        let mut config = config();
        let renderer = build_renderer(&config).unwrap();
        let context = build_context(&config, Arc::clone(&renderer), Arc::new(LogPublisher));
        assert_eq!(context.destination().as_str(), "@price_FPIBANK");

        config.telegram.channel_id = Some("-100123".into());
        let context = build_context(&config, renderer, Arc::new(LogPublisher));
        assert_eq!(context.destination().as_str(), "-100123");
    }
}
