//! Telegram publishing configuration.

use serde::Deserialize;

/// Telegram section of the config file.
///
/// The bot token is never read from the file; it comes from
/// `TELEGRAM_BOT_TOKEN` and is filled in by [`super::settings::Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramAppConfig {
    /// Publish through Telegram. When false the log publisher is used.
    #[serde(default)]
    pub enabled: bool,
    /// `@channel_username` or numeric chat id. `TELEGRAM_CHANNEL_ID` overrides.
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(skip)]
    pub bot_token: Option<String>,
}

impl TelegramAppConfig {
    /// Replace file values with `TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHANNEL_ID`.
    pub fn apply_env(&mut self) {
        self.bot_token = env_non_blank("TELEGRAM_BOT_TOKEN");
        if let Some(channel) = env_non_blank("TELEGRAM_CHANNEL_ID") {
            self.channel_id = Some(channel);
        }
    }
}

fn env_non_blank(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
