//! Telegram channel publisher.
//!
//! Sends plain-text messages through the Bot API. Requires the `telegram`
//! feature to be enabled.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use tracing::info;

use crate::error::PublishError;
use crate::port::{Destination, Publisher};

/// Configuration for the Telegram publisher.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
    /// Channel username (`@name`) or numeric chat id.
    pub channel_id: String,
}

impl TelegramConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHANNEL_ID`. Returns `None`
    /// if either is missing or blank.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let bot_token = non_blank(std::env::var("TELEGRAM_BOT_TOKEN").ok()?)?;
        let channel_id = non_blank(std::env::var("TELEGRAM_CHANNEL_ID").ok()?)?;
        Some(Self {
            bot_token,
            channel_id,
        })
    }

    #[must_use]
    pub fn destination(&self) -> Destination {
        Destination::new(&self.channel_id)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Map a destination onto a Telegram recipient.
pub fn recipient(destination: &Destination) -> Result<Recipient, PublishError> {
    if let Some(id) = destination.numeric_id() {
        return Ok(Recipient::Id(ChatId(id)));
    }
    let name = destination.as_str();
    if name.len() > 1 && name.starts_with('@') {
        return Ok(Recipient::ChannelUsername(name.to_string()));
    }
    Err(PublishError::InvalidDestination {
        destination: name.to_string(),
        reason: "expected @channel_username or a numeric chat id".to_string(),
    })
}

/// Publishes to a Telegram channel or chat.
pub struct TelegramPublisher {
    bot: Bot,
}

impl TelegramPublisher {
    #[must_use]
    pub fn new(config: &TelegramConfig) -> Self {
        info!(channel = %config.channel_id, "Telegram publisher ready");
        Self {
            bot: Bot::new(&config.bot_token),
        }
    }
}

#[async_trait]
impl Publisher for TelegramPublisher {
    async fn send(&self, destination: &Destination, text: &str) -> Result<(), PublishError> {
        let chat = recipient(destination)?;
        self.bot
            .send_message(chat, text)
            .await
            .map(|_| ())
            .map_err(|e| PublishError::Delivery(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}
