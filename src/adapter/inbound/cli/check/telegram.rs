//! Handler for `check telegram`.

use super::super::command::ConfigPathArg;
use super::super::loader::load_config;
use super::super::output;

/// Send a test message through the configured Telegram channel.
#[cfg(feature = "telegram")]
pub async fn execute(arg: &ConfigPathArg) -> miette::Result<()> {
    use miette::{miette, IntoDiagnostic};

    use crate::adapter::outbound::publisher::telegram::{TelegramConfig, TelegramPublisher};
    use crate::port::Publisher;

    let config = load_config(&arg.config, |_| {})?;

    let bot_token = config.telegram.bot_token.clone().ok_or_else(|| {
        miette!(
            help = "set TELEGRAM_BOT_TOKEN in the environment or .env",
            "TELEGRAM_BOT_TOKEN is not set"
        )
    })?;
    let channel_id = config.telegram.channel_id.clone().ok_or_else(|| {
        miette!(
            help = "set telegram.channel_id or TELEGRAM_CHANNEL_ID",
            "no Telegram channel configured"
        )
    })?;

    output::section("Telegram Check");
    output::field("Bot token", output::mask(&bot_token));
    output::field("Channel", &channel_id);

    let telegram = TelegramConfig {
        bot_token,
        channel_id,
    };
    let publisher = TelegramPublisher::new(&telegram);
    let text = format!(
        "🧪 pricebeacon test message\n{} watcher configured\n{}",
        config.message.symbol, config.message.channel_tag
    );

    publisher
        .send(&telegram.destination(), &text)
        .await
        .into_diagnostic()?;

    output::success("Telegram test message sent");
    output::note("Check the channel for the message.");
    Ok(())
}

/// Send a test message through the configured Telegram channel.
#[cfg(not(feature = "telegram"))]
pub async fn execute(arg: &ConfigPathArg) -> miette::Result<()> {
    let _ = load_config(&arg.config, |_| {})?;
    output::error("this build does not include Telegram support");
    Err(miette::miette!(
        help = "rebuild with --features telegram",
        "telegram feature disabled"
    ))
}
