//! Handler for `check config`.

use super::super::command::ConfigPathArg;
use super::super::loader::load_config;
use super::super::output;

/// Validate the configuration file without starting the watcher.
pub fn execute(arg: &ConfigPathArg) -> miette::Result<()> {
    output::section("Configuration Check");
    output::field("File", arg.config.display());

    let config = load_config(&arg.config, |_| {})?;
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("Source", &config.source.url);
    output::field("Selectors", config.source.selectors.join(", "));
    output::field(
        "Bounds",
        format!("({}, {})", config.source.min_price, config.source.max_price),
    );
    output::field(
        "WebDriver",
        format!("{} ({})", config.webdriver.url, config.webdriver.browser),
    );
    output::field("Supply", config.token.total_supply);
    output::field("Decimals", config.token.decimal_places);
    output::field("Interval", format!("{}s", config.watch.poll_interval_secs));
    output::field("Heartbeat", format!("{}s", config.watch.heartbeat_secs));
    output::field("Rollback", config.watch.rollback_on_publish_failure);
    output::field("Dry-run", config.dry_run);

    output::section("Publishing");
    if config.telegram.enabled {
        output::field("Destination", config.destination());
        match config.telegram.bot_token {
            Some(ref token) => output::success(&format!(
                "Telegram enabled, bot token {}",
                output::mask(token)
            )),
            None if config.dry_run => {
                output::warning("Telegram enabled but TELEGRAM_BOT_TOKEN is not set (dry run)");
            }
            None => output::error("Telegram enabled but TELEGRAM_BOT_TOKEN is not set"),
        }
    } else {
        output::note("Telegram disabled, messages go to the log");
    }
    Ok(())
}
