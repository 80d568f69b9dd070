//! Handler for the `probe` command.

use std::sync::Arc;

use miette::IntoDiagnostic;

use super::command::ConfigPathArg;
use super::loader::load_config;
use super::output;
use super::run::print_outcome;
use crate::adapter::outbound::publisher::LogPublisher;
use crate::application::CycleOutcome;
use crate::domain::{format_display, MarketCap};
use crate::infrastructure::bootstrap;

/// Extract the price once and show the message that would be sent.
pub async fn execute(arg: &ConfigPathArg) -> miette::Result<()> {
    // Probing never publishes, so Telegram credentials are not required.
    let config = load_config(&arg.config, |config| config.dry_run = true)?;
    config.init_logging();

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Source", &config.source.url);
    output::field("WebDriver", &config.webdriver.url);

    let renderer = bootstrap::build_renderer(&config).into_diagnostic()?;
    let context = Arc::new(bootstrap::build_context(
        &config,
        renderer,
        Arc::new(LogPublisher),
    ));

    let outcome = context.run_cycle().await;
    if let CycleOutcome::Published { price, .. } = &outcome {
        let market_cap = MarketCap::compute(*price, config.token.total_supply);
        output::section("Price");
        output::field("Raw", price);
        output::field("Display", format_display(*price, config.token.decimal_places));
        output::field("Market cap", &market_cap.formatted);
    }
    output::section("Result");
    print_outcome(&context, &outcome);
    Ok(())
}
