//! Handler for the `run` command.

use std::sync::Arc;

use miette::IntoDiagnostic;
use tracing::info;

use super::command::RunArgs;
use super::loader::load_config;
use super::output;
use crate::application::{CycleOutcome, WatchContext};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> miette::Result<()> {
    let config = load_config(&args.config, |config| apply_overrides(config, args))?;
    config.init_logging();

    print_startup(&config, args.once);

    let (context, poll) = bootstrap::build_runtime(&config).into_diagnostic()?;

    if args.once {
        let outcome = context.run_cycle().await;
        print_outcome(&context, &outcome);
        return Ok(());
    }

    info!(version = env!("CARGO_PKG_VERSION"), "pricebeacon starting");
    let report = poll.run(shutdown_signal()).await;
    output::field("Cycles", report.started);
    output::field("Skipped", report.skipped);
    info!("pricebeacon stopped");
    Ok(())
}

fn apply_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs || output::is_json() {
        config.logging.format = "json".to_string();
    }
    if args.dry_run {
        config.dry_run = true;
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

fn print_startup(config: &Config, once: bool) {
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Source", &config.source.url);
    output::field("Selectors", config.source.selectors.len());
    output::field("WebDriver", &config.webdriver.url);
    output::field("Destination", config.destination());
    output::field(
        "Mode",
        match (once, config.dry_run) {
            (true, true) => "single cycle, dry run",
            (true, false) => "single cycle",
            (false, true) => "dry run",
            (false, false) => "live",
        },
    );
    if !once {
        output::field(
            "Interval",
            format!("{}s (heartbeat {}s)", config.watch.poll_interval_secs, config.watch.heartbeat_secs),
        );
    }
}

/// Report what a single cycle did.
pub(super) fn print_outcome(context: &Arc<WatchContext>, outcome: &CycleOutcome) {
    match outcome {
        CycleOutcome::NotFound(e) => {
            output::warning(&format!("No price found: {e}"));
            output::note(&format!("checked {}", context.extractor().url()));
        }
        CycleOutcome::Suppressed { price } => {
            output::success(&format!("Price {price} unchanged, nothing published"));
        }
        CycleOutcome::Superseded { price } => {
            output::note(&format!("Price {price} dropped, a newer reading was already handled"));
        }
        CycleOutcome::Published { price, message, .. } => {
            output::success(&format!("Published price {price} to {}", context.destination()));
            output::block(&message.text);
        }
        CycleOutcome::PublishFailed { price, error } => {
            output::error(&format!("Price {price} read but publish failed: {error}"));
        }
    }
}
