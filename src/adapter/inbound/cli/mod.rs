//! CLI module graph.

pub mod check;
pub mod command;
pub mod diagnostic;
pub mod loader;
pub mod output;
pub mod probe;
pub mod run;

use command::{CheckCommand, Cli, Commands};
use output::OutputConfig;

/// Dispatch a parsed command line.
pub async fn execute(cli: Cli) -> miette::Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    match cli.command {
        Commands::Run(args) => run::execute(&args).await,
        Commands::Probe(arg) => probe::execute(&arg).await,
        Commands::Check(CheckCommand::Config(arg)) => check::config::execute(&arg),
        Commands::Check(CheckCommand::Telegram(arg)) => check::telegram::execute(&arg).await,
    }
}
