//! Command-line interface definitions.
//!
//! Defines the CLI structure for the pricebeacon application using `clap`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Token price watcher that posts updates to a Telegram channel
#[derive(Parser, Debug)]
#[command(name = "pricebeacon")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the price and publish updates (foreground)
    Run(RunArgs),

    /// Read the price once and preview the message without publishing
    Probe(ConfigPathArg),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `pricebeacon check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file
    Config(ConfigPathArg),
    /// Send a test message to the configured channel
    Telegram(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Log messages instead of publishing them
    #[arg(long)]
    pub dry_run: bool,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_defaults() {
        let cli = Cli::try_parse_from(["pricebeacon", "run"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.config, PathBuf::from("config.toml"));
        assert!(!args.dry_run);
        assert!(!args.once);
        assert!(args.log_level.is_none());
        assert!(!args.json_logs);
        assert!(!cli.json);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from([
            "pricebeacon",
            "run",
            "-c",
            "prod.toml",
            "--dry-run",
            "--once",
            "--log-level",
            "debug",
            "--json-logs",
        ])
        .unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.config, PathBuf::from("prod.toml"));
        assert!(args.dry_run);
        assert!(args.once);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.json_logs);
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["pricebeacon", "probe", "--json", "-q"]).unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Probe(_)));
    }

    #[test]
    fn test_parse_check_subcommands() {
        let cli = Cli::try_parse_from(["pricebeacon", "check", "config"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Check(CheckCommand::Config(_))
        ));

        let cli =
            Cli::try_parse_from(["pricebeacon", "check", "telegram", "--config", "x.toml"]).unwrap();
        let Commands::Check(CheckCommand::Telegram(arg)) = cli.command else {
            panic!("expected check telegram");
        };
        assert_eq!(arg.config, PathBuf::from("x.toml"));
    }

    #[test]
    fn test_unknown_subcommand_fails() {
        assert!(Cli::try_parse_from(["pricebeacon", "status"]).is_err());
    }
}
