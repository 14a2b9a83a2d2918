//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for privacy-checker using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// privacy-checker - anonymize PII columns flagged by a privacy scan
#[derive(Parser, Debug)]
#[command(name = "privacy-checker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "privacy-checker.toml", env = "PRIVACY_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PRIVACY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Anonymize the flagged columns of a dataset
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Show recent anonymization runs
    History(commands::history::HistoryArgs),
}

impl Cli {
    /// Execute the selected command and return the process exit code
    pub fn execute(&self) -> anyhow::Result<i32> {
        match &self.command {
            Commands::Anonymize(args) => args.execute(&self.config),
            Commands::ValidateConfig(args) => args.execute(&self.config),
            Commands::Init(args) => args.execute(),
            Commands::History(args) => args.execute(&self.config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_anonymize() {
        let cli = Cli::parse_from([
            "privacy-checker",
            "anonymize",
            "-i",
            "data.json",
            "-d",
            "detections.json",
            "-o",
            "out.json",
            "--method",
            "email=fake",
            "--method",
            "name=pseudo",
            "--no-persist-map",
        ]);
        assert_eq!(cli.config, "privacy-checker.toml");
        match cli.command {
            Commands::Anonymize(args) => {
                assert_eq!(args.methods, vec!["email=fake", "name=pseudo"]);
                assert!(args.no_persist_map);
                assert!(args.report.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_anonymize_requires_paths() {
        assert!(Cli::try_parse_from(["privacy-checker", "anonymize", "-i", "data.json"]).is_err());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["privacy-checker", "--config", "custom.toml", "history"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["privacy-checker", "--log-level", "debug", "validate-config"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["privacy-checker", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_history() {
        let cli = Cli::parse_from(["privacy-checker", "history", "-n", "3"]);
        match cli.command {
            Commands::History(args) => assert_eq!(args.limit, 3),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["privacy-checker", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
