// privacy-checker - PII anonymization for tabular data
// Copyright (c) 2025 Privacy Checker Contributors
// Licensed under the MIT License

use clap::Parser;
use privacy_checker::cli::Cli;
use privacy_checker::config::{load_config_or_default, LoggingConfig};
use privacy_checker::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging comes from the config file when it loads; commands report
    // configuration errors themselves
    let (config_level, logging_config) = match load_config_or_default(&cli.config) {
        Ok(config) => (config.application.log_level, config.logging),
        Err(_) => ("info".to_string(), LoggingConfig::default()),
    };
    let log_level = cli.log_level.clone().unwrap_or(config_level);

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "privacy-checker");

    let exit_code = match cli.execute() {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors, so flush file logs first
    drop(guard);
    process::exit(exit_code);
}
