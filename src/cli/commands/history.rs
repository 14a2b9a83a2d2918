//! History command implementation
//!
//! This module implements the `history` command for displaying recent
//! anonymization runs.

use crate::anonymization::audit::{load_history, AuditEntry};
use crate::config::load_config_or_default;
use clap::Args;

/// Arguments for the history command
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Number of most recent runs to show
    #[arg(short = 'n', long, default_value_t = 10)]
    pub limit: usize,
}

impl HistoryArgs {
    /// Execute the history command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Showing run history");

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {}", e);
                return Ok(2); // Configuration error exit code
            }
        };

        let path = &config.anonymization.audit.log_path;
        let entries = load_history(path);

        println!("📊 Run History ({})", path.display());
        println!();

        if entries.is_empty() {
            println!("No runs recorded yet.");
            println!("Run 'privacy-checker anonymize' to anonymize a dataset.");
            return Ok(0);
        }

        for entry in recent(&entries, self.limit) {
            println!("{}", format_entry(entry));
        }
        println!();
        println!(
            "Showing {} of {} run(s)",
            entries.len().min(self.limit),
            entries.len()
        );

        Ok(0)
    }
}

/// Last `limit` entries, newest first
fn recent(entries: &[AuditEntry], limit: usize) -> impl Iterator<Item = &AuditEntry> {
    entries.iter().rev().take(limit)
}

fn format_entry(entry: &AuditEntry) -> String {
    format!(
        "{}  {:24} {:>6}/{:<6} {:>7.2}%  {}  [{}]",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.source,
        entry.anonymized_count,
        entry.total_pii_values,
        entry.anonymization_rate,
        if entry.verification_passed {
            "PASSED"
        } else {
            "FAILED"
        },
        entry.pii_types.join(", ")
    )
}
