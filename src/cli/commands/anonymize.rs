//! Anonymize command implementation
//!
//! This module implements the `anonymize` command: load a dataset and its
//! detections, rewrite every flagged column, write the anonymized dataset and
//! report, and append the run to the history log.

use crate::adapters::json_file::{load_dataset, load_detections, write_dataset};
use crate::anonymization::audit::{AuditEntry, AuditLogger};
use crate::anonymization::{AnonymizationEngine, MethodConfig};
use crate::config::load_config_or_default;
use crate::log_error_with_context;
use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Dataset to anonymize (JSON columns document)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Detections produced by the PII scan (JSON array)
    #[arg(short, long)]
    pub detections: PathBuf,

    /// Where to write the anonymized dataset
    #[arg(short, long)]
    pub output: PathBuf,

    /// Where to write the JSON report
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Method override for a label, e.g. `email=fake` (repeatable)
    #[arg(short, long = "method", value_name = "LABEL=METHOD")]
    pub methods: Vec<String>,

    /// Do not write newly assigned pseudonyms back to the map
    #[arg(long)]
    pub no_persist_map: bool,

    /// Source name recorded in the run history (defaults to the input file name)
    #[arg(long)]
    pub source: Option<String>,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    ///
    /// Exit codes: 0 on success, 1 if verification failed, 2 on a
    /// configuration error.
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Starting anonymize command");

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        let methods = match self.method_overrides(&config.anonymization.methods) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("Configuration error: {e:#}");
                return Ok(2);
            }
        };
        let persist_map = config.anonymization.persist_map && !self.no_persist_map;

        let dataset = load_dataset(&self.input)?;
        let detections = load_detections(&self.detections)?;

        let audit = AuditLogger::from_config(&config.anonymization.audit)
            .context("Failed to initialize run history")?;
        let engine = match AnonymizationEngine::new(config.anonymization) {
            Ok(e) => e,
            Err(e) => {
                eprintln!("Configuration error: {e:#}");
                return Ok(2);
            }
        };

        let start = Instant::now();
        let (anonymized, report) = engine
            .anonymize(&dataset, &detections, &methods, persist_map)
            .context("Anonymization failed")?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        write_dataset(&self.output, &anonymized)
            .with_context(|| format!("Failed to write {}", self.output.display()))?;

        if let Some(report_path) = &self.report {
            report
                .write_to_file(report_path)
                .with_context(|| format!("Failed to write report {}", report_path.display()))?;
            tracing::info!(path = %report_path.display(), "Report written");
        }

        let source = self
            .source
            .clone()
            .unwrap_or_else(|| source_name(&self.input));
        let entry = AuditEntry::from_run(source, &detections, &report, elapsed_ms);
        if let Err(e) = audit.log_run(&entry) {
            // History is informational only
            tracing::warn!(error = %e, "Failed to append run history");
        }

        print!("{}", report.format_console());
        println!("Anonymized dataset written to {}", self.output.display());

        if report.verification_passed {
            Ok(0)
        } else {
            tracing::warn!(
                anonymized = report.anonymized_count,
                total = report.total_pii_values,
                "Verification failed: some flagged values were not changed"
            );
            Ok(1)
        }
    }

    /// Configured methods overlaid with `--method` overrides
    fn method_overrides(&self, configured: &MethodConfig) -> anyhow::Result<MethodConfig> {
        let mut methods = configured.clone();
        for arg in &self.methods {
            let (label, method) = MethodConfig::parse_override(arg)?;
            tracing::info!(label = %label, method = %method, "Overriding method from CLI");
            methods.set(label, method);
        }
        Ok(methods)
    }
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(methods: &[&str]) -> AnonymizeArgs {
        AnonymizeArgs {
            input: PathBuf::from("data/customers.json"),
            detections: PathBuf::from("detections.json"),
            output: PathBuf::from("out.json"),
            report: None,
            methods: methods.iter().map(|s| s.to_string()).collect(),
            no_persist_map: false,
            source: None,
        }
    }

    #[test]
    fn test_method_overrides_layer_on_config() {
        let configured = MethodConfig::new()
            .with_method("email", "mask")
            .with_method("phone", "mask");

        let methods = args(&["phone=redact", "name = pseudo"])
            .method_overrides(&configured)
            .unwrap();
        assert_eq!(methods.get("email"), Some("mask"));
        assert_eq!(methods.get("phone"), Some("redact"));
        assert_eq!(methods.get("name"), Some("pseudo"));
    }

    #[test]
    fn test_method_overrides_reject_malformed() {
        assert!(args(&["email"]).method_overrides(&MethodConfig::new()).is_err());
    }

    #[test]
    fn test_source_name_uses_file_name() {
        assert_eq!(source_name(Path::new("data/customers.json")), "customers.json");
    }
}
