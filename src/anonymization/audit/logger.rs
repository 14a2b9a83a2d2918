//! Run history logger for anonymization runs

use crate::anonymization::config::{AnonymizationMethod, AuditConfig};
use crate::anonymization::report::AnonymizationReport;
use crate::domain::detection::distinct_patterns;
use crate::domain::Detection;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One history entry per anonymization run
///
/// Only counts, labels and methods are recorded, never cell values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the run finished
    pub timestamp: DateTime<Utc>,

    /// Name of the anonymized dataset
    pub source: String,

    /// Sorted distinct PII labels that were detected
    pub pii_types: Vec<String>,

    /// Method applied per column
    #[serde(default)]
    pub columns: Vec<AuditColumn>,

    /// Non-missing values in flagged columns
    pub total_pii_values: usize,

    /// Values that changed
    pub anonymized_count: usize,

    /// Percentage of flagged values that changed
    pub anonymization_rate: f64,

    /// Whether every flagged value changed
    pub verification_passed: bool,

    /// Wall-clock duration of the run
    #[serde(default)]
    pub processing_time_ms: u64,
}

/// Column entry of an [`AuditEntry`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditColumn {
    /// Column name
    pub column: String,

    /// Label that decided the method
    pub label: String,

    /// Method applied
    pub method: AnonymizationMethod,
}

impl AuditEntry {
    /// Build an entry from a finished run
    pub fn from_run(
        source: impl Into<String>,
        detections: &[Detection],
        report: &AnonymizationReport,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            source: source.into(),
            pii_types: distinct_patterns(detections),
            columns: report
                .columns
                .iter()
                .map(|c| AuditColumn {
                    column: c.column.clone(),
                    label: c.label.clone(),
                    method: c.method,
                })
                .collect(),
            total_pii_values: report.total_pii_values,
            anonymized_count: report.anonymized_count,
            anonymization_rate: report.anonymization_rate,
            verification_passed: report.verification_passed,
            processing_time_ms,
        }
    }

    /// Render the entry as one plain-text history line
    ///
    /// Per-column methods are not part of the text format.
    pub fn to_text_line(&self) -> String {
        format!(
            "[{}] Source: {} | Types: {} | Anonymized: {}/{} ({:.2}%) | Verification: {} | Time: {}ms",
            self.timestamp.to_rfc3339(),
            self.source,
            self.pii_types.join(","),
            self.anonymized_count,
            self.total_pii_values,
            self.anonymization_rate,
            if self.verification_passed { "passed" } else { "failed" },
            self.processing_time_ms
        )
    }

    /// Parse a line written by [`AuditEntry::to_text_line`]
    ///
    /// Fields are split from the right so a source name may contain ` | `.
    pub fn from_text_line(line: &str) -> Option<Self> {
        let (timestamp, rest) = line.strip_prefix('[')?.split_once("] Source: ")?;
        let timestamp = DateTime::parse_from_rfc3339(timestamp)
            .ok()?
            .with_timezone(&Utc);

        let (rest, time) = rest.rsplit_once(" | Time: ")?;
        let (rest, verification) = rest.rsplit_once(" | Verification: ")?;
        let (rest, anonymized) = rest.rsplit_once(" | Anonymized: ")?;
        let (source, types) = rest.rsplit_once(" | Types: ")?;

        let processing_time_ms = time.strip_suffix("ms")?.parse().ok()?;
        let verification_passed = match verification {
            "passed" => true,
            "failed" => false,
            _ => return None,
        };
        let (counts, rate) = anonymized.split_once(" (")?;
        let (anonymized_count, total_pii_values) = counts.split_once('/')?;
        let anonymization_rate = rate.strip_suffix("%)")?.parse().ok()?;

        Some(Self {
            timestamp,
            source: source.to_string(),
            pii_types: types
                .split(',')
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            columns: Vec::new(),
            total_pii_values: total_pii_values.parse().ok()?,
            anonymized_count: anonymized_count.parse().ok()?,
            anonymization_rate,
            verification_passed,
            processing_time_ms,
        })
    }
}

/// Append-only run history logger
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
}

impl AuditLogger {
    /// Create a new history logger
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create history directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
        })
    }

    /// Create a history logger from configuration
    pub fn from_config(config: &AuditConfig) -> Result<Self> {
        Self::new(config.log_path.clone(), config.json_format, config.enabled)
    }

    /// History file path
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Append one run to the history
    pub fn log_run(&self, entry: &AuditEntry) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open history log: {}", self.log_path.display()))?;

        if self.json_format {
            let json_line =
                serde_json::to_string(entry).context("Failed to serialize history entry")?;
            writeln!(file, "{json_line}").context("Failed to write history entry")?;
        } else {
            writeln!(file, "{}", entry.to_text_line()).context("Failed to write history entry")?;
        }

        tracing::debug!(
            path = %self.log_path.display(),
            source = %entry.source,
            "History entry appended"
        );

        Ok(())
    }
}

/// Read the run history, oldest first
///
/// Reads both the JSON-lines and the plain-text format, so a log written
/// before `json_format` was switched stays readable. Best-effort: a missing
/// file yields an empty history and unreadable lines are skipped.
pub fn load_history(path: &Path) -> Vec<AuditEntry> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read history log");
            return Vec::new();
        }
    };

    let mut skipped = 0usize;
    let entries: Vec<AuditEntry> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let entry = serde_json::from_str(line)
                .ok()
                .or_else(|| AuditEntry::from_text_line(line));
            if entry.is_none() {
                skipped += 1;
            }
            entry
        })
        .collect();

    if skipped > 0 {
        tracing::warn!(path = %path.display(), skipped, "Skipped unreadable history lines");
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::report::ColumnReport;
    use tempfile::tempdir;

    fn sample_report() -> AnonymizationReport {
        let mut report = AnonymizationReport::new();
        report.add_column(ColumnReport {
            column: "email".to_string(),
            label: "email".to_string(),
            method: AnonymizationMethod::Mask,
            total_values: 2,
            changed_values: 2,
            unknown_method: None,
        });
        report
    }

    fn sample_detections() -> Vec<Detection> {
        vec![
            Detection::new("email", "email", 2),
            Detection::new("contact", "phone", 1),
            Detection::new("email", "name", 1),
        ]
    }

    #[test]
    fn test_audit_logger_creates_parent_dir() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("nested").join("history.jsonl");

        AuditLogger::new(log_path.clone(), true, true).unwrap();
        assert!(log_path.parent().unwrap().exists());
    }

    #[test]
    fn test_entry_from_run() {
        let entry = AuditEntry::from_run("customers.json", &sample_detections(), &sample_report(), 7);
        assert_eq!(entry.pii_types, vec!["email", "name", "phone"]);
        assert_eq!(entry.columns.len(), 1);
        assert_eq!(entry.anonymization_rate, 100.0);
        assert!(entry.verification_passed);
    }

    #[test]
    fn test_log_and_load_history() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("history.jsonl");
        let logger = AuditLogger::new(log_path.clone(), true, true).unwrap();

        let entry = AuditEntry::from_run("first.json", &sample_detections(), &sample_report(), 1);
        logger.log_run(&entry).unwrap();
        logger
            .log_run(&AuditEntry::from_run("second.json", &[], &AnonymizationReport::new(), 2))
            .unwrap();

        let history = load_history(&log_path);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], entry);
        assert_eq!(history[1].source, "second.json");
    }

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("history.jsonl");
        let logger = AuditLogger::new(log_path.clone(), true, false).unwrap();

        logger
            .log_run(&AuditEntry::from_run("x", &[], &AnonymizationReport::new(), 0))
            .unwrap();
        assert!(!log_path.exists());
    }

    #[test]
    fn test_load_history_skips_bad_lines() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("history.jsonl");
        let logger = AuditLogger::new(log_path.clone(), true, true).unwrap();
        logger
            .log_run(&AuditEntry::from_run("ok", &[], &AnonymizationReport::new(), 0))
            .unwrap();

        let mut file = OpenOptions::new().append(true).open(&log_path).unwrap();
        writeln!(file, "{{not json").unwrap();

        let history = load_history(&log_path);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].source, "ok");
    }

    #[test]
    fn test_load_history_missing_file() {
        let dir = tempdir().unwrap();
        assert!(load_history(&dir.path().join("absent.jsonl")).is_empty());
    }

    #[test]
    fn test_text_format() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("history.log");
        let logger = AuditLogger::new(log_path.clone(), false, true).unwrap();

        logger
            .log_run(&AuditEntry::from_run("people.json", &sample_detections(), &sample_report(), 3))
            .unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("Source: people.json"));
        assert!(content.contains("Types: email,name,phone"));
        assert!(content.contains("Verification: passed"));
    }

    #[test]
    fn test_text_format_reads_back() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("history.log");
        let logger = AuditLogger::new(log_path.clone(), false, true).unwrap();

        let entry = AuditEntry::from_run("people.json", &sample_detections(), &sample_report(), 3);
        logger.log_run(&entry).unwrap();
        logger
            .log_run(&AuditEntry::from_run("a | b.json", &[], &AnonymizationReport::new(), 0))
            .unwrap();

        let history = load_history(&log_path);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].timestamp, entry.timestamp);
        assert_eq!(history[0].source, "people.json");
        assert_eq!(history[0].pii_types, vec!["email", "name", "phone"]);
        assert_eq!(history[0].anonymized_count, 2);
        assert_eq!(history[0].total_pii_values, 2);
        assert_eq!(history[0].anonymization_rate, 100.0);
        assert!(history[0].verification_passed);
        assert_eq!(history[0].processing_time_ms, 3);
        assert!(history[0].columns.is_empty());

        assert_eq!(history[1].source, "a | b.json");
        assert!(history[1].pii_types.is_empty());
    }

    #[test]
    fn test_mixed_formats_read_back() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("history.log");

        AuditLogger::new(log_path.clone(), true, true)
            .unwrap()
            .log_run(&AuditEntry::from_run("json.json", &[], &sample_report(), 1))
            .unwrap();
        AuditLogger::new(log_path.clone(), false, true)
            .unwrap()
            .log_run(&AuditEntry::from_run("text.json", &[], &sample_report(), 2))
            .unwrap();

        let sources: Vec<_> = load_history(&log_path)
            .into_iter()
            .map(|e| e.source)
            .collect();
        assert_eq!(sources, vec!["json.json", "text.json"]);
    }

    #[test]
    fn test_from_text_line_rejects_garbage() {
        assert!(AuditEntry::from_text_line("[not a date] Source: x").is_none());
        assert!(AuditEntry::from_text_line("plain words").is_none());
    }
}
