//! Anonymization verification report
//!
//! Compares original and anonymized column values and aggregates the counts
//! into an [`AnonymizationReport`] that proves (or disproves) that every
//! flagged value was actually altered.

use crate::anonymization::config::AnonymizationMethod;
use crate::anonymization::resolver::Resolution;
use serde::{Deserialize, Serialize};

/// Per-column before/after statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnReport {
    /// Column name
    pub column: String,

    /// Label that decided the method
    pub label: String,

    /// Method applied
    pub method: AnonymizationMethod,

    /// Non-missing values before anonymization
    pub total_values: usize,

    /// Values that differ after anonymization
    pub changed_values: usize,

    /// Configured method name that was replaced by `redact`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unknown_method: Option<String>,
}

impl ColumnReport {
    /// Compare a column before and after anonymization
    ///
    /// Only rows with a present original value count; a missing original can
    /// never contribute to either total.
    pub fn compare(
        column: impl Into<String>,
        resolution: &Resolution,
        original: &[Option<String>],
        anonymized: &[Option<String>],
    ) -> Self {
        let total_values = original.iter().filter(|v| v.is_some()).count();
        let changed_values = original
            .iter()
            .zip(anonymized)
            .filter(|(before, after)| before.is_some() && before != after)
            .count();

        Self {
            column: column.into(),
            label: resolution.label.clone(),
            method: resolution.method,
            total_values,
            changed_values,
            unknown_method: resolution.unknown_method.clone(),
        }
    }

    /// Present values left unchanged
    pub fn unchanged_values(&self) -> usize {
        self.total_values - self.changed_values
    }
}

/// Aggregated anonymization statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizationReport {
    /// Non-missing values in flagged columns before transformation
    pub total_pii_values: usize,

    /// Values that changed
    pub anonymized_count: usize,

    /// `anonymized_count / total_pii_values` as a percentage, 0 when nothing was flagged
    pub anonymization_rate: f64,

    /// True iff every flagged, non-missing value changed
    pub verification_passed: bool,

    /// Per-column breakdown
    #[serde(default)]
    pub columns: Vec<ColumnReport>,

    /// Detection columns absent from the dataset
    #[serde(default)]
    pub skipped_columns: Vec<String>,

    /// Whether the pseudonym map was written back
    #[serde(default)]
    pub pseudonym_map_updated: bool,
}

impl AnonymizationReport {
    /// Create an empty report (vacuously passing)
    pub fn new() -> Self {
        Self {
            total_pii_values: 0,
            anonymized_count: 0,
            anonymization_rate: 0.0,
            verification_passed: true,
            columns: Vec::new(),
            skipped_columns: Vec::new(),
            pseudonym_map_updated: false,
        }
    }

    /// Add a column's statistics and refresh the totals
    pub fn add_column(&mut self, column: ColumnReport) {
        self.total_pii_values += column.total_values;
        self.anonymized_count += column.changed_values;
        self.columns.push(column);
        self.refresh();
    }

    /// Record a detection column that is not in the dataset
    pub fn add_skipped_column(&mut self, column: impl Into<String>) {
        self.skipped_columns.push(column.into());
    }

    fn refresh(&mut self) {
        self.anonymization_rate = if self.total_pii_values == 0 {
            0.0
        } else {
            self.anonymized_count as f64 / self.total_pii_values as f64 * 100.0
        };
        self.verification_passed = self.anonymized_count == self.total_pii_values;
    }

    /// Columns where at least one present value was left unchanged
    pub fn incomplete_columns(&self) -> Vec<&ColumnReport> {
        self.columns
            .iter()
            .filter(|c| c.changed_values < c.total_values)
            .collect()
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                    ANONYMIZATION REPORT                       \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!(
            "  Total PII Values:      {}\n",
            self.total_pii_values
        ));
        output.push_str(&format!(
            "  Anonymized Values:     {}\n",
            self.anonymized_count
        ));
        output.push_str(&format!(
            "  Anonymization Rate:    {:.2}%\n",
            self.anonymization_rate
        ));
        output.push_str(&format!(
            "  Verification:          {}\n",
            if self.verification_passed {
                "PASSED"
            } else {
                "FAILED"
            }
        ));
        output.push('\n');

        if !self.columns.is_empty() {
            output.push_str("🔍 COLUMNS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for column in &self.columns {
                output.push_str(&format!(
                    "  {:24} {:12} {:13} {:>6}/{:<6}\n",
                    column.column,
                    column.label,
                    column.method.as_str(),
                    column.changed_values,
                    column.total_values
                ));
            }
            output.push('\n');
        }

        let incomplete = self.incomplete_columns();
        let replaced: Vec<&ColumnReport> = self
            .columns
            .iter()
            .filter(|c| c.unknown_method.is_some())
            .collect();
        if !incomplete.is_empty() || !replaced.is_empty() || !self.skipped_columns.is_empty() {
            output.push_str("⚠️  WARNINGS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for column in incomplete {
                output.push_str(&format!(
                    "  • {} value(s) in '{}' were left unchanged\n",
                    column.unchanged_values(),
                    column.column
                ));
            }
            for column in replaced {
                output.push_str(&format!(
                    "  • Unknown method '{}' for '{}', redacted instead\n",
                    column.unknown_method.as_deref().unwrap_or_default(),
                    column.column
                ));
            }
            for column in &self.skipped_columns {
                output.push_str(&format!(
                    "  • Detected column '{column}' is not in the dataset\n"
                ));
            }
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write report to file
    pub fn write_to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = self
            .format_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }
}

impl Default for AnonymizationReport {
    fn default() -> Self {
        Self::new()
    }
}
