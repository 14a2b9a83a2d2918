//! Main anonymization engine
//!
//! This module provides the [`AnonymizationEngine`] that applies the resolver
//! and the transformation strategies across every flagged column of a
//! [`Dataset`].
//!
//! # Examples
//!
//! ```
//! use privacy_checker::anonymization::{AnonymizationConfig, AnonymizationEngine, MethodConfig};
//! use privacy_checker::anonymization::store::MemoryStore;
//! use privacy_checker::domain::{Column, Dataset, Detection};
//! use std::sync::Arc;
//!
//! # fn example() -> anyhow::Result<()> {
//! let engine = AnonymizationEngine::with_store(
//!     AnonymizationConfig::default(),
//!     Arc::new(MemoryStore::new()),
//! )?;
//!
//! let dataset = Dataset::new(vec![Column::from_text("email", ["a@example.com"])])?;
//! let detections = vec![Detection::new("email", "email", 1)];
//!
//! let (anonymized, report) = engine.anonymize(&dataset, &detections, &MethodConfig::new(), true)?;
//! assert_eq!(anonymized.column("email").unwrap().values[0].as_deref(), Some("a*@example.com"));
//! assert!(report.verification_passed);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use crate::anonymization::{
    anonymizer::{
        Anonymizer, EmailMaskStrategy, FakeEmailStrategy, FakePhoneStrategy, HashStrategy,
        MaskStrategy, PhoneMaskStrategy, PseudonymStrategy, RedactionStrategy,
    },
    config::{AnonymizationConfig, AnonymizationMethod, MethodConfig},
    report::{AnonymizationReport, ColumnReport},
    resolver::{resolve_column, Resolution},
    store::{JsonFileStore, PseudonymSession, PseudonymStore},
};
use crate::domain::detection::group_by_column;
use crate::domain::{Dataset, Detection, Result};
use crate::log_column_anonymized;
use anyhow::Context;
use std::sync::Arc;
use std::time::Instant;

/// Main anonymization engine
///
/// Holds the engine parameters and the pseudonym store. The engine itself is
/// stateless between calls: every [`anonymize`](Self::anonymize) call opens a
/// fresh [`PseudonymSession`] on the store.
///
/// # Thread Safety
///
/// The engine can be shared behind an `Arc`, but calls that pseudonymize
/// against the same persistent store must be serialized by the caller; the
/// store flush is last-writer-wins.
pub struct AnonymizationEngine {
    config: AnonymizationConfig,
    store: Arc<dyn PseudonymStore>,
}

impl AnonymizationEngine {
    /// Create an engine persisting pseudonyms to `config.map_path`
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails
    pub fn new(config: AnonymizationConfig) -> anyhow::Result<Self> {
        let store = Arc::new(JsonFileStore::new(config.map_path.clone()));
        Self::with_store(config, store)
    }

    /// Create an engine with an explicit pseudonym store
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails
    pub fn with_store(
        config: AnonymizationConfig,
        store: Arc<dyn PseudonymStore>,
    ) -> anyhow::Result<Self> {
        config
            .validate()
            .context("Invalid anonymization configuration")?;

        Ok(Self { config, store })
    }

    /// Engine configuration
    pub fn config(&self) -> &AnonymizationConfig {
        &self.config
    }

    /// Anonymize every flagged column of a dataset
    ///
    /// # Behavior
    ///
    /// 1. Groups detections by column; columns absent from the dataset are skipped
    /// 2. Resolves one method per column from its labels and `method_config`
    /// 3. Transforms the column and compares it against the original
    /// 4. Flushes the pseudonym map once, only if `persist_map` is set and new
    ///    pseudonyms were assigned
    ///
    /// Non-flagged columns, column order, and row count are unchanged.
    ///
    /// # Errors
    ///
    /// Only a failed pseudonym map flush is an error; data anomalies are
    /// handled in place.
    pub fn anonymize(
        &self,
        dataset: &Dataset,
        detections: &[Detection],
        method_config: &MethodConfig,
        persist_map: bool,
    ) -> Result<(Dataset, AnonymizationReport)> {
        let start = Instant::now();
        let mut output = dataset.clone();
        let mut report = AnonymizationReport::new();
        let mut session = PseudonymSession::new(self.store.as_ref(), persist_map);

        for (column_name, labels) in group_by_column(detections) {
            let Some(column) = dataset.column(&column_name) else {
                tracing::debug!(column = %column_name, "Detected column not in dataset, skipping");
                report.add_skipped_column(column_name);
                continue;
            };

            let Some(resolution) = resolve_column(&labels, method_config) else {
                continue;
            };

            let anonymized = {
                let mut anonymizer = self.build_anonymizer(&resolution, &mut session);
                anonymizer.anonymize_column(&column.values)
            };

            let stats = ColumnReport::compare(&column_name, &resolution, &column.values, &anonymized);
            if stats.changed_values < stats.total_values {
                tracing::warn!(
                    column = %column_name,
                    method = %resolution.method,
                    unchanged = stats.unchanged_values(),
                    "Some values were left unchanged"
                );
            }
            log_column_anonymized!(
                column_name,
                resolution.label,
                resolution.method,
                stats.changed_values,
                stats.total_values
            );

            output.replace_values(&column_name, anonymized)?;
            report.add_column(stats);
        }

        report.pseudonym_map_updated = session.finish()?;

        tracing::info!(
            columns = report.columns.len(),
            total_pii_values = report.total_pii_values,
            anonymized_count = report.anonymized_count,
            verification_passed = report.verification_passed,
            duration_ms = start.elapsed().as_millis() as u64,
            "Anonymization complete"
        );

        Ok((output, report))
    }

    /// Anonymize using the method overrides and persistence flag from the configuration
    pub fn anonymize_with_config(
        &self,
        dataset: &Dataset,
        detections: &[Detection],
    ) -> Result<(Dataset, AnonymizationReport)> {
        self.anonymize(
            dataset,
            detections,
            &self.config.methods,
            self.config.persist_map,
        )
    }

    /// Build the strategy for a resolved column
    ///
    /// Mask and fake have email and phone variants; every other label uses
    /// the generic strategy. Fake values for labels without a synthetic
    /// template are pseudonyms under the fake prefix.
    fn build_anonymizer<'a>(
        &'a self,
        resolution: &Resolution,
        session: &'a mut PseudonymSession<'_>,
    ) -> Box<dyn Anonymizer + 'a> {
        let config = &self.config;
        match (resolution.method, resolution.label.as_str()) {
            (AnonymizationMethod::Mask, "email") => Box::new(EmailMaskStrategy::new(
                config.email_keep_domain,
                config.email_keep_local_chars,
            )),
            (AnonymizationMethod::Mask, "phone") => {
                Box::new(PhoneMaskStrategy::new(config.phone_keep_last))
            }
            (AnonymizationMethod::Mask, _) => Box::new(MaskStrategy::new(config.mask_keep_last)),
            (AnonymizationMethod::Hash, _) => Box::new(HashStrategy::new(config.hash_length)),
            (AnonymizationMethod::Redact, _) => {
                Box::new(RedactionStrategy::new(config.redaction_token.clone()))
            }
            (AnonymizationMethod::Fake, "email") => Box::new(FakeEmailStrategy::new(
                config.salt.clone(),
                config.fake_email_domain.clone(),
            )),
            (AnonymizationMethod::Fake, "phone") => Box::new(FakePhoneStrategy::new(
                config.salt.clone(),
                config.fake_phone_prefix.clone(),
            )),
            (AnonymizationMethod::Fake, _) => Box::new(PseudonymStrategy::new(
                config.fake_prefix.clone(),
                config.salt.clone(),
                session.map_mut(),
            )),
            (AnonymizationMethod::Pseudonymize, _) => Box::new(PseudonymStrategy::new(
                config.pseudonym_prefix.clone(),
                config.salt.clone(),
                session.map_mut(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::store::MemoryStore;
    use crate::domain::Column;

    fn engine_with_memory_store() -> (AnonymizationEngine, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let engine =
            AnonymizationEngine::with_store(AnonymizationConfig::default(), store.clone()).unwrap();
        (engine, store)
    }

    #[test]
    fn test_engine_creation() {
        let config = AnonymizationConfig::default();
        assert!(AnonymizationEngine::new(config).is_ok());
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let mut config = AnonymizationConfig::default();
        config.salt = String::new();
        assert!(AnonymizationEngine::new(config).is_err());
    }

    #[test]
    fn test_mask_email_column() {
        let (engine, _) = engine_with_memory_store();
        let dataset = Dataset::new(vec![Column::from_text("email", ["test@example.com"])]).unwrap();
        let detections = vec![Detection::new("email", "email", 1)];
        let methods = MethodConfig::new().with_method("email", "mask");

        let (anonymized, report) = engine
            .anonymize(&dataset, &detections, &methods, true)
            .unwrap();

        assert_eq!(
            anonymized.column("email").unwrap().values[0].as_deref(),
            Some("t***@example.com")
        );
        assert_eq!(report.anonymized_count, 1);
        assert_eq!(report.total_pii_values, 1);
    }

    #[test]
    fn test_unflagged_columns_are_untouched() {
        let (engine, _) = engine_with_memory_store();
        let dataset = Dataset::new(vec![
            Column::from_text("id", ["1", "2"]),
            Column::from_text("name", ["Jane Doe", "John Roe"]),
        ])
        .unwrap();
        let detections = vec![Detection::new("name", "name", 2)];

        let (anonymized, report) = engine
            .anonymize(&dataset, &detections, &MethodConfig::new(), false)
            .unwrap();

        assert_eq!(anonymized.column("id"), dataset.column("id"));
        assert_eq!(anonymized.column_names(), dataset.column_names());
        assert!(anonymized.column("name").unwrap().values.iter().all(|v| v.as_deref() == Some("REDACTED")));
        assert!(report.verification_passed);
    }

    #[test]
    fn test_pseudonymize_flushes_once() {
        let (engine, store) = engine_with_memory_store();
        let dataset = Dataset::new(vec![
            Column::from_text("name", ["Jane Doe", "John Roe"]),
            Column::from_text("alias", ["JD", "JR"]),
        ])
        .unwrap();
        let detections = vec![
            Detection::new("name", "name", 2),
            Detection::new("alias", "handle", 2),
        ];
        let methods = MethodConfig::new()
            .with_method("name", "pseudonymize")
            .with_method("handle", "pseudonymize");

        let (_, report) = engine.anonymize(&dataset, &detections, &methods, true).unwrap();
        assert!(report.pseudonym_map_updated);
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.snapshot().len(), 4);

        // Second run learns nothing new, so nothing is written
        let (_, report) = engine.anonymize(&dataset, &detections, &methods, true).unwrap();
        assert!(!report.pseudonym_map_updated);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_fake_routes_by_label() {
        let (engine, store) = engine_with_memory_store();
        let dataset = Dataset::new(vec![
            Column::from_text("email", ["a@b.com"]),
            Column::from_text("phone", ["0911234567"]),
            Column::from_text("name", ["Jane Doe"]),
        ])
        .unwrap();
        let detections = vec![
            Detection::new("email", "email", 1),
            Detection::new("phone", "phone", 1),
            Detection::new("name", "name", 1),
        ];
        let methods = MethodConfig::new()
            .with_method("email", "fake")
            .with_method("phone", "fake")
            .with_method("name", "fake");

        let (anonymized, report) = engine.anonymize(&dataset, &detections, &methods, true).unwrap();

        let email = anonymized.column("email").unwrap().values[0].clone().unwrap();
        let phone = anonymized.column("phone").unwrap().values[0].clone().unwrap();
        let name = anonymized.column("name").unwrap().values[0].clone().unwrap();
        assert!(email.starts_with("user") && email.ends_with("@example.com"));
        assert!(phone.starts_with("+251"));
        assert!(name.starts_with("FAKE_"));
        assert!(report.verification_passed);
        // Only the generic fake goes through the pseudonym map
        assert_eq!(store.snapshot().len(), 1);
    }
}
