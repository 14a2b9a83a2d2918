//! Anonymization of flagged dataset columns
//!
//! Given a tabular [`Dataset`](crate::domain::Dataset) and the detections
//! produced by an upstream PII scanner, this module rewrites every flagged
//! column with one of five methods and verifies that each flagged value
//! changed.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! - **Resolver**: picks one label and one method per column
//! - **Anonymizers**: mask, hash, redact, fake and pseudonymize strategies
//! - **Store**: the persisted pseudonym map, loaded lazily and flushed once per run
//! - **Report**: before/after comparison of every flagged column
//! - **Audit**: append-only run history
//!
//! # Usage
//!
//! ```rust,ignore
//! use privacy_checker::anonymization::{AnonymizationConfig, AnonymizationEngine};
//!
//! let engine = AnonymizationEngine::new(AnonymizationConfig::default())?;
//! let (anonymized, report) = engine.anonymize_with_config(&dataset, &detections)?;
//! ```

pub mod anonymizer;
pub mod audit;
pub mod config;
pub mod engine;
pub mod report;
pub mod resolver;
pub mod store;

// Re-export main types
pub use config::{AnonymizationConfig, AnonymizationMethod, AuditConfig, MethodConfig};
pub use engine::AnonymizationEngine;
pub use report::{AnonymizationReport, ColumnReport};
pub use resolver::Resolution;
pub use store::{JsonFileStore, MemoryStore, PseudonymMap, PseudonymStore};
