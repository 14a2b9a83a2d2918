// privacy-checker - PII anonymization for tabular data
// Copyright (c) 2025 Privacy Checker Contributors
// Licensed under the MIT License

//! # privacy-checker
//!
//! privacy-checker rewrites the columns of a tabular dataset that an upstream
//! PII scan flagged, so the anonymized copy can be shared or analyzed without
//! exposing the original personal data.
//!
//! ## Overview
//!
//! This library provides:
//! - **Resolving** one anonymization method per flagged column
//! - **Transforming** values with mask, hash, redact, fake or pseudonymize
//! - **Persisting** pseudonyms so the same person maps to the same token across runs
//! - **Verifying** that every flagged value actually changed
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`anonymization`] - Resolver, strategies, pseudonym store, engine and report
//! - [`adapters`] - JSON dataset and detection documents
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use privacy_checker::adapters::json_file::{load_dataset, load_detections};
//! use privacy_checker::anonymization::AnonymizationEngine;
//! use privacy_checker::config::load_config;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = load_config("privacy-checker.toml")?;
//!     let dataset = load_dataset("data/customers.json")?;
//!     let detections = load_detections("output/detections.json")?;
//!
//!     let engine = AnonymizationEngine::new(config.anonymization)?;
//!     let (anonymized, report) = engine.anonymize_with_config(&dataset, &detections)?;
//!
//!     println!("{}", report.format_console());
//!     println!("{} rows anonymized", anonymized.row_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::CheckerError`]. Inside the engine most
//! data anomalies degrade gracefully: malformed values pass through unchanged,
//! unknown methods fall back to redaction, and a corrupt pseudonym map starts
//! empty. Only a failed map write aborts a run.

pub mod adapters;
pub mod anonymization;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
