//! Domain error types
//!
//! This module defines the error hierarchy for privacy-checker.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main privacy-checker error type
///
/// Only a handful of conditions are fatal for an anonymization run. Most data
/// anomalies (malformed emails, unknown methods, absent columns) degrade
/// gracefully inside the engine and never reach this type.
#[derive(Debug, Error)]
pub enum CheckerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed dataset (ragged columns, duplicate names, bad input document)
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Pseudonym map could not be written back to storage
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for CheckerError {
    fn from(err: std::io::Error) -> Self {
        CheckerError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CheckerError {
    fn from(err: serde_json::Error) -> Self {
        CheckerError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CheckerError {
    fn from(err: toml::de::Error) -> Self {
        CheckerError::Configuration(format!("TOML parse error: {err}"))
    }
}
