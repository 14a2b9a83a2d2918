//! Run history
//!
//! Keeps an append-only record of anonymization runs.

pub mod logger;

pub use logger::{load_history, AuditColumn, AuditEntry, AuditLogger};
