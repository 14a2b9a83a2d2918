//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with an `EnvFilter`
//! - JSON-formatted local file logs with rotation
//!
//! # Example
//!
//! ```no_run
//! use privacy_checker::logging::init_logging;
//! use privacy_checker::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the outcome of anonymizing one column
///
/// # Example
///
/// ```no_run
/// use privacy_checker::log_column_anonymized;
///
/// log_column_anonymized!("email", "email", "mask", 10, 10);
/// ```
#[macro_export]
macro_rules! log_column_anonymized {
    ($column:expr, $label:expr, $method:expr, $changed:expr, $total:expr) => {
        tracing::info!(
            column = %$column,
            label = %$label,
            method = %$method,
            changed = $changed,
            total = $total,
            "Column anonymized"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use privacy_checker::log_error_with_context;
/// use privacy_checker::domain::CheckerError;
///
/// let error = CheckerError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
