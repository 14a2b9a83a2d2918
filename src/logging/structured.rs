//! Structured logging setup using tracing
//!
//! Console output goes to stderr so that reports printed on stdout stay
//! clean. An optional JSON file layer writes to a rolling log file.

use crate::config::LoggingConfig;
use crate::domain::{CheckerError, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Guard that must be kept alive for the duration of the program
/// to ensure logs are flushed properly
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    /// Create a new logging guard
    fn new(file_guard: Option<WorkerGuard>) -> Self {
        Self {
            _file_guard: file_guard,
        }
    }
}

/// Initialize the logging system based on configuration
///
/// # Arguments
///
/// * `log_level_str` - Log level as a string (trace, debug, info, warn, error)
/// * `config` - Logging configuration
///
/// # Returns
///
/// A `LoggingGuard` that must be kept alive for the duration of the program
///
/// # Example
///
/// ```no_run
/// use privacy_checker::logging::init_logging;
/// use privacy_checker::config::LoggingConfig;
///
/// let config = LoggingConfig::default();
/// let _guard = init_logging("info", &config).expect("Failed to initialize logging");
/// ```
pub fn init_logging(log_level_str: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let log_level = parse_log_level(log_level_str)?;

    let mut layers = Vec::new();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(build_filter(log_level));

    layers.push(console_layer.boxed());

    let file_guard = if config.local_enabled {
        let rotation = match config.local_rotation.as_str() {
            "hourly" => Rotation::HOURLY,
            "never" => Rotation::NEVER,
            _ => Rotation::DAILY,
        };

        std::fs::create_dir_all(&config.local_path).map_err(|e| {
            CheckerError::Configuration(format!(
                "Failed to create log directory {}: {}",
                config.local_path, e
            ))
        })?;

        let file_appender =
            RollingFileAppender::new(rotation, &config.local_path, "privacy-checker.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(non_blocking)
            .with_filter(build_filter(log_level));

        layers.push(file_layer.boxed());
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry().with(layers).try_init().map_err(|e| {
        CheckerError::Configuration(format!("Failed to initialize logging: {e}"))
    })?;

    tracing::debug!(
        local_enabled = config.local_enabled,
        local_path = %config.local_path,
        "Logging initialized"
    );

    Ok(LoggingGuard::new(file_guard))
}

/// `RUST_LOG` wins over the configured level when set
fn build_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("privacy_checker={level}")))
}

/// Parse log level from string
fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(CheckerError::Configuration(format!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            level_str
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level_valid() {
        assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
        assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
        assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
        assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
    }

    #[test]
    fn test_parse_log_level_case_insensitive() {
        assert_eq!(parse_log_level("TRACE").unwrap(), Level::TRACE);
        assert_eq!(parse_log_level("Debug").unwrap(), Level::DEBUG);
    }

    #[test]
    fn test_parse_log_level_invalid() {
        assert!(parse_log_level("invalid").is_err());
        assert!(parse_log_level("").is_err());
    }

    #[test]
    fn test_logging_guard_creation() {
        let guard = LoggingGuard::new(None);
        drop(guard);
    }
}
