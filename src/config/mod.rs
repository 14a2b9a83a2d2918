//! Configuration management for privacy-checker.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! privacy-checker uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `PRIVACY_*` environment overrides
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use privacy_checker::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("privacy-checker.toml")?;
//!
//! println!("Pseudonym map: {}", config.anonymization.map_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`AnonymizationConfig`](crate::anonymization::AnonymizationConfig) - Engine
//!   parameters, per-label methods and run history
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [anonymization]
//! salt = "${PRIVACY_SALT}"
//! map_path = "output/anonymization_map.json"
//!
//! [anonymization.methods]
//! email = "mask"
//! national_id = "pseudonymize"
//!
//! [anonymization.audit]
//! log_path = "output/scan_history.jsonl"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{ApplicationConfig, CheckerConfig, LoggingConfig};
