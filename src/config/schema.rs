//! Configuration schema types
//!
//! This module defines the configuration structure that maps to
//! `privacy-checker.toml`. Every section and field has a default, so an empty
//! file is a valid configuration.

use crate::anonymization::config::AnonymizationConfig;
use serde::{Deserialize, Serialize};

/// Main privacy-checker configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Anonymization engine settings
    #[serde(default)]
    pub anonymization: AnonymizationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CheckerConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.anonymization
            .validate()
            .map_err(|e| format!("{e:#}"))?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path must not be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
