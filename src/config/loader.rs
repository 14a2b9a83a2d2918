//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CheckerConfig;
use crate::domain::errors::CheckerError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CheckerConfig
/// 4. Applies environment variable overrides (PRIVACY_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use privacy_checker::config::loader::load_config;
///
/// let config = load_config("privacy-checker.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CheckerConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CheckerError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CheckerError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads configuration from a file, or uses defaults when the file does not exist
///
/// Environment overrides and validation are applied in both cases.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<CheckerConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "Configuration file not found, using defaults");
    let mut config = CheckerConfig::default();
    finalize(&mut config)?;
    Ok(config)
}

/// Parses configuration from TOML text
pub fn parse_config(contents: &str) -> Result<CheckerConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: CheckerConfig = toml::from_str(&contents)
        .map_err(|e| CheckerError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finalize(&mut config)?;
    Ok(config)
}

fn finalize(config: &mut CheckerConfig) -> Result<()> {
    apply_env_overrides(config)?;

    config.validate().map_err(|e| {
        CheckerError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CheckerError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CheckerError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using PRIVACY_* prefix
///
/// Environment variables follow the pattern: PRIVACY_<SECTION>_<KEY>
/// For example: PRIVACY_APPLICATION_LOG_LEVEL, PRIVACY_ANONYMIZATION_SALT
fn apply_env_overrides(config: &mut CheckerConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("PRIVACY_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Anonymization overrides
    config
        .anonymization
        .apply_env_overrides()
        .map_err(|e| CheckerError::Configuration(format!("{e:#}")))?;

    // Logging overrides
    if let Ok(val) = std::env::var("PRIVACY_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("PRIVACY_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("PRIVACY_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
