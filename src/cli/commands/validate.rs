//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the privacy-checker configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading validates as well
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let anonymization = &config.anonymization;
        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Pseudonym Map: {}", anonymization.map_path.display());
        println!("  Persist Map: {}", anonymization.persist_map);
        println!("  Hash Length: {}", anonymization.hash_length);
        println!("  Redaction Token: {}", anonymization.redaction_token);
        if anonymization.methods.is_empty() {
            println!("  Methods: defaults");
        } else {
            println!("  Methods:");
            for (label, method) in anonymization.methods.iter() {
                println!("    {label} = {method}");
            }
        }
        println!(
            "  Run History: {}",
            if anonymization.audit.enabled {
                anonymization.audit.log_path.display().to_string()
            } else {
                "disabled".to_string()
            }
        );
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_missing_file() {
        let code = ValidateArgs {}.execute("does-not-exist.toml").unwrap();
        assert_eq!(code, 2);
    }

    #[test]
    fn test_validate_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[anonymization]\nsalt = \"abc\"").unwrap();

        let path = file.path().to_string_lossy().to_string();
        assert_eq!(ValidateArgs {}.execute(&path).unwrap(), 0);
    }

    #[test]
    fn test_validate_invalid_value() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[application]\nlog_level = \"loud\"").unwrap();

        let path = file.path().to_string_lossy().to_string();
        assert_eq!(ValidateArgs {}.execute(&path).unwrap(), 2);
    }
}
