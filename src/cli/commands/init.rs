//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "privacy-checker.toml")]
    pub output: String,

    /// Include every setting with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing privacy-checker configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set a project-specific salt in {}", self.output);
                println!("  2. Validate configuration: privacy-checker validate-config");
                println!(
                    "  3. Run: privacy-checker anonymize -i data.json -d detections.json -o anonymized.json"
                );
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# privacy-checker configuration

[application]
log_level = "info"

[anonymization]
# Changing the salt changes every newly generated pseudonym
salt = "privacy_checker_salt"
map_path = "output/anonymization_map.json"

[anonymization.methods]
email = "mask"
phone = "mask"
national_id = "hash"
name = "redact"
"#
        .to_string()
    }

    /// Generate configuration with every setting documented
    fn generate_config_with_examples() -> String {
        r#"# privacy-checker configuration
#
# Values may reference environment variables, e.g. salt = "${PRIVACY_SALT}".
# Any setting can also be overridden with PRIVACY_<SECTION>_<KEY>.

[application]
# trace | debug | info | warn | error
log_level = "info"

[anonymization]
# Salt for fake and pseudonymize digests
salt = "privacy_checker_salt"

# Persisted pseudonym map, shared by every run against the same project
map_path = "output/anonymization_map.json"
persist_map = true

# Hex characters kept by the hash method (1-64)
hash_length = 12

# Token written by the redact method
redaction_token = "REDACTED"

# Masking
email_keep_domain = true
email_keep_local_chars = 1
phone_keep_last = 3
mask_keep_last = 0

# Synthetic values
fake_email_domain = "example.com"
fake_phone_prefix = "+251"
fake_prefix = "FAKE"
pseudonym_prefix = "USER"

# Method per PII label: mask | hash | redact | fake | pseudonymize
# Unknown method names fall back to redact.
[anonymization.methods]
email = "mask"
phone = "mask"
national_id = "hash"
name = "redact"

# One entry per anonymization run, no raw values
[anonymization.audit]
enabled = true
log_path = "output/scan_history.jsonl"
json_format = true

[logging]
# JSON log files in addition to the console
local_enabled = false
local_path = "logs"
# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}
