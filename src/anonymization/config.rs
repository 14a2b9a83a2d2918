//! Anonymization configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Anonymization method applied to a flagged column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnonymizationMethod {
    /// Replace characters with `*` (label-aware for email and phone)
    Mask,
    /// Unsalted SHA-256 digest truncated to a fixed length
    Hash,
    /// Replace every value with a fixed token
    Redact,
    /// Deterministic synthetic replacement derived from a salted digest
    Fake,
    /// Lookup-based pseudonym persisted across runs
    Pseudonymize,
}

impl AnonymizationMethod {
    /// Parse a method name; `pseudo` is accepted as an alias of `pseudonymize`
    ///
    /// Names are matched exactly, so `HASH` is not a method.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "mask" => Some(Self::Mask),
            "hash" => Some(Self::Hash),
            "redact" => Some(Self::Redact),
            "fake" => Some(Self::Fake),
            "pseudonymize" | "pseudo" => Some(Self::Pseudonymize),
            _ => None,
        }
    }

    /// Canonical method name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mask => "mask",
            Self::Hash => "hash",
            Self::Redact => "redact",
            Self::Fake => "fake",
            Self::Pseudonymize => "pseudonymize",
        }
    }

    /// Default method for a pattern label when no override is configured
    pub fn default_for_label(label: &str) -> Self {
        match label {
            "email" | "phone" => Self::Mask,
            "national_id" => Self::Hash,
            _ => Self::Redact,
        }
    }
}

impl fmt::Display for AnonymizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-label method overrides
///
/// Method names are kept as raw strings so that a rules document with an
/// unknown method still loads; the resolver maps unknown names to `redact`.
///
/// # Examples
///
/// ```
/// use privacy_checker::anonymization::config::MethodConfig;
///
/// let config = MethodConfig::new()
///     .with_method("email", "hash")
///     .with_method("name", "pseudonymize");
/// assert_eq!(config.get("email"), Some("hash"));
/// assert_eq!(config.get("phone"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodConfig {
    methods: BTreeMap<String, String>,
}

impl MethodConfig {
    /// Create an empty override table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the method for a label
    pub fn with_method(mut self, label: impl Into<String>, method: impl Into<String>) -> Self {
        self.set(label, method);
        self
    }

    /// Add or replace the method for a label in place
    pub fn set(&mut self, label: impl Into<String>, method: impl Into<String>) {
        self.methods.insert(label.into(), method.into());
    }

    /// Raw method name configured for a label
    pub fn get(&self, label: &str) -> Option<&str> {
        self.methods.get(label).map(String::as_str)
    }

    /// Returns true if no overrides are configured
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Iterate over `(label, method)` pairs in label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.methods.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a `label=method` override as given on the command line
    pub fn parse_override(arg: &str) -> Result<(String, String)> {
        let (label, method) = arg
            .split_once('=')
            .with_context(|| format!("Invalid method override '{arg}', expected label=method"))?;
        let label = label.trim();
        let method = method.trim();
        if label.is_empty() || method.is_empty() {
            anyhow::bail!("Invalid method override '{}', expected label=method", arg);
        }
        Ok((label.to_string(), method.to_string()))
    }
}

/// Engine parameters: salt, storage location, and per-primitive settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizationConfig {
    /// Salt for the fake and pseudonymize digests
    ///
    /// Changing it changes every newly generated pseudonym; mappings already
    /// stored in the pseudonym map keep their stored value.
    #[serde(default = "default_salt")]
    pub salt: String,

    /// Location of the persisted pseudonym map
    #[serde(default = "default_map_path")]
    pub map_path: PathBuf,

    /// Persist newly learned pseudonyms after each run
    #[serde(default = "default_true")]
    pub persist_map: bool,

    /// Hex characters kept from the plain hash
    #[serde(default = "default_hash_length")]
    pub hash_length: usize,

    /// Replacement token for redaction
    #[serde(default = "default_redaction_token")]
    pub redaction_token: String,

    /// Keep the leading local-part characters when masking emails; when false
    /// the whole local part is masked
    #[serde(default = "default_true")]
    pub email_keep_domain: bool,

    /// Leading local-part characters kept when masking emails
    #[serde(default = "default_email_keep_local_chars")]
    pub email_keep_local_chars: usize,

    /// Trailing digits kept when masking phone numbers
    #[serde(default = "default_phone_keep_last")]
    pub phone_keep_last: usize,

    /// Trailing characters kept by the generic mask
    #[serde(default)]
    pub mask_keep_last: usize,

    /// Domain used for synthetic email addresses
    #[serde(default = "default_fake_email_domain")]
    pub fake_email_domain: String,

    /// Country prefix used for synthetic phone numbers
    #[serde(default = "default_fake_phone_prefix")]
    pub fake_phone_prefix: String,

    /// Pseudonym prefix for the pseudonymize method
    #[serde(default = "default_pseudonym_prefix")]
    pub pseudonym_prefix: String,

    /// Pseudonym prefix for fake values of labels without a synthetic template
    #[serde(default = "default_fake_prefix")]
    pub fake_prefix: String,

    /// Per-label method overrides
    #[serde(default)]
    pub methods: MethodConfig,

    /// Run history settings
    #[serde(default)]
    pub audit: AuditConfig,
}

/// Run history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Append one entry per run
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// History file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// JSON lines (true) or plain text lines (false)
    #[serde(default = "default_true")]
    pub json_format: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_path: default_audit_log_path(),
            json_format: true,
        }
    }
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("output/scan_history.jsonl")
}

fn default_salt() -> String {
    "privacy_checker_salt".to_string()
}

fn default_map_path() -> PathBuf {
    PathBuf::from("output/anonymization_map.json")
}

fn default_true() -> bool {
    true
}

fn default_hash_length() -> usize {
    12
}

fn default_redaction_token() -> String {
    "REDACTED".to_string()
}

fn default_email_keep_local_chars() -> usize {
    1
}

fn default_phone_keep_last() -> usize {
    3
}

fn default_fake_email_domain() -> String {
    "example.com".to_string()
}

fn default_fake_phone_prefix() -> String {
    "+251".to_string()
}

fn default_pseudonym_prefix() -> String {
    "USER".to_string()
}

fn default_fake_prefix() -> String {
    "FAKE".to_string()
}

impl Default for AnonymizationConfig {
    fn default() -> Self {
        Self {
            salt: default_salt(),
            map_path: default_map_path(),
            persist_map: true,
            hash_length: default_hash_length(),
            redaction_token: default_redaction_token(),
            email_keep_domain: true,
            email_keep_local_chars: default_email_keep_local_chars(),
            phone_keep_last: default_phone_keep_last(),
            mask_keep_last: 0,
            fake_email_domain: default_fake_email_domain(),
            fake_phone_prefix: default_fake_phone_prefix(),
            pseudonym_prefix: default_pseudonym_prefix(),
            fake_prefix: default_fake_prefix(),
            methods: MethodConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

impl AnonymizationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.salt.is_empty() {
            anyhow::bail!("anonymization.salt must not be empty");
        }
        if self.hash_length == 0 || self.hash_length > 64 {
            anyhow::bail!(
                "anonymization.hash_length must be between 1 and 64, got {}",
                self.hash_length
            );
        }
        if self.redaction_token.is_empty() {
            anyhow::bail!("anonymization.redaction_token must not be empty");
        }
        if self.pseudonym_prefix.is_empty() || self.fake_prefix.is_empty() {
            anyhow::bail!("anonymization pseudonym prefixes must not be empty");
        }
        if self.pseudonym_prefix.contains('|') || self.fake_prefix.contains('|') {
            anyhow::bail!("anonymization pseudonym prefixes must not contain '|'");
        }
        if self.map_path.as_os_str().is_empty() {
            anyhow::bail!("anonymization.map_path must not be empty");
        }
        if self.audit.enabled && self.audit.log_path.as_os_str().is_empty() {
            anyhow::bail!("anonymization.audit.log_path must not be empty when audit is enabled");
        }

        for (label, method) in self.methods.iter() {
            if AnonymizationMethod::parse(method).is_none() {
                // Not fatal: the resolver falls back to redaction
                tracing::warn!(
                    label = %label,
                    method = %method,
                    "Unknown anonymization method configured, redaction will be used"
                );
            }
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("PRIVACY_ANONYMIZATION_SALT") {
            self.salt = val;
        }

        if let Ok(val) = std::env::var("PRIVACY_ANONYMIZATION_MAP_PATH") {
            self.map_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("PRIVACY_ANONYMIZATION_PERSIST_MAP") {
            self.persist_map = val
                .parse()
                .context("Invalid PRIVACY_ANONYMIZATION_PERSIST_MAP value")?;
        }

        if let Ok(val) = std::env::var("PRIVACY_ANONYMIZATION_HASH_LENGTH") {
            self.hash_length = val
                .parse()
                .context("Invalid PRIVACY_ANONYMIZATION_HASH_LENGTH value")?;
        }

        if let Ok(val) = std::env::var("PRIVACY_ANONYMIZATION_REDACTION_TOKEN") {
            self.redaction_token = val;
        }

        if let Ok(val) = std::env::var("PRIVACY_ANONYMIZATION_AUDIT_ENABLED") {
            self.audit.enabled = val
                .parse()
                .context("Invalid PRIVACY_ANONYMIZATION_AUDIT_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("PRIVACY_ANONYMIZATION_AUDIT_LOG_PATH") {
            self.audit.log_path = PathBuf::from(val);
        }

        Ok(())
    }
}
