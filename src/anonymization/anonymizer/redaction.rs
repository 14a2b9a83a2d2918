//! Redaction anonymization strategy

use super::Anonymizer;

/// Redaction strategy - replaces every value with a fixed token
pub struct RedactionStrategy {
    token: String,
}

impl RedactionStrategy {
    /// Create a new redaction strategy
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Anonymizer for RedactionStrategy {
    fn anonymize_value(&mut self, _value: &str) -> String {
        self.token.clone()
    }
}

impl Default for RedactionStrategy {
    fn default() -> Self {
        Self::new("REDACTED")
    }
}
