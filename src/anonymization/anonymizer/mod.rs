//! Anonymization strategy module
//!
//! Each strategy transforms a single present value; the [`Anonymizer`] trait
//! lifts that to a whole column. Missing values always pass through unchanged
//! and the output column has the same length as the input.

pub mod hashing;
pub mod masking;
pub mod pseudonymization;
pub mod redaction;
pub mod synthetic;

pub use hashing::{hash_value, salted_digest, HashStrategy};
pub use masking::{mask_email, mask_phone, mask_value, EmailMaskStrategy, MaskStrategy, PhoneMaskStrategy};
pub use pseudonymization::{pseudonymize_value, PseudonymStrategy};
pub use redaction::RedactionStrategy;
pub use synthetic::{fake_email, fake_phone, FakeEmailStrategy, FakePhoneStrategy};

/// Trait for anonymization strategy implementations
pub trait Anonymizer {
    /// Anonymize one present value
    fn anonymize_value(&mut self, value: &str) -> String;

    /// Anonymize a column, leaving missing values untouched
    fn anonymize_column(&mut self, values: &[Option<String>]) -> Vec<Option<String>> {
        values
            .iter()
            .map(|value| value.as_deref().map(|v| self.anonymize_value(v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_keeps_missing_values_and_length() {
        let mut strategy = RedactionStrategy::new("REDACTED");
        let column = vec![Some("a".to_string()), None, Some("b".to_string())];

        let result = strategy.anonymize_column(&column);
        assert_eq!(
            result,
            vec![Some("REDACTED".to_string()), None, Some("REDACTED".to_string())]
        );
    }
}
