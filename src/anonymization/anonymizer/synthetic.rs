//! Synthetic (fake) value generators
//!
//! Fake values are derived from the salted digest of the original, so the
//! same input always yields the same replacement for a given salt.

use super::hashing::salted_digest;
use super::Anonymizer;

/// Synthetic email `user<digest6>@<domain>`
///
/// # Examples
///
/// ```
/// use privacy_checker::anonymization::anonymizer::fake_email;
///
/// let fake = fake_email("jane@corp.io", "salt", "example.com");
/// assert!(fake.starts_with("user"));
/// assert!(fake.ends_with("@example.com"));
/// assert_eq!(fake, fake_email("jane@corp.io", "salt", "example.com"));
/// ```
pub fn fake_email(value: &str, salt: &str, domain: &str) -> String {
    let digest = salted_digest(value, salt);
    format!("user{}@{}", &digest[..6], domain)
}

/// Synthetic phone `<country_prefix><digest9>` using the last nine digest characters
pub fn fake_phone(value: &str, salt: &str, country_prefix: &str) -> String {
    let digest = salted_digest(value, salt);
    let tail = &digest[digest.len() - 9..];
    format!("{country_prefix}{tail}")
}

/// Fake email strategy
pub struct FakeEmailStrategy {
    salt: String,
    domain: String,
}

impl FakeEmailStrategy {
    /// Create a fake email strategy
    pub fn new(salt: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            salt: salt.into(),
            domain: domain.into(),
        }
    }
}

impl Anonymizer for FakeEmailStrategy {
    fn anonymize_value(&mut self, value: &str) -> String {
        fake_email(value, &self.salt, &self.domain)
    }
}

/// Fake phone strategy
pub struct FakePhoneStrategy {
    salt: String,
    country_prefix: String,
}

impl FakePhoneStrategy {
    /// Create a fake phone strategy
    pub fn new(salt: impl Into<String>, country_prefix: impl Into<String>) -> Self {
        Self {
            salt: salt.into(),
            country_prefix: country_prefix.into(),
        }
    }
}

impl Anonymizer for FakePhoneStrategy {
    fn anonymize_value(&mut self, value: &str) -> String {
        fake_phone(value, &self.salt, &self.country_prefix)
    }
}
