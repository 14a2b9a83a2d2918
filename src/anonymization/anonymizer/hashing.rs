//! Digest-based strategies
//!
//! Two digest paths exist. [`hash_value`] is an unsalted content
//! fingerprint: identical text hashes identically everywhere. [`salted_digest`]
//! mixes in the configured salt and backs the fake and pseudonymize methods,
//! which tokenize identities and must not be reproducible without the salt.

use super::Anonymizer;
use sha2::{Digest, Sha256};

/// Hex characters produced by [`salted_digest`]
pub const SALTED_DIGEST_LEN: usize = 12;

/// SHA-256 hex digest of the value, truncated to `length` characters
///
/// `length` is clamped to the 64 characters a SHA-256 hex digest has.
///
/// # Examples
///
/// ```
/// use privacy_checker::anonymization::anonymizer::hash_value;
///
/// let digest = hash_value("AB12345678", 12);
/// assert_eq!(digest.len(), 12);
/// assert_eq!(digest, hash_value("AB12345678", 12));
/// ```
pub fn hash_value(value: &str, length: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    let mut digest = format!("{result:x}");
    digest.truncate(length.min(digest.len()));
    digest
}

/// Salted SHA-256 of `"<value>|<salt>"`, truncated to 12 hex characters
pub fn salted_digest(value: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hasher.update(b"|");
    hasher.update(salt.as_bytes());
    let result = hasher.finalize();
    let mut digest = format!("{result:x}");
    digest.truncate(SALTED_DIGEST_LEN);
    digest
}

/// Plain hashing strategy
pub struct HashStrategy {
    length: usize,
}

impl HashStrategy {
    /// Create a hashing strategy producing `length` hex characters
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Anonymizer for HashStrategy {
    fn anonymize_value(&mut self, value: &str) -> String {
        hash_value(value, self.length)
    }
}
