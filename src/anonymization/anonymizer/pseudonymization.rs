//! Pseudonymization strategy
//!
//! Replaces values with `<PREFIX>_<digest12>` tokens recorded in a
//! [`PseudonymMap`]. Once a value has a pseudonym it keeps it, even if the
//! salt later changes.

use super::hashing::salted_digest;
use super::Anonymizer;
use crate::anonymization::store::{pseudonym_key, PseudonymMap};

/// Look up or assign the pseudonym for `value` under `prefix`
///
/// # Examples
///
/// ```
/// use privacy_checker::anonymization::anonymizer::pseudonymize_value;
/// use privacy_checker::anonymization::store::PseudonymMap;
///
/// let mut map = PseudonymMap::new();
/// let first = pseudonymize_value("Jane Smith", "USER", "salt", &mut map);
/// let again = pseudonymize_value("Jane Smith", "USER", "salt", &mut map);
/// assert_eq!(first, again);
/// assert!(first.starts_with("USER_"));
/// assert_eq!(map.len(), 1);
/// ```
pub fn pseudonymize_value(value: &str, prefix: &str, salt: &str, map: &mut PseudonymMap) -> String {
    map.get_or_insert_with(pseudonym_key(prefix, value), || {
        format!("{}_{}", prefix, salted_digest(value, salt))
    })
    .to_string()
}

/// Pseudonymization strategy backed by a pseudonym map
pub struct PseudonymStrategy<'m> {
    prefix: String,
    salt: String,
    map: &'m mut PseudonymMap,
}

impl<'m> PseudonymStrategy<'m> {
    /// Create a pseudonymization strategy writing into `map`
    pub fn new(prefix: impl Into<String>, salt: impl Into<String>, map: &'m mut PseudonymMap) -> Self {
        Self {
            prefix: prefix.into(),
            salt: salt.into(),
            map,
        }
    }
}

impl Anonymizer for PseudonymStrategy<'_> {
    fn anonymize_value(&mut self, value: &str) -> String {
        pseudonymize_value(value, &self.prefix, &self.salt, self.map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_pseudonym_format() {
        let mut map = PseudonymMap::new();
        let pseudonym = pseudonymize_value("alice", "USER", "salt", &mut map);
        assert_eq!(pseudonym, format!("USER_{}", salted_digest("alice", "salt")));
        assert_eq!(map.get("USER|alice"), Some(pseudonym.as_str()));
        assert!(map.is_dirty());
    }

    #[test]
    fn test_stored_pseudonym_wins_over_generated() {
        let mut map = PseudonymMap::from_entries(BTreeMap::from([(
            "USER|alice".to_string(),
            "USER_legacy".to_string(),
        )]));

        let pseudonym = pseudonymize_value("alice", "USER", "new-salt", &mut map);
        assert_eq!(pseudonym, "USER_legacy");
        assert!(!map.is_dirty());
    }

    #[test]
    fn test_prefixes_are_independent_namespaces() {
        let mut map = PseudonymMap::new();
        let user = pseudonymize_value("alice", "USER", "salt", &mut map);
        let fake = pseudonymize_value("alice", "FAKE", "salt", &mut map);
        assert!(user.starts_with("USER_"));
        assert!(fake.starts_with("FAKE_"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_strategy_over_column() {
        let mut map = PseudonymMap::new();
        let column = vec![
            Some("alice".to_string()),
            None,
            Some("bob".to_string()),
            Some("alice".to_string()),
        ];

        let result = {
            let mut strategy = PseudonymStrategy::new("USER", "salt", &mut map);
            strategy.anonymize_column(&column)
        };

        assert_eq!(result[0], result[3]);
        assert_ne!(result[0], result[2]);
        assert!(result[1].is_none());
        assert_eq!(map.len(), 2);
    }
}
