//! Column method resolution
//!
//! A column may match several patterns. The resolver picks the most specific
//! label and maps it to a single method using the configured overrides or the
//! per-label defaults.

use crate::anonymization::config::{AnonymizationMethod, MethodConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Labels ranked from most to least specific
pub const LABEL_PREFERENCE: [&str; 4] = ["email", "phone", "national_id", "name"];

/// Outcome of resolving one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Label that drove the decision
    pub label: String,

    /// Method to apply
    pub method: AnonymizationMethod,

    /// Configured method name that was not recognized, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unknown_method: Option<String>,
}

/// Pick the label that decides a column's method
///
/// The first label of [`LABEL_PREFERENCE`] that was detected wins; otherwise
/// the lexicographically smallest label. Returns `None` for an empty set.
pub fn choose_label(labels: &BTreeSet<String>) -> Option<&str> {
    LABEL_PREFERENCE
        .iter()
        .find(|preferred| labels.contains(**preferred))
        .copied()
        .or_else(|| labels.iter().next().map(String::as_str))
}

/// Method for a single label
///
/// Configured names take precedence over defaults. Unknown configured names
/// resolve to [`AnonymizationMethod::Redact`].
pub fn resolve_label(label: &str, config: &MethodConfig) -> Resolution {
    match config.get(label) {
        Some(name) => match AnonymizationMethod::parse(name) {
            Some(method) => Resolution {
                label: label.to_string(),
                method,
                unknown_method: None,
            },
            None => {
                tracing::warn!(
                    label = %label,
                    method = %name,
                    "Unknown anonymization method, falling back to redact"
                );
                Resolution {
                    label: label.to_string(),
                    method: AnonymizationMethod::Redact,
                    unknown_method: Some(name.to_string()),
                }
            }
        },
        None => Resolution {
            label: label.to_string(),
            method: AnonymizationMethod::default_for_label(label),
            unknown_method: None,
        },
    }
}

/// Resolve the method for a column from its detected labels
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use privacy_checker::anonymization::config::{AnonymizationMethod, MethodConfig};
/// use privacy_checker::anonymization::resolver::resolve_column;
///
/// let labels: BTreeSet<String> = ["name", "email"].iter().map(|s| s.to_string()).collect();
/// let resolution = resolve_column(&labels, &MethodConfig::new()).unwrap();
/// assert_eq!(resolution.label, "email");
/// assert_eq!(resolution.method, AnonymizationMethod::Mask);
/// ```
pub fn resolve_column(labels: &BTreeSet<String>, config: &MethodConfig) -> Option<Resolution> {
    choose_label(labels).map(|label| resolve_label(label, config))
}
