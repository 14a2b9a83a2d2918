//! Detection records produced by the upstream PII scanner

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A PII pattern matched on a dataset column
///
/// Several detections may reference the same column when more than one
/// pattern matched. Labels are opaque strings (`email`, `phone`,
/// `national_id`, `name`, ...); unrecognized labels are handled generically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// Name of the column the pattern matched
    pub column: String,

    /// Pattern label assigned by the scanner
    pub pattern: String,

    /// Number of values that matched
    #[serde(default)]
    pub matches_found: usize,
}

impl Detection {
    /// Creates a new detection
    pub fn new(column: impl Into<String>, pattern: impl Into<String>, matches_found: usize) -> Self {
        Self {
            column: column.into(),
            pattern: pattern.into(),
            matches_found,
        }
    }
}

/// Group detections by column name, collecting the distinct labels per column
///
/// Columns and labels come back sorted so callers iterate deterministically.
pub fn group_by_column(detections: &[Detection]) -> BTreeMap<String, BTreeSet<String>> {
    let mut grouped: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for detection in detections {
        grouped
            .entry(detection.column.clone())
            .or_default()
            .insert(detection.pattern.clone());
    }
    grouped
}

/// Distinct pattern labels across all detections, sorted
pub fn distinct_patterns(detections: &[Detection]) -> Vec<String> {
    detections
        .iter()
        .map(|d| d.pattern.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
