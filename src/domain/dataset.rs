//! Tabular dataset model
//!
//! A [`Dataset`] is an ordered collection of named columns of equal length.
//! Each cell is either present text or missing (`None`). The anonymization
//! engine only rewrites column contents; it never adds or removes rows or
//! columns.

use super::errors::CheckerError;
use super::result::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single named column of optional text values
///
/// # Examples
///
/// ```
/// use privacy_checker::domain::Column;
///
/// let column = Column::from_text("email", ["a@example.com", "b@example.com"]);
/// assert_eq!(column.len(), 2);
/// assert_eq!(column.present_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawColumn")]
pub struct Column {
    /// Column name, unique within a dataset
    pub name: String,

    /// Cell values in row order; `None` marks a missing value
    pub values: Vec<Option<String>>,
}

impl Column {
    /// Creates a column from optional values
    pub fn new(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Creates a column where every value is present
    pub fn from_text<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, values.into_iter().map(|v| Some(v.into())).collect())
    }

    /// Number of rows in the column
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column has no rows
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of non-missing values
    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// Wire form of a column: values may be any JSON scalar
#[derive(Deserialize)]
struct RawColumn {
    name: String,
    #[serde(default)]
    values: Vec<Value>,
}

impl From<RawColumn> for Column {
    fn from(raw: RawColumn) -> Self {
        Column {
            name: raw.name,
            values: raw.values.into_iter().map(coerce_to_text).collect(),
        }
    }
}

/// Coerce a JSON value to its text form; `null` is a missing value
fn coerce_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Ordered collection of equal-length named columns
///
/// # Examples
///
/// ```
/// use privacy_checker::domain::{Column, Dataset};
///
/// let dataset = Dataset::new(vec![
///     Column::from_text("email", ["a@example.com"]),
///     Column::new("phone", vec![None]),
/// ])
/// .unwrap();
///
/// assert_eq!(dataset.row_count(), 1);
/// assert_eq!(dataset.column_names(), vec!["email", "phone"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    columns: Vec<Column>,
}

#[derive(Deserialize)]
struct RawDataset {
    #[serde(default)]
    columns: Vec<Column>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = CheckerError;

    fn try_from(raw: RawDataset) -> Result<Self> {
        Dataset::new(raw.columns)
    }
}

impl Dataset {
    /// Creates a dataset, rejecting ragged or duplicate columns
    ///
    /// # Errors
    ///
    /// Returns [`CheckerError::Dataset`] if two columns share a name or if
    /// column lengths differ.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            for column in &columns {
                if column.len() != expected {
                    return Err(CheckerError::Dataset(format!(
                        "Column '{}' has {} rows, expected {}",
                        column.name,
                        column.len(),
                        expected
                    )));
                }
            }
        }

        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == column.name) {
                return Err(CheckerError::Dataset(format!(
                    "Duplicate column name: {}",
                    column.name
                )));
            }
        }

        Ok(Self { columns })
    }

    /// Creates a dataset with no columns and no rows
    pub fn empty() -> Self {
        Self::default()
    }

    /// All columns in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of rows (0 for a dataset without columns)
    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    /// Returns true if the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Replace the values of an existing column in place
    ///
    /// # Errors
    ///
    /// Returns [`CheckerError::Dataset`] if the column does not exist or the
    /// replacement would change the row count.
    pub fn replace_values(&mut self, name: &str, values: Vec<Option<String>>) -> Result<()> {
        let expected = self.row_count();
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| CheckerError::Dataset(format!("Unknown column: {name}")))?;

        if values.len() != expected {
            return Err(CheckerError::Dataset(format!(
                "Replacement for '{}' has {} rows, expected {}",
                name,
                values.len(),
                expected
            )));
        }

        column.values = values;
        Ok(())
    }
}
