//! JSON dataset and detection documents
//!
//! Dataset documents have the shape `{"columns": [{"name": ..., "values": [...]}]}`.
//! Detection documents are a JSON array of `{column, pattern, matches_found}`
//! records.

use crate::domain::{CheckerError, Dataset, Detection, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Load a dataset document
///
/// # Errors
///
/// Returns [`CheckerError::Io`] if the file cannot be read and
/// [`CheckerError::Dataset`] if it is not a well-formed dataset.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let contents = read(path)?;

    let dataset: Dataset = serde_json::from_str(&contents).map_err(|e| {
        CheckerError::Dataset(format!("Invalid dataset {}: {}", path.display(), e))
    })?;

    tracing::debug!(
        path = %path.display(),
        columns = dataset.columns().len(),
        rows = dataset.row_count(),
        "Dataset loaded"
    );
    Ok(dataset)
}

/// Load a detection document
///
/// # Errors
///
/// Returns [`CheckerError::Io`] if the file cannot be read and
/// [`CheckerError::Serialization`] if it is not a list of detections.
pub fn load_detections(path: impl AsRef<Path>) -> Result<Vec<Detection>> {
    let path = path.as_ref();
    let contents = read(path)?;

    let detections: Vec<Detection> = serde_json::from_str(&contents).map_err(|e| {
        CheckerError::Serialization(format!("Invalid detections {}: {}", path.display(), e))
    })?;

    tracing::debug!(path = %path.display(), detections = detections.len(), "Detections loaded");
    Ok(detections)
}

/// Write a dataset document, replacing any existing file atomically
pub fn write_dataset(path: impl AsRef<Path>, dataset: &Dataset) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut tmp, dataset)?;
    tmp.write_all(b"\n")?;
    tmp.persist(path).map_err(|e| {
        CheckerError::Io(format!("Failed to write {}: {}", path.display(), e.error))
    })?;

    tracing::debug!(path = %path.display(), rows = dataset.row_count(), "Dataset written");
    Ok(())
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| CheckerError::Io(format!("Failed to read {}: {}", path.display(), e)))
}
