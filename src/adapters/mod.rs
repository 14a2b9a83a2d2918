//! File integrations for privacy-checker.
//!
//! This module provides adapters between the on-disk documents and the
//! domain types:
//!
//! - [`json_file`] - Dataset and detection documents in JSON
//!
//! The anonymization engine never touches these files itself; the CLI loads
//! the inputs through this layer and hands domain values to the engine.
//!
//! ```rust,no_run
//! use privacy_checker::adapters::json_file::{load_dataset, load_detections};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = load_dataset("data/customers.json")?;
//! let detections = load_detections("output/detections.json")?;
//! println!("{} rows, {} detections", dataset.row_count(), detections.len());
//! # Ok(())
//! # }
//! ```

pub mod json_file;
