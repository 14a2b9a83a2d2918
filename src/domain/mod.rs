//! Domain models and types for privacy-checker.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Tabular data** ([`Dataset`], [`Column`])
//! - **Scanner output** ([`Detection`])
//! - **Error types** ([`CheckerError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, CheckerError>`]:
//!
//! ```rust
//! use privacy_checker::domain::{Column, Dataset, Result};
//!
//! fn example() -> Result<Dataset> {
//!     let dataset = Dataset::new(vec![Column::from_text("email", ["a@example.com"])])?;
//!     Ok(dataset)
//! }
//! ```

pub mod dataset;
pub mod detection;
pub mod errors;
pub mod result;

// Re-export commonly used types for convenience
pub use dataset::{Column, Dataset};
pub use detection::Detection;
pub use errors::CheckerError;
pub use result::Result;
