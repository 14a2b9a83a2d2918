//! Result type alias for privacy-checker

use super::errors::CheckerError;

/// Result type alias for privacy-checker operations
///
/// # Examples
///
/// ```
/// use privacy_checker::domain::result::Result;
/// use privacy_checker::domain::errors::CheckerError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(CheckerError::Dataset("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CheckerError>;
