//! Result type alias for the cleaner
//!
//! This module provides a convenient Result type alias that uses
//! [`CleanerError`] as the error type.

use super::errors::CleanerError;

/// Result type alias for cleaner operations
///
/// # Examples
///
/// ```
/// use data_cleaner::domain::{CleanerError, Result};
///
/// fn failing_function() -> Result<()> {
///     Err(CleanerError::UnknownGenerator("first_name".to_string()))
/// }
///
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, CleanerError>;
