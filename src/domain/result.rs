//! Result type alias for reqflow
//!
//! This module provides a convenient Result type alias that uses ReqflowError
//! as the error type.

use super::errors::ReqflowError;

/// Result type alias for reqflow operations
///
/// # Examples
///
/// ```
/// use reqflow::domain::result::Result;
/// use reqflow::domain::errors::ReqflowError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ReqflowError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ReqflowError>;
