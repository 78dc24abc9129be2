//! Domain error types
//!
//! This module defines the error hierarchy for reqflow. Errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main reqflow error type
///
/// This is the primary error type used throughout the application.
/// Every operation reports failures through it; nothing retries on its own.
#[derive(Debug, Error)]
pub enum ReqflowError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The row store client could not be built or a call against it failed.
    /// Fatal for the current operation.
    #[error("Row store unavailable: {0}")]
    StoreUnavailable(#[from] RowStoreError),

    /// Business key absent from the current fetch
    #[error("Requisition not found: {0}")]
    RecordNotFound(String),

    /// No room left for a new column.
    ///
    /// Never returned to callers: the schema resolver falls back to reusing
    /// the last column and logs this error instead.
    #[error("Column capacity of {ceiling} reached; '{column}' now occupies column {index} (was '{displaced}')")]
    SchemaCapacityExceeded {
        /// Header text of the column being placed
        column: String,
        /// 0-based index that was taken over
        index: usize,
        /// Header that previously occupied the column
        displaced: String,
        /// Configured column ceiling
        ceiling: usize,
    },

    /// Missing or malformed required input, checked before any store call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credential check failed
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// External protection request failed (logged and swallowed by callers)
    #[error("Protection hook error: {0}")]
    Protection(String),

    /// Attachment storage failed (converted to an empty reference by callers)
    #[error("Attachment error: {0}")]
    Attachment(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Row store errors
///
/// Errors that occur when talking to the shared tabular service.
/// These errors don't expose the HTTP client's types.
#[derive(Debug, Error)]
pub enum RowStoreError {
    /// Failed to reach the service
    #[error("Failed to connect to row store: {0}")]
    ConnectionFailed(String),

    /// Credentials rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Named sheet does not exist
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Non-success status from the service
    #[error("Request failed: {status} - {message}")]
    RequestFailed { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Invalid response from row store: {0}")]
    InvalidResponse(String),

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

impl RowStoreError {
    /// Whether another attempt could reasonably succeed
    pub fn is_transient(&self) -> bool {
        match self {
            RowStoreError::ConnectionFailed(_) | RowStoreError::Timeout(_) => true,
            RowStoreError::RequestFailed { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl ReqflowError {
    /// Whether this error means the backing store could not be used
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, ReqflowError::StoreUnavailable(_))
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ReqflowError {
    fn from(err: std::io::Error) -> Self {
        ReqflowError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ReqflowError {
    fn from(err: serde_json::Error) -> Self {
        ReqflowError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ReqflowError {
    fn from(err: toml::de::Error) -> Self {
        ReqflowError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqflow_error_display() {
        let err = ReqflowError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_row_store_error_conversion() {
        let store_err = RowStoreError::ConnectionFailed("Network error".to_string());
        let err: ReqflowError = store_err.into();
        assert!(err.is_store_unavailable());
    }

    #[test]
    fn test_schema_capacity_display_names_displaced_column() {
        let err = ReqflowError::SchemaCapacityExceeded {
            column: "Edit Status".to_string(),
            index: 23,
            displaced: "Receipt Approval Note".to_string(),
            ceiling: 24,
        };
        let text = err.to_string();
        assert!(text.contains("Edit Status"));
        assert!(text.contains("Receipt Approval Note"));
        assert!(text.contains("24"));
    }

    #[test]
    fn test_transient_classification() {
        assert!(RowStoreError::Timeout("5s".to_string()).is_transient());
        assert!(RowStoreError::RequestFailed {
            status: 503,
            message: "unavailable".to_string()
        }
        .is_transient());
        assert!(RowStoreError::RequestFailed {
            status: 429,
            message: "quota".to_string()
        }
        .is_transient());
        assert!(!RowStoreError::RequestFailed {
            status: 404,
            message: "missing".to_string()
        }
        .is_transient());
        assert!(!RowStoreError::SheetNotFound("requisitions".to_string()).is_transient());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: ReqflowError = io_err.into();
        assert!(matches!(err, ReqflowError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: ReqflowError = json_err.into();
        assert!(matches!(err, ReqflowError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: ReqflowError = toml_err.into();
        assert!(matches!(err, ReqflowError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}
