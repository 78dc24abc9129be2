//! Error context extension trait
//!
//! Similar to `anyhow::Context`, but keeps `ReqflowError` and its category.
//! Adding context prefixes the message of the existing variant, so a store
//! failure stays a store failure and keeps mapping to the same exit code.
//!
//! # Examples
//!
//! ```rust
//! use reqflow::domain::Result;
//! use reqflow::domain::context::ResultExt;
//!
//! fn read_file(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .context(format!("Failed to read file: {}", path))
//! }
//! ```

use crate::domain::errors::{ReqflowError, RowStoreError};
use crate::domain::result::Result;
use std::fmt::Display;

/// Extension trait for adding context to `Result` types
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context computed only when an error occurred
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reqflow::domain::Result;
    /// use reqflow::domain::context::ResultExt;
    ///
    /// fn approve(key: &str) -> Result<()> {
    ///     write_cell(key).with_context(|| format!("Failed to approve {}", key))
    /// }
    /// # fn write_cell(_key: &str) -> Result<()> { Ok(()) }
    /// ```
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ReqflowError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| e.into().prefixed(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.into().prefixed(f()))
    }
}

impl RowStoreError {
    fn prefixed(self, context: impl Display) -> Self {
        let wrap = |message: String| format!("{context}: {message}");
        match self {
            Self::ConnectionFailed(m) => Self::ConnectionFailed(wrap(m)),
            Self::AuthenticationFailed(m) => Self::AuthenticationFailed(wrap(m)),
            Self::SheetNotFound(m) => Self::SheetNotFound(wrap(m)),
            Self::RequestFailed { status, message } => Self::RequestFailed {
                status,
                message: wrap(message),
            },
            Self::InvalidResponse(m) => Self::InvalidResponse(wrap(m)),
            Self::Timeout(m) => Self::Timeout(wrap(m)),
        }
    }
}

impl ReqflowError {
    fn prefixed(self, context: impl Display) -> Self {
        let wrap = |message: String| format!("{context}: {message}");
        match self {
            Self::Configuration(m) => Self::Configuration(wrap(m)),
            Self::StoreUnavailable(inner) => Self::StoreUnavailable(inner.prefixed(context)),
            Self::RecordNotFound(m) => Self::RecordNotFound(wrap(m)),
            Self::Validation(m) => Self::Validation(wrap(m)),
            Self::Authentication(m) => Self::Authentication(wrap(m)),
            Self::Protection(m) => Self::Protection(wrap(m)),
            Self::Attachment(m) => Self::Attachment(wrap(m)),
            Self::Serialization(m) => Self::Serialization(wrap(m)),
            Self::Io(m) => Self::Io(wrap(m)),
            Self::Other(m) => Self::Other(wrap(m)),
            other @ Self::SchemaCapacityExceeded { .. } => Self::Other(wrap(other.to_string())),
        }
    }
}
