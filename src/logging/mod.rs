//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Console output, always on
//! - JSON file output with rotation when `logging.local_enabled` is set
//! - `RUST_LOG` overrides the configured level
//!
//! # Example
//!
//! ```no_run
//! use reqflow::logging::init_logging;
//! use reqflow::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a workflow status transition
///
/// # Example
///
/// ```no_run
/// use reqflow::log_transition;
///
/// log_transition!("20250718-001", "approval", "pending", "approved", "Alice");
/// ```
#[macro_export]
macro_rules! log_transition {
    ($business_key:expr, $track:expr, $from:expr, $to:expr, $actor:expr) => {
        tracing::info!(
            business_key = %$business_key,
            track = $track,
            from = %$from,
            to = %$to,
            actor = %$actor,
            "Status transition"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use reqflow::log_error_with_context;
/// use reqflow::domain::ReqflowError;
///
/// let error = ReqflowError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log the lossy column fallback taken when the column ceiling is reached
///
/// # Example
///
/// ```no_run
/// use reqflow::log_schema_fallback;
/// use reqflow::domain::ReqflowError;
///
/// let error = ReqflowError::SchemaCapacityExceeded {
///     column: "Edit Status".to_string(),
///     index: 23,
///     displaced: "Note".to_string(),
///     ceiling: 24,
/// };
/// log_schema_fallback!(&error, 23);
/// ```
#[macro_export]
macro_rules! log_schema_fallback {
    ($error:expr, $column:expr) => {
        tracing::error!(
            error = %$error,
            column = $column,
            "Column ceiling reached, overwriting last column"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use reqflow::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying row store request"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::ReqflowError;

    #[test]
    fn test_macros_expand_without_subscriber() {
        let error = ReqflowError::Validation("missing unit".to_string());
        crate::log_error_with_context!(&error, "Failed to submit");
        crate::log_transition!("20250718-001", "receipt", "pending", "received", "Bob");
        crate::log_retry_attempt!(1, 3, "timeout");
        crate::log_schema_fallback!(&error, 23usize);
    }
}
