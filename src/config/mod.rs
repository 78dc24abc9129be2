//! Configuration management for reqflow.
//!
//! TOML configuration with `${VAR_NAME}` substitution, `REQFLOW_*`
//! environment overrides, defaults for optional settings, and validation
//! on load.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use reqflow::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("reqflow.toml")?;
//!
//! println!("Spreadsheet: {}", config.store.spreadsheet_id);
//! println!("Column ceiling: {}", config.schema.max_columns);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`StoreConfig`] - Row store connection, sheet names, retry policy
//! - [`SchemaConfig`] - Column ceiling
//! - [`WorkflowConfig`] - Admin account and segregated department
//! - [`ProtectionConfig`] - Optional external protection hook
//! - [`AttachmentConfig`] - Attachment directory
//! - [`LoggingConfig`] - Local log files
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "production"
//!
//! [application]
//! log_level = "info"
//!
//! [store]
//! spreadsheet_id = "1AbC..."
//! access_token = "${REQFLOW_STORE_TOKEN}"
//!
//! [protection]
//! enabled = true
//! web_app_url = "https://script.google.com/macros/s/.../exec"
//! admin_password = "${REQFLOW_PROTECTION_PASSWORD}"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, AttachmentConfig, Environment, LoggingConfig, ProtectionConfig,
    ReqflowConfig, RetryConfig, SchemaConfig, StoreConfig, WorkflowConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
