//! Configuration schema types
//!
//! Maps one-to-one onto the sections of `reqflow.toml`.

use crate::config::SecretString;
use crate::core::schema::{Field, DEFAULT_MAX_COLUMNS};
use serde::{Deserialize, Serialize};

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main reqflow configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReqflowConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Row store connection
    pub store: StoreConfig,

    /// Column schema settings
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Workflow settings
    #[serde(default)]
    pub workflow: WorkflowConfig,

    /// External protection hook
    #[serde(default)]
    pub protection: ProtectionConfig,

    /// Attachment storage
    #[serde(default)]
    pub attachment: AttachmentConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ReqflowConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.store.validate(&self.environment)?;
        self.schema.validate()?;
        self.workflow.validate()?;
        self.protection.validate(&self.environment)?;
        self.attachment.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Retry configuration for row store requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_retries == 0 || self.max_retries > 10 {
            return Err(format!(
                "store.retry.max_retries must be between 1 and 10, got {}",
                self.max_retries
            ));
        }
        if self.backoff_multiplier < 1.0 {
            return Err(format!(
                "store.retry.backoff_multiplier must be >= 1.0, got {}",
                self.backoff_multiplier
            ));
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err("store.retry.initial_delay_ms must not exceed max_delay_ms".to_string());
        }
        Ok(())
    }
}

/// Row store (spreadsheet values API) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the values API
    #[serde(default = "default_store_base_url")]
    pub base_url: String,

    /// Spreadsheet holding every sheet used by reqflow
    pub spreadsheet_id: String,

    /// Sheet holding requisitions
    #[serde(default = "default_requisition_sheet")]
    pub requisition_sheet: String,

    /// Sheet holding user accounts
    #[serde(default = "default_user_sheet")]
    pub user_sheet: String,

    /// OAuth bearer token
    /// Stored securely in memory and automatically zeroized on drop
    pub access_token: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry policy, applied by the row store client only
    #[serde(default)]
    pub retry: RetryConfig,
}

impl StoreConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        use secrecy::ExposeSecret;

        let url = url::Url::parse(&self.base_url)
            .map_err(|e| format!("store.base_url '{}' is not a valid URL: {}", self.base_url, e))?;

        if *environment == Environment::Production && url.scheme() != "https" {
            return Err("store.base_url must use https:// in production".to_string());
        }

        if self.spreadsheet_id.trim().is_empty() {
            return Err("store.spreadsheet_id cannot be empty".to_string());
        }

        if self.requisition_sheet.trim().is_empty() {
            return Err("store.requisition_sheet cannot be empty".to_string());
        }

        if self.user_sheet.trim().is_empty() {
            return Err("store.user_sheet cannot be empty".to_string());
        }

        if self.access_token.expose_secret().is_empty() {
            return Err("store.access_token cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 300 {
            return Err(format!(
                "store.timeout_seconds must be between 1 and 300, got {}",
                self.timeout_seconds
            ));
        }

        self.retry.validate()
    }
}

/// Column schema configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Per-row column ceiling of the backing sheet
    #[serde(default = "default_max_columns")]
    pub max_columns: usize,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            max_columns: default_max_columns(),
        }
    }
}

impl SchemaConfig {
    fn validate(&self) -> Result<(), String> {
        let minimum = Field::INTAKE.len();
        if self.max_columns < minimum || self.max_columns > 18_278 {
            return Err(format!(
                "schema.max_columns must be between {} and 18278, got {}",
                minimum, self.max_columns
            ));
        }
        Ok(())
    }
}

/// Workflow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Account whose password authorizes unlocking
    #[serde(default = "default_admin_account")]
    pub admin_account: String,

    /// Department with its own approval queue
    #[serde(default = "default_segregated_department")]
    pub segregated_department: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            admin_account: default_admin_account(),
            segregated_department: default_segregated_department(),
        }
    }
}

impl WorkflowConfig {
    fn validate(&self) -> Result<(), String> {
        if self.admin_account.trim().is_empty() {
            return Err("workflow.admin_account cannot be empty".to_string());
        }
        if self.segregated_department.trim().is_empty() {
            return Err("workflow.segregated_department cannot be empty".to_string());
        }
        Ok(())
    }
}

/// External protection hook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtectionConfig {
    /// Request external protection on terminal decisions
    #[serde(default)]
    pub enabled: bool,

    /// Web app endpoint accepting protection requests
    #[serde(default)]
    pub web_app_url: Option<String>,

    /// Password forwarded to the web app
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub admin_password: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ProtectionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            web_app_url: None,
            admin_password: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl ProtectionConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }

        let raw = self
            .web_app_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| "protection enabled but web_app_url not provided".to_string())?;

        let url = url::Url::parse(raw)
            .map_err(|e| format!("protection.web_app_url '{}' is not a valid URL: {}", raw, e))?;

        if *environment == Environment::Production && url.scheme() != "https" {
            return Err("protection.web_app_url must use https:// in production".to_string());
        }

        if self.admin_password.is_none() {
            return Err("protection enabled but admin_password not provided".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("protection.timeout_seconds must be > 0".to_string());
        }
        Ok(())
    }
}

/// Attachment storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentConfig {
    /// Store attachments submitted with requisitions
    #[serde(default)]
    pub enabled: bool,

    /// Root directory of the attachment store
    #[serde(default = "default_attachment_root")]
    pub root_path: String,

    /// Folder below the root receiving requisition attachments
    #[serde(default = "default_attachment_folder")]
    pub folder_id: String,
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            root_path: default_attachment_root(),
            folder_id: default_attachment_folder(),
        }
    }
}

impl AttachmentConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }
        if self.root_path.trim().is_empty() {
            return Err("attachment.root_path cannot be empty".to_string());
        }
        if self.folder_id.trim().is_empty()
            || self.folder_id.contains("..")
            || self.folder_id.contains(['/', '\\'])
        {
            return Err(format!(
                "attachment.folder_id '{}' must be a single directory name",
                self.folder_id
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_store_base_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

fn default_requisition_sheet() -> String {
    "requisitions".to_string()
}

fn default_user_sheet() -> String {
    "users".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    8_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_max_columns() -> usize {
    DEFAULT_MAX_COLUMNS
}

fn default_admin_account() -> String {
    "admin".to_string()
}

fn default_segregated_department() -> String {
    "R&D".to_string()
}

fn default_attachment_root() -> String {
    "./attachments".to_string()
}

fn default_attachment_folder() -> String {
    "requisitions".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
