//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{Environment, ReqflowConfig};
use super::secret::{secret_string, secret_string_opt};
use crate::domain::errors::ReqflowError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ReqflowConfig
/// 4. Applies environment variable overrides (REQFLOW_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a configuration error if the file cannot be read or parsed, a
/// referenced environment variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use reqflow::config::loader::load_config;
///
/// let config = load_config("reqflow.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ReqflowConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ReqflowError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ReqflowError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration text, applying substitution, overrides and validation
///
/// # Errors
///
/// Same as [`load_config`], minus file access.
pub fn parse_config(contents: &str) -> Result<ReqflowConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: ReqflowConfig = toml::from_str(&contents)
        .map_err(|e| ReqflowError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        ReqflowError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ReqflowError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ReqflowError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Applies environment variable overrides using REQFLOW_* prefix
///
/// Environment variables follow the pattern: REQFLOW_<SECTION>_<KEY>
/// For example: REQFLOW_STORE_SPREADSHEET_ID, REQFLOW_PROTECTION_ENABLED
fn apply_env_overrides(config: &mut ReqflowConfig) -> Result<()> {
    if let Some(val) = env("REQFLOW_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = env("REQFLOW_ENVIRONMENT") {
        config.environment = match val.to_lowercase().as_str() {
            "development" => Environment::Development,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            other => {
                return Err(ReqflowError::Configuration(format!(
                    "Invalid REQFLOW_ENVIRONMENT '{other}'. Must be one of: development, staging, production"
                )))
            }
        };
    }

    // Store overrides
    if let Some(val) = env("REQFLOW_STORE_BASE_URL") {
        config.store.base_url = val;
    }
    if let Some(val) = env("REQFLOW_STORE_SPREADSHEET_ID") {
        config.store.spreadsheet_id = val;
    }
    if let Some(val) = env("REQFLOW_STORE_REQUISITION_SHEET") {
        config.store.requisition_sheet = val;
    }
    if let Some(val) = env("REQFLOW_STORE_USER_SHEET") {
        config.store.user_sheet = val;
    }
    if let Some(val) = env("REQFLOW_STORE_ACCESS_TOKEN") {
        config.store.access_token = secret_string(val);
    }
    if let Some(timeout) = env("REQFLOW_STORE_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
        config.store.timeout_seconds = timeout;
    }
    if let Some(retries) = env("REQFLOW_STORE_RETRY_MAX_RETRIES").and_then(|v| v.parse().ok()) {
        config.store.retry.max_retries = retries;
    }

    // Schema overrides
    if let Some(max) = env("REQFLOW_SCHEMA_MAX_COLUMNS").and_then(|v| v.parse().ok()) {
        config.schema.max_columns = max;
    }

    // Workflow overrides
    if let Some(val) = env("REQFLOW_WORKFLOW_ADMIN_ACCOUNT") {
        config.workflow.admin_account = val;
    }
    if let Some(val) = env("REQFLOW_WORKFLOW_SEGREGATED_DEPARTMENT") {
        config.workflow.segregated_department = val;
    }

    // Protection overrides
    if let Some(val) = env("REQFLOW_PROTECTION_ENABLED") {
        config.protection.enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = env("REQFLOW_PROTECTION_WEB_APP_URL") {
        config.protection.web_app_url = Some(val);
    }
    if let Some(val) = env("REQFLOW_PROTECTION_ADMIN_PASSWORD") {
        config.protection.admin_password = secret_string_opt(Some(val));
    }

    // Attachment overrides
    if let Some(val) = env("REQFLOW_ATTACHMENT_ENABLED") {
        config.attachment.enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = env("REQFLOW_ATTACHMENT_ROOT_PATH") {
        config.attachment.root_path = val;
    }
    if let Some(val) = env("REQFLOW_ATTACHMENT_FOLDER_ID") {
        config.attachment.folder_id = val;
    }

    // Logging overrides
    if let Some(val) = env("REQFLOW_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = env("REQFLOW_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
