//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "reqflow.toml")]
    pub output: String,

    /// Include comments for every option
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing reqflow configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your spreadsheet ID", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set REQFLOW_STORE_ACCESS_TOKEN");
                println!("     - Set REQFLOW_PROTECTION_ADMIN_PASSWORD (if using row protection)");
                println!("  3. Validate configuration: reqflow validate-config");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# reqflow configuration
environment = "development"

[application]
log_level = "info"

[store]
base_url = "https://sheets.googleapis.com"
spreadsheet_id = "your-spreadsheet-id"
requisition_sheet = "requisitions"
user_sheet = "users"
access_token = "${REQFLOW_STORE_ACCESS_TOKEN}"
timeout_seconds = 30

[schema]
max_columns = 24

[workflow]
admin_account = "admin"
segregated_department = "R&D"

[protection]
enabled = false

[attachment]
enabled = false
root_path = "./attachments"
folder_id = "requisitions"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# reqflow configuration
#
# Every value can be overridden with REQFLOW_<SECTION>_<KEY>, for example
# REQFLOW_STORE_SPREADSHEET_ID. ${VAR} references are substituted from the
# environment (and .env) before parsing.

# development | staging | production (production requires an https store URL)
environment = "development"

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
log_level = "info"

# ============================================================================
# Row Store
# ============================================================================
[store]
# Spreadsheet values API
base_url = "https://sheets.googleapis.com"

# Spreadsheet holding both sheets
spreadsheet_id = "your-spreadsheet-id"

# Sheet with one row per requisition
requisition_sheet = "requisitions"

# Sheet with Account, Password, Name, Mail and Role columns
user_sheet = "users"

# Bearer token (use an environment variable)
access_token = "${REQFLOW_STORE_ACCESS_TOKEN}"

# Request timeout
timeout_seconds = 30

[store.retry]
# Retries for transient failures (timeouts, 429, 5xx)
max_retries = 3
initial_delay_ms = 500
max_delay_ms = 8000
backoff_multiplier = 2.0

# ============================================================================
# Schema
# ============================================================================
[schema]
# Column ceiling; once reached, new fields take over the last column
max_columns = 24

# ============================================================================
# Workflow
# ============================================================================
[workflow]
# Account whose password unlocks read-only requisitions
admin_account = "admin"

# Department with its own approval queue
segregated_department = "R&D"

# ============================================================================
# Row Protection
# ============================================================================
[protection]
# Ask a web app to protect rows once they become read-only
enabled = false
# web_app_url = "https://script.example.com/macros/s/your-deployment/exec"
# admin_password = "${REQFLOW_PROTECTION_ADMIN_PASSWORD}"
timeout_seconds = 30

# ============================================================================
# Attachments
# ============================================================================
[attachment]
enabled = false
root_path = "./attachments"
folder_id = "requisitions"

# ============================================================================
# Logging
# ============================================================================
[logging]
# JSON log files with rotation
local_enabled = false
local_path = "./logs"
# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use tempfile::TempDir;

    #[test]
    fn test_generated_configs_parse() {
        std::env::set_var("REQFLOW_STORE_ACCESS_TOKEN", "token");
        assert!(parse_config(&InitArgs::generate_minimal_config()).is_ok());
        assert!(parse_config(&InitArgs::generate_config_with_examples()).is_ok());
    }

    #[test]
    fn test_templates_only_carry_used_logging_keys() {
        for template in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            assert!(!template.contains("local_max_size_mb"));
        }
    }

    #[tokio::test]
    async fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("reqflow.toml");
        std::fs::write(&output, "existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().into_owned(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "existing");
    }
}
