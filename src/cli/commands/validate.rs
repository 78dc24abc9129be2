//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the reqflow configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config already validates; any error is a configuration error
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Environment: {:?}", config.environment);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Row Store: {}", config.store.base_url);
        println!("  Spreadsheet: {}", config.store.spreadsheet_id);
        println!("  Requisition Sheet: {}", config.store.requisition_sheet);
        println!("  User Sheet: {}", config.store.user_sheet);
        println!("  Column Ceiling: {}", config.schema.max_columns);
        println!("  Admin Account: {}", config.workflow.admin_account);
        println!(
            "  Segregated Department: {}",
            config.workflow.segregated_department
        );
        println!(
            "  Row Protection: {}",
            if config.protection.enabled {
                "enabled"
            } else {
                "disabled"
            }
        );
        println!(
            "  Attachments: {}",
            if config.attachment.enabled {
                config.attachment.root_path.as_str()
            } else {
                "disabled"
            }
        );
        println!();
        Ok(0)
    }
}
