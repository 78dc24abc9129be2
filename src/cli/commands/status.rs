//! Status command implementation

use super::{connect, fail};
use crate::core::query::QueryEngine;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Business key of the requisition
    pub business_key: String,

    /// Print every stored field
    #[arg(long)]
    pub detail: bool,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(business_key = %self.business_key, "Checking requisition status");

        let (config, adapters) = match connect(config_path) {
            Ok(connected) => connected,
            Err(code) => return Ok(code),
        };
        let engine = QueryEngine::new(adapters.requisitions.clone(), config.schema.max_columns);

        if self.detail {
            return match engine.detail(&self.business_key).await {
                Ok(record) => {
                    println!("{}", serde_json::to_string_pretty(&record)?);
                    Ok(0)
                }
                Err(e) => Ok(fail("Failed to read requisition", &e)),
            };
        }

        let report = match engine.status_report(&self.business_key).await {
            Ok(report) => report,
            Err(e) => return Ok(fail("Failed to read requisition", &e)),
        };

        let lock = if report.edit_lock == crate::domain::EditLock::Readonly {
            "🔒 read-only"
        } else {
            "✏️  editable"
        };

        println!("📊 Requisition {}", report.business_key);
        println!();
        println!("  Approval:          {}", report.approval_status);
        println!("  Receipt:           {}", report.receipt_status);
        println!("  Receipt approval:  {}", report.receipt_approval_status);
        if !report.receipt_approver.is_empty() {
            println!(
                "  Receipt approver:  {} ({})",
                report.receipt_approver, report.receipt_approval_date
            );
        }
        println!("  Lock:              {lock}");
        println!();
        Ok(0)
    }
}
