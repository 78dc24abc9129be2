//! Summary command implementation

use super::{connect, fail};
use crate::core::query::QueryEngine;
use crate::core::summary::summarize;
use clap::Args;

/// Arguments for the summary command
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl SummaryArgs {
    /// Execute the summary command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (config, adapters) = match connect(config_path) {
            Ok(connected) => connected,
            Err(code) => return Ok(code),
        };
        let engine = QueryEngine::new(adapters.requisitions.clone(), config.schema.max_columns);

        let records = match engine.records().await {
            Ok(records) => records,
            Err(e) => return Ok(fail("Failed to read requisitions", &e)),
        };
        let summary = summarize(&records);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(0);
        }

        println!("📦 Purchase Summary");
        println!();
        println!("Approved requisitions: {}", summary.total_orders);
        println!();
        if summary.lines.is_empty() {
            println!("Nothing to order.");
            return Ok(0);
        }

        println!(
            "{:<24} {:<20} {:<8} {:>8}  {:<30} {:<20}",
            "Item", "Specification", "Unit", "Total", "Requisitions", "Departments"
        );
        println!("{}", "-".repeat(116));
        for line in &summary.lines {
            println!(
                "{:<24} {:<20} {:<8} {:>8}  {:<30} {:<20}",
                line.item_name,
                line.spec,
                line.unit,
                line.total_quantity,
                line.business_keys.join(", "),
                line.departments.join(", ")
            );
        }
        println!();
        Ok(0)
    }
}
