//! Queue command implementation

use super::{connect, fail, print_records};
use crate::core::query::{QueryEngine, QueueScope};
use clap::{Args, ValueEnum};

/// Which work queue to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QueueKind {
    /// Requisitions awaiting an approval decision
    Approval,
    /// Approved requisitions awaiting receipt
    Receipt,
}

/// Arguments for the queue command
#[derive(Args, Debug)]
pub struct QueueArgs {
    /// Queue to show
    #[arg(value_enum, default_value_t = QueueKind::Approval)]
    pub kind: QueueKind,

    /// Only this department (approval queue)
    #[arg(long, conflicts_with = "others")]
    pub department: Option<String>,

    /// Every department except the segregated one (approval queue)
    #[arg(long)]
    pub others: bool,
}

impl QueueArgs {
    fn scope(&self, segregated: &str) -> QueueScope {
        match (&self.department, self.others) {
            (Some(department), _) => QueueScope::Department(department.clone()),
            (None, true) => QueueScope::ExcludingDepartment(segregated.to_string()),
            (None, false) => QueueScope::Department(segregated.to_string()),
        }
    }

    /// Execute the queue command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (config, adapters) = match connect(config_path) {
            Ok(connected) => connected,
            Err(code) => return Ok(code),
        };
        let engine = QueryEngine::new(adapters.requisitions.clone(), config.schema.max_columns);

        match self.kind {
            QueueKind::Approval => {
                let scope = self.scope(&config.workflow.segregated_department);
                let queue = match engine.approval_queue(&scope).await {
                    Ok(queue) => queue,
                    Err(e) => return Ok(fail("Failed to read approval queue", &e)),
                };
                let label = match &scope {
                    QueueScope::Department(name) => name.clone(),
                    QueueScope::ExcludingDepartment(name) => format!("all except {name}"),
                };
                println!("📋 Pending approvals ({label}): {}", queue.len());
                println!();
                if !queue.is_empty() {
                    print_records(&queue);
                    println!();
                }
            }
            QueueKind::Receipt => {
                let queue = match engine.receipt_queue().await {
                    Ok(queue) => queue,
                    Err(e) => return Ok(fail("Failed to read receipt queue", &e)),
                };
                println!("📥 Awaiting receipt: {}", queue.entries.len());
                println!("   Departments: {}", queue.departments.join(", "));
                println!("   Applicants: {}", queue.applicants.join(", "));
                println!();
                if !queue.entries.is_empty() {
                    print_records(&queue.entries);
                    println!();
                }
            }
        }
        Ok(0)
    }
}
