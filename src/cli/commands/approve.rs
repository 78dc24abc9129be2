//! Approve and approve-receipt command implementations

use super::{actor_name, connect, fail, today};
use crate::core::workflow::{
    ApprovalDecision, ReceiptApprovalDecision, TransitionOutcome, WorkflowEngine,
};
use crate::domain::ApprovalStatus;
use clap::Args;

/// Arguments for the approve command
#[derive(Args, Debug)]
pub struct ApproveArgs {
    /// Business key of the requisition
    pub business_key: String,

    /// Decision: pending, approved or rejected
    #[arg(long, default_value = "approved")]
    pub status: ApprovalStatus,

    /// Rejection reason, required when rejecting
    #[arg(long)]
    pub reason: Option<String>,

    /// Deciding account
    #[arg(long, env = "REQFLOW_ACCOUNT")]
    pub account: String,
}

impl ApproveArgs {
    /// Execute the approve command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let decision = match ApprovalDecision::new(self.status, self.reason.as_deref()) {
            Ok(decision) => decision,
            Err(e) => return Ok(fail("Approval rejected", &e)),
        };

        let (config, adapters) = match connect(config_path) {
            Ok(connected) => connected,
            Err(code) => return Ok(code),
        };
        let actor = actor_name(&adapters, &self.account).await;
        let engine = WorkflowEngine::new(
            adapters.requisitions.clone(),
            adapters.protection.clone(),
            config.schema.max_columns,
        );

        match engine
            .approve(&self.business_key, &decision, &actor, today())
            .await
        {
            Ok(outcome) => {
                print_outcome(&outcome);
                Ok(0)
            }
            Err(e) => Ok(fail("Failed to record approval", &e)),
        }
    }
}

/// Arguments for the approve-receipt command
#[derive(Args, Debug)]
pub struct ApproveReceiptArgs {
    /// Business key of the requisition
    pub business_key: String,

    /// Decision: pending, approved or rejected
    #[arg(long, default_value = "approved")]
    pub status: ApprovalStatus,

    /// Note stored with the decision
    #[arg(long, default_value = "")]
    pub note: String,

    /// Deciding account
    #[arg(long, env = "REQFLOW_ACCOUNT")]
    pub account: String,
}

impl ApproveReceiptArgs {
    /// Execute the approve-receipt command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (config, adapters) = match connect(config_path) {
            Ok(connected) => connected,
            Err(code) => return Ok(code),
        };
        let actor = actor_name(&adapters, &self.account).await;
        let engine = WorkflowEngine::new(
            adapters.requisitions.clone(),
            adapters.protection.clone(),
            config.schema.max_columns,
        );
        let decision = ReceiptApprovalDecision::new(self.status, self.note.clone());

        match engine
            .approve_receipt(&self.business_key, &decision, &actor, today())
            .await
        {
            Ok(outcome) => {
                print_outcome(&outcome);
                Ok(0)
            }
            Err(e) => Ok(fail("Failed to record receipt approval", &e)),
        }
    }
}

/// Print a transition result
pub(crate) fn print_outcome(outcome: &TransitionOutcome) {
    println!(
        "✅ {} {}: {} → {}",
        outcome.business_key, outcome.track, outcome.previous, outcome.current
    );
    if !outcome.actor.is_empty() {
        println!("   By: {} on {}", outcome.actor, outcome.date);
    }
    if outcome.locked {
        println!("   🔒 Record is now read-only");
    }
    if outcome.protected {
        println!("   🛡️  Row protection requested");
    }
}
