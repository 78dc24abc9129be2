//! Receive command implementation

use super::approve::print_outcome;
use super::{actor_name, connect, fail, today};
use crate::core::workflow::WorkflowEngine;
use crate::domain::ReceiptStatus;
use clap::Args;

/// Arguments for the receive command
#[derive(Args, Debug)]
pub struct ReceiveArgs {
    /// Business key of the requisition
    pub business_key: String,

    /// Receipt status: pending, in-progress, received or anomaly
    #[arg(long, default_value = "received")]
    pub status: ReceiptStatus,

    /// Receiving account
    #[arg(long, env = "REQFLOW_ACCOUNT")]
    pub account: String,
}

impl ReceiveArgs {
    /// Execute the receive command
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

        match engine
            .update_receipt(&self.business_key, self.status, &actor, today())
            .await
        {
            Ok(outcome) => {
                print_outcome(&outcome);
                Ok(0)
            }
            Err(e) => Ok(fail("Failed to update receipt", &e)),
        }
    }
}
