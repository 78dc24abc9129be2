//! Submit command implementation

use super::{connect, fail, today};
use crate::adapters::attachment::AttachmentPayload;
use crate::core::intake::IntakeService;
use crate::domain::NewRequisition;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the submit command
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Submitting account
    #[arg(long, env = "REQFLOW_ACCOUNT")]
    pub account: String,

    /// Requesting department
    #[arg(long)]
    pub department: String,

    /// Item name
    #[arg(long)]
    pub item: String,

    /// Item specification
    #[arg(long, default_value = "")]
    pub spec: String,

    /// Quantity
    #[arg(long)]
    pub quantity: String,

    /// Unit of measure
    #[arg(long)]
    pub unit: String,

    /// Date the goods are needed
    #[arg(long, default_value = "")]
    pub needed_date: String,

    /// Purpose of the purchase
    #[arg(long, default_value = "")]
    pub purpose: String,

    /// Free-form note
    #[arg(long, default_value = "")]
    pub note: String,

    /// File to store as the attachment
    #[arg(long)]
    pub attachment: Option<PathBuf>,
}

impl SubmitArgs {
    fn to_input(&self) -> NewRequisition {
        NewRequisition {
            department: self.department.clone(),
            item_name: self.item.clone(),
            spec: self.spec.clone(),
            quantity: self.quantity.clone(),
            unit: self.unit.clone(),
            needed_date: self.needed_date.clone(),
            purpose: self.purpose.clone(),
            note: self.note.clone(),
        }
    }

    /// Execute the submit command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let input = self.to_input();
        if let Err(e) = input.validate() {
            return Ok(fail("Requisition rejected", &e));
        }

        let (config, adapters) = match connect(config_path) {
            Ok(connected) => connected,
            Err(code) => return Ok(code),
        };

        let payload = match &self.attachment {
            Some(path) => match AttachmentPayload::from_path(path).await {
                Ok(payload) => Some(payload),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Attachment unreadable");
                    println!("⚠️  Attachment could not be read, submitting without it");
                    None
                }
            },
            None => None,
        };

        let service = IntakeService::new(
            adapters.requisitions.clone(),
            adapters.identity.clone(),
            adapters.attachments.clone(),
            config.attachment.folder_id.clone(),
            config.schema.max_columns,
        );

        match service
            .submit(&input, &self.account, payload.as_ref(), today())
            .await
        {
            Ok(submission) => {
                println!("✅ Requisition {} submitted", submission.business_key);
                if submission.applicant.is_empty() {
                    println!("⚠️  Account '{}' not found; applicant left blank", self.account);
                }
                if !submission.attachment_ref.is_empty() {
                    println!("   Attachment: {}", submission.attachment_ref);
                }
                Ok(0)
            }
            Err(e) => Ok(fail("Failed to submit requisition", &e)),
        }
    }
}
