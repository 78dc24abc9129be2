//! Requisition intake
//!
//! Appends one new row per submission. The business key comes from the
//! same fetch the row is positioned against, so two concurrent submissions
//! can still end up with the same key.

use crate::adapters::attachment::{store_or_empty, AttachmentPayload, AttachmentStore};
use crate::adapters::identity::{attribution, IdentityProvider};
use crate::adapters::row_store::RowStore;
use crate::core::schema::Field;
use crate::core::sequence::SequenceGenerator;
use crate::core::snapshot::Snapshot;
use crate::domain::ids::COMPACT_DATE_FORMAT;
use crate::domain::{ApprovalStatus, BusinessKey, EditLock, NewRequisition, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

/// Result of a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    /// Key assigned to the new record
    pub business_key: BusinessKey,
    /// Applicant name written, empty when attribution failed
    pub applicant: String,
    /// Attachment reference written, empty when none was stored
    pub attachment_ref: String,
}

/// Creates requisitions
pub struct IntakeService {
    store: Arc<dyn RowStore>,
    identity: Arc<dyn IdentityProvider>,
    attachments: Option<Arc<dyn AttachmentStore>>,
    folder_id: String,
    max_columns: usize,
}

impl IntakeService {
    /// Create an intake service
    pub fn new(
        store: Arc<dyn RowStore>,
        identity: Arc<dyn IdentityProvider>,
        attachments: Option<Arc<dyn AttachmentStore>>,
        folder_id: impl Into<String>,
        max_columns: usize,
    ) -> Self {
        Self {
            store,
            identity,
            attachments,
            folder_id: folder_id.into(),
            max_columns,
        }
    }

    /// Submit a new requisition on behalf of `account`
    ///
    /// Required inputs are checked before the store is contacted. An
    /// unknown account or a failed attachment upload leaves the
    /// corresponding cells blank.
    ///
    /// # Errors
    ///
    /// Returns a validation error for missing inputs and
    /// `StoreUnavailable` if the fetch or a write fails.
    pub async fn submit(
        &self,
        input: &NewRequisition,
        account: &str,
        attachment: Option<&AttachmentPayload>,
        today: NaiveDate,
    ) -> Result<Submission> {
        input.validate()?;

        let user = attribution(self.identity.as_ref(), account).await;
        let attachment_ref =
            store_or_empty(self.attachments.as_deref(), attachment, &self.folder_id).await;

        let store = self.store.as_ref();
        let mut snapshot = Snapshot::fetch(store, self.max_columns).await?;
        let business_key = SequenceGenerator::next_from(&snapshot, today);
        let created = today.format(COMPACT_DATE_FORMAT).to_string();

        let mut cells: Vec<(usize, String)> = Vec::with_capacity(Field::INTAKE.len());
        for field in Field::INTAKE {
            let index = snapshot.ensure_field(store, field).await?;
            let value = match field {
                Field::BusinessKey => business_key.to_string(),
                Field::CreatedDate => created.clone(),
                Field::Department => input.department.trim().to_string(),
                Field::Applicant => user.name.clone(),
                Field::ApplicantMail => user.mail.clone(),
                Field::ItemName => input.item_name.trim().to_string(),
                Field::Spec => input.spec.trim().to_string(),
                Field::Quantity => input.quantity.trim().to_string(),
                Field::Unit => input.unit.trim().to_string(),
                Field::NeededDate => input.needed_date.trim().to_string(),
                Field::Purpose => input.purpose.trim().to_string(),
                Field::AttachmentRef => attachment_ref.clone(),
                Field::Note => input.note.trim().to_string(),
                Field::ApprovalStatus => ApprovalStatus::Pending.as_str().to_string(),
                Field::EditLock => EditLock::Editable.as_str().to_string(),
                _ => String::new(),
            };
            cells.push((index, value));
        }

        let width = cells.iter().map(|(index, _)| index + 1).max().unwrap_or(0);
        let mut row = vec![String::new(); width];
        for (index, value) in cells {
            row[index] = value;
        }
        store.append_row(row).await?;

        tracing::info!(
            business_key = %business_key,
            account,
            department = %input.department.trim(),
            "Requisition submitted"
        );

        Ok(Submission {
            business_key,
            applicant: user.name,
            attachment_ref,
        })
    }
}
