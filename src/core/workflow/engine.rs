//! Workflow engine
//!
//! Every transition is a fresh fetch, a scan for the business key, then one
//! independent cell write per field. Nothing groups the writes: a second
//! caller working on the same record can interleave with them.

use super::transition::{ApprovalDecision, ReceiptApprovalDecision, TransitionOutcome, Track};
use crate::adapters::protection::{request_protection, ProtectionHook};
use crate::adapters::row_store::RowStore;
use crate::core::schema::Field;
use crate::core::snapshot::Snapshot;
use crate::domain::ids::COMPACT_DATE_FORMAT;
use crate::domain::{
    BusinessKey, EditLock, ReceiptStatus, ReqflowError, Requisition, Result,
};
use crate::log_transition;
use chrono::NaiveDate;
use std::sync::Arc;

/// Reason sent to the protection hook once goods are received
pub const RECEIVED_REASON: &str = "goods received";

/// Reason sent to the protection hook after a receipt decision
pub const RECEIPT_APPROVED_REASON: &str = "receipt approval completed";

/// Drives the approval, receipt and receipt-approval tracks
pub struct WorkflowEngine {
    store: Arc<dyn RowStore>,
    protection: Arc<dyn ProtectionHook>,
    max_columns: usize,
}

impl WorkflowEngine {
    /// Create an engine over the requisition sheet
    pub fn new(
        store: Arc<dyn RowStore>,
        protection: Arc<dyn ProtectionHook>,
        max_columns: usize,
    ) -> Self {
        Self {
            store,
            protection,
            max_columns,
        }
    }

    /// Fresh fetch plus the record carrying `business_key`
    async fn locate(&self, business_key: &str) -> Result<(Snapshot, Requisition, BusinessKey)> {
        let snapshot = Snapshot::fetch(self.store.as_ref(), self.max_columns).await?;
        let record = snapshot.require(business_key)?.clone();
        let key = record
            .business_key
            .clone()
            .ok_or_else(|| ReqflowError::RecordNotFound(business_key.trim().to_string()))?;
        tracing::debug!(business_key = %key, row = record.row, "Located record");
        Ok((snapshot, record, key))
    }

    /// Record an approval decision
    ///
    /// The status is always written. Approver and date are written for
    /// approved and rejected, the reason only for rejected. A record that
    /// already carries a decision is overwritten.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if no row carries the key and
    /// `StoreUnavailable` if the fetch or a write fails.
    pub async fn approve(
        &self,
        business_key: &str,
        decision: &ApprovalDecision,
        actor: &str,
        today: NaiveDate,
    ) -> Result<TransitionOutcome> {
        let (mut snapshot, record, key) = self.locate(business_key).await?;
        let store = self.store.as_ref();
        let status = decision.status();

        if record.approval_status.is_terminal() {
            tracing::warn!(
                business_key = key.as_str(),
                previous = %record.approval_status,
                status = %status,
                "Overwriting an existing approval decision"
            );
        }

        snapshot
            .write_field(store, record.row, Field::ApprovalStatus, status.as_str())
            .await?;
        let mut cells_written = 1;

        let mut date = String::new();
        let mut written_actor = String::new();
        if status.is_terminal() {
            date = today.format(COMPACT_DATE_FORMAT).to_string();
            written_actor = actor.to_string();
            snapshot
                .write_field(store, record.row, Field::ApprovalApprover, actor)
                .await?;
            snapshot
                .write_field(store, record.row, Field::ApprovalDate, &date)
                .await?;
            cells_written += 2;
        }

        if let ApprovalDecision::Rejected { reason } = decision {
            snapshot
                .write_field(store, record.row, Field::RejectReason, reason)
                .await?;
            cells_written += 1;
        }

        log_transition!(
            key.as_str(),
            Track::Approval.as_str(),
            record.approval_status,
            status,
            actor
        );

        Ok(TransitionOutcome {
            business_key: key,
            row: record.row,
            track: Track::Approval,
            previous: record.approval_status.to_string(),
            current: status.to_string(),
            actor: written_actor,
            date,
            cells_written,
            locked: false,
            protected: false,
        })
    }

    /// Set the receipt progress
    ///
    /// Writes status, receipt person and receipt date. Entering `received`
    /// asks the protection hook to protect the row.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if no row carries the key and
    /// `StoreUnavailable` if the fetch or a write fails.
    pub async fn update_receipt(
        &self,
        business_key: &str,
        status: ReceiptStatus,
        actor: &str,
        today: NaiveDate,
    ) -> Result<TransitionOutcome> {
        let (mut snapshot, record, key) = self.locate(business_key).await?;
        let store = self.store.as_ref();
        let date = today.format(COMPACT_DATE_FORMAT).to_string();

        snapshot
            .write_field(store, record.row, Field::ReceiptStatus, status.as_str())
            .await?;
        snapshot
            .write_field(store, record.row, Field::ReceiptPerson, actor)
            .await?;
        snapshot
            .write_field(store, record.row, Field::ReceiptDate, &date)
            .await?;

        log_transition!(
            key.as_str(),
            Track::Receipt.as_str(),
            record.receipt_status,
            status,
            actor
        );

        let protected = status == ReceiptStatus::Received
            && request_protection(self.protection.as_ref(), &key, RECEIVED_REASON).await;

        Ok(TransitionOutcome {
            business_key: key,
            row: record.row,
            track: Track::Receipt,
            previous: record.receipt_status.to_string(),
            current: status.to_string(),
            actor: actor.to_string(),
            date,
            cells_written: 3,
            locked: false,
            protected,
        })
    }

    /// Record a receipt-approval decision
    ///
    /// Writes approver, date, explicit status and note. A pending decision
    /// clears approver and date. Approved and rejected decisions also set
    /// the edit lock to read-only and ask for row protection.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if no row carries the key and
    /// `StoreUnavailable` if the fetch or a write fails.
    pub async fn approve_receipt(
        &self,
        business_key: &str,
        decision: &ReceiptApprovalDecision,
        actor: &str,
        today: NaiveDate,
    ) -> Result<TransitionOutcome> {
        let (mut snapshot, record, key) = self.locate(business_key).await?;
        let store = self.store.as_ref();
        let previous = record.receipt_approval_state();
        let terminal = decision.status.is_terminal();

        if previous.is_terminal() {
            tracing::warn!(
                business_key = key.as_str(),
                previous = %previous,
                status = %decision.status,
                "Overwriting an existing receipt approval decision"
            );
        }

        let (written_actor, date) = if terminal {
            (actor.to_string(), today.format(COMPACT_DATE_FORMAT).to_string())
        } else {
            (String::new(), String::new())
        };

        snapshot
            .write_field(store, record.row, Field::ReceiptApprover, &written_actor)
            .await?;
        snapshot
            .write_field(store, record.row, Field::ReceiptApprovalDate, &date)
            .await?;
        snapshot
            .write_field(
                store,
                record.row,
                Field::ReceiptApprovalStatus,
                decision.status.as_str(),
            )
            .await?;
        snapshot
            .write_field(store, record.row, Field::ReceiptApprovalNote, &decision.note)
            .await?;
        let mut cells_written = 4;

        if terminal {
            snapshot
                .write_field(store, record.row, Field::EditLock, EditLock::Readonly.as_str())
                .await?;
            cells_written += 1;
        }

        log_transition!(
            key.as_str(),
            Track::ReceiptApproval.as_str(),
            previous,
            decision.status,
            actor
        );

        let protected = terminal
            && request_protection(self.protection.as_ref(), &key, RECEIPT_APPROVED_REASON).await;

        Ok(TransitionOutcome {
            business_key: key,
            row: record.row,
            track: Track::ReceiptApproval,
            previous: previous.to_string(),
            current: decision.status.to_string(),
            actor: written_actor,
            date,
            cells_written,
            locked: terminal,
            protected,
        })
    }
}
