//! Transition inputs and results

use crate::domain::{ApprovalStatus, BusinessKey, ReqflowError, Result};
use serde::Serialize;
use std::fmt;

/// One of the three independent status dimensions of a requisition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Track {
    /// Purchase approval
    Approval,
    /// Receipt progress
    Receipt,
    /// Approval of the receipt
    ReceiptApproval,
}

impl Track {
    /// Name used in logs and CLI output
    pub fn as_str(&self) -> &'static str {
        match self {
            Track::Approval => "approval",
            Track::Receipt => "receipt",
            Track::ReceiptApproval => "receipt-approval",
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Approval-track decision
///
/// A rejection always carries its reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalDecision {
    /// Back to (or still) awaiting a decision
    Pending,
    /// Approved
    Approved,
    /// Rejected with a non-empty reason
    Rejected { reason: String },
}

impl ApprovalDecision {
    /// Build a decision from a status and an optional reason
    ///
    /// # Errors
    ///
    /// Returns a validation error when rejecting without a reason.
    pub fn new(status: ApprovalStatus, reason: Option<&str>) -> Result<Self> {
        let reason = reason.map(str::trim).unwrap_or_default();
        match status {
            ApprovalStatus::Pending => Ok(Self::Pending),
            ApprovalStatus::Approved => Ok(Self::Approved),
            ApprovalStatus::Rejected if reason.is_empty() => Err(ReqflowError::Validation(
                "A rejection requires a reason".to_string(),
            )),
            ApprovalStatus::Rejected => Ok(Self::Rejected {
                reason: reason.to_string(),
            }),
        }
    }

    /// Status this decision writes
    pub fn status(&self) -> ApprovalStatus {
        match self {
            Self::Pending => ApprovalStatus::Pending,
            Self::Approved => ApprovalStatus::Approved,
            Self::Rejected { .. } => ApprovalStatus::Rejected,
        }
    }
}

/// Receipt-approval decision with its optional note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptApprovalDecision {
    /// Decided status
    pub status: ApprovalStatus,
    /// Free-form note, may be empty
    pub note: String,
}

impl ReceiptApprovalDecision {
    /// Create a decision
    pub fn new(status: ApprovalStatus, note: impl Into<String>) -> Self {
        Self {
            status,
            note: note.into().trim().to_string(),
        }
    }
}

/// What a transition did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionOutcome {
    /// Record that was changed
    pub business_key: BusinessKey,
    /// 1-based sheet row of the record at the time of the fetch
    pub row: usize,
    /// Track that moved
    pub track: Track,
    /// Status before the transition
    pub previous: String,
    /// Status after the transition
    pub current: String,
    /// Actor name written, empty when attribution failed
    pub actor: String,
    /// Date written (`YYYYMMDD`), empty when none was written
    pub date: String,
    /// Number of data cell writes issued (header writes excluded)
    pub cells_written: usize,
    /// Edit lock set to read-only by this transition
    pub locked: bool,
    /// External protection accepted the request
    pub protected: bool,
}
