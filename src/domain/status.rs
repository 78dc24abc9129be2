//! Status values for the three workflow tracks and the edit lock
//!
//! The row store has accumulated several spellings for the same status over
//! time. Every status type resolves those spellings through `from_alias` at
//! the boundary, so the rest of the crate only sees canonical values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase().replace(['_', ' '], "-")
}

/// Approval-track status, also used for the receipt-approval track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Awaiting a decision
    #[default]
    Pending,
    /// Approved
    Approved,
    /// Rejected
    Rejected,
}

/// Receipt-approval status shares the approval state set
pub type ReceiptApprovalStatus = ApprovalStatus;

impl ApprovalStatus {
    /// Resolve a stored or user-supplied spelling to a canonical status
    ///
    /// # Examples
    ///
    /// ```
    /// use reqflow::domain::ApprovalStatus;
    ///
    /// assert_eq!(ApprovalStatus::from_alias("APPROVED"), Some(ApprovalStatus::Approved));
    /// assert_eq!(ApprovalStatus::from_alias("awaiting approval"), Some(ApprovalStatus::Pending));
    /// assert_eq!(ApprovalStatus::from_alias("maybe"), None);
    /// ```
    pub fn from_alias(raw: &str) -> Option<Self> {
        match normalize(raw).as_str() {
            "pending" | "awaiting-approval" | "to-approve" | "waiting" => Some(Self::Pending),
            "approved" | "approve" | "accepted" | "ok" => Some(Self::Approved),
            "rejected" | "reject" | "declined" | "denied" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Canonical text written to the row store
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Approved or rejected
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_alias(s).ok_or_else(|| {
            format!("Unknown approval status '{s}'. Expected one of: pending, approved, rejected")
        })
    }
}

/// Receipt-progress status; freely settable in any order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReceiptStatus {
    /// Goods not yet received
    #[default]
    Pending,
    /// Receipt under way
    InProgress,
    /// Goods received
    Received,
    /// Receipt found a problem
    Anomaly,
}

impl ReceiptStatus {
    /// Resolve a stored or user-supplied spelling to a canonical status
    pub fn from_alias(raw: &str) -> Option<Self> {
        match normalize(raw).as_str() {
            "pending" | "awaiting-receipt" | "not-received" => Some(Self::Pending),
            "in-progress" | "inprogress" | "receiving" => Some(Self::InProgress),
            "received" | "completed" | "done" => Some(Self::Received),
            "anomaly" | "exception" | "issue" | "abnormal" => Some(Self::Anomaly),
            _ => None,
        }
    }

    /// Canonical text written to the row store
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Received => "received",
            Self::Anomaly => "anomaly",
        }
    }
}

impl fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReceiptStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_alias(s).ok_or_else(|| {
            format!(
                "Unknown receipt status '{s}'. Expected one of: pending, in-progress, received, anomaly"
            )
        })
    }
}

/// Advisory edit lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EditLock {
    /// Record may be edited
    #[default]
    Editable,
    /// Record is read-only
    Readonly,
}

impl EditLock {
    /// Resolve a stored spelling; unknown values are `None`
    pub fn from_alias(raw: &str) -> Option<Self> {
        match normalize(raw).as_str() {
            "editable" | "unlocked" => Some(Self::Editable),
            "readonly" | "read-only" | "locked" => Some(Self::Readonly),
            _ => None,
        }
    }

    /// Canonical text written to the row store
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Editable => "editable",
            Self::Readonly => "readonly",
        }
    }
}

impl fmt::Display for EditLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
