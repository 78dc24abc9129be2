//! Requisition domain model
//!
//! A [`Requisition`] is one decoded row of the requisition sheet. It is a
//! read model: every mutation goes back to the row store as individual cell
//! writes, and the next operation decodes a fresh copy.

use super::errors::ReqflowError;
use super::ids::BusinessKey;
use super::result::Result;
use super::status::{ApprovalStatus, EditLock, ReceiptStatus};
use serde::{Deserialize, Serialize};

/// One procurement request as seen in a single fetch of the row store
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Requisition {
    /// 1-based sheet row the record was decoded from
    #[serde(skip)]
    pub row: usize,

    /// Business key; rows typed in by hand may lack one
    pub business_key: Option<BusinessKey>,

    /// Creation date as stored (`YYYYMMDD` for rows written by this crate)
    pub created_date: String,

    /// Requesting department
    pub department: String,

    /// Applicant display name
    pub applicant: String,

    /// Applicant mail address
    pub applicant_mail: String,

    /// Item name
    pub item_name: String,

    /// Item specification
    pub spec: String,

    /// Quantity as stored; not guaranteed numeric
    pub quantity: String,

    /// Unit of measure
    pub unit: String,

    /// Date the goods are needed
    pub needed_date: String,

    /// Purpose of the purchase
    pub purpose: String,

    /// Attachment reference, empty when none was stored
    pub attachment_ref: String,

    /// Free-form note
    pub note: String,

    /// Canonical approval status (blank cells read as pending)
    pub approval_status: ApprovalStatus,

    /// Approval status text exactly as found in the first populated alias column
    pub approval_status_text: String,

    /// Approver display name
    pub approval_approver: String,

    /// Approval date
    pub approval_date: String,

    /// Rejection reason
    pub reject_reason: String,

    /// Receipt progress (blank cells read as pending)
    pub receipt_status: ReceiptStatus,

    /// Person who recorded the receipt
    pub receipt_person: String,

    /// Receipt date
    pub receipt_date: String,

    /// Explicit receipt-approval status, when the column holds a recognizable value
    pub receipt_approval_status: Option<ApprovalStatus>,

    /// Receipt approver display name
    pub receipt_approver: String,

    /// Receipt approval date
    pub receipt_approval_date: String,

    /// Receipt approval note
    pub receipt_approval_note: String,

    /// Edit lock, `None` when the column is absent or blank
    pub edit_lock: Option<EditLock>,
}

impl Requisition {
    /// Business key as a string slice, empty when absent
    pub fn key_str(&self) -> &str {
        self.business_key
            .as_ref()
            .map(BusinessKey::as_str)
            .unwrap_or("")
    }

    /// Whether the advisory lock marks this record read-only
    ///
    /// An absent lock field counts as editable.
    pub fn is_locked(&self) -> bool {
        self.edit_lock == Some(EditLock::Readonly)
    }

    /// Receipt-approval status inferred from the approver and date columns
    ///
    /// - both blank: pending
    /// - both present: approved
    /// - approver present, date blank: rejected
    /// - date present without approver: not inferable
    pub fn inferred_receipt_approval(&self) -> Option<ApprovalStatus> {
        let has_approver = !self.receipt_approver.trim().is_empty();
        let has_date = !self.receipt_approval_date.trim().is_empty();
        match (has_approver, has_date) {
            (false, false) => Some(ApprovalStatus::Pending),
            (true, true) => Some(ApprovalStatus::Approved),
            (true, false) => Some(ApprovalStatus::Rejected),
            (false, true) => None,
        }
    }

    /// Receipt-approval status, preferring the explicit column over inference
    pub fn receipt_approval_state(&self) -> ApprovalStatus {
        self.receipt_approval_status
            .or_else(|| self.inferred_receipt_approval())
            .unwrap_or_default()
    }
}

/// Input for a new requisition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRequisition {
    /// Requesting department
    pub department: String,

    /// Item name
    pub item_name: String,

    /// Item specification
    #[serde(default)]
    pub spec: String,

    /// Quantity as entered
    pub quantity: String,

    /// Unit of measure
    pub unit: String,

    /// Date the goods are needed
    #[serde(default)]
    pub needed_date: String,

    /// Purpose of the purchase
    #[serde(default)]
    pub purpose: String,

    /// Free-form note
    #[serde(default)]
    pub note: String,
}

impl NewRequisition {
    /// Checks required inputs
    ///
    /// # Errors
    ///
    /// Returns a validation error naming every missing field.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("department", &self.department),
            ("item_name", &self.item_name),
            ("quantity", &self.quantity),
            ("unit", &self.unit),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(ReqflowError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt(approver: &str, date: &str) -> Requisition {
        Requisition {
            receipt_approver: approver.to_string(),
            receipt_approval_date: date.to_string(),
            ..Requisition::default()
        }
    }

    #[test]
    fn test_inferred_receipt_approval() {
        assert_eq!(
            receipt("", "").inferred_receipt_approval(),
            Some(ApprovalStatus::Pending)
        );
        assert_eq!(
            receipt("Lin", "20250720").inferred_receipt_approval(),
            Some(ApprovalStatus::Approved)
        );
        assert_eq!(
            receipt("Lin", "").inferred_receipt_approval(),
            Some(ApprovalStatus::Rejected)
        );
        assert_eq!(receipt("", "20250720").inferred_receipt_approval(), None);
    }

    #[test]
    fn test_explicit_receipt_approval_wins() {
        let mut record = receipt("Lin", "20250720");
        record.receipt_approval_status = Some(ApprovalStatus::Rejected);
        assert_eq!(record.receipt_approval_state(), ApprovalStatus::Rejected);
    }

    #[test]
    fn test_absent_lock_is_editable() {
        let mut record = Requisition::default();
        assert!(!record.is_locked());
        record.edit_lock = Some(EditLock::Editable);
        assert!(!record.is_locked());
        record.edit_lock = Some(EditLock::Readonly);
        assert!(record.is_locked());
    }

    #[test]
    fn test_new_requisition_validation_lists_missing_fields() {
        let input = NewRequisition {
            department: "Manufacturing".to_string(),
            item_name: " ".to_string(),
            ..NewRequisition::default()
        };
        let err = input.validate().unwrap_err();
        let text = err.to_string();
        assert!(text.contains("item_name"));
        assert!(text.contains("quantity"));
        assert!(text.contains("unit"));
        assert!(!text.contains("department"));
    }

    #[test]
    fn test_new_requisition_valid() {
        let input = NewRequisition {
            department: "Manufacturing".to_string(),
            item_name: "Gloves".to_string(),
            quantity: "10".to_string(),
            unit: "box".to_string(),
            ..NewRequisition::default()
        };
        assert!(input.validate().is_ok());
    }
}
