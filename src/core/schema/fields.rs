//! Logical requisition fields and their header spellings
//!
//! Each field has a canonical header (written when the column has to be
//! created) followed by the legacy spellings found in older sheets. Lookups
//! try the spellings in order.

use std::fmt;

/// Logical field of the requisition sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    BusinessKey,
    CreatedDate,
    Department,
    Applicant,
    ApplicantMail,
    ItemName,
    Spec,
    Quantity,
    Unit,
    NeededDate,
    Purpose,
    AttachmentRef,
    Note,
    ApprovalStatus,
    ApprovalApprover,
    ApprovalDate,
    RejectReason,
    ReceiptStatus,
    ReceiptPerson,
    ReceiptDate,
    ReceiptApprovalStatus,
    ReceiptApprover,
    ReceiptApprovalDate,
    ReceiptApprovalNote,
    EditLock,
}

impl Field {
    /// Every field in sheet order
    pub const ALL: [Field; 25] = [
        Field::BusinessKey,
        Field::CreatedDate,
        Field::Department,
        Field::Applicant,
        Field::ApplicantMail,
        Field::ItemName,
        Field::Spec,
        Field::Quantity,
        Field::Unit,
        Field::NeededDate,
        Field::Purpose,
        Field::AttachmentRef,
        Field::Note,
        Field::ApprovalStatus,
        Field::ApprovalApprover,
        Field::ApprovalDate,
        Field::RejectReason,
        Field::ReceiptStatus,
        Field::ReceiptPerson,
        Field::ReceiptDate,
        Field::ReceiptApprovalStatus,
        Field::ReceiptApprover,
        Field::ReceiptApprovalDate,
        Field::ReceiptApprovalNote,
        Field::EditLock,
    ];

    /// Fields written when a requisition is submitted
    pub const INTAKE: [Field; 15] = [
        Field::BusinessKey,
        Field::CreatedDate,
        Field::Department,
        Field::Applicant,
        Field::ApplicantMail,
        Field::ItemName,
        Field::Spec,
        Field::Quantity,
        Field::Unit,
        Field::NeededDate,
        Field::Purpose,
        Field::AttachmentRef,
        Field::Note,
        Field::ApprovalStatus,
        Field::EditLock,
    ];

    /// Canonical header text
    pub fn header(&self) -> &'static str {
        self.aliases()[0]
    }

    /// Header spellings, canonical first
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Field::BusinessKey => &["Requisition No", "Requisition Number", "business_key"],
            Field::CreatedDate => &["Request Date", "Created Date", "created_date"],
            Field::Department => &["Department", "Requesting Department", "department"],
            Field::Applicant => &["Applicant", "Requester", "applicant"],
            Field::ApplicantMail => &["Mail", "Applicant Mail", "applicant_mail"],
            Field::ItemName => &["Item", "Item Name", "item_name"],
            Field::Spec => &["Specification", "Spec", "spec"],
            Field::Quantity => &["Quantity", "Qty", "quantity"],
            Field::Unit => &["Unit", "unit"],
            Field::NeededDate => &["Needed Date", "Need Date", "needed_date"],
            Field::Purpose => &["Purpose", "purpose"],
            Field::AttachmentRef => &["Attachment", "Attachment Link", "attachment_ref"],
            Field::Note => &["Note", "Remarks", "note"],
            Field::ApprovalStatus => &[
                "Approval Status",
                "Approval",
                "Sign Status",
                "approval_status",
                "Status",
            ],
            Field::ApprovalApprover => &["Approver", "Approval Approver", "approval_approver"],
            Field::ApprovalDate => &["Approval Date", "approval_date"],
            Field::RejectReason => &["Reject Reason", "Rejection Reason", "reject_reason"],
            Field::ReceiptStatus => &["Receipt Status", "Receiving Status", "receipt_status"],
            Field::ReceiptPerson => &["Receipt Person", "Received By", "receipt_person"],
            Field::ReceiptDate => &["Receipt Date", "receipt_date"],
            Field::ReceiptApprovalStatus => &[
                "Receipt Approval Status",
                "Receipt Approval",
                "receipt_approval_status",
            ],
            Field::ReceiptApprover => &["Receipt Approver", "receipt_approver"],
            Field::ReceiptApprovalDate => &["Receipt Approval Date", "receipt_approval_date"],
            Field::ReceiptApprovalNote => &["Receipt Approval Note", "receipt_approval_note"],
            Field::EditLock => &["Edit Status", "Edit Lock", "edit_lock"],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_canonical_headers_are_unique() {
        let headers: HashSet<&str> = Field::ALL.iter().map(Field::header).collect();
        assert_eq!(headers.len(), Field::ALL.len());
    }

    #[test]
    fn test_no_alias_shared_between_fields() {
        let mut seen = HashSet::new();
        for field in Field::ALL {
            for alias in field.aliases() {
                assert!(
                    seen.insert(alias.to_lowercase()),
                    "alias '{alias}' is used by more than one field"
                );
            }
        }
    }

    #[test]
    fn test_intake_fields_fit_below_default_ceiling() {
        assert!(Field::INTAKE.len() < 24);
    }
}
