//! Work queues and status views

use crate::domain::{
    ApprovalStatus, BusinessKey, EditLock, ReceiptStatus, Requisition,
};
use serde::Serialize;
use std::collections::BTreeSet;

/// Which departments an approval queue covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueScope {
    /// Only this department
    Department(String),
    /// Every department except this one
    ExcludingDepartment(String),
}

impl QueueScope {
    /// Whether the record falls inside the scope
    pub fn contains(&self, record: &Requisition) -> bool {
        let department = record.department.trim();
        match self {
            QueueScope::Department(name) => department == name.trim(),
            QueueScope::ExcludingDepartment(name) => department != name.trim(),
        }
    }
}

/// Awaiting an approval decision
///
/// Blank counts as pending; text that resolves to no known status does not.
pub fn is_pending_approval(record: &Requisition) -> bool {
    let text = record.approval_status_text.trim();
    text.is_empty() || ApprovalStatus::from_alias(text) == Some(ApprovalStatus::Pending)
}

/// Pending records within `scope`, in sheet order
pub fn approval_queue(records: &[Requisition], scope: &QueueScope) -> Vec<Requisition> {
    records
        .iter()
        .filter(|record| scope.contains(record) && is_pending_approval(record))
        .cloned()
        .collect()
}

/// Number of pending records within `scope`
pub fn pending_count(records: &[Requisition], scope: &QueueScope) -> usize {
    records
        .iter()
        .filter(|record| scope.contains(record) && is_pending_approval(record))
        .count()
}

/// Approved records still open for receipt
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReceiptQueue {
    /// Approved, editable records in sheet order
    pub entries: Vec<Requisition>,
    /// Distinct departments of the entries, sorted
    pub departments: Vec<String>,
    /// Distinct applicants of the entries, sorted
    pub applicants: Vec<String>,
}

/// Build the receipt queue
///
/// Read-only records are left out. Receipt status reads as pending when
/// the cell is blank.
pub fn receipt_queue(records: &[Requisition]) -> ReceiptQueue {
    let entries: Vec<Requisition> = records
        .iter()
        .filter(|r| r.approval_status == ApprovalStatus::Approved && !r.is_locked())
        .cloned()
        .collect();

    let distinct = |pick: fn(&Requisition) -> &str| {
        entries
            .iter()
            .map(pick)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>()
    };

    ReceiptQueue {
        departments: distinct(|r| r.department.as_str()),
        applicants: distinct(|r| r.applicant.as_str()),
        entries,
    }
}

/// Status of one record across every track
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub business_key: BusinessKey,
    pub approval_status: ApprovalStatus,
    pub receipt_status: ReceiptStatus,
    /// Explicit column when present, otherwise inferred
    pub receipt_approval_status: ApprovalStatus,
    pub receipt_approver: String,
    pub receipt_approval_date: String,
    /// Absent lock reads as editable
    pub edit_lock: EditLock,
}

impl StatusReport {
    /// Report for a record, `None` if it has no business key
    pub fn from_record(record: &Requisition) -> Option<Self> {
        Some(Self {
            business_key: record.business_key.clone()?,
            approval_status: record.approval_status,
            receipt_status: record.receipt_status,
            receipt_approval_status: record.receipt_approval_state(),
            receipt_approver: record.receipt_approver.clone(),
            receipt_approval_date: record.receipt_approval_date.clone(),
            edit_lock: record.edit_lock.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, department: &str, applicant: &str, status: &str) -> Requisition {
        Requisition {
            business_key: BusinessKey::new(key).ok(),
            department: department.to_string(),
            applicant: applicant.to_string(),
            approval_status: ApprovalStatus::from_alias(status).unwrap_or_default(),
            approval_status_text: status.to_string(),
            ..Requisition::default()
        }
    }

    fn records() -> Vec<Requisition> {
        vec![
            record("20250718-001", "R&D", "Chen", ""),
            record("20250718-002", "Manufacturing", "Lin", "pending"),
            record("20250718-003", "Manufacturing", "Wang", "approved"),
            record("20250718-004", "QA", "Lin", "awaiting approval"),
            record("20250718-005", "QA", "Zhao", "on hold"),
        ]
    }

    #[test]
    fn test_segregated_department_split() {
        let records = records();
        let rnd = QueueScope::Department("R&D".to_string());
        let others = QueueScope::ExcludingDepartment("R&D".to_string());

        assert_eq!(pending_count(&records, &rnd), 1);
        assert_eq!(pending_count(&records, &others), 2);
        let queue = approval_queue(&records, &others);
        assert_eq!(queue[0].key_str(), "20250718-002");
        assert_eq!(queue[1].key_str(), "20250718-004");
    }

    #[test]
    fn test_receipt_queue_skips_locked_and_unapproved() {
        let mut records = records();
        let mut locked = record("20250718-006", "QA", "Zhao", "approved");
        locked.edit_lock = Some(EditLock::Readonly);
        records.push(locked);
        records.push(record("20250718-007", "R&D", "Chen", "Approved"));

        let queue = receipt_queue(&records);
        let keys: Vec<&str> = queue.entries.iter().map(Requisition::key_str).collect();
        assert_eq!(keys, vec!["20250718-003", "20250718-007"]);
        assert_eq!(queue.departments, vec!["Manufacturing", "R&D"]);
        assert_eq!(queue.applicants, vec!["Chen", "Wang"]);
        assert_eq!(queue.entries[0].receipt_status, ReceiptStatus::Pending);
    }

    #[test]
    fn test_status_report_defaults() {
        let mut source = record("20250718-003", "QA", "Lin", "approved");
        source.receipt_approver = "Wu".to_string();
        let report = StatusReport::from_record(&source).unwrap();

        assert_eq!(report.receipt_status, ReceiptStatus::Pending);
        assert_eq!(report.receipt_approval_status, ApprovalStatus::Rejected);
        assert_eq!(report.edit_lock, EditLock::Editable);
        assert!(StatusReport::from_record(&Requisition::default()).is_none());
    }
}
