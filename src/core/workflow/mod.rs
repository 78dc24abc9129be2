//! Requisition workflow
//!
//! Three status tracks move independently of each other:
//!
//! | Track | States | Side effects |
//! |---|---|---|
//! | approval | pending, approved, rejected | a rejection stores its reason |
//! | receipt | pending, in-progress, received, anomaly | `received` requests row protection |
//! | receipt approval | pending, approved, rejected | a decision locks the record and requests row protection |
//!
//! Terminal decisions may be re-triggered; the new decision overwrites the
//! old one and a warning is logged.

pub mod engine;
pub mod transition;

pub use engine::{WorkflowEngine, RECEIPT_APPROVED_REASON, RECEIVED_REASON};
pub use transition::{ApprovalDecision, ReceiptApprovalDecision, TransitionOutcome, Track};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::protection::{ProtectionHook, ReleaseTarget};
    use crate::adapters::row_store::InMemoryRowStore;
    use crate::domain::{ApprovalStatus, BusinessKey, ReceiptStatus, ReqflowError, Result};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingHook {
        protected: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl ProtectionHook for RecordingHook {
        fn is_enabled(&self) -> bool {
            true
        }

        async fn protect(&self, business_key: &BusinessKey, reason: &str) -> Result<()> {
            self.protected
                .lock()
                .unwrap()
                .push((business_key.to_string(), reason.to_string()));
            Ok(())
        }

        async fn release(&self, _target: &ReleaseTarget) -> Result<()> {
            Ok(())
        }
    }

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 20).unwrap()
    }

    fn setup() -> (Arc<InMemoryRowStore>, Arc<RecordingHook>, WorkflowEngine) {
        let store = Arc::new(InMemoryRowStore::with_rows(
            "requisitions",
            strings(&[
                "Requisition No",
                "Item",
                "Approval Status",
                "Approver",
                "Approval Date",
                "Reject Reason",
            ]),
            vec![strings(&["20250718-001", "Gloves", "pending"])],
        ));
        let hook = Arc::new(RecordingHook::default());
        let engine = WorkflowEngine::new(store.clone(), hook.clone(), 24);
        (store, hook, engine)
    }

    #[tokio::test]
    async fn test_approve_writes_status_actor_and_date() {
        let (store, _, engine) = setup();
        let decision = ApprovalDecision::new(ApprovalStatus::Approved, None).unwrap();

        let outcome = engine
            .approve("20250718-001", &decision, "Lin", today())
            .await
            .unwrap();

        assert_eq!(outcome.previous, "pending");
        assert_eq!(outcome.current, "approved");
        assert_eq!(outcome.cells_written, 3);
        assert_eq!(store.cell(2, 3), "approved");
        assert_eq!(store.cell(2, 4), "Lin");
        assert_eq!(store.cell(2, 5), "20250720");
        assert_eq!(store.cell(2, 6), "");
    }

    #[tokio::test]
    async fn test_reject_persists_reason() {
        let (store, _, engine) = setup();
        let decision =
            ApprovalDecision::new(ApprovalStatus::Rejected, Some("over budget")).unwrap();

        engine
            .approve("20250718001", &decision, "Lin", today())
            .await
            .unwrap();

        assert_eq!(store.cell(2, 3), "rejected");
        assert_eq!(store.cell(2, 6), "over budget");
        assert_eq!(store.writes().len(), 4);
    }

    #[tokio::test]
    async fn test_pending_decision_writes_status_only() {
        let (store, _, engine) = setup();
        engine
            .approve("20250718-001", &ApprovalDecision::Pending, "Lin", today())
            .await
            .unwrap();
        assert_eq!(store.writes().len(), 1);
    }

    #[tokio::test]
    async fn test_terminal_decision_can_be_overwritten() {
        let (store, _, engine) = setup();
        engine
            .approve("20250718-001", &ApprovalDecision::Approved, "Lin", today())
            .await
            .unwrap();
        let outcome = engine
            .approve(
                "20250718-001",
                &ApprovalDecision::Rejected {
                    reason: "duplicate".to_string(),
                },
                "Chen",
                today(),
            )
            .await
            .unwrap();

        assert_eq!(outcome.previous, "approved");
        assert_eq!(store.cell(2, 3), "rejected");
        assert_eq!(store.cell(2, 4), "Chen");
    }

    #[tokio::test]
    async fn test_unknown_key_is_not_found() {
        let (store, _, engine) = setup();
        let err = engine
            .approve("20250718-404", &ApprovalDecision::Approved, "Lin", today())
            .await
            .unwrap_err();
        assert!(matches!(err, ReqflowError::RecordNotFound(_)));
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn test_receipt_received_requests_protection() {
        let (store, hook, engine) = setup();

        let outcome = engine
            .update_receipt("20250718-001", ReceiptStatus::Received, "Wu", today())
            .await
            .unwrap();

        assert!(outcome.protected);
        assert_eq!(store.cell(1, 7), "Receipt Status");
        assert_eq!(store.cell(2, 7), "received");
        assert_eq!(store.cell(2, 8), "Wu");
        assert_eq!(store.cell(2, 9), "20250720");
        assert_eq!(
            hook.protected.lock().unwrap().as_slice(),
            &[("20250718-001".to_string(), RECEIVED_REASON.to_string())]
        );
    }

    #[tokio::test]
    async fn test_receipt_in_progress_does_not_protect() {
        let (_, hook, engine) = setup();
        let outcome = engine
            .update_receipt("20250718-001", ReceiptStatus::InProgress, "Wu", today())
            .await
            .unwrap();
        assert!(!outcome.protected);
        assert!(hook.protected.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_receipt_approval_locks_record() {
        let (store, hook, engine) = setup();
        let decision = ReceiptApprovalDecision::new(ApprovalStatus::Approved, "all good");

        let outcome = engine
            .approve_receipt("20250718-001", &decision, "Lin", today())
            .await
            .unwrap();

        assert!(outcome.locked);
        assert_eq!(outcome.cells_written, 5);
        let snapshot = crate::core::snapshot::Snapshot::fetch(store.as_ref(), 24)
            .await
            .unwrap();
        let record = &snapshot.records()[0];
        assert_eq!(record.receipt_approval_status, Some(ApprovalStatus::Approved));
        assert_eq!(record.receipt_approver, "Lin");
        assert_eq!(record.receipt_approval_date, "20250720");
        assert_eq!(record.receipt_approval_note, "all good");
        assert!(record.is_locked());
        assert_eq!(
            hook.protected.lock().unwrap()[0].1,
            RECEIPT_APPROVED_REASON.to_string()
        );
    }

    #[tokio::test]
    async fn test_pending_receipt_approval_clears_actor_and_keeps_lock() {
        let (store, hook, engine) = setup();
        let decision = ReceiptApprovalDecision::new(ApprovalStatus::Pending, "");

        let outcome = engine
            .approve_receipt("20250718-001", &decision, "Lin", today())
            .await
            .unwrap();

        assert!(!outcome.locked);
        assert!(outcome.actor.is_empty());
        let snapshot = crate::core::snapshot::Snapshot::fetch(store.as_ref(), 24)
            .await
            .unwrap();
        assert!(!snapshot.records()[0].is_locked());
        assert!(hook.protected.lock().unwrap().is_empty());
    }
}
