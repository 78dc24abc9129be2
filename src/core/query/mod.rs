//! Read-only access to requisitions
//!
//! - [`filter`] - search modes over a record set
//! - [`views`] - approval queues, the receipt queue and status reports
//!
//! [`QueryEngine`] fetches a fresh [`Snapshot`] for every call and applies
//! the pure functions of the two submodules to it.

pub mod filter;
pub mod views;

pub use filter::{approval_text_matches, key_in_range, parse_date, CompositeFilter, SearchQuery};
pub use views::{
    approval_queue, is_pending_approval, pending_count, receipt_queue, QueueScope, ReceiptQueue,
    StatusReport,
};

use crate::adapters::row_store::RowStore;
use crate::core::snapshot::Snapshot;
use crate::domain::{ReqflowError, Requisition, Result};
use std::sync::Arc;

/// Queries against the requisition sheet
pub struct QueryEngine {
    store: Arc<dyn RowStore>,
    max_columns: usize,
}

impl QueryEngine {
    /// Create an engine over the requisition sheet
    pub fn new(store: Arc<dyn RowStore>, max_columns: usize) -> Self {
        Self { store, max_columns }
    }

    async fn snapshot(&self) -> Result<Snapshot> {
        Snapshot::fetch(self.store.as_ref(), self.max_columns).await
    }

    /// Every record in sheet order
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the fetch fails.
    pub async fn records(&self) -> Result<Vec<Requisition>> {
        Ok(self.snapshot().await?.into_records())
    }

    /// Run a search
    ///
    /// The query is validated before the store is contacted.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed query and
    /// `StoreUnavailable` if the fetch fails.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Requisition>> {
        query.validate()?;
        let records = self.records().await?;
        query.apply(&records)
    }

    /// Pending approvals within `scope`
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the fetch fails.
    pub async fn approval_queue(&self, scope: &QueueScope) -> Result<Vec<Requisition>> {
        Ok(approval_queue(&self.records().await?, scope))
    }

    /// Number of pending approvals within `scope`
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the fetch fails.
    pub async fn pending_count(&self, scope: &QueueScope) -> Result<usize> {
        Ok(pending_count(&self.records().await?, scope))
    }

    /// Approved records still open for receipt
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the fetch fails.
    pub async fn receipt_queue(&self) -> Result<ReceiptQueue> {
        Ok(receipt_queue(&self.records().await?))
    }

    /// Status of one record across every track
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if no row carries the key and
    /// `StoreUnavailable` if the fetch fails.
    pub async fn status_report(&self, business_key: &str) -> Result<StatusReport> {
        let record = self.detail(business_key).await?;
        StatusReport::from_record(&record)
            .ok_or_else(|| ReqflowError::RecordNotFound(business_key.trim().to_string()))
    }

    /// The decoded record carrying `business_key`
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if no row carries the key and
    /// `StoreUnavailable` if the fetch fails.
    pub async fn detail(&self, business_key: &str) -> Result<Requisition> {
        let snapshot = self.snapshot().await?;
        snapshot.require(business_key).cloned()
    }
}
