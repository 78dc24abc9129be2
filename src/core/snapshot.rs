//! One fresh read of the requisition sheet
//!
//! Every operation starts from a [`Snapshot`]: header and rows fetched
//! together, a [`ColumnMap`] resolved from that header, and each row decoded
//! into a [`Requisition`]. Snapshots are never cached; a second operation
//! fetches again.

use crate::adapters::row_store::{RowStore, FIRST_DATA_ROW, HEADER_ROW};
use crate::core::schema::{ColumnMap, Field};
use crate::domain::{
    ApprovalStatus, BusinessKey, EditLock, ReceiptStatus, ReqflowError, Requisition, Result,
};

/// Decoded rows plus the column map they were decoded with
#[derive(Debug, Clone)]
pub struct Snapshot {
    columns: ColumnMap,
    rows: Vec<Vec<String>>,
    records: Vec<Requisition>,
    max_columns: usize,
}

impl Snapshot {
    /// Fetch header and rows from the store and decode them
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if either fetch fails.
    pub async fn fetch(store: &dyn RowStore, max_columns: usize) -> Result<Self> {
        let header = store.fetch_header().await?;
        let rows = store.fetch_all_rows().await?;
        tracing::debug!(
            sheet = store.sheet_name(),
            columns = header.len(),
            rows = rows.len(),
            "Fetched sheet snapshot"
        );
        Ok(Self::from_parts(&header, rows, max_columns))
    }

    /// Build a snapshot from an already fetched header and rows
    pub fn from_parts(header: &[String], rows: Vec<Vec<String>>, max_columns: usize) -> Self {
        let columns = ColumnMap::resolve(header);
        let records = rows
            .iter()
            .enumerate()
            .filter(|(_, cells)| cells.iter().any(|cell| !cell.trim().is_empty()))
            .map(|(offset, cells)| decode_row(&columns, cells, offset + FIRST_DATA_ROW))
            .collect();

        Self {
            columns,
            rows,
            records,
            max_columns,
        }
    }

    /// Column map of this fetch
    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    /// Decoded records in sheet order; blank rows are skipped
    pub fn records(&self) -> &[Requisition] {
        &self.records
    }

    /// Consume the snapshot, keeping the records
    pub fn into_records(self) -> Vec<Requisition> {
        self.records
    }

    /// Every business key present, in sheet order
    pub fn business_keys(&self) -> impl Iterator<Item = &BusinessKey> {
        self.records.iter().filter_map(|r| r.business_key.as_ref())
    }

    /// Column ceiling applied when allocating columns
    pub fn max_columns(&self) -> usize {
        self.max_columns
    }

    /// First record whose business key matches, ignoring `-` separators
    pub fn find(&self, key: &str) -> Option<&Requisition> {
        self.records.iter().find(|record| {
            record
                .business_key
                .as_ref()
                .is_some_and(|candidate| candidate.matches(key))
        })
    }

    /// Like [`Snapshot::find`], but a miss is an error
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if no row carries the key.
    pub fn require(&self, key: &str) -> Result<&Requisition> {
        self.find(key)
            .ok_or_else(|| ReqflowError::RecordNotFound(key.trim().to_string()))
    }

    /// Make sure the field has a column, writing its header cell if needed
    ///
    /// Returns the 0-based column index.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the header write fails.
    pub async fn ensure_field(&mut self, store: &dyn RowStore, field: Field) -> Result<usize> {
        let allocation = self.columns.ensure_field(field, self.max_columns);
        if allocation.needs_header_write() {
            store
                .update_cell(HEADER_ROW, allocation.index + 1, &allocation.header)
                .await?;
        }
        Ok(allocation.index)
    }

    /// Overwrite one field of the record stored at `row`
    ///
    /// Issues exactly one cell write, plus a header write when the column
    /// had to be allocated.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if a write fails.
    pub async fn write_field(
        &mut self,
        store: &dyn RowStore,
        row: usize,
        field: Field,
        value: &str,
    ) -> Result<()> {
        let index = self.ensure_field(store, field).await?;
        store.update_cell(row, index + 1, value).await?;

        if let Some(cells) = row
            .checked_sub(FIRST_DATA_ROW)
            .and_then(|offset| self.rows.get_mut(offset))
        {
            if cells.len() <= index {
                cells.resize(index + 1, String::new());
            }
            cells[index] = value.to_string();
        }
        Ok(())
    }
}

/// Decode one sheet row into a record
pub fn decode_row(columns: &ColumnMap, cells: &[String], row: usize) -> Requisition {
    let approval_status_text = columns.text(cells, Field::ApprovalStatus);

    Requisition {
        row,
        business_key: columns
            .value(cells, Field::BusinessKey)
            .and_then(|key| BusinessKey::new(key).ok()),
        created_date: columns.text(cells, Field::CreatedDate),
        department: columns.text(cells, Field::Department),
        applicant: columns.text(cells, Field::Applicant),
        applicant_mail: columns.text(cells, Field::ApplicantMail),
        item_name: columns.text(cells, Field::ItemName),
        spec: columns.text(cells, Field::Spec),
        quantity: columns.text(cells, Field::Quantity),
        unit: columns.text(cells, Field::Unit),
        needed_date: columns.text(cells, Field::NeededDate),
        purpose: columns.text(cells, Field::Purpose),
        attachment_ref: columns.text(cells, Field::AttachmentRef),
        note: columns.text(cells, Field::Note),
        approval_status: ApprovalStatus::from_alias(&approval_status_text).unwrap_or_default(),
        approval_status_text,
        approval_approver: columns.text(cells, Field::ApprovalApprover),
        approval_date: columns.text(cells, Field::ApprovalDate),
        reject_reason: columns.text(cells, Field::RejectReason),
        receipt_status: columns
            .value(cells, Field::ReceiptStatus)
            .and_then(ReceiptStatus::from_alias)
            .unwrap_or_default(),
        receipt_person: columns.text(cells, Field::ReceiptPerson),
        receipt_date: columns.text(cells, Field::ReceiptDate),
        receipt_approval_status: columns
            .value(cells, Field::ReceiptApprovalStatus)
            .and_then(ApprovalStatus::from_alias),
        receipt_approver: columns.text(cells, Field::ReceiptApprover),
        receipt_approval_date: columns.text(cells, Field::ReceiptApprovalDate),
        receipt_approval_note: columns.text(cells, Field::ReceiptApprovalNote),
        edit_lock: columns
            .value(cells, Field::EditLock)
            .and_then(EditLock::from_alias),
    }
}
