//! Row store abstraction
//!
//! The row store is the shared tabular service acting as system of record.
//! It offers no transactions and no row locks; every call is independent.

use crate::domain::Result;
use async_trait::async_trait;

/// Sheet row holding the header
pub const HEADER_ROW: usize = 1;

/// Sheet row of the first record
pub const FIRST_DATA_ROW: usize = 2;

/// Client for one named sheet of the row store
///
/// Coordinates are 1-based, matching the service: row 1 is the header row,
/// column 1 is the leftmost column. Implementations own any retry/backoff
/// policy; callers never retry.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Name of the sheet this client targets
    fn sheet_name(&self) -> &str;

    /// Fetch the header row
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the service cannot be reached.
    async fn fetch_header(&self) -> Result<Vec<String>>;

    /// Fetch every data row below the header, in sheet order
    ///
    /// Rows may be shorter than the header; trailing blank cells are not
    /// returned by the service.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the service cannot be reached.
    async fn fetch_all_rows(&self) -> Result<Vec<Vec<String>>>;

    /// Append a row after the last data row
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the write fails.
    async fn append_row(&self, row: Vec<String>) -> Result<()>;

    /// Overwrite a single cell
    ///
    /// # Arguments
    ///
    /// * `row` - 1-based sheet row
    /// * `column` - 1-based sheet column
    /// * `value` - New cell text
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the write fails.
    async fn update_cell(&self, row: usize, column: usize, value: &str) -> Result<()>;
}
