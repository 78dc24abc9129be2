//! In-process row store
//!
//! Holds the sheet as a grid of strings and records every cell write. Used by
//! the test suite and for local experiments without a live spreadsheet.

use super::traits::RowStore;
use crate::domain::{Result, RowStoreError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// A single `update_cell` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellWrite {
    /// 1-based sheet row
    pub row: usize,
    /// 1-based sheet column
    pub column: usize,
    /// Written value
    pub value: String,
}

/// Grid-backed [`RowStore`]
pub struct InMemoryRowStore {
    sheet_name: String,
    /// Row 0 is the header
    grid: Mutex<Vec<Vec<String>>>,
    writes: Mutex<Vec<CellWrite>>,
    unavailable: AtomicBool,
}

impl InMemoryRowStore {
    /// Create a store holding only a header row
    pub fn new(sheet_name: impl Into<String>, header: Vec<String>) -> Self {
        Self::with_rows(sheet_name, header, Vec::new())
    }

    /// Create a store from a header and data rows
    pub fn with_rows(
        sheet_name: impl Into<String>,
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        let mut grid = Vec::with_capacity(rows.len() + 1);
        grid.push(header);
        grid.extend(rows);
        Self {
            sheet_name: sheet_name.into(),
            grid: Mutex::new(grid),
            writes: Mutex::new(Vec::new()),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail with a connection error
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Current value of a cell (1-based), empty when outside the grid
    pub fn cell(&self, row: usize, column: usize) -> String {
        let grid = self.lock_grid();
        row.checked_sub(1)
            .and_then(|r| grid.get(r))
            .and_then(|cells| column.checked_sub(1).and_then(|c| cells.get(c)))
            .cloned()
            .unwrap_or_default()
    }

    /// Snapshot of the whole grid, header first
    pub fn grid(&self) -> Vec<Vec<String>> {
        self.lock_grid().clone()
    }

    /// Every `update_cell` call so far, in order
    pub fn writes(&self) -> Vec<CellWrite> {
        self.writes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Forget recorded writes
    pub fn clear_writes(&self) {
        self.writes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    fn lock_grid(&self) -> std::sync::MutexGuard<'_, Vec<Vec<String>>> {
        self.grid
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RowStoreError::ConnectionFailed(format!(
                "sheet '{}' is unavailable",
                self.sheet_name
            ))
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl RowStore for InMemoryRowStore {
    fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    async fn fetch_header(&self) -> Result<Vec<String>> {
        self.check_available()?;
        Ok(self.lock_grid().first().cloned().unwrap_or_default())
    }

    async fn fetch_all_rows(&self) -> Result<Vec<Vec<String>>> {
        self.check_available()?;
        Ok(self.lock_grid().iter().skip(1).cloned().collect())
    }

    async fn append_row(&self, row: Vec<String>) -> Result<()> {
        self.check_available()?;
        let mut grid = self.lock_grid();
        if grid.is_empty() {
            grid.push(Vec::new());
        }
        grid.push(row);
        Ok(())
    }

    async fn update_cell(&self, row: usize, column: usize, value: &str) -> Result<()> {
        self.check_available()?;
        if row == 0 || column == 0 {
            return Err(RowStoreError::RequestFailed {
                status: 400,
                message: format!("invalid cell coordinates ({row}, {column})"),
            }
            .into());
        }

        {
            let mut grid = self.lock_grid();
            if grid.len() < row {
                grid.resize_with(row, Vec::new);
            }
            let cells = &mut grid[row - 1];
            if cells.len() < column {
                cells.resize(column, String::new());
            }
            cells[column - 1] = value.to_string();
        }

        self.writes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(CellWrite {
                row,
                column,
                value: value.to_string(),
            });
        Ok(())
    }
}
