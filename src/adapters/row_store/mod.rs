//! Row store clients
//!
//! - [`SheetsRowStore`] - spreadsheet values REST API
//! - [`InMemoryRowStore`] - in-process grid used by tests

pub mod memory;
pub mod sheets;
pub mod traits;

pub use memory::{CellWrite, InMemoryRowStore};
pub use sheets::SheetsRowStore;
pub use traits::{RowStore, FIRST_DATA_ROW, HEADER_ROW};
