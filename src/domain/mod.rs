//! Domain models and types for reqflow.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Business keys** ([`BusinessKey`]) of the form `YYYYMMDD-SEQ`
//! - **Status values** for the three workflow tracks and the edit lock,
//!   each with alias resolution ([`ApprovalStatus`], [`ReceiptStatus`], [`EditLock`])
//! - **Records** ([`Requisition`], [`NewRequisition`]) and attribution ([`UserInfo`])
//! - **Error types** ([`ReqflowError`], [`RowStoreError`]) and the [`Result`] alias
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, ReqflowError>`]:
//!
//! ```rust
//! use reqflow::domain::{ReqflowError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = reqflow::config::load_config("reqflow.toml")?;
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod errors;
pub mod ids;
pub mod requisition;
pub mod result;
pub mod status;
pub mod user;

// Re-export commonly used types for convenience
pub use errors::{ReqflowError, RowStoreError};
pub use ids::BusinessKey;
pub use requisition::{NewRequisition, Requisition};
pub use result::Result;
pub use status::{ApprovalStatus, EditLock, ReceiptApprovalStatus, ReceiptStatus};
pub use user::UserInfo;
