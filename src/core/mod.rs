//! Core business logic for reqflow.
//!
//! # Modules
//!
//! - [`schema`] - Header resolution and column allocation
//! - [`snapshot`] - One fresh, decoded read of the requisition sheet
//! - [`sequence`] - Business-key generation
//! - [`intake`] - New requisitions
//! - [`workflow`] - Approval, receipt and receipt-approval tracks
//! - [`lock`] - Advisory edit lock
//! - [`query`] - Searches, work queues and status views
//! - [`summary`] - Purchase-order lines from approved requisitions
//!
//! # Consistency
//!
//! The row store has no transactions and no row locks. Each operation
//! fetches the sheet, scans for its record and issues independent cell
//! writes. Concurrent operations on the same record may interleave and
//! concurrent submissions may draw the same business key. Nothing in this
//! module detects either.
//!
//! # Example
//!
//! ```rust,no_run
//! use reqflow::adapters::factory::Adapters;
//! use reqflow::config::load_config;
//! use reqflow::core::workflow::{ApprovalDecision, WorkflowEngine};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("reqflow.toml")?;
//! let adapters = Adapters::from_config(&config)?;
//! let engine = WorkflowEngine::new(
//!     adapters.requisitions.clone(),
//!     adapters.protection.clone(),
//!     config.schema.max_columns,
//! );
//!
//! let today = chrono::Local::now().date_naive();
//! let outcome = engine
//!     .approve("20250718-001", &ApprovalDecision::Approved, "Lin Wei", today)
//!     .await?;
//! println!("{} -> {}", outcome.previous, outcome.current);
//! # Ok(())
//! # }
//! ```

pub mod intake;
pub mod lock;
pub mod query;
pub mod schema;
pub mod sequence;
pub mod snapshot;
pub mod summary;
pub mod workflow;
