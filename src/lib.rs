// reqflow - Procurement Requisition Workflow
// Copyright (c) 2025 reqflow Contributors
// Licensed under the MIT License

//! # reqflow - Procurement Requisition Workflow
//!
//! reqflow tracks procurement requisitions from submission through approval,
//! receipt and receipt approval, using a shared spreadsheet as the only
//! system of record.
//!
//! ## Overview
//!
//! This library provides:
//! - **Schema resolution** of a header row that changes between reads
//! - **Business keys** of the form `YYYYMMDD-SEQ`
//! - **Three status tracks** per requisition, written cell by cell
//! - **An advisory edit lock**, optionally mirrored to real row protection
//! - **Searches and work queues** over a fresh read of the sheet
//! - **Purchase summaries** grouping approved requisitions into order lines
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (schema, workflow, lock, query, summary)
//! - [`adapters`] - External integrations (row store, identity, protection, attachments)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reqflow::adapters::factory::Adapters;
//! use reqflow::config::load_config;
//! use reqflow::core::query::{QueryEngine, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("reqflow.toml")?;
//!     let adapters = Adapters::from_config(&config)?;
//!
//!     let engine = QueryEngine::new(adapters.requisitions.clone(), config.schema.max_columns);
//!     let found = engine
//!         .search(&SearchQuery::Department { query: "Manufacturing".to_string() })
//!         .await?;
//!
//!     println!("Found {} requisitions", found.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Consistency
//!
//! The row store offers no transactions and no row locks. Every mutation
//! is a fresh read, a scan for the business key and independent cell
//! writes. Concurrent edits of one record can interleave, and concurrent
//! submissions can draw the same business key. Retries happen only inside
//! the row store client.
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`] with a
//! [`domain::ReqflowError`]:
//!
//! ```rust,no_run
//! use reqflow::domain::ReqflowError;
//!
//! fn example() -> Result<(), ReqflowError> {
//!     let config = reqflow::config::load_config("reqflow.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! reqflow uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(business_key = "20250718-001", "Requisition submitted");
//! warn!(column = 23, "Column ceiling reached");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
