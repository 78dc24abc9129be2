//! External system integrations for reqflow.
//!
//! - [`row_store`] - tabular row store (spreadsheet REST API, in-memory grid)
//! - [`identity`] - account lookup and credential checks
//! - [`protection`] - optional external row protection
//! - [`attachment`] - attachment persistence
//! - [`factory`] - builds the above from configuration
//!
//! # Design Pattern
//!
//! Every collaborator sits behind an `async_trait` so core services can be
//! exercised against in-memory implementations:
//!
//! ```rust,no_run
//! use reqflow::adapters::factory::Adapters;
//! use reqflow::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("reqflow.toml")?;
//! let adapters = Adapters::from_config(&config)?;
//! let header = adapters.requisitions.fetch_header().await?;
//! println!("{} columns", header.len());
//! # Ok(())
//! # }
//! ```

pub mod attachment;
pub mod factory;
pub mod identity;
pub mod protection;
pub mod row_store;
