//! Schema resolution for the requisition sheet
//!
//! The sheet's header row is the only description of its layout. This module
//! turns a header row into a [`ColumnMap`] and allocates columns on demand.
//!
//! - [`fields`] - Logical fields and their header spellings
//! - [`columns`] - Column map resolution and column allocation

pub mod columns;
pub mod fields;

pub use columns::{AllocationKind, ColumnAllocation, ColumnMap, ColumnSlot, DEFAULT_MAX_COLUMNS};
pub use fields::Field;
