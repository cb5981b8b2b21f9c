//! Core data models: placement records, filters and derived tables.

mod filter;
mod record;
mod tables;

pub use filter::*;
pub use record::*;
pub use tables::*;
