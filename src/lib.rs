//! # Top Deck
//!
//! Read-only analytics over a table of Magic tournament top-deck results.
//!
//! ## Architecture
//!
//! - **models**: Placement records, filter parameters and derived tables
//! - **storage**: CSV dataset loading and caching
//! - **calculate**: Aggregation engine (frequency counts, per-year breakdowns,
//!   ranked deck windows, deck detail samples)
//! - **api**: Read-only REST API over the dashboard views
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;
