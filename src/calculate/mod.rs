//! Aggregation engine.
//!
//! Turns loaded placement records into the dashboard's derived tables:
//! - Value-frequency counts with stable tie order
//! - Competitions per year and format
//! - Ranked deck windows filtered by ranking class
//! - Randomized deck detail samples
//!
//! Every function is pure and leaves its input untouched.

pub mod breakdown;
pub mod dashboard;
pub mod details;
pub mod frequency;
pub mod ranking;
pub mod select;
pub mod summary;

pub use breakdown::breakdown;
pub use dashboard::{Dashboard, DashboardOverview};
pub use details::{details, details_seeded, DEFAULT_DETAIL_ROWS};
pub use frequency::{count, shares};
pub use ranking::{deck_options, most_played, top_decks};
pub use select::{select_classes, select_format, select_years};
pub use summary::{database, format_distribution, summarize};
