//! Ranked deck tables.

use std::collections::BTreeSet;

use super::{frequency, select};
use crate::models::{FrequencyTable, RankWindow, Record};

/// Decks counted over placements whose `ranking_min` is in `classes`,
/// sliced to the 1-based inclusive `window`.
///
/// An empty class set yields an empty table. Windows running past the last
/// candidate are clamped.
pub fn top_decks<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    classes: &BTreeSet<u32>,
    window: RankWindow,
) -> FrequencyTable {
    if classes.is_empty() {
        return FrequencyTable::default();
    }
    let placed = select::select_classes(records, classes);
    most_played(placed, window)
}

/// Decks counted over every placement regardless of ranking class.
///
/// Deck names are compared trimmed, the same way the detail view matches them.
pub fn most_played<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    window: RankWindow,
) -> FrequencyTable {
    let ranked = frequency::rank(frequency::tally(records, |r| r.deck_name.trim()));
    frequency::window(ranked, window.index_range())
}

/// Deck names offered for the detail view, in table order.
pub fn deck_options(table: &FrequencyTable) -> Vec<String> {
    let mut seen = BTreeSet::new();
    table
        .iter()
        .filter(|row| seen.insert(row.key.as_str()))
        .map(|row| row.key.clone())
        .collect()
}
