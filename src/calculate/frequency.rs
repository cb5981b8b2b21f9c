//! Value-frequency counting.
//!
//! Counting runs as three named steps so each can be tested on its own:
//! [`tally`] counts keys in first-seen order, [`rank`] stable-sorts by count
//! descending, and [`window`] slices the ranked table. [`count`] chains them.

use std::collections::HashMap;
use std::ops::Range;

use crate::models::{FrequencyRow, FrequencyTable, ShareRow};

/// Count keys, keeping the order in which distinct keys first appear.
pub fn tally<T, K, F>(items: impl IntoIterator<Item = T>, mut key_fn: F) -> Vec<FrequencyRow>
where
    F: FnMut(T) -> K,
    K: AsRef<str>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<FrequencyRow> = Vec::new();

    for item in items {
        let key = key_fn(item);
        let key = key.as_ref();
        match index.get(key) {
            Some(&i) => rows[i].count += 1,
            None => {
                index.insert(key.to_string(), rows.len());
                rows.push(FrequencyRow::new(key, 1));
            }
        }
    }

    rows
}

/// Sort rows by count descending. The sort is stable, so equal counts keep
/// their tally order.
pub fn rank(mut rows: Vec<FrequencyRow>) -> FrequencyTable {
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    FrequencyTable::new(rows)
}

/// Keep rows with index in the 0-based half-open `range`, clamped to the table.
pub fn window(table: FrequencyTable, range: Range<usize>) -> FrequencyTable {
    let mut rows = table.into_rows();
    let end = range.end.min(rows.len());
    let start = range.start.min(end);
    rows.truncate(end);
    rows.drain(..start);
    FrequencyTable::new(rows)
}

/// Count occurrences of `key_fn(item)`, ranked by count.
///
/// `limit` is a 0-based half-open index range over the ranked table.
pub fn count<T, K, F>(
    items: impl IntoIterator<Item = T>,
    key_fn: F,
    limit: Option<Range<usize>>,
) -> FrequencyTable
where
    F: FnMut(T) -> K,
    K: AsRef<str>,
{
    let ranked = rank(tally(items, key_fn));
    match limit {
        Some(range) => window(ranked, range),
        None => ranked,
    }
}

/// Each key's fraction of the table total.
pub fn shares(table: &FrequencyTable) -> Vec<ShareRow> {
    let total = table.total();
    if total == 0 {
        return Vec::new();
    }

    table
        .iter()
        .map(|row| ShareRow {
            key: row.key.clone(),
            count: row.count,
            share: row.count as f64 / total as f64,
        })
        .collect()
}
