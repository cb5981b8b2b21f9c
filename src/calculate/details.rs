//! Randomized sample of placements for one deck.
//!
//! The rows are a shuffled sample, not the most recent or best results.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::models::{DetailRow, Record};

/// Rows shown in the deck detail view unless configured otherwise.
pub const DEFAULT_DETAIL_ROWS: usize = 21;

/// Shuffle the placements of `deck_name` with `rng` and keep at most
/// `max_rows`. Every field is trimmed; the URL is returned raw.
pub fn details<'a, R: Rng + ?Sized>(
    records: impl IntoIterator<Item = &'a Record>,
    deck_name: &str,
    max_rows: usize,
    rng: &mut R,
) -> Vec<DetailRow> {
    let deck_name = deck_name.trim();
    let mut matches: Vec<&Record> = records
        .into_iter()
        .filter(|r| r.deck_name.trim() == deck_name)
        .collect();

    debug!(
        "Sampling {} of {} placements for deck '{}'",
        max_rows.min(matches.len()),
        matches.len(),
        deck_name
    );

    matches.shuffle(rng);
    matches.into_iter().take(max_rows).map(detail_row).collect()
}

/// [`details`] with a seeded generator, or the thread generator when `seed`
/// is `None`.
pub fn details_seeded<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    deck_name: &str,
    max_rows: usize,
    seed: Option<u64>,
) -> Vec<DetailRow> {
    match seed {
        Some(seed) => details(records, deck_name, max_rows, &mut StdRng::seed_from_u64(seed)),
        None => details(records, deck_name, max_rows, &mut rand::thread_rng()),
    }
}

fn detail_row(record: &Record) -> DetailRow {
    DetailRow {
        competition: record.competition_title.trim().to_string(),
        player: record.player.trim().to_string(),
        date: record.date_label.trim().to_string(),
        url: record.deck_url.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn placement(deck: &str, n: u32) -> Record {
        Record::new(
            format!(" Open #{} ", n),
            "Legacy".to_string(),
            NaiveDate::from_ymd_opt(2020, 1, 1 + n % 28).unwrap(),
            deck.to_string(),
            1,
        )
        .with_player(format!("  Player {}", n))
        .with_deck_url(format!(" https://example.com/{}/{} ", deck.trim(), n))
    }

    fn sample() -> Vec<Record> {
        let mut records = Vec::new();
        for n in 0..30 {
            records.push(placement("Delver", n));
        }
        for n in 0..5 {
            records.push(placement("Lands", n));
        }
        records
    }

    #[test]
    fn test_details_respects_max_rows() {
        let records = sample();
        let rows = details_seeded(&records, "Delver", DEFAULT_DETAIL_ROWS, Some(7));
        assert_eq!(rows.len(), DEFAULT_DETAIL_ROWS);

        let rows = details_seeded(&records, "Lands", DEFAULT_DETAIL_ROWS, Some(7));
        assert_eq!(rows.len(), 5);

        assert!(details_seeded(&records, "Delver", 0, Some(7)).is_empty());
    }

    #[test]
    fn test_details_only_requested_deck() {
        let records = sample();
        let rows = details_seeded(&records, "Lands", 100, Some(1));
        assert!(rows
            .iter()
            .all(|r| r.url.starts_with("https://example.com/Lands/")));
    }

    #[test]
    fn test_details_fields_trimmed() {
        let records = sample();
        let rows = details_seeded(&records, " Lands ", 100, Some(3));
        for row in &rows {
            assert_eq!(row.competition, row.competition.trim());
            assert!(row.player.starts_with("Player "));
            assert!(!row.url.ends_with(' '));
            assert!(!row.url.contains('<'));
        }
    }

    #[test]
    fn test_details_seed_is_reproducible() {
        let records = sample();
        let first = details_seeded(&records, "Delver", 10, Some(42));
        let second = details_seeded(&records, "Delver", 10, Some(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_details_sample_has_no_duplicates() {
        let records = sample();
        let rows = details_seeded(&records, "Delver", 30, None);
        let urls: HashSet<&str> = rows.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls.len(), 30);
    }

    #[test]
    fn test_details_unknown_deck() {
        let records = sample();
        assert!(details_seeded(&records, "Storm", 21, Some(0)).is_empty());
    }

    #[test]
    fn test_details_with_injected_rng() {
        let records = sample();
        let mut rng = StdRng::seed_from_u64(9);
        let rows = details(&records, "Lands", 3, &mut rng);
        assert_eq!(rows.len(), 3);
    }
}
