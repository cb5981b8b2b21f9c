//! Headline counts, format distribution and the database table.

use std::cmp::Reverse;
use std::collections::HashSet;

use super::frequency;
use crate::models::{DatabaseRow, FrequencyTable, Record, SelectionSummary};

/// Number of placements and distinct competitions in a selection.
pub fn summarize<'a>(records: impl IntoIterator<Item = &'a Record>) -> SelectionSummary {
    let mut decks = 0;
    let mut competitions: HashSet<&str> = HashSet::new();
    for record in records {
        decks += 1;
        competitions.insert(record.title_date.as_str());
    }

    SelectionSummary {
        decks,
        competitions: competitions.len() as u32,
    }
}

/// Placements per format.
pub fn format_distribution<'a>(records: impl IntoIterator<Item = &'a Record>) -> FrequencyTable {
    frequency::count(records, |r| r.format.as_str(), None)
}

/// Table rows, newest competition first. Rows on the same date keep their
/// input order.
pub fn database<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<DatabaseRow> {
    let mut sorted: Vec<&Record> = records.into_iter().collect();
    sorted.sort_by_key(|r| Reverse(r.date_key()));

    sorted
        .into_iter()
        .map(|r| DatabaseRow {
            competition: r.competition_title.clone(),
            format: r.format.clone(),
            date: r.date_label.clone(),
            player: r.player.clone(),
            ranking: r.ranking.clone(),
            deck_name: r.deck_name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn placement(title: &str, format: &str, ymd: (i32, u32, u32), deck: &str) -> Record {
        Record::new(
            title.to_string(),
            format.to_string(),
            NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap(),
            deck.to_string(),
            1,
        )
    }

    fn sample() -> Vec<Record> {
        vec![
            placement("Old Open", "Modern", (2018, 2, 1), "Burn"),
            placement("New Open", "Legacy", (2021, 9, 12), "Delver"),
            placement("New Open", "Legacy", (2021, 9, 12), "Lands"),
            placement("Mid Open", "Modern", (2019, 12, 30), "Tron"),
        ]
    }

    #[test]
    fn test_summarize() {
        let records = sample();
        let summary = summarize(&records);
        assert_eq!(summary.decks, 4);
        assert_eq!(summary.competitions, 3);
    }

    #[test]
    fn test_summarize_empty() {
        let records: Vec<Record> = Vec::new();
        assert_eq!(summarize(&records), SelectionSummary::default());
    }

    #[test]
    fn test_format_distribution() {
        let records = sample();
        let table = format_distribution(&records);
        assert_eq!(table.keys(), vec!["Modern", "Legacy"]);
        assert_eq!(table.total(), 4);
    }

    #[test]
    fn test_database_newest_first() {
        let records = sample();
        let rows = database(&records);
        let decks: Vec<&str> = rows.iter().map(|r| r.deck_name.as_str()).collect();
        assert_eq!(decks, vec!["Delver", "Lands", "Tron", "Burn"]);
        assert_eq!(rows[0].competition, "New Open");
        assert_eq!(rows[0].date, "12/09/2021");
    }
}
