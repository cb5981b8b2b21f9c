//! Competitions per year and format.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use super::frequency;
use crate::models::{Record, YearFormatBreakdown, YearFormatCount, YearRange};

/// Count distinct competitions per format for each year of `range` that has
/// placements. Work is bounded by the number of records, not the range width.
///
/// Placements are collapsed to one row per `(title_date, format)` before
/// counting, so a competition is counted once however many decks it reports.
/// Years without competitions contribute no rows.
pub fn breakdown<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    range: YearRange,
) -> YearFormatBreakdown {
    let mut by_year: BTreeMap<i32, Vec<&Record>> = BTreeMap::new();
    for record in records {
        if range.contains(record.year()) {
            by_year.entry(record.year()).or_default().push(record);
        }
    }

    let mut rows = Vec::new();
    for (&year, placements) in &by_year {
        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        let competitions = placements
            .iter()
            .filter(|r| seen.insert((r.title_date.as_str(), r.format.as_str())));

        let formats = frequency::count(competitions, |r| r.format.as_str(), None);
        rows.extend(formats.into_rows().into_iter().map(|row| YearFormatCount {
            year,
            format: row.key,
            count: row.count,
        }));
    }

    debug!(
        "Computed breakdown for {} with {} year/format rows",
        range,
        rows.len()
    );
    YearFormatBreakdown::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn placement(title: &str, format: &str, year: i32, day: u32, deck: &str) -> Record {
        Record::new(
            title.to_string(),
            format.to_string(),
            NaiveDate::from_ymd_opt(year, 5, day).unwrap(),
            deck.to_string(),
            1,
        )
    }

    #[test]
    fn test_breakdown_single_competition_counted_once() {
        let records = vec![
            placement("Modern Open", "Modern", 2020, 3, "Burn"),
            placement("Modern Open", "Modern", 2020, 3, "Tron"),
        ];

        let result = breakdown(&records, YearRange { min: 2020, max: 2020 });
        assert_eq!(
            result.rows(),
            &[YearFormatCount {
                year: 2020,
                format: "Modern".to_string(),
                count: 1,
            }]
        );
    }

    #[test]
    fn test_breakdown_orders_years_then_counts() {
        let records = vec![
            placement("Legacy Cup", "Legacy", 2021, 1, "Delver"),
            placement("Modern A", "Modern", 2020, 1, "Burn"),
            placement("Legacy B", "Legacy", 2020, 2, "Delver"),
            placement("Modern C", "Modern", 2020, 3, "Tron"),
            placement("Modern C", "Modern", 2020, 3, "Burn"),
        ];

        let result = breakdown(&records, YearRange { min: 2019, max: 2021 });
        let rows: Vec<(i32, &str, u32)> = result
            .rows()
            .iter()
            .map(|r| (r.year, r.format.as_str(), r.count))
            .collect();

        assert_eq!(
            rows,
            vec![(2020, "Modern", 2), (2020, "Legacy", 1), (2021, "Legacy", 1)]
        );
    }

    #[test]
    fn test_breakdown_missing_years_have_no_rows() {
        let records = vec![placement("Open", "Modern", 2018, 1, "Burn")];
        let result = breakdown(&records, YearRange { min: 2015, max: 2020 });
        assert_eq!(result.len(), 1);
        assert_eq!(result.competitions_in(2016), 0);
    }

    #[test]
    fn test_breakdown_ignores_years_outside_range() {
        let records = vec![
            placement("Old", "Modern", 2010, 1, "Burn"),
            placement("New", "Modern", 2022, 1, "Burn"),
        ];
        assert!(breakdown(&records, YearRange { min: 2015, max: 2020 }).is_empty());
    }

    #[test]
    fn test_breakdown_sums_to_distinct_competitions() {
        let records = vec![
            placement("A", "Modern", 2019, 1, "Burn"),
            placement("A", "Modern", 2019, 1, "Tron"),
            placement("B", "Legacy", 2019, 2, "Delver"),
            placement("C", "Modern", 2019, 3, "Jund"),
            placement("C", "Modern", 2019, 3, "Burn"),
            placement("C", "Modern", 2019, 3, "Merfolk"),
        ];

        let distinct: HashSet<&str> = records.iter().map(|r| r.title_date.as_str()).collect();
        let result = breakdown(&records, YearRange { min: 2019, max: 2019 });
        assert_eq!(result.competitions_in(2019) as usize, distinct.len());
    }

    #[test]
    fn test_breakdown_full_year_span_is_fast() {
        let records = vec![
            placement("Open", "Modern", 2020, 1, "Burn"),
            placement("Cup", "Legacy", 2021, 2, "Delver"),
        ];

        let started = std::time::Instant::now();
        let result = breakdown(&records, YearRange { min: i32::MIN, max: i32::MAX });
        assert!(started.elapsed() < std::time::Duration::from_secs(1));

        let years: Vec<i32> = result.rows().iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2020, 2021]);
    }

    #[test]
    fn test_breakdown_empty_input() {
        let records: Vec<Record> = Vec::new();
        assert!(breakdown(&records, YearRange { min: 2000, max: 2020 }).is_empty());
    }
}
