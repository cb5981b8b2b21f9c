//! All dashboard views for one filter selection.

use serde::Serialize;
use tracing::debug;

use super::{breakdown, details, frequency, ranking, select, summary};
use crate::models::{
    DatabaseRow, DetailRow, FilterError, FilterSpec, FrequencyTable, Record, SelectionSummary,
    ShareRow, YearFormatBreakdown,
};

/// Filtered view over a loaded table.
///
/// Holds borrowed selections only; every view is computed on demand.
#[derive(Debug)]
pub struct Dashboard<'a> {
    spec: FilterSpec,
    /// Year range only, feeds the format distribution
    by_year: Vec<&'a Record>,
    /// Year range and format
    selected: Vec<&'a Record>,
    /// Selected records in the chosen ranking classes
    placed: Vec<&'a Record>,
}

/// Every aggregate view of the dashboard page except the deck detail list.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview {
    pub title: String,
    pub filter: FilterSpec,
    pub summary: SelectionSummary,
    pub format_distribution: Vec<ShareRow>,
    pub competitions: YearFormatBreakdown,
    pub most_played: FrequencyTable,
    pub top_decks: FrequencyTable,
}

impl<'a> Dashboard<'a> {
    /// Validate `spec` and select the matching records.
    pub fn new(records: &'a [Record], spec: &FilterSpec) -> Result<Self, FilterError> {
        spec.validate()?;

        let by_year = select::select_years(records, spec.year_range);
        let selected = select::select_format(by_year.iter().copied(), spec.format.as_deref());
        let placed = select::select_classes(selected.iter().copied(), &spec.ranking_classes);

        debug!(
            "Dashboard '{}': {} in years, {} selected, {} in ranking classes",
            spec.title(),
            by_year.len(),
            selected.len(),
            placed.len()
        );

        Ok(Self {
            spec: spec.clone(),
            by_year,
            selected,
            placed,
        })
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    /// Records matching year range and format.
    pub fn records(&self) -> &[&'a Record] {
        &self.selected
    }

    pub fn summary(&self) -> SelectionSummary {
        summary::summarize(self.selected.iter().copied())
    }

    /// Placements per format across the year range, whatever format is selected.
    pub fn format_distribution(&self) -> FrequencyTable {
        summary::format_distribution(self.by_year.iter().copied())
    }

    pub fn format_shares(&self) -> Vec<ShareRow> {
        frequency::shares(&self.format_distribution())
    }

    pub fn competitions(&self) -> YearFormatBreakdown {
        breakdown::breakdown(self.selected.iter().copied(), self.spec.year_range)
    }

    pub fn most_played(&self) -> FrequencyTable {
        ranking::most_played(self.selected.iter().copied(), self.spec.rank_window)
    }

    pub fn top_decks(&self) -> FrequencyTable {
        ranking::top_decks(
            self.selected.iter().copied(),
            &self.spec.ranking_classes,
            self.spec.rank_window,
        )
    }

    /// Decks offered in the detail view.
    pub fn deck_options(&self) -> Vec<String> {
        ranking::deck_options(&self.top_decks())
    }

    /// Random sample of the chosen deck's placements in the ranking classes.
    pub fn deck_details(&self, deck_name: &str, max_rows: usize, seed: Option<u64>) -> Vec<DetailRow> {
        details::details_seeded(self.placed.iter().copied(), deck_name, max_rows, seed)
    }

    pub fn database(&self) -> Vec<DatabaseRow> {
        summary::database(self.selected.iter().copied())
    }

    pub fn overview(&self) -> DashboardOverview {
        DashboardOverview {
            title: self.spec.title(),
            filter: self.spec.clone(),
            summary: self.summary(),
            format_distribution: self.format_shares(),
            competitions: self.competitions(),
            most_played: self.most_played(),
            top_decks: self.top_decks(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RankWindow, YearRange};
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn placement(title: &str, format: &str, year: i32, deck: &str, ranking_min: u32) -> Record {
        Record::new(
            title.to_string(),
            format.to_string(),
            NaiveDate::from_ymd_opt(year, 3, 14).unwrap(),
            deck.to_string(),
            ranking_min,
        )
        .with_deck_url(format!("https://example.com/{}/{}", title, deck))
    }

    fn sample() -> Vec<Record> {
        vec![
            placement("GP A", "Modern", 2019, "Burn", 1),
            placement("GP A", "Modern", 2019, "Tron", 2),
            placement("GP A", "Modern", 2019, "Jund", 5),
            placement("Legacy B", "Legacy", 2020, "Delver", 1),
            placement("Legacy B", "Legacy", 2020, "Burn", 3),
            placement("GP C", "Modern", 2021, "Burn", 2),
            placement("GP D", "Modern", 2014, "Pod", 1),
        ]
    }

    fn spec() -> FilterSpec {
        FilterSpec::new(YearRange { min: 2019, max: 2021 })
    }

    #[test]
    fn test_dashboard_rejects_invalid_filter() {
        let records = sample();
        let bad = FilterSpec::new(YearRange { min: 2021, max: 2019 });
        assert!(matches!(
            Dashboard::new(&records, &bad),
            Err(FilterError::YearRange { .. })
        ));
    }

    #[test]
    fn test_dashboard_summary() {
        let records = sample();
        let dashboard = Dashboard::new(&records, &spec()).unwrap();
        let summary = dashboard.summary();
        assert_eq!(summary.decks, 6);
        assert_eq!(summary.competitions, 3);
    }

    #[test]
    fn test_format_distribution_ignores_format_filter() {
        let records = sample();
        let dashboard = Dashboard::new(&records, &spec().with_format("Modern")).unwrap();
        assert_eq!(dashboard.summary().decks, 4);

        let formats = dashboard.format_distribution();
        assert_eq!(formats.get("Modern"), Some(4));
        assert_eq!(formats.get("Legacy"), Some(2));
    }

    #[test]
    fn test_competitions_follow_format_filter() {
        let records = sample();
        let dashboard = Dashboard::new(&records, &spec().with_format("Modern")).unwrap();
        let competitions = dashboard.competitions();
        assert_eq!(competitions.competitions_in(2019), 1);
        assert_eq!(competitions.competitions_in(2020), 0);
        assert_eq!(competitions.competitions_in(2021), 1);
    }

    #[test]
    fn test_top_decks_and_options() {
        let records = sample();
        let dashboard = Dashboard::new(&records, &spec()).unwrap();

        let top = dashboard.top_decks();
        assert_eq!(top.keys(), vec!["Burn", "Tron", "Delver"]);
        assert_eq!(top.get("Burn"), Some(2));
        assert_eq!(dashboard.deck_options(), vec!["Burn", "Tron", "Delver"]);

        let most = dashboard.most_played();
        assert_eq!(most.get("Burn"), Some(3));
        assert_eq!(most.get("Jund"), Some(1));
    }

    #[test]
    fn test_deck_details_use_ranking_classes() {
        let records = sample();
        let dashboard = Dashboard::new(&records, &spec().with_classes([1])).unwrap();
        let rows = dashboard.deck_details("Burn", 21, Some(5));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].competition, "GP A");
    }

    #[test]
    fn test_empty_classes_empty_ranked_views() {
        let records = sample();
        let dashboard =
            Dashboard::new(&records, &spec().with_classes(BTreeSet::new())).unwrap();
        assert!(dashboard.top_decks().is_empty());
        assert!(dashboard.deck_options().is_empty());
        assert!(dashboard.deck_details("Burn", 21, Some(1)).is_empty());
        assert!(!dashboard.most_played().is_empty());
    }

    #[test]
    fn test_overview_serializes() {
        let records = sample();
        let dashboard = Dashboard::new(
            &records,
            &spec().with_window(RankWindow { start: 1, end: 2 }),
        )
        .unwrap();

        let json = serde_json::to_value(dashboard.overview()).unwrap();
        assert_eq!(json["title"], "All formats (2019 - 2021)");
        assert_eq!(json["summary"]["competitions"], 3);
        assert_eq!(json["top_decks"].as_array().unwrap().len(), 2);
        assert!(json["competitions"].is_array());
    }
}
