//! Derived tables produced by the aggregation engine.

use serde::{Deserialize, Serialize};

/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRow {
    pub key: String,
    pub count: u32,
}

impl FrequencyRow {
    pub fn new(key: impl Into<String>, count: u32) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}

/// Value counts ordered by count descending, ties in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    rows: Vec<FrequencyRow>,
}

impl FrequencyTable {
    pub fn new(rows: Vec<FrequencyRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[FrequencyRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<FrequencyRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrequencyRow> {
        self.rows.iter()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u32 {
        self.rows.iter().map(|r| r.count).sum()
    }

    /// Keys in table order.
    pub fn keys(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.key.as_str()).collect()
    }

    /// Count for a key, if present.
    pub fn get(&self, key: &str) -> Option<u32> {
        self.rows.iter().find(|r| r.key == key).map(|r| r.count)
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a FrequencyRow;
    type IntoIter = std::slice::Iter<'a, FrequencyRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// A key's fraction of a frequency table total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareRow {
    pub key: String,
    pub count: u32,
    /// Fraction of the table total (0.0 to 1.0)
    pub share: f64,
}

/// Number of competitions of one format in one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearFormatCount {
    pub year: i32,
    pub format: String,
    pub count: u32,
}

/// Competitions per year and format, ascending by year.
///
/// Years without competitions have no rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearFormatBreakdown {
    rows: Vec<YearFormatCount>,
}

impl YearFormatBreakdown {
    pub fn new(rows: Vec<YearFormatCount>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[YearFormatCount] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total competitions counted for a year.
    pub fn competitions_in(&self, year: i32) -> u32 {
        self.rows
            .iter()
            .filter(|r| r.year == year)
            .map(|r| r.count)
            .sum()
    }
}

/// One placement of a chosen deck, trimmed for display.
///
/// `url` is the raw decklist URL; markup belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRow {
    pub competition: String,
    pub player: String,
    pub date: String,
    pub url: String,
}

/// Row of the database table view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseRow {
    pub competition: String,
    pub format: String,
    pub date: String,
    pub player: String,
    pub ranking: String,
    pub deck_name: String,
}

/// Headline counts for a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSummary {
    /// Placement rows
    pub decks: u32,
    /// Distinct competitions
    pub competitions: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FrequencyTable {
        FrequencyTable::new(vec![
            FrequencyRow::new("Burn", 3),
            FrequencyRow::new("Control", 2),
            FrequencyRow::new("Tron", 2),
        ])
    }

    #[test]
    fn test_frequency_table_accessors() {
        let table = sample();
        assert_eq!(table.len(), 3);
        assert_eq!(table.total(), 7);
        assert_eq!(table.keys(), vec!["Burn", "Control", "Tron"]);
        assert_eq!(table.get("Control"), Some(2));
        assert_eq!(table.get("Elves"), None);
    }

    #[test]
    fn test_frequency_table_serializes_as_list() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["key"], "Burn");
        assert_eq!(json[0]["count"], 3);
    }

    #[test]
    fn test_breakdown_competitions_in() {
        let breakdown = YearFormatBreakdown::new(vec![
            YearFormatCount {
                year: 2020,
                format: "Modern".to_string(),
                count: 4,
            },
            YearFormatCount {
                year: 2020,
                format: "Legacy".to_string(),
                count: 1,
            },
            YearFormatCount {
                year: 2021,
                format: "Modern".to_string(),
                count: 2,
            },
        ]);

        assert_eq!(breakdown.competitions_in(2020), 5);
        assert_eq!(breakdown.competitions_in(2021), 2);
        assert_eq!(breakdown.competitions_in(2019), 0);
    }
}
