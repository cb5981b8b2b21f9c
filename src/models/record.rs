//! Tournament placement record.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One deck placement at one competition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Competition title
    pub competition_title: String,

    /// Format the competition was played in (e.g., "Modern", "Legacy")
    pub format: String,

    /// Competition date
    pub date: NaiveDate,

    /// Date as written in the source file
    pub date_label: String,

    /// Player name
    pub player: String,

    /// Raw placement, may encode ties (e.g., "3-4")
    pub ranking: String,

    /// Best-case numeric placement (1 = winner)
    pub ranking_min: u32,

    /// Deck archetype name
    pub deck_name: String,

    /// Link to the decklist
    pub deck_url: String,

    /// Identifier of the competition instance (title + date)
    pub title_date: String,
}

impl Record {
    /// Create a new Record for a competition placement.
    ///
    /// The competition identifier defaults to `"{title}_{date}"`.
    pub fn new(
        competition_title: String,
        format: String,
        date: NaiveDate,
        deck_name: String,
        ranking_min: u32,
    ) -> Self {
        let title_date = format!("{}_{}", competition_title, date);
        Self {
            date_label: date.format("%d/%m/%Y").to_string(),
            competition_title,
            format,
            date,
            player: String::new(),
            ranking: ranking_min.to_string(),
            ranking_min,
            deck_name,
            deck_url: String::new(),
            title_date,
        }
    }

    /// Builder method to set the player.
    pub fn with_player(mut self, player: String) -> Self {
        self.player = player;
        self
    }

    /// Builder method to set the raw ranking text.
    pub fn with_ranking(mut self, ranking: String) -> Self {
        self.ranking = ranking;
        self
    }

    /// Builder method to set the decklist URL.
    pub fn with_deck_url(mut self, deck_url: String) -> Self {
        self.deck_url = deck_url;
        self
    }

    /// Builder method to override the competition identifier.
    pub fn with_title_date(mut self, title_date: String) -> Self {
        self.title_date = title_date;
        self
    }

    /// Competition year.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Sort key for newest-first listings.
    pub fn date_key(&self) -> (i32, u32, u32) {
        (self.date.year(), self.date.month(), self.date.day())
    }

    /// Check if this is a win (1st place).
    pub fn is_winner(&self) -> bool {
        self.ranking_min == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_record_creation() {
        let record = Record::new(
            "Grand Prix Lyon".to_string(),
            "Modern".to_string(),
            date(2019, 3, 9),
            "Burn".to_string(),
            1,
        );

        assert_eq!(record.year(), 2019);
        assert_eq!(record.title_date, "Grand Prix Lyon_2019-03-09");
        assert_eq!(record.date_label, "09/03/2019");
        assert_eq!(record.ranking, "1");
        assert!(record.is_winner());
    }

    #[test]
    fn test_record_builder() {
        let record = Record::new(
            "Open".to_string(),
            "Legacy".to_string(),
            date(2021, 11, 2),
            "Delver".to_string(),
            3,
        )
        .with_player("Alice".to_string())
        .with_ranking("3-4".to_string())
        .with_deck_url("https://example.com/deck/1".to_string())
        .with_title_date("open-2021".to_string());

        assert_eq!(record.player, "Alice");
        assert_eq!(record.ranking, "3-4");
        assert_eq!(record.deck_url, "https://example.com/deck/1");
        assert_eq!(record.title_date, "open-2021");
        assert!(!record.is_winner());
    }

    #[test]
    fn test_date_key_orders_chronologically() {
        let older = Record::new("A".into(), "Modern".into(), date(2020, 12, 31), "X".into(), 1);
        let newer = Record::new("B".into(), "Modern".into(), date(2021, 1, 1), "X".into(), 1);
        assert!(newer.date_key() > older.date_key());
    }
}
