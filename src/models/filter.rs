//! Dashboard filter parameters.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Format option meaning "no format filter".
pub const ALL_FORMATS: &str = "All formats";

static CLASS_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+)\s*(?:st|nd|rd|th)?$").expect("ranking class pattern is valid")
});

/// Rejected filter parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid year range: {min} is after {max}")]
    YearRange { min: i32, max: i32 },

    #[error("Invalid rank window: start must be at least 1")]
    WindowStart,

    #[error("Invalid rank window: start {start} is after end {end}")]
    WindowOrder { start: u32, end: u32 },

    #[error("Invalid ranking class: {0}")]
    RankingClass(String),
}

/// Inclusive range of competition years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    /// Create a validated year range.
    pub fn new(min: i32, max: i32) -> Result<Self, FilterError> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        if self.min > self.max {
            return Err(FilterError::YearRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }

    /// Every year of the range, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.min..=self.max
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}

/// 1-based inclusive window over a ranked table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankWindow {
    pub start: u32,
    pub end: u32,
}

impl RankWindow {
    /// Create a validated window.
    pub fn new(start: u32, end: u32) -> Result<Self, FilterError> {
        let window = Self { start, end };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        if self.start == 0 {
            return Err(FilterError::WindowStart);
        }
        if self.start > self.end {
            return Err(FilterError::WindowOrder {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Equivalent 0-based half-open index range.
    pub fn index_range(&self) -> Range<usize> {
        (self.start.saturating_sub(1) as usize)..(self.end as usize)
    }

    /// Number of positions the window asks for.
    pub fn len(&self) -> usize {
        self.index_range().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RankWindow {
    fn default() -> Self {
        Self { start: 1, end: 21 }
    }
}

/// Parse a ranking class label such as "1st", "3rd" or "2".
pub fn parse_ranking_class(label: &str) -> Result<u32, FilterError> {
    let label = label.trim();
    CLASS_LABEL
        .captures(label)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .filter(|class| *class > 0)
        .ok_or_else(|| FilterError::RankingClass(label.to_string()))
}

/// Parse a comma-separated list of ranking class labels.
///
/// An empty list is valid and selects no placements.
pub fn parse_ranking_classes(labels: &str) -> Result<BTreeSet<u32>, FilterError> {
    labels
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_ranking_class)
        .collect()
}

/// Display label for a ranking class ("1st", "2nd", ...).
pub fn ranking_class_label(class: u32) -> String {
    let suffix = match (class % 10, class % 100) {
        (1, n) if n != 11 => "st",
        (2, n) if n != 12 => "nd",
        (3, n) if n != 13 => "rd",
        _ => "th",
    };
    format!("{}{}", class, suffix)
}

/// User-selected dashboard filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Inclusive year range
    pub year_range: YearRange,

    /// Format filter (`None` means all formats)
    pub format: Option<String>,

    /// Ranking classes kept by the ranked views; empty selects nothing
    pub ranking_classes: BTreeSet<u32>,

    /// Window over the ranked deck tables
    pub rank_window: RankWindow,
}

impl FilterSpec {
    /// Create a filter over a year range with default ranking parameters.
    pub fn new(year_range: YearRange) -> Self {
        Self {
            year_range,
            format: None,
            ranking_classes: BTreeSet::from([1, 2]),
            rank_window: RankWindow::default(),
        }
    }

    /// Builder method to set the format. "All formats" clears the filter.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        let format = format.into();
        self.format = if format.trim().is_empty() || format == ALL_FORMATS {
            None
        } else {
            Some(format)
        };
        self
    }

    /// Builder method to set the ranking classes.
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = u32>) -> Self {
        self.ranking_classes = classes.into_iter().collect();
        self
    }

    /// Builder method to set the rank window.
    pub fn with_window(mut self, window: RankWindow) -> Self {
        self.rank_window = window;
        self
    }

    /// Reject malformed filters before any computation.
    pub fn validate(&self) -> Result<(), FilterError> {
        self.year_range.validate()?;
        self.rank_window.validate()?;
        if self.ranking_classes.contains(&0) {
            return Err(FilterError::RankingClass("0".to_string()));
        }
        Ok(())
    }

    /// Title shown above the dashboard, e.g. "Modern (2015 - 2022)".
    pub fn title(&self) -> String {
        format!(
            "{} ({})",
            self.format.as_deref().unwrap_or(ALL_FORMATS),
            self.year_range
        )
    }
}
