//! Read-only dataset loading.
//!
//! The results table is read from a CSV file once per [`DatasetLoader`] and
//! shared afterwards as an immutable [`Dataset`].

pub mod reader;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use thiserror::Error;
use tracing::{info, warn};

use crate::models::{Record, YearRange, ALL_FORMATS};

pub use reader::{read_records, read_records_from};

/// Errors that can occur while loading the dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Dataset file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read dataset {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse dataset {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid {field} value '{value}' in {path} at line {line}")]
    InvalidValue {
        path: PathBuf,
        line: u64,
        field: String,
        value: String,
    },
}

/// Immutable table of placement records.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct competition years, ascending.
    pub fn years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.records.iter().map(Record::year).collect();
        years.into_iter().collect()
    }

    /// Format options for a year range: "All formats" followed by the
    /// formats played in range, sorted.
    pub fn formats_in(&self, range: YearRange) -> Vec<String> {
        let formats: BTreeSet<&str> = self
            .records
            .iter()
            .filter(|r| range.contains(r.year()))
            .map(|r| r.format.as_str())
            .collect();

        std::iter::once(ALL_FORMATS)
            .chain(formats)
            .map(str::to_string)
            .collect()
    }

    /// Initial year selection: `offset` years after the first year through
    /// the last year, with the start clamped to the end.
    pub fn default_year_range(&self, offset: u32) -> Option<YearRange> {
        let years = self.years();
        let (first, last) = (*years.first()?, *years.last()?);
        let offset = i32::try_from(offset).unwrap_or(i32::MAX);
        let start = first.saturating_add(offset).min(last);
        Some(YearRange {
            min: start,
            max: last,
        })
    }
}

/// Loads the dataset on first use and hands out the cached copy afterwards.
///
/// Construct one at startup and pass it (or the loaded [`Dataset`]) to
/// whatever needs the table.
#[derive(Debug)]
pub struct DatasetLoader {
    path: PathBuf,
    cache: OnceLock<Arc<Dataset>>,
}

impl DatasetLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the dataset has already been read.
    pub fn is_loaded(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Return the dataset, reading the file on the first call.
    ///
    /// A failed read caches nothing, so a later call retries.
    pub fn load(&self) -> Result<Arc<Dataset>, LoadError> {
        if let Some(dataset) = self.cache.get() {
            return Ok(Arc::clone(dataset));
        }

        let records = read_records(&self.path)?;
        if records.is_empty() {
            warn!("Dataset {:?} has no rows", self.path);
        }
        let blank_decks = records
            .iter()
            .filter(|r| r.deck_name.trim().is_empty())
            .count();
        if blank_decks > 0 {
            warn!("{} records in {:?} have a blank deck name", blank_decks, self.path);
        }
        info!("Loaded {} records from {:?}", records.len(), self.path);

        let dataset = Arc::new(Dataset::new(records));
        Ok(Arc::clone(self.cache.get_or_init(|| dataset)))
    }
}
