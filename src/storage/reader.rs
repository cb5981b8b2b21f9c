//! CSV reading for the tournament results table.
//!
//! Expected columns: title, format, year, month, day, date, player, ranking,
//! ranking_min, deck_name, deck_url, title_date. Extra columns (such as a
//! leading index column) are ignored. Text fields are kept as written.

use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;

use super::LoadError;
use crate::models::Record;

static LEADING_RANK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)").expect("ranking pattern is valid"));

/// One CSV row as written in the file.
#[derive(Debug, Deserialize)]
struct CsvRow {
    title: String,
    format: String,
    year: String,
    month: String,
    day: String,
    date: String,
    player: String,
    ranking: String,
    #[serde(default)]
    ranking_min: String,
    deck_name: String,
    deck_url: String,
    #[serde(default)]
    title_date: String,
}

/// Read every record from a CSV file. Any bad row fails the whole read.
pub fn read_records(path: &Path) -> Result<Vec<Record>, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    read_records_from(file, path)
}

/// Read records from any reader; `path` is used in error messages only.
pub fn read_records_from<R: Read>(reader: R, path: &Path) -> Result<Vec<Record>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::None)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row.map_err(|e| LoadError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
        // Header is line 1.
        let line = index as u64 + 2;
        records.push(row_to_record(row, path, line)?);
    }

    Ok(records)
}

fn row_to_record(row: CsvRow, path: &Path, line: u64) -> Result<Record, LoadError> {
    let invalid = |field: &str, value: &str| LoadError::InvalidValue {
        path: path.to_path_buf(),
        line,
        field: field.to_string(),
        value: value.to_string(),
    };

    let year: i32 = parse_number(&row.year).ok_or_else(|| invalid("year", &row.year))?;
    let month: u32 = parse_number(&row.month).ok_or_else(|| invalid("month", &row.month))?;
    let day: u32 = parse_number(&row.day).ok_or_else(|| invalid("day", &row.day))?;
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| invalid("date", &format!("{}-{}-{}", year, month, day)))?;

    let ranking_min = parse_ranking_min(&row.ranking_min, &row.ranking)
        .ok_or_else(|| invalid("ranking_min", &row.ranking_min))?;

    let title_date = if row.title_date.trim().is_empty() {
        format!("{}_{}", row.title.trim(), date)
    } else {
        row.title_date
    };

    Ok(Record {
        competition_title: row.title,
        format: row.format,
        date,
        date_label: row.date,
        player: row.player,
        ranking: row.ranking,
        ranking_min,
        deck_name: row.deck_name,
        deck_url: row.deck_url,
        title_date,
    })
}

/// Parse an integer column, accepting float notation for whole numbers
/// ("2019.0").
fn parse_number<T: TryFrom<i64>>(raw: &str) -> Option<T> {
    let raw = raw.trim();
    let value = match raw.parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            let f = raw.parse::<f64>().ok()?;
            if f.fract() != 0.0 || !f.is_finite() {
                return None;
            }
            f as i64
        }
    };
    T::try_from(value).ok()
}

/// Best-case placement. Falls back to the leading number of the raw ranking
/// ("3-4" gives 3) when the normalized column is blank.
pub fn parse_ranking_min(raw_min: &str, raw_ranking: &str) -> Option<u32> {
    if !raw_min.trim().is_empty() {
        return parse_number::<u32>(raw_min).filter(|r| *r > 0);
    }
    LEADING_RANK
        .captures(raw_ranking)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .filter(|r| *r > 0)
}
