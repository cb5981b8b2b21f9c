//! Record selection by year, format and ranking class.

use std::collections::BTreeSet;

use crate::models::{FilterSpec, Record, YearRange, ALL_FORMATS};

/// Records whose competition year falls in `range`.
pub fn select_years<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    range: YearRange,
) -> Vec<&'a Record> {
    records
        .into_iter()
        .filter(|r| range.contains(r.year()))
        .collect()
}

/// Records played in `format`. `None` or "All formats" keeps everything.
pub fn select_format<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    format: Option<&str>,
) -> Vec<&'a Record> {
    let format = format.filter(|f| *f != ALL_FORMATS);
    records
        .into_iter()
        .filter(|r| format.map_or(true, |f| r.format == f))
        .collect()
}

/// Records whose `ranking_min` is one of `classes`. An empty set selects nothing.
pub fn select_classes<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    classes: &BTreeSet<u32>,
) -> Vec<&'a Record> {
    records
        .into_iter()
        .filter(|r| classes.contains(&r.ranking_min))
        .collect()
}

impl FilterSpec {
    /// Records matching the year range and format.
    pub fn apply<'a>(&self, records: impl IntoIterator<Item = &'a Record>) -> Vec<&'a Record> {
        let by_year = select_years(records, self.year_range);
        select_format(by_year, self.format.as_deref())
    }
}
