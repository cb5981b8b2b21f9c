//! Route handlers and shared query parameters.

pub mod decks;
pub mod overview;

use chrono::Datelike;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::config::DashboardConfig;
use crate::models::{parse_ranking_classes, FilterError, FilterSpec, RankWindow, YearRange};
use crate::storage::Dataset;

/// Dashboard filter as query parameters.
///
/// Unset parameters fall back to the configured dashboard defaults. An empty
/// `classes` value selects no ranking class.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub from: Option<i32>,
    pub to: Option<i32>,
    pub format: Option<String>,
    /// Comma-separated class labels, e.g. "1st,2nd"
    pub classes: Option<String>,
    pub start: Option<u32>,
    pub end: Option<u32>,
}

impl FilterParams {
    /// Resolve into a validated filter against a loaded dataset.
    pub fn resolve(
        &self,
        dataset: &Dataset,
        dashboard: &DashboardConfig,
    ) -> Result<FilterSpec, FilterError> {
        let default_range = dataset.default_year_range(dashboard.default_year_offset);
        let fallback_year = chrono::Utc::now().year();
        let min = self
            .from
            .or(default_range.map(|r| r.min))
            .or(self.to)
            .unwrap_or(fallback_year);
        let max = self
            .to
            .or(default_range.map(|r| r.max))
            .unwrap_or(min.max(fallback_year));
        let year_range = YearRange::new(min, max)?;

        let classes = match self.classes.as_deref() {
            Some(labels) => parse_ranking_classes(labels)?,
            None => dashboard.default_classes.iter().copied().collect(),
        };

        let window = RankWindow::new(
            self.start.unwrap_or(dashboard.default_window.start),
            self.end.unwrap_or(dashboard.default_window.end),
        )?;
        let window = dashboard.clamp_window(window);

        let spec = FilterSpec::new(year_range)
            .with_format(self.format.clone().unwrap_or_default())
            .with_classes(classes)
            .with_window(window);
        spec.validate()?;
        Ok(spec)
    }

    /// Resolve against the server state.
    pub fn to_spec(&self, state: &AppState) -> Result<FilterSpec, ApiError> {
        Ok(self.resolve(&state.dataset, &state.config.dashboard)?)
    }
}
