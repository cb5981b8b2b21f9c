use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::FilterParams;
use crate::api::state::AppState;
use crate::api::{ApiError, Pagination, PaginationMeta};
use crate::calculate::{Dashboard, DashboardOverview};
use crate::models::{
    ranking_class_label, DatabaseRow, FilterSpec, SelectionSummary, ShareRow, YearFormatBreakdown,
};

// ── Options ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ClassOption {
    pub class: u32,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub years: Vec<i32>,
    pub formats: Vec<String>,
    pub classes: Vec<ClassOption>,
    pub max_rank: u32,
    pub detail_max_rows: usize,
    pub filter: FilterSpec,
}

/// Selectable values for the filter controls, plus the resolved filter.
pub async fn options(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<OptionsResponse>, ApiError> {
    let spec = params.to_spec(&state)?;
    let dashboard = &state.config.dashboard;

    Ok(Json(OptionsResponse {
        years: state.dataset.years(),
        formats: state.dataset.formats_in(spec.year_range),
        classes: dashboard
            .class_options
            .iter()
            .map(|&class| ClassOption {
                class,
                label: ranking_class_label(class),
            })
            .collect(),
        max_rank: dashboard.max_rank,
        detail_max_rows: dashboard.detail_max_rows,
        filter: spec,
    }))
}

// ── Views ───────────────────────────────────────────────────────

pub async fn overview(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<DashboardOverview>, ApiError> {
    let spec = params.to_spec(&state)?;
    let dashboard = Dashboard::new(state.dataset.records(), &spec)?;
    Ok(Json(dashboard.overview()))
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub title: String,
    #[serde(flatten)]
    pub summary: SelectionSummary,
}

pub async fn summary(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let spec = params.to_spec(&state)?;
    let dashboard = Dashboard::new(state.dataset.records(), &spec)?;
    Ok(Json(SummaryResponse {
        title: spec.title(),
        summary: dashboard.summary(),
    }))
}

/// Format shares over the year range.
pub async fn formats(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<ShareRow>>, ApiError> {
    let spec = params.to_spec(&state)?;
    let dashboard = Dashboard::new(state.dataset.records(), &spec)?;
    Ok(Json(dashboard.format_shares()))
}

pub async fn competitions(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<YearFormatBreakdown>, ApiError> {
    let spec = params.to_spec(&state)?;
    let dashboard = Dashboard::new(state.dataset.records(), &spec)?;
    Ok(Json(dashboard.competitions()))
}

// ── Database ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct DatabaseResponse {
    pub rows: Vec<DatabaseRow>,
    pub pagination: PaginationMeta,
}

/// Placement table, newest first.
pub async fn database(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
    Query(page): Query<PageParams>,
) -> Result<Json<DatabaseResponse>, ApiError> {
    let spec = params.to_spec(&state)?;
    let dashboard = Dashboard::new(state.dataset.records(), &spec)?;

    let rows = dashboard.database();
    let pagination = Pagination::new(page.page, page.page_size);
    let meta = PaginationMeta::new(&pagination, rows.len() as u32);

    Ok(Json(DatabaseResponse {
        rows: pagination.slice(&rows).to_vec(),
        pagination: meta,
    }))
}
