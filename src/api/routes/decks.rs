use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::FilterParams;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{deck_options, Dashboard};
use crate::models::{ranking_class_label, DetailRow, FrequencyTable, RankWindow};

#[derive(Debug, Serialize)]
pub struct DeckTableResponse {
    pub title: String,
    pub window: RankWindow,
    pub decks: FrequencyTable,
}

/// Most played decks over all placements, windowed.
pub async fn most_played(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<DeckTableResponse>, ApiError> {
    let spec = params.to_spec(&state)?;
    let dashboard = Dashboard::new(state.dataset.records(), &spec)?;
    let window = spec.rank_window;

    Ok(Json(DeckTableResponse {
        title: format!(
            "Best {} to {} decks most played (all classement)",
            window.start, window.end
        ),
        window,
        decks: dashboard.most_played(),
    }))
}

#[derive(Debug, Serialize)]
pub struct TopDecksResponse {
    #[serde(flatten)]
    pub table: DeckTableResponse,
    /// Decks that can be opened in the detail view
    pub deck_options: Vec<String>,
}

/// Decks finishing in the selected ranking classes, windowed.
pub async fn top_decks(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<TopDecksResponse>, ApiError> {
    let spec = params.to_spec(&state)?;
    let dashboard = Dashboard::new(state.dataset.records(), &spec)?;
    let window = spec.rank_window;

    let classes: Vec<String> = spec
        .ranking_classes
        .iter()
        .map(|&c| ranking_class_label(c))
        .collect();
    let decks = dashboard.top_decks();
    let deck_options = deck_options(&decks);

    Ok(Json(TopDecksResponse {
        table: DeckTableResponse {
            title: format!(
                "Best {} to {} decks finished in {} place",
                window.start,
                window.end,
                classes.join(", ")
            ),
            window,
            decks,
        },
        deck_options,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SampleParams {
    pub max_rows: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct DeckDetailsResponse {
    pub deck_name: String,
    pub randomized: bool,
    pub placements: Vec<DetailRow>,
}

/// Random sample of a deck's placements in the selected ranking classes.
pub async fn deck_details(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<FilterParams>,
    Query(sample): Query<SampleParams>,
) -> Result<Json<DeckDetailsResponse>, ApiError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Deck name is empty".to_string()));
    }

    let spec = params.to_spec(&state)?;
    let dashboard = Dashboard::new(state.dataset.records(), &spec)?;

    let limit = state.config.dashboard.detail_max_rows;
    let max_rows = sample.max_rows.unwrap_or(limit).min(limit);
    let placements = dashboard.deck_details(&name, max_rows, sample.seed);

    Ok(Json(DeckDetailsResponse {
        deck_name: name,
        randomized: sample.seed.is_none(),
        placements,
    }))
}
