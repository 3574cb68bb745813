//! Budget suggestion handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use super::PeriodQuery;
use crate::{AppError, AppState};
use tally_core::models::{BudgetProgress, Period, Suggestion};
use tally_core::{Synthesis, SuggestionEngine};

/// Response for a generation request
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub period: Period,
    pub suggestions: Vec<Suggestion>,
}

/// POST /api/users/:user_id/suggestions - Generate and store suggestions
///
/// Uses `month`/`year` query parameters, defaulting to the current month.
pub async fn generate_suggestions(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Query(query): Query<PeriodQuery>,
) -> Result<(StatusCode, Json<GenerateResponse>), AppError> {
    let period = query.or_current()?;

    let suggestions = SuggestionEngine::new(&state.db).generate(user_id, period)?;
    info!(user_id, period = %period, count = suggestions.len(), "Suggestions generated via API");

    Ok((
        StatusCode::CREATED,
        Json(GenerateResponse {
            period,
            suggestions,
        }),
    ))
}

/// GET /api/users/:user_id/suggestions - Stored suggestions (optional month/year filter)
pub async fn fetch_suggestions(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<Suggestion>>, AppError> {
    let period = query.optional()?;
    Ok(Json(SuggestionEngine::new(&state.db).fetch(user_id, period)?))
}

/// GET /api/users/:user_id/suggestions/preview - Per-category breakdown, nothing stored
pub async fn preview_suggestions(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Synthesis>, AppError> {
    let period = query.or_current()?;
    Ok(Json(SuggestionEngine::new(&state.db).explain(user_id, period)?))
}

/// GET /api/users/:user_id/suggestions/progress - Spending against stored suggestions
pub async fn suggestion_progress(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<BudgetProgress>>, AppError> {
    let period = query.or_current()?;
    Ok(Json(state.db.budget_progress(user_id, period)?))
}
