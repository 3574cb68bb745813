//! Priority handlers

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use super::parse_json;
use crate::{AppError, AppState, SuccessResponse};
use tally_core::models::{Priority, PriorityLevel};

/// Request body for declaring a priority
#[derive(Debug, Deserialize)]
pub struct AddPriorityRequest {
    pub category_id: i64,
    pub priority: String,
}

/// Request body for changing a priority level
#[derive(Debug, Deserialize)]
pub struct UpdatePriorityRequest {
    pub priority: String,
}

fn parse_level(raw: &str) -> Result<PriorityLevel, AppError> {
    raw.parse()
        .map_err(|_| AppError::bad_request("Priority must be 'high', 'medium', or 'low'"))
}

/// GET /api/users/:user_id/priorities - List a user's priorities
pub async fn list_priorities(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Priority>>, AppError> {
    Ok(Json(state.db.list_priorities(user_id)?))
}

/// POST /api/users/:user_id/priorities - Declare a priority for a category
pub async fn add_priority(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    body: Bytes,
) -> Result<(StatusCode, Json<Priority>), AppError> {
    let req: AddPriorityRequest = parse_json(&body)?;
    let level = parse_level(&req.priority)?;

    state.db.add_priority(user_id, req.category_id, level)?;
    info!(user_id, category_id = req.category_id, %level, "Priority added");

    let priority = state
        .db
        .list_priorities(user_id)?
        .into_iter()
        .find(|p| p.category_id == req.category_id)
        .ok_or_else(|| AppError::internal("Priority not found after creation"))?;

    Ok((StatusCode::CREATED, Json(priority)))
}

/// PUT /api/users/:user_id/priorities/:category_id - Change a priority level
pub async fn update_priority(
    State(state): State<Arc<AppState>>,
    Path((user_id, category_id)): Path<(i64, i64)>,
    body: Bytes,
) -> Result<Json<SuccessResponse>, AppError> {
    let req: UpdatePriorityRequest = parse_json(&body)?;
    let level = parse_level(&req.priority)?;

    state.db.update_priority(user_id, category_id, level)?;

    Ok(Json(SuccessResponse { success: true }))
}

/// DELETE /api/users/:user_id/priorities/:category_id - Remove a priority
pub async fn remove_priority(
    State(state): State<Arc<AppState>>,
    Path((user_id, category_id)): Path<(i64, i64)>,
) -> Result<Json<SuccessResponse>, AppError> {
    if !state.db.remove_priority(user_id, category_id)? {
        return Err(AppError::not_found("Priority not found"));
    }

    Ok(Json(SuccessResponse { success: true }))
}
