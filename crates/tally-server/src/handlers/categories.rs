//! Category registry handlers

use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::Deserialize;

use super::parse_json;
use crate::{AppError, AppState};
use tally_core::models::Category;

/// Request body for creating a category
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

/// GET /api/categories - List all categories
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(state.db.list_categories()?))
}

/// POST /api/categories - Create a category (returns the existing one on repeat)
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let req: CreateCategoryRequest = parse_json(&body)?;

    let id = state.db.upsert_category(&req.name)?;
    let category = state
        .db
        .get_category(id)?
        .ok_or_else(|| AppError::internal("Category not found after creation"))?;

    Ok((StatusCode::CREATED, Json(category)))
}
