//! Expense and income ledger handlers

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{parse_json, PeriodQuery};
use crate::{AppError, AppState, SuccessResponse};
use tally_core::models::{Expense, IncomeRecord, NewExpense, Period};

/// Request body for recording an expense
#[derive(Debug, Deserialize)]
pub struct AddExpenseRequest {
    pub category_id: i64,
    pub amount: f64,
    /// YYYY-MM-DD; defaults to today
    pub date: Option<String>,
    pub details: Option<String>,
    pub source: Option<String>,
}

/// Response for a created ledger row
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Base income body (request and response)
#[derive(Debug, Serialize, Deserialize)]
pub struct BaseIncome {
    pub amount: f64,
}

/// Request body for additional income
#[derive(Debug, Deserialize)]
pub struct AddIncomeRequest {
    pub amount: f64,
    /// Month number or name; defaults to the current month
    pub month: Option<String>,
    pub year: Option<i32>,
}

/// POST /api/users/:user_id/expenses - Record an expense
pub async fn add_expense(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let req: AddExpenseRequest = parse_json(&body)?;

    let date = match req.date.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| AppError::bad_request("Invalid date format (use YYYY-MM-DD)"))?,
        None => Local::now().date_naive(),
    };

    let id = state.db.add_expense(
        user_id,
        &NewExpense {
            category_id: req.category_id,
            amount: req.amount,
            date,
            details: req.details,
            source: req.source,
        },
    )?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// GET /api/users/:user_id/expenses - List expenses (optional month/year filter)
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<Expense>>, AppError> {
    let period = query.optional()?;
    Ok(Json(state.db.list_expenses(user_id, period)?))
}

/// GET /api/users/:user_id/income/base - Get base income
pub async fn get_base_income(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<BaseIncome>, AppError> {
    Ok(Json(BaseIncome {
        amount: state.db.get_base_income(user_id)?,
    }))
}

/// PUT /api/users/:user_id/income/base - Set base income
pub async fn set_base_income(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    body: Bytes,
) -> Result<Json<SuccessResponse>, AppError> {
    let req: BaseIncome = parse_json(&body)?;
    state.db.set_base_income(user_id, req.amount)?;
    Ok(Json(SuccessResponse { success: true }))
}

/// POST /api/users/:user_id/income - Record additional income for a period
pub async fn add_income(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let req: AddIncomeRequest = parse_json(&body)?;
    let period = PeriodQuery {
        month: req.month,
        year: req.year,
    }
    .or_current()?;

    let id = state.db.add_income(user_id, req.amount, period)?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// GET /api/users/:user_id/income - Additional income for a period (default: current)
pub async fn list_income(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<IncomeRecord>>, AppError> {
    let period: Period = query.or_current()?;
    Ok(Json(state.db.list_income(user_id, period)?))
}
