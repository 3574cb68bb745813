//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tally_core::db::Database;
use tally_core::models::{NewExpense, Period, PriorityLevel};
use tower::ServiceExt;

fn setup_test_app() -> (Router, Database) {
    let db = Database::in_memory().unwrap();
    let app = create_router(db.clone(), None, ServerConfig::default());
    (app, db)
}

/// Food (high) and Fun (low) for user 1 with January 2026 spending and income
fn seed_budget(db: &Database) -> (i64, i64) {
    let food = db.upsert_category("Food").unwrap();
    let fun = db.upsert_category("Fun").unwrap();
    db.add_priority(1, food, PriorityLevel::High).unwrap();
    db.add_priority(1, fun, PriorityLevel::Low).unwrap();
    for (category_id, amount) in [(food, 400.0), (fun, 100.0)] {
        db.add_expense(
            1,
            &NewExpense {
                category_id,
                amount,
                date: chrono::NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
                details: None,
                source: None,
            },
        )
        .unwrap();
    }
    db.set_base_income(1, 500.0).unwrap();
    (food, fun)
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> axum::response::Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

// ========== Health & Headers ==========

#[tokio::test]
async fn test_health() {
    let (app, _db) = setup_test_app();

    let response = send(&app, "GET", "/api/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    assert_eq!(header("x-content-type-options").as_deref(), Some("nosniff"));
    assert_eq!(header("x-frame-options").as_deref(), Some("DENY"));

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[test]
fn test_parse_origins() {
    assert_eq!(
        parse_origins(" http://a.test , ,http://b.test"),
        vec!["http://a.test".to_string(), "http://b.test".to_string()]
    );
    assert!(parse_origins("").is_empty());
}

// ========== Categories ==========

#[tokio::test]
async fn test_create_and_list_categories() {
    let (app, _db) = setup_test_app();

    let response = send(
        &app,
        "POST",
        "/api/categories",
        Some(serde_json::json!({"name": "Groceries"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(&app, "GET", "/api/categories", None).await;
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["name"], "Groceries");
}

#[tokio::test]
async fn test_empty_category_name_rejected() {
    let (app, _db) = setup_test_app();

    let response = send(
        &app,
        "POST",
        "/api/categories",
        Some(serde_json::json!({"name": "  "})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Priorities ==========

#[tokio::test]
async fn test_priority_lifecycle() {
    let (app, db) = setup_test_app();
    let food = db.upsert_category("Food").unwrap();

    let response = send(
        &app,
        "POST",
        "/api/users/1/priorities",
        Some(serde_json::json!({"category_id": food, "priority": "high"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = get_body_json(response).await;
    assert_eq!(json["level"], "high");
    assert_eq!(json["category_name"], "Food");

    // Duplicate is a conflict
    let response = send(
        &app,
        "POST",
        "/api/users/1/priorities",
        Some(serde_json::json!({"category_id": food, "priority": "low"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(
        &app,
        "PUT",
        &format!("/api/users/1/priorities/{}", food),
        Some(serde_json::json!({"priority": "medium"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(db.list_priorities(1).unwrap()[0].level, PriorityLevel::Medium);

    let response = send(&app, "DELETE", &format!("/api/users/1/priorities/{}", food), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = send(&app, "DELETE", &format!("/api/users/1/priorities/{}", food), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_priority_level() {
    let (app, db) = setup_test_app();
    let food = db.upsert_category("Food").unwrap();

    let response = send(
        &app,
        "POST",
        "/api/users/1/priorities",
        Some(serde_json::json!({"category_id": food, "priority": "urgent"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("high"));
}

#[tokio::test]
async fn test_malformed_json() {
    let (app, _db) = setup_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/users/1/priorities")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Ledgers ==========

#[tokio::test]
async fn test_record_expense_and_income() {
    let (app, db) = setup_test_app();
    let food = db.upsert_category("Food").unwrap();

    let response = send(
        &app,
        "POST",
        "/api/users/1/expenses",
        Some(serde_json::json!({"category_id": food, "amount": 42.5, "date": "2026-01-03"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(
        &app,
        "POST",
        "/api/users/1/expenses",
        Some(serde_json::json!({"category_id": food, "amount": -1.0})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        "POST",
        "/api/users/1/expenses",
        Some(serde_json::json!({"category_id": food, "amount": 1.0, "date": "03/01/2026"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "GET", "/api/users/1/expenses?month=1&year=2026", None).await;
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    let response = send(
        &app,
        "PUT",
        "/api/users/1/income/base",
        Some(serde_json::json!({"amount": 3000.0})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &app,
        "POST",
        "/api/users/1/income",
        Some(serde_json::json!({"amount": 250.0, "month": "January", "year": 2026})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(&app, "GET", "/api/users/1/income?month=1&year=2026", None).await;
    let json = get_body_json(response).await;
    assert_eq!(json[0]["month"], "2026-01");
    assert_eq!(db.get_base_income(1).unwrap(), 3000.0);
}

// ========== Suggestions ==========

#[tokio::test]
async fn test_generate_and_fetch_suggestions() {
    let (app, db) = setup_test_app();
    seed_budget(&db);

    let response = send(&app, "POST", "/api/users/1/suggestions?month=1&year=2026", None).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let generated = get_body_json(response).await;
    assert_eq!(generated["period"]["month"], "January");
    let items = generated["suggestions"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    let total: f64 = items
        .iter()
        .map(|s| s["suggested_amount"].as_f64().unwrap())
        .sum();
    assert!(total <= 500.0 + 0.01);

    let response = send(&app, "GET", "/api/users/1/suggestions?month=January&year=2026", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = get_body_json(response).await;
    assert_eq!(&fetched, &generated["suggestions"]);
}

#[tokio::test]
async fn test_generate_without_priorities_is_not_found() {
    let (app, db) = setup_test_app();
    db.set_base_income(1, 500.0).unwrap();

    let response = send(&app, "POST", "/api/users/1/suggestions?month=1&year=2026", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_generate_without_income_is_bad_request() {
    let (app, db) = setup_test_app();
    seed_budget(&db);
    db.set_base_income(1, 0.0).unwrap();

    let response = send(&app, "POST", "/api/users/1/suggestions?month=1&year=2026", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("income"));

    assert!(db
        .fetch_suggestions(1, Some(Period::new(1, 2026).unwrap()))
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_invalid_period_query() {
    let (app, _db) = setup_test_app();

    let response = send(&app, "GET", "/api/users/1/suggestions?month=13&year=2026", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "GET", "/api/users/1/suggestions?year=2026", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_out_of_range_year_is_bad_request() {
    let (app, db) = setup_test_app();
    seed_budget(&db);

    for uri in [
        "/api/users/1/suggestions?month=12&year=2147483647",
        "/api/users/1/suggestions?month=1&year=0",
    ] {
        let response = send(&app, "POST", uri, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        let json = get_body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("Year"));
    }

    let response = send(
        &app,
        "POST",
        "/api/users/1/income",
        Some(serde_json::json!({"amount": 10.0, "month": "12", "year": i32::MAX})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(db.fetch_suggestions(1, None).unwrap().is_empty());
}

#[tokio::test]
async fn test_preview_does_not_store() {
    let (app, db) = setup_test_app();
    seed_budget(&db);

    let response = send(
        &app,
        "GET",
        "/api/users/1/suggestions/preview?month=1&year=2026",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
    assert_eq!(json["items"][0]["forecast"]["basis"], "last_observed");

    assert!(db.fetch_suggestions(1, None).unwrap().is_empty());
}

#[tokio::test]
async fn test_progress() {
    let (app, db) = setup_test_app();
    seed_budget(&db);

    let response = send(
        &app,
        "GET",
        "/api/users/1/suggestions/progress?month=1&year=2026",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    send(&app, "POST", "/api/users/1/suggestions?month=1&year=2026", None).await;
    let response = send(
        &app,
        "GET",
        "/api/users/1/suggestions/progress?month=1&year=2026",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json[0]["category_name"], "Food");
    assert_eq!(json[0]["spent"], 400.0);
}
