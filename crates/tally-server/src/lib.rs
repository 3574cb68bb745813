//! Tally Web Server
//!
//! Axum-based REST API over the Tally budget suggestion engine.
//!
//! - Restrictive CORS policy (same-origin unless origins are configured)
//! - Security headers on every response
//! - Request tracing
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, warn};

use tally_core::db::Database;

mod handlers;

/// Maximum JSON request body size
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Environment variable with comma-separated allowed CORS origins
pub const ALLOWED_ORIGINS_ENV: &str = "TALLY_ALLOWED_ORIGINS";

/// Server configuration
#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Read configuration from `TALLY_ALLOWED_ORIGINS`
    pub fn from_env() -> Self {
        let allowed_origins = std::env::var(ALLOWED_ORIGINS_ENV)
            .map(|v| parse_origins(&v))
            .unwrap_or_default();
        Self { allowed_origins }
    }
}

/// Split a comma-separated origin list, dropping blanks
pub fn parse_origins(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Shared application state
pub struct AppState {
    pub db: Database,
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
pub fn create_router(db: Database, static_dir: Option<&str>, config: ServerConfig) -> Router {
    let state = Arc::new(AppState { db });

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        // Category registry
        .route(
            "/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        // Priorities
        .route(
            "/users/:user_id/priorities",
            get(handlers::list_priorities).post(handlers::add_priority),
        )
        .route(
            "/users/:user_id/priorities/:category_id",
            put(handlers::update_priority).delete(handlers::remove_priority),
        )
        // Ledgers
        .route(
            "/users/:user_id/expenses",
            get(handlers::list_expenses).post(handlers::add_expense),
        )
        .route(
            "/users/:user_id/income/base",
            get(handlers::get_base_income).put(handlers::set_base_income),
        )
        .route(
            "/users/:user_id/income",
            get(handlers::list_income).post(handlers::add_income),
        )
        // Suggestions
        .route(
            "/users/:user_id/suggestions",
            get(handlers::fetch_suggestions).post(handlers::generate_suggestions),
        )
        .route(
            "/users/:user_id/suggestions/preview",
            get(handlers::preview_suggestions),
        )
        .route(
            "/users/:user_id/suggestions/progress",
            get(handlers::suggestion_progress),
        );

    // Build CORS layer
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE])
    };

    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; connect-src 'self'; frame-ancestors 'none'",
    );

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    // Serve static files if directory provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server
pub async fn serve(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
) -> anyhow::Result<()> {
    serve_with_config(db, host, port, static_dir, ServerConfig::from_env()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if !db.is_encrypted()? {
        warn!("Database is not encrypted - do not expose to network!");
    }
    if config.allowed_origins.is_empty() {
        info!("CORS: same-origin only (set {} to allow others)", ALLOWED_ORIGINS_ENV);
    } else {
        info!("CORS: allowing {}", config.allowed_origins.join(", "));
    }

    let app = create_router(db, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn conflict(msg: &str) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Map a core error onto a status; storage failures stay opaque
    fn from_core(err: &tally_core::Error) -> Option<Self> {
        use tally_core::Error as E;

        let message = err.to_string();
        match err {
            E::NoPrioritiesConfigured { .. } | E::NotFound(_) => Some(Self::not_found(&message)),
            E::InsufficientIncomeData { .. } | E::InvalidData(_) => {
                Some(Self::bad_request(&message))
            }
            E::Conflict(_) => Some(Self::conflict(&message)),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        if let Some(mapped) = err.downcast_ref::<tally_core::Error>().and_then(Self::from_core) {
            return mapped;
        }
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
