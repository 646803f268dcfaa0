//! JSON HTTP API for the finboard dashboard
//!
//! Routes are organized into modules:
//! - routes::summary: financial summary and monthly chart data
//! - routes::transactions: list with tab/search filters, create, delete
//! - routes::categories: shared category list
//! - routes::recommendations: AI recommendation fetch and refresh
//!
//! Authentication is handled upstream; the gateway forwards the
//! authenticated user id in the `x-user-id` header, and every handler
//! resolves it into an explicit `Session` before touching the store.
//! Read paths degrade to empty defaults when the session is missing or
//! the store fails; write paths fail loud.

pub mod error;
pub mod routes;

use axum::{
    routing::{delete, get, post},
    Router,
};
use finboard_advisor::Advisor;
use finboard_config::Config;
use finboard_core::Session;
use finboard_store::TransactionStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TransactionStore>,
    pub advisor: Arc<Advisor>,
    pub config: Config,
}

/// Resolve the session forwarded by the authentication gateway
pub fn session_from_headers(headers: &axum::http::HeaderMap) -> Option<Session> {
    headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .filter(|id| !id.is_empty())
        .map(Session::new)
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::categories::api_categories;
    use routes::recommendations::{api_recommendations, api_recommendations_refresh};
    use routes::summary::{api_monthly_overview, api_summary};
    use routes::transactions::{
        api_transaction_create, api_transaction_delete, api_transactions,
    };

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/summary", get(api_summary))
        .route("/api/overview/monthly", get(api_monthly_overview))
        .route("/api/transactions", get(api_transactions))
        .route("/api/transactions", post(api_transaction_create))
        .route("/api/transactions/:id", delete(api_transaction_delete))
        .route("/api/categories", get(api_categories))
        .route("/api/recommendations", get(api_recommendations))
        .route("/api/recommendations/refresh", post(api_recommendations_refresh))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Start the HTTP server
///
/// Binds to the configured address and serves the dashboard API until
/// the process exits.
pub async fn start_server(
    config: Config,
    store: Arc<dyn TransactionStore>,
    advisor: Arc<Advisor>,
) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { store, advisor, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    eprintln!("[INFO] Starting finboard server on http://{}", addr);
    eprintln!("[INFO] Available routes:");
    eprintln!("[INFO]   - /api/summary (Financial summary)");
    eprintln!("[INFO]   - /api/overview/monthly (Monthly chart data)");
    eprintln!("[INFO]   - /api/transactions (Transaction list and writes)");
    eprintln!("[INFO]   - /api/categories (Category list)");
    eprintln!("[INFO]   - /api/recommendations (AI recommendations)");

    axum::serve(listener, router).await
}
