//! Recommendation endpoints
//!
//! Endpoints:
//! - api_recommendations: current batch, regenerated when stale (JSON)
//! - api_recommendations_refresh: force a new batch (JSON)
//!
//! Generator failures and unparsable responses degrade to an empty
//! list; previously persisted recommendations stay available on the
//! next fetch.

use axum::extract::State;
use axum::http::HeaderMap;

use crate::{session_from_headers, AppState};

/// Current recommendation batch (JSON API)
pub async fn api_recommendations(state: State<AppState>, headers: HeaderMap) -> String {
    let Some(session) = session_from_headers(&headers) else {
        return "[]".to_string();
    };

    match state.advisor.recommendations(&session).await {
        Ok(batch) => serde_json::to_string(&batch).unwrap_or_default(),
        Err(e) => {
            log::error!("Failed to prepare recommendations: {}", e);
            "[]".to_string()
        }
    }
}

/// Force regeneration of the recommendation batch (JSON API)
pub async fn api_recommendations_refresh(state: State<AppState>, headers: HeaderMap) -> String {
    let Some(session) = session_from_headers(&headers) else {
        return "[]".to_string();
    };

    match state.advisor.regenerate(&session).await {
        Ok(batch) => serde_json::to_string(&batch).unwrap_or_default(),
        Err(e) => {
            log::error!("Failed to refresh recommendations: {}", e);
            "[]".to_string()
        }
    }
}
