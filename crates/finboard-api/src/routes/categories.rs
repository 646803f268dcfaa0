//! Categories endpoint
//!
//! Categories are shared reference data: no session is required and a
//! store failure degrades to an empty list.

use axum::extract::State;

use crate::AppState;

/// Category list, ordered by name (JSON API)
pub async fn api_categories(state: State<AppState>) -> String {
    match state.store.fetch_categories().await {
        Ok(categories) => serde_json::to_string(&categories).unwrap_or_default(),
        Err(e) => {
            log::error!("Failed to fetch categories: {}", e);
            "[]".to_string()
        }
    }
}
