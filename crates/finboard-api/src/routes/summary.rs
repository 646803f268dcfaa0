//! Summary endpoints - dashboard cards and the monthly chart
//!
//! Endpoints:
//! - api_summary: current-month financial summary with deltas (JSON)
//! - api_monthly_overview: trailing 12-month income/expense series (JSON)
//!
//! Both are read-only display paths: a missing session or a store
//! failure degrades to a neutral default instead of an error response.

use axum::extract::State;
use axum::http::HeaderMap;
use chrono::Utc;
use finboard_core::{current_month, financial_summary, monthly_series, previous_month, trailing_window, MonthlyPoint};

use crate::{session_from_headers, AppState};

/// Trailing months shown in the overview chart
const CHART_MONTHS: u32 = 12;

/// Current-month financial summary (JSON API)
pub async fn api_summary(state: State<AppState>, headers: HeaderMap) -> String {
    let Some(session) = session_from_headers(&headers) else {
        return "null".to_string();
    };

    let today = Utc::now().date_naive();
    let current = current_month(today);
    let previous = previous_month(today);

    let current_rows = match state
        .store
        .fetch_transactions_between(&session, current.start, current.end)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            log::error!("Failed to fetch current month transactions: {}", e);
            return "null".to_string();
        }
    };

    let previous_rows = match state
        .store
        .fetch_transactions_between(&session, previous.start, previous.end)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            log::error!("Failed to fetch previous month transactions: {}", e);
            return "null".to_string();
        }
    };

    let summary = financial_summary(&current_rows, &previous_rows).rounded();
    serde_json::to_string(&summary).unwrap_or_default()
}

/// Monthly income/expense chart data (JSON API)
pub async fn api_monthly_overview(state: State<AppState>, headers: HeaderMap) -> String {
    let Some(session) = session_from_headers(&headers) else {
        return "[]".to_string();
    };

    let today = Utc::now().date_naive();
    let window = trailing_window(today, CHART_MONTHS);

    let rows = match state
        .store
        .fetch_transactions_between(&session, window.start, window.end)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            log::error!("Failed to fetch chart transactions: {}", e);
            return "[]".to_string();
        }
    };

    let points: Vec<MonthlyPoint> = monthly_series(&rows, today, CHART_MONTHS)
        .into_iter()
        .map(MonthlyPoint::rounded)
        .collect();
    serde_json::to_string(&points).unwrap_or_default()
}
