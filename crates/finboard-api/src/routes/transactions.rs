//! Transactions endpoints - list, filter, create, delete
//!
//! Endpoints:
//! - api_transactions: filtered, classified list (JSON)
//! - api_transaction_create: add a transaction (write, fails loud)
//! - api_transaction_delete: delete a transaction (write, fails loud)
//!
//! The list supports tab filtering (`tab=income|expense|investment|transfer`)
//! and case-insensitive search (`q=`) over description and category name.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use finboard_core::{
    matches_search, NewTransaction, TransactionKind, TransactionListItem, TransactionTab,
    TransactionsResponse, WriteResult,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::ApiError;
use crate::{session_from_headers, AppState};

/// Filtered transactions list (JSON API)
pub async fn api_transactions(
    state: State<AppState>,
    headers: HeaderMap,
    params: Query<HashMap<String, String>>,
) -> String {
    let Some(session) = session_from_headers(&headers) else {
        return "[]".to_string();
    };

    let tab: TransactionTab = params
        .get("tab")
        .and_then(|s| s.parse().ok())
        .unwrap_or_default();
    let term = params.get("q").map(|s| s.as_str()).unwrap_or("");

    let rows = match state.store.fetch_transactions(&session).await {
        Ok(rows) => rows,
        Err(e) => {
            log::error!("Failed to fetch transactions: {}", e);
            return "[]".to_string();
        }
    };

    let transactions: Vec<TransactionListItem> = rows
        .into_iter()
        .filter(|t| tab.matches(t) && matches_search(t, term))
        .map(TransactionListItem::from)
        .collect();

    let response = TransactionsResponse {
        total_count: transactions.len(),
        transactions,
    };
    serde_json::to_string(&response).unwrap_or_default()
}

/// Fields accepted when adding a transaction
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    pub category_id: Option<String>,
    pub transaction_date: NaiveDate,
}

/// Add a transaction (JSON API)
///
/// The entered amount is normalized here: expenses are stored negative,
/// everything else positive.
pub async fn api_transaction_create(
    state: State<AppState>,
    headers: HeaderMap,
    body: Json<CreateTransactionRequest>,
) -> Response {
    let Some(session) = session_from_headers(&headers) else {
        return ApiError::Unauthorized.into_response();
    };

    let new = NewTransaction::new(
        body.kind,
        body.amount,
        body.description.clone(),
        body.category_id.clone(),
        body.transaction_date,
    );

    let result = match state.store.insert_transaction(&session, new).await {
        Ok(()) => WriteResult::ok("Transaction added successfully"),
        Err(e) => {
            log::error!("Failed to add transaction: {}", e);
            WriteResult::error(e.to_string())
        }
    };
    (StatusCode::OK, serde_json::to_string(&result).unwrap_or_default()).into_response()
}

/// Delete a transaction (JSON API)
pub async fn api_transaction_delete(
    state: State<AppState>,
    headers: HeaderMap,
    path: Path<String>,
) -> Response {
    let Some(session) = session_from_headers(&headers) else {
        return ApiError::Unauthorized.into_response();
    };

    let result = match state.store.delete_transaction(&session, &path.0).await {
        Ok(()) => WriteResult::ok("Transaction deleted successfully"),
        Err(e) => {
            log::error!("Failed to delete transaction {}: {}", path.0, e);
            WriteResult::error(e.to_string())
        }
    };
    (StatusCode::OK, serde_json::to_string(&result).unwrap_or_default()).into_response()
}
