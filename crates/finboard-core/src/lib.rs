//! Core domain logic for finboard
//!
//! This crate holds everything that is pure computation over already
//! fetched data:
//! - models: transaction, category, and recommendation records
//! - summary: the financial aggregation engine (monthly summaries,
//!   period deltas, trailing time series, category rollups)
//! - filter: transaction classification and list filtering
//! - reports: derived structures returned by the API
//!
//! Nothing in here performs I/O; collaborators fetch the data and hand
//! it in.

pub mod filter;
pub mod models;
pub mod reports;
pub mod summary;

pub use filter::{badge_class, matches_search, Direction, TransactionTab};
pub use models::{
    Category, ImpactLevel, NewRecommendation, NewTransaction, Recommendation, RecommendationIcon,
    Session, Transaction, TransactionKind,
};
pub use reports::{TransactionListItem, TransactionsResponse, WriteResult};
pub use summary::{
    current_month, expense_rollup, financial_summary, monthly_series, percent_change,
    previous_month, total_income, trailing_window, CategoryTotal, FinancialSummary, MonthWindow,
    MonthlyPoint,
};
