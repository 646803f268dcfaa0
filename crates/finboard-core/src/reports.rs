//! Derived structures returned by the API

use serde::{Deserialize, Serialize};

use super::filter::{badge_class, Direction};
use super::models::Transaction;

/// One row of the transactions list, classified for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionListItem {
    /// The underlying transaction (with its embedded category)
    #[serde(flatten)]
    pub transaction: Transaction,
    /// Resolved category name ("Uncategorized" when absent)
    pub category_name: String,
    /// Direction glyph for the amount column
    pub direction: Direction,
    /// Badge style classes for the category column
    pub badge_class: String,
}

impl From<Transaction> for TransactionListItem {
    fn from(transaction: Transaction) -> Self {
        let category_name = transaction.category_name().to_string();
        let direction = Direction::for_transaction(&transaction);
        let badge = badge_class(transaction.category.as_ref());
        Self {
            transaction,
            category_name,
            direction,
            badge_class: badge.to_string(),
        }
    }
}

/// Transactions list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<TransactionListItem>,
    pub total_count: usize,
}

/// Result envelope for write operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteResult {
    pub success: bool,
    pub message: String,
}

impl WriteResult {
    /// Successful write with a confirmation message
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }

    /// Failed write with an explanation for the caller to display
    pub fn error(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into() }
    }
}
