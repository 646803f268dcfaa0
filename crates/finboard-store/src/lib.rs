//! Access to the external relational data service
//!
//! All persistent state lives in a remote PostgREST-style service; this
//! crate defines the `TransactionStore` seam the rest of finboard talks
//! through, plus two implementations:
//! - `RestStore`: the production HTTP client
//! - `MemoryStore`: an in-process store backing tests
//!
//! Every call is scoped to an authenticated session and is fallible with
//! no automatic retry; callers decide whether a failure degrades to an
//! empty default (reads) or surfaces loudly (writes).

pub mod error;
pub mod memory;
pub mod rest;

use async_trait::async_trait;
use chrono::NaiveDate;
use finboard_core::{Category, NewRecommendation, NewTransaction, Recommendation, Session, Transaction};

pub use error::StoreError;
pub use memory::MemoryStore;
pub use rest::RestStore;

/// Store access contract
///
/// Transactions come back ordered by date descending; recommendations by
/// creation time descending.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Fetch every transaction owned by the session user
    async fn fetch_transactions(&self, session: &Session) -> Result<Vec<Transaction>, StoreError>;

    /// Fetch the user's transactions with dates inside `[start, end]`
    async fn fetch_transactions_between(
        &self,
        session: &Session,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Insert a transaction for the session user
    async fn insert_transaction(
        &self,
        session: &Session,
        new: NewTransaction,
    ) -> Result<(), StoreError>;

    /// Delete one of the session user's transactions by id
    async fn delete_transaction(&self, session: &Session, id: &str) -> Result<(), StoreError>;

    /// Fetch all categories, ordered by name
    async fn fetch_categories(&self) -> Result<Vec<Category>, StoreError>;

    /// Fetch the user's most recent recommendations, newest first
    async fn fetch_recent_recommendations(
        &self,
        session: &Session,
        limit: usize,
    ) -> Result<Vec<Recommendation>, StoreError>;

    /// Insert a recommendation for the session user
    async fn insert_recommendation(
        &self,
        session: &Session,
        new: NewRecommendation,
    ) -> Result<(), StoreError>;
}
