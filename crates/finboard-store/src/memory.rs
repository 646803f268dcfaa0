//! In-process store implementation
//!
//! Mirrors the data service's observable behavior (user scoping,
//! ordering, date-range filtering) so the rest of the system can be
//! exercised without the network.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use finboard_core::{
    Category, NewRecommendation, NewTransaction, Recommendation, Session, Transaction,
};
use std::sync::RwLock;

use crate::error::StoreError;
use crate::TransactionStore;

#[derive(Default)]
struct Inner {
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    recommendations: Vec<Recommendation>,
    next_id: u64,
}

/// In-memory `TransactionStore`
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload categories, e.g. for tests that resolve category names
    pub fn seed_categories(&self, categories: Vec<Category>) {
        let mut inner = self.inner.write().unwrap();
        inner.categories = categories;
        inner.categories.sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// Preload fully-formed transactions without going through the
    /// insert path
    pub fn seed_transactions(&self, transactions: Vec<Transaction>) {
        let mut inner = self.inner.write().unwrap();
        inner.transactions.extend(transactions);
    }

    /// Preload recommendation rows, e.g. to test the freshness window
    pub fn seed_recommendations(&self, recommendations: Vec<Recommendation>) {
        let mut inner = self.inner.write().unwrap();
        inner.recommendations.extend(recommendations);
    }

    fn allocate_id(inner: &mut Inner, prefix: &str) -> String {
        inner.next_id += 1;
        format!("{}-{}", prefix, inner.next_id)
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn fetch_transactions(&self, session: &Session) -> Result<Vec<Transaction>, StoreError> {
        let inner = self.inner.read().unwrap();
        let mut rows: Vec<Transaction> = inner
            .transactions
            .iter()
            .filter(|t| t.user_id == session.user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.transaction_date
                .cmp(&a.transaction_date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(rows)
    }

    async fn fetch_transactions_between(
        &self,
        session: &Session,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, StoreError> {
        let rows = self.fetch_transactions(session).await?;
        Ok(rows
            .into_iter()
            .filter(|t| t.transaction_date >= start && t.transaction_date <= end)
            .collect())
    }

    async fn insert_transaction(
        &self,
        session: &Session,
        new: NewTransaction,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap();
        let id = Self::allocate_id(&mut inner, "txn");
        let category = new
            .category_id
            .as_ref()
            .and_then(|cid| inner.categories.iter().find(|c| &c.id == cid).cloned());
        let now = Utc::now();
        inner.transactions.push(Transaction {
            id,
            user_id: session.user_id.clone(),
            kind: new.kind,
            amount: new.amount,
            description: new.description,
            category_id: new.category_id,
            category,
            transaction_date: new.transaction_date,
            created_at: Some(now),
            updated_at: Some(now),
        });
        Ok(())
    }

    async fn delete_transaction(&self, session: &Session, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap();
        inner
            .transactions
            .retain(|t| !(t.id == id && t.user_id == session.user_id));
        Ok(())
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner.categories.clone())
    }

    async fn fetch_recent_recommendations(
        &self,
        session: &Session,
        limit: usize,
    ) -> Result<Vec<Recommendation>, StoreError> {
        let inner = self.inner.read().unwrap();
        let mut rows: Vec<Recommendation> = inner
            .recommendations
            .iter()
            .filter(|r| r.user_id == session.user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn insert_recommendation(
        &self,
        session: &Session,
        new: NewRecommendation,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap();
        let id = Self::allocate_id(&mut inner, "rec");
        inner.recommendations.push(Recommendation {
            id,
            user_id: session.user_id.clone(),
            title: new.title,
            description: new.description,
            impact: Some(new.impact),
            icon: Some(new.icon),
            is_implemented: Some(false),
            created_at: Some(Utc::now()),
        });
        Ok(())
    }
}
