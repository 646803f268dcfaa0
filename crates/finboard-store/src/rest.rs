//! PostgREST-style HTTP client for the data service
//!
//! Rows arrive as loosely-shaped JSON; they are deserialized into
//! private wire structs here and converted into typed core models, so a
//! malformed row surfaces as an explicit `InvalidRow` instead of leaking
//! into the domain.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use finboard_config::StoreConfig;
use finboard_core::{
    Category, NewRecommendation, NewTransaction, Recommendation, Session, Transaction,
    TransactionKind,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::StoreError;
use crate::TransactionStore;

/// HTTP client for the relational data service
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    /// Build a client from the store configuration
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn get(&self, table: &str) -> reqwest::RequestBuilder {
        self.client
            .get(self.endpoint(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn post(&self, table: &str) -> reqwest::RequestBuilder {
        self.client
            .post(self.endpoint(table))
            .header("apikey", &self.api_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(&self.api_key)
    }

    fn delete(&self, table: &str) -> reqwest::RequestBuilder {
        self.client
            .delete(self.endpoint(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            log::error!("Data service returned status {}", status);
            return Err(StoreError::Status { status: status.as_u16() });
        }
        Ok(response)
    }
}

fn eq(value: &str) -> String {
    format!("eq.{}", value)
}

// ==================== Wire Rows ====================

#[derive(Debug, Deserialize)]
struct TransactionRow {
    id: String,
    user_id: String,
    #[serde(rename = "type")]
    kind: String,
    amount: Decimal,
    description: String,
    category_id: Option<String>,
    categories: Option<CategoryRow>,
    transaction_date: NaiveDate,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl TransactionRow {
    fn into_model(self) -> Result<Transaction, StoreError> {
        let kind: TransactionKind = self
            .kind
            .parse()
            .map_err(|message| StoreError::InvalidRow { message })?;
        Ok(Transaction {
            id: self.id,
            user_id: self.user_id,
            kind,
            amount: self.amount,
            description: self.description,
            category_id: self.category_id,
            category: self.categories.map(CategoryRow::into_model),
            transaction_date: self.transaction_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Deserialize)]
struct CategoryRow {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    color: Option<String>,
    icon: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl CategoryRow {
    fn into_model(self) -> Category {
        Category {
            id: self.id,
            name: self.name,
            kind: self.kind,
            color: self.color,
            icon: self.icon,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecommendationRow {
    id: String,
    user_id: String,
    title: String,
    description: String,
    impact: Option<String>,
    icon: Option<String>,
    is_implemented: Option<bool>,
    created_at: Option<DateTime<Utc>>,
}

impl RecommendationRow {
    fn into_model(self) -> Recommendation {
        Recommendation {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            impact: self.impact,
            icon: self.icon,
            is_implemented: self.is_implemented,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct TransactionInsert<'a> {
    user_id: &'a str,
    #[serde(rename = "type")]
    kind: TransactionKind,
    amount: Decimal,
    description: String,
    category_id: Option<String>,
    transaction_date: NaiveDate,
}

#[derive(Debug, Serialize)]
struct RecommendationInsert<'a> {
    user_id: &'a str,
    title: String,
    description: String,
    impact: String,
    icon: String,
}

// ==================== Trait Implementation ====================

#[async_trait]
impl TransactionStore for RestStore {
    async fn fetch_transactions(&self, session: &Session) -> Result<Vec<Transaction>, StoreError> {
        let response = self
            .get("transactions")
            .query(&[
                ("select", "*,categories(*)".to_string()),
                ("user_id", eq(&session.user_id)),
                ("order", "transaction_date.desc".to_string()),
            ])
            .send()
            .await?;
        let rows: Vec<TransactionRow> = Self::check(response).await?.json().await?;
        rows.into_iter().map(TransactionRow::into_model).collect()
    }

    async fn fetch_transactions_between(
        &self,
        session: &Session,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, StoreError> {
        let response = self
            .get("transactions")
            .query(&[
                ("select", "*,categories(*)".to_string()),
                ("user_id", eq(&session.user_id)),
                ("transaction_date", format!("gte.{}", start)),
                ("transaction_date", format!("lte.{}", end)),
                ("order", "transaction_date.desc".to_string()),
            ])
            .send()
            .await?;
        let rows: Vec<TransactionRow> = Self::check(response).await?.json().await?;
        rows.into_iter().map(TransactionRow::into_model).collect()
    }

    async fn insert_transaction(
        &self,
        session: &Session,
        new: NewTransaction,
    ) -> Result<(), StoreError> {
        let body = TransactionInsert {
            user_id: &session.user_id,
            kind: new.kind,
            amount: new.amount,
            description: new.description,
            category_id: new.category_id,
            transaction_date: new.transaction_date,
        };
        let response = self.post("transactions").json(&body).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_transaction(&self, session: &Session, id: &str) -> Result<(), StoreError> {
        let response = self
            .delete("transactions")
            .query(&[("id", eq(id)), ("user_id", eq(&session.user_id))])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, StoreError> {
        let response = self
            .get("categories")
            .query(&[("select", "*"), ("order", "name")])
            .send()
            .await?;
        let rows: Vec<CategoryRow> = Self::check(response).await?.json().await?;
        Ok(rows.into_iter().map(CategoryRow::into_model).collect())
    }

    async fn fetch_recent_recommendations(
        &self,
        session: &Session,
        limit: usize,
    ) -> Result<Vec<Recommendation>, StoreError> {
        let response = self
            .get("ai_recommendations")
            .query(&[
                ("select", "*".to_string()),
                ("user_id", eq(&session.user_id)),
                ("order", "created_at.desc".to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;
        let rows: Vec<RecommendationRow> = Self::check(response).await?.json().await?;
        Ok(rows.into_iter().map(RecommendationRow::into_model).collect())
    }

    async fn insert_recommendation(
        &self,
        session: &Session,
        new: NewRecommendation,
    ) -> Result<(), StoreError> {
        let body = RecommendationInsert {
            user_id: &session.user_id,
            title: new.title,
            description: new.description,
            impact: new.impact,
            icon: new.icon,
        };
        let response = self.post("ai_recommendations").json(&body).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn store() -> RestStore {
        let config = StoreConfig {
            base_url: "https://data.example.co/".to_string(),
            api_key: "test-key".to_string(),
            timeout_secs: 5,
        };
        RestStore::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let store = store();
        assert_eq!(
            store.endpoint("transactions"),
            "https://data.example.co/rest/v1/transactions"
        );
    }

    #[test]
    fn test_transaction_row_conversion() {
        let json = r#"{
            "id": "t1",
            "user_id": "u1",
            "type": "expense",
            "amount": -42.50,
            "description": "Dinner",
            "category_id": "c1",
            "categories": {"id": "c1", "name": "Dining", "type": "expense", "color": "orange", "icon": "utensils", "created_at": null, "updated_at": null},
            "transaction_date": "2025-06-10",
            "created_at": "2025-06-10T18:30:00Z",
            "updated_at": null
        }"#;
        let row: TransactionRow = serde_json::from_str(json).unwrap();
        let tx = row.into_model().unwrap();
        assert_eq!(tx.kind, TransactionKind::Expense);
        assert_eq!(tx.amount, dec!(-42.50));
        assert_eq!(tx.category_name(), "Dining");
    }

    #[test]
    fn test_transaction_row_rejects_unknown_kind() {
        let json = r#"{
            "id": "t1",
            "user_id": "u1",
            "type": "loan",
            "amount": 10,
            "description": "",
            "category_id": null,
            "categories": null,
            "transaction_date": "2025-06-10",
            "created_at": null,
            "updated_at": null
        }"#;
        let row: TransactionRow = serde_json::from_str(json).unwrap();
        assert!(matches!(row.into_model(), Err(StoreError::InvalidRow { .. })));
    }
}
