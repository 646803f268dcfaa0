//! Recommendation preparation
//!
//! Reduces a user's transaction history into a deterministic digest,
//! asks the text generator for exactly three recommendations, validates
//! the response into typed drafts, and persists them. A 24-hour
//! freshness window decides whether an existing batch is reused or a new
//! one is generated.
//!
//! The freshness check reads a single timestamp and is not atomic with
//! the insert; two concurrent refreshes may both regenerate and persist
//! duplicate batches. Reusing a fresh batch is an optimization, not a
//! correctness guarantee.

pub mod error;
pub mod generator;

use chrono::{DateTime, Duration, Utc};
use finboard_config::AdvisorConfig;
use finboard_core::{
    expense_rollup, total_income, ImpactLevel, NewRecommendation, Recommendation,
    RecommendationIcon, Session, Transaction,
};
use finboard_store::TransactionStore;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use error::{AdvisorError, GeneratorError};
pub use generator::{OpenAiGenerator, TextGenerator};

/// Recommendations per batch
const BATCH_LIMIT: usize = 3;

/// How many recent transactions the digest includes
const RECENT_LIMIT: usize = 10;

/// Instruction template sent to the text generator. The digest sections
/// are substituted in; everything else is fixed so the prompt stays
/// deterministic for a given transaction history.
const PROMPT: &str = "\
As a financial advisor, analyze this user's financial data and provide 3 personalized recommendations.

Income: {INCOME}

Top Expenses by Category:
{EXPENSE_CATEGORIES}

Recent Transactions:
{RECENT_TRANSACTIONS}

For each recommendation:
1. Provide a short, specific title (max 5 words)
2. Write a detailed explanation (1-2 sentences)
3. Assign an impact level (Low, Medium, or High)
4. Suggest an icon name from: trending-up, piggy-bank, lightbulb, alert-circle, credit-card, shopping-bag, zap

Format your response as a JSON array with objects containing title, description, impact, and icon fields.
";

/// One validated recommendation from the generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationDraft {
    pub title: String,
    pub description: String,
    pub impact: ImpactLevel,
    pub icon: RecommendationIcon,
}

/// State of a user's latest recommendation batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// A batch exists and is inside the freshness window
    Fresh,
    /// No batch, or the newest one is outside the window
    Stale,
}

/// Evaluate the freshness window against the newest batch timestamp
pub fn freshness(
    latest: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    window: Duration,
) -> Freshness {
    match latest {
        Some(created_at) if created_at > now - window => Freshness::Fresh,
        _ => Freshness::Stale,
    }
}

/// Recommendation preparer
pub struct Advisor {
    store: Arc<dyn TransactionStore>,
    generator: Arc<dyn TextGenerator>,
    temperature: f32,
    max_tokens: u32,
    freshness_window: Duration,
}

impl Advisor {
    /// Wire the preparer to its collaborators
    pub fn new(
        store: Arc<dyn TransactionStore>,
        generator: Arc<dyn TextGenerator>,
        config: &AdvisorConfig,
    ) -> Self {
        Self {
            store,
            generator,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            freshness_window: Duration::hours(config.freshness_hours),
        }
    }

    /// Return the current batch, regenerating when it is stale or absent
    pub async fn recommendations(
        &self,
        session: &Session,
    ) -> Result<Vec<Recommendation>, AdvisorError> {
        let existing = self
            .store
            .fetch_recent_recommendations(session, BATCH_LIMIT)
            .await?;
        let latest = existing.first().and_then(|r| r.created_at);

        match freshness(latest, Utc::now(), self.freshness_window) {
            Freshness::Fresh => Ok(existing),
            Freshness::Stale => self.regenerate(session).await,
        }
    }

    /// Generate, persist, and return a new batch.
    ///
    /// With no transaction history there is nothing to analyze: the
    /// result is empty and the generator is never invoked. Prior batches
    /// are never deleted; history accumulates and the newest rows win.
    pub async fn regenerate(&self, session: &Session) -> Result<Vec<Recommendation>, AdvisorError> {
        let transactions = self.store.fetch_transactions(session).await?;
        if transactions.is_empty() {
            return Ok(Vec::new());
        }

        let prompt = build_prompt(&transactions);
        log::info!(
            "Generating recommendations for user {} from {} transactions",
            session.user_id,
            transactions.len()
        );

        let text = self
            .generator
            .generate(&prompt, self.temperature, self.max_tokens)
            .await?;
        let drafts = parse_drafts(&text)?;

        for draft in &drafts {
            self.store
                .insert_recommendation(
                    session,
                    NewRecommendation {
                        title: draft.title.clone(),
                        description: draft.description.clone(),
                        impact: draft.impact.to_string(),
                        icon: draft.icon.to_string(),
                    },
                )
                .await?;
        }

        self.store
            .fetch_recent_recommendations(session, BATCH_LIMIT)
            .await
            .map_err(Into::into)
    }
}

/// Build the deterministic analysis digest for a transaction history.
///
/// Transactions are expected newest first, as the store returns them.
pub fn build_prompt(transactions: &[Transaction]) -> String {
    let income = total_income(transactions);

    let categories = expense_rollup(transactions)
        .into_iter()
        .map(|entry| format!("{}: ${:.2}", entry.category, entry.total))
        .collect::<Vec<_>>()
        .join("\n");

    let recent = transactions
        .iter()
        .take(RECENT_LIMIT)
        .map(|tx| {
            let sign = if tx.amount > Decimal::ZERO { "+" } else { "" };
            format!(
                "{}: {} - {}${:.2} ({})",
                tx.transaction_date,
                tx.description,
                sign,
                tx.amount.abs(),
                tx.category_name()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    PROMPT
        .replace("{INCOME}", &format!("${:.2}", income))
        .replace("{EXPENSE_CATEGORIES}", &categories)
        .replace("{RECENT_TRANSACTIONS}", &recent)
}

/// Strip a Markdown code fence the generator sometimes wraps around its
/// JSON output
fn strip_fence(text: &str) -> &str {
    let trimmed = text.trim();
    for prefix in ["```json", "```"] {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            if let Some(inner) = rest.strip_suffix("```") {
                return inner.trim();
            }
        }
    }
    trimmed
}

/// Parse generator output into validated drafts.
///
/// Anything that is not a JSON array of {title, description, impact,
/// icon} objects with known impact and icon tags is rejected as
/// `MalformedResponse`.
pub fn parse_drafts(text: &str) -> Result<Vec<RecommendationDraft>, AdvisorError> {
    serde_json::from_str(strip_fence(text)).map_err(|e| {
        log::warn!("Failed to parse generator response: {}", e);
        AdvisorError::MalformedResponse
    })
}

// ==================== Tests ====================
