//! Core data models for the dashboard

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Authenticated session, resolved by the upstream gateway and threaded
/// explicitly into every user-scoped operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Authenticated user id
    pub user_id: String,
}

impl Session {
    /// Create a session for a user id
    pub fn new(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into() }
    }
}

/// Transaction type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in (salary, dividends)
    Income,
    /// Money going out (rent, groceries)
    Expense,
    /// Investment contributions
    Investment,
    /// Transfers between own accounts
    Transfer,
}

impl TransactionKind {
    /// Apply the storage sign convention to an entered amount.
    ///
    /// Expenses are stored negative, everything else positive. The sign
    /// is applied exactly once, at creation; read paths never re-derive
    /// it from the type.
    pub fn signed_amount(&self, amount: Decimal) -> Decimal {
        match self {
            TransactionKind::Expense => -amount.abs(),
            _ => amount.abs(),
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            "investment" => Ok(TransactionKind::Investment),
            "transfer" => Ok(TransactionKind::Transfer),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
            TransactionKind::Investment => write!(f, "investment"),
            TransactionKind::Transfer => write!(f, "transfer"),
        }
    }
}

/// Transaction record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: String,
    /// Owning user id
    pub user_id: String,
    /// Transaction type
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Signed amount; negative for expenses, positive otherwise
    pub amount: Decimal,
    /// Free-text description
    pub description: String,
    /// Optional category reference
    pub category_id: Option<String>,
    /// Resolved category, when the store embeds it
    #[serde(rename = "categories")]
    pub category: Option<Category>,
    /// Calendar date of the transaction (no time component)
    pub transaction_date: NaiveDate,
    /// Row creation timestamp
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    pub updated_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Resolved category name, or "Uncategorized" when absent
    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("Uncategorized")
    }

    /// Whether the signed amount classifies as income
    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Whether the signed amount classifies as an expense
    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

/// Fields for a transaction about to be inserted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    /// Transaction type
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Signed amount, normalized at construction
    pub amount: Decimal,
    /// Free-text description
    pub description: String,
    /// Optional category reference
    pub category_id: Option<String>,
    /// Calendar date of the transaction
    pub transaction_date: NaiveDate,
}

impl NewTransaction {
    /// Build an insert payload, applying the sign convention to the
    /// entered amount.
    pub fn new(
        kind: TransactionKind,
        amount: Decimal,
        description: impl Into<String>,
        category_id: Option<String>,
        transaction_date: NaiveDate,
    ) -> Self {
        Self {
            kind,
            amount: kind.signed_amount(amount),
            description: description.into(),
            category_id,
            transaction_date,
        }
    }
}

/// Category record
///
/// Category `type` is an open tag (categories may outlive the closed
/// transaction type set), and `color`/`icon` are free-form tags resolved
/// through application-side lookup tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique category identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Category type tag
    #[serde(rename = "type")]
    pub kind: String,
    /// Palette tag for UI color-coding
    pub color: Option<String>,
    /// Icon tag
    pub icon: Option<String>,
    /// Row creation timestamp
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    pub updated_at: Option<DateTime<Utc>>,
}

/// Recommendation impact level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

impl std::str::FromStr for ImpactLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(ImpactLevel::Low),
            "medium" => Ok(ImpactLevel::Medium),
            "high" => Ok(ImpactLevel::High),
            _ => Err(format!("Invalid impact level: {}", s)),
        }
    }
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpactLevel::Low => write!(f, "Low"),
            ImpactLevel::Medium => write!(f, "Medium"),
            ImpactLevel::High => write!(f, "High"),
        }
    }
}

/// Icon tags the generator may assign to a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationIcon {
    TrendingUp,
    PiggyBank,
    Lightbulb,
    AlertCircle,
    CreditCard,
    ShoppingBag,
    Zap,
}

impl std::fmt::Display for RecommendationIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationIcon::TrendingUp => write!(f, "trending-up"),
            RecommendationIcon::PiggyBank => write!(f, "piggy-bank"),
            RecommendationIcon::Lightbulb => write!(f, "lightbulb"),
            RecommendationIcon::AlertCircle => write!(f, "alert-circle"),
            RecommendationIcon::CreditCard => write!(f, "credit-card"),
            RecommendationIcon::ShoppingBag => write!(f, "shopping-bag"),
            RecommendationIcon::Zap => write!(f, "zap"),
        }
    }
}

/// Persisted recommendation record
///
/// Impact and icon are stored as open strings; they are validated at
/// generation time, not by a storage constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Unique recommendation identifier
    pub id: String,
    /// Owning user id
    pub user_id: String,
    /// Short title (at most five words at generation time)
    pub title: String,
    /// One to two sentence explanation
    pub description: String,
    /// Impact tag ("Low", "Medium", "High")
    pub impact: Option<String>,
    /// Icon tag from the fixed generator set
    pub icon: Option<String>,
    /// Whether the user marked the recommendation as acted on
    pub is_implemented: Option<bool>,
    /// Row creation timestamp; drives the freshness window
    pub created_at: Option<DateTime<Utc>>,
}

/// Fields for a recommendation about to be inserted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecommendation {
    /// Short title
    pub title: String,
    /// Explanation
    pub description: String,
    /// Impact tag
    pub impact: String,
    /// Icon tag
    pub icon: String,
}
