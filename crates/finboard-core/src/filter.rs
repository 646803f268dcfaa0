//! Transaction classification and list filtering
//!
//! Covers the display direction glyph, the tab filter used by the
//! categorized list views, free-text search, and the category badge
//! palette lookup.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::models::{Category, Transaction, TransactionKind};

/// Display direction for a transaction row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Incoming amount (up arrow)
    Up,
    /// Outgoing amount (down arrow)
    Down,
    /// Zero-amount investment (trend glyph)
    Neutral,
    /// Zero-amount transfer (left-right glyph)
    Bidirectional,
}

impl Direction {
    /// Resolve the glyph for a transaction.
    ///
    /// The amount sign decides; the type tag is consulted only for the
    /// zero-amount case, and anything that is not an investment or a
    /// transfer falls back to the expense glyph.
    pub fn for_transaction(tx: &Transaction) -> Self {
        if tx.amount > Decimal::ZERO {
            return Direction::Up;
        }
        if tx.amount < Decimal::ZERO {
            return Direction::Down;
        }
        match tx.kind {
            TransactionKind::Investment => Direction::Neutral,
            TransactionKind::Transfer => Direction::Bidirectional,
            _ => Direction::Down,
        }
    }
}

/// Tabs offered by the transactions view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionTab {
    All,
    Income,
    Expense,
    Investment,
    Transfer,
}

impl Default for TransactionTab {
    fn default() -> Self {
        TransactionTab::All
    }
}

impl TransactionTab {
    /// Whether a transaction belongs on this tab.
    ///
    /// Income and expense filter on the amount sign. The investment and
    /// transfer tabs are declared but the generic filter does not
    /// special-case them, so they pass everything through; switching
    /// them to a type-aware filter is a pending product decision.
    pub fn matches(&self, tx: &Transaction) -> bool {
        match self {
            TransactionTab::Income => tx.amount > Decimal::ZERO,
            TransactionTab::Expense => tx.amount < Decimal::ZERO,
            TransactionTab::All | TransactionTab::Investment | TransactionTab::Transfer => true,
        }
    }
}

impl std::str::FromStr for TransactionTab {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(TransactionTab::All),
            "income" => Ok(TransactionTab::Income),
            "expense" => Ok(TransactionTab::Expense),
            "investment" => Ok(TransactionTab::Investment),
            "transfer" => Ok(TransactionTab::Transfer),
            _ => Err(format!("Invalid transaction tab: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionTab::All => write!(f, "all"),
            TransactionTab::Income => write!(f, "income"),
            TransactionTab::Expense => write!(f, "expense"),
            TransactionTab::Investment => write!(f, "investment"),
            TransactionTab::Transfer => write!(f, "transfer"),
        }
    }
}

/// Case-insensitive free-text match against the description or the
/// resolved category name. An empty term matches everything; a
/// transaction without a category only matches on its description.
pub fn matches_search(tx: &Transaction, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    if tx.description.to_lowercase().contains(&needle) {
        return true;
    }
    tx.category
        .as_ref()
        .map(|c| c.name.to_lowercase().contains(&needle))
        .unwrap_or(false)
}

/// Badge style classes for a category's palette tag.
///
/// Unknown tags and missing categories both fall back to the neutral
/// gray style.
pub fn badge_class(category: Option<&Category>) -> &'static str {
    let color = match category.and_then(|c| c.color.as_deref()) {
        Some(color) => color,
        None => return "bg-gray-100 text-gray-800",
    };

    match color {
        "green" => "bg-green-100 text-green-800",
        "blue" => "bg-blue-100 text-blue-800",
        "purple" => "bg-purple-100 text-purple-800",
        "yellow" | "amber" => "bg-yellow-100 text-yellow-800",
        "orange" => "bg-orange-100 text-orange-800",
        "pink" | "rose" => "bg-pink-100 text-pink-800",
        "red" => "bg-red-100 text-red-800",
        "teal" => "bg-teal-100 text-teal-800",
        "cyan" => "bg-cyan-100 text-cyan-800",
        "emerald" => "bg-emerald-100 text-emerald-800",
        "indigo" => "bg-indigo-100 text-indigo-800",
        "slate" => "bg-slate-100 text-slate-800",
        _ => "bg-gray-100 text-gray-800",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn tx(kind: TransactionKind, amount: Decimal, description: &str) -> Transaction {
        Transaction {
            id: "t1".to_string(),
            user_id: "u1".to_string(),
            kind,
            amount,
            description: description.to_string(),
            category_id: None,
            category: None,
            transaction_date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            created_at: None,
            updated_at: None,
        }
    }

    fn category(name: &str, color: Option<&str>) -> Category {
        Category {
            id: "c1".to_string(),
            name: name.to_string(),
            kind: "expense".to_string(),
            color: color.map(|c| c.to_string()),
            icon: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_direction_follows_sign() {
        let up = tx(TransactionKind::Investment, dec!(10), "");
        assert_eq!(Direction::for_transaction(&up), Direction::Up);

        let down = tx(TransactionKind::Income, dec!(-10), "");
        assert_eq!(Direction::for_transaction(&down), Direction::Down);
    }

    #[test]
    fn test_direction_zero_amount_falls_back_to_type() {
        let investment = tx(TransactionKind::Investment, dec!(0), "");
        assert_eq!(Direction::for_transaction(&investment), Direction::Neutral);

        let transfer = tx(TransactionKind::Transfer, dec!(0), "");
        assert_eq!(Direction::for_transaction(&transfer), Direction::Bidirectional);

        let income = tx(TransactionKind::Income, dec!(0), "");
        assert_eq!(Direction::for_transaction(&income), Direction::Down);

        let expense = tx(TransactionKind::Expense, dec!(0), "");
        assert_eq!(Direction::for_transaction(&expense), Direction::Down);
    }

    #[test]
    fn test_tab_filters_on_amount_sign() {
        let salary = tx(TransactionKind::Income, dec!(100), "Salary");
        let rent = tx(TransactionKind::Expense, dec!(-900), "Rent");

        assert!(TransactionTab::Income.matches(&salary));
        assert!(!TransactionTab::Income.matches(&rent));
        assert!(TransactionTab::Expense.matches(&rent));
        assert!(!TransactionTab::Expense.matches(&salary));
        assert!(TransactionTab::All.matches(&salary));
        assert!(TransactionTab::All.matches(&rent));
    }

    #[test]
    fn test_investment_and_transfer_tabs_pass_through() {
        // The generic amount filter does not special-case these tabs;
        // they currently behave like "all".
        let salary = tx(TransactionKind::Income, dec!(100), "Salary");
        let rent = tx(TransactionKind::Expense, dec!(-900), "Rent");
        assert!(TransactionTab::Investment.matches(&salary));
        assert!(TransactionTab::Investment.matches(&rent));
        assert!(TransactionTab::Transfer.matches(&salary));
        assert!(TransactionTab::Transfer.matches(&rent));
    }

    #[test]
    fn test_search_matches_description_case_insensitive() {
        let t = tx(TransactionKind::Expense, dec!(-12), "Coffee at Blue Bottle");
        assert!(matches_search(&t, "blue bottle"));
        assert!(matches_search(&t, "COFFEE"));
        assert!(!matches_search(&t, "tea"));
        assert!(matches_search(&t, ""));
    }

    #[test]
    fn test_search_matches_category_name() {
        let mut t = tx(TransactionKind::Expense, dec!(-12), "Lunch");
        t.category = Some(category("Dining Out", Some("orange")));
        assert!(matches_search(&t, "dining"));

        // Without a category only the description is searched; the
        // "Uncategorized" render fallback is not matched.
        let bare = tx(TransactionKind::Expense, dec!(-12), "Lunch");
        assert!(!matches_search(&bare, "uncategorized"));
    }

    #[test]
    fn test_badge_palette_lookup() {
        let food = category("Food", Some("green"));
        assert_eq!(badge_class(Some(&food)), "bg-green-100 text-green-800");

        let amber = category("Utilities", Some("amber"));
        assert_eq!(badge_class(Some(&amber)), "bg-yellow-100 text-yellow-800");

        let unknown = category("Misc", Some("chartreuse"));
        assert_eq!(badge_class(Some(&unknown)), "bg-gray-100 text-gray-800");

        let untagged = category("Misc", None);
        assert_eq!(badge_class(Some(&untagged)), "bg-gray-100 text-gray-800");

        assert_eq!(badge_class(None), "bg-gray-100 text-gray-800");
    }
}
