//! Financial aggregation engine
//!
//! Computes the dashboard summary (balance, income, expenses, savings
//! rate, and their period-over-period deltas), the trailing monthly time
//! series, and the category rollups that feed the recommendation digest.
//! All monetary sums stay in `Decimal`; rounding happens only when a
//! response payload is built.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::models::Transaction;

// ==================== Month Windows ====================

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthWindow {
    /// Check if a date falls inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Shift a calendar month backwards, wrapping across year boundaries
fn months_back(year: i32, month: u32, back: u32) -> (i32, u32) {
    let total = year * 12 + month as i32 - 1 - back as i32;
    (total.div_euclid(12), total.rem_euclid(12) as u32 + 1)
}

/// First day of the month containing `date`
fn month_start(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("month in 1..=12")
}

/// Last day of the month containing `date`
fn month_end(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    month_start(next_year, next_month)
        .pred_opt()
        .expect("first of month has a predecessor")
}

/// Calendar window for the month containing `today`
pub fn current_month(today: NaiveDate) -> MonthWindow {
    MonthWindow {
        start: month_start(today.year(), today.month()),
        end: month_end(today.year(), today.month()),
    }
}

/// Calendar window for the month before the one containing `today`
pub fn previous_month(today: NaiveDate) -> MonthWindow {
    let (year, month) = months_back(today.year(), today.month(), 1);
    MonthWindow {
        start: month_start(year, month),
        end: month_end(year, month),
    }
}

/// Window covering the `months` trailing calendar months, the month
/// containing `today` included
pub fn trailing_window(today: NaiveDate, months: u32) -> MonthWindow {
    let back = months.saturating_sub(1);
    let (year, month) = months_back(today.year(), today.month(), back);
    MonthWindow {
        start: month_start(year, month),
        end: month_end(today.year(), today.month()),
    }
}

// ==================== Financial Summary ====================

/// Dashboard summary for the current calendar month, with deltas against
/// the previous one. Recomputed from fresh data on every request; not
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Income minus expenses for the current month
    pub balance: Decimal,
    /// Balance delta vs. previous month, percent
    pub balance_change: Decimal,
    /// Sum of positive amounts for the current month
    pub income: Decimal,
    /// Income delta vs. previous month, percent
    pub income_change: Decimal,
    /// Sum of absolute negative amounts for the current month
    pub expenses: Decimal,
    /// Expenses delta vs. previous month, percent
    pub expenses_change: Decimal,
    /// Balance as a share of income, percent
    pub savings_rate: Decimal,
    /// Savings-rate delta vs. previous month, in percentage points
    pub savings_rate_change: Decimal,
}

impl FinancialSummary {
    /// Round every field to two decimal places for display
    pub fn rounded(self) -> Self {
        Self {
            balance: self.balance.round_dp(2),
            balance_change: self.balance_change.round_dp(2),
            income: self.income.round_dp(2),
            income_change: self.income_change.round_dp(2),
            expenses: self.expenses.round_dp(2),
            expenses_change: self.expenses_change.round_dp(2),
            savings_rate: self.savings_rate.round_dp(2),
            savings_rate_change: self.savings_rate_change.round_dp(2),
        }
    }
}

/// Sum of positive amounts
pub fn total_income(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.amount > Decimal::ZERO)
        .map(|t| t.amount)
        .sum()
}

/// Sum of absolute negative amounts
fn total_expenses(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.amount < Decimal::ZERO)
        .map(|t| t.amount.abs())
        .sum()
}

/// Relative change in percent; exactly zero when the previous value is
/// zero. A swing from 0 to any nonzero value therefore reports 0%, which
/// is the documented behavior, not an oversight.
pub fn percent_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        Decimal::ZERO
    } else {
        (current - previous) / previous * Decimal::ONE_HUNDRED
    }
}

/// Balance as a share of income, in percent; zero when there is no income
fn savings_rate(balance: Decimal, income: Decimal) -> Decimal {
    if income > Decimal::ZERO {
        balance / income * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

/// Compute the dashboard summary from the current and previous month's
/// transaction slices.
pub fn financial_summary(
    current: &[Transaction],
    previous: &[Transaction],
) -> FinancialSummary {
    let income = total_income(current);
    let expenses = total_expenses(current);
    let prev_income = total_income(previous);
    let prev_expenses = total_expenses(previous);

    let balance = income - expenses;
    let prev_balance = prev_income - prev_expenses;

    // Balance may be negative or zero, so its delta divides by the
    // absolute previous balance.
    let balance_change = if prev_balance.is_zero() {
        Decimal::ZERO
    } else {
        (balance - prev_balance) / prev_balance.abs() * Decimal::ONE_HUNDRED
    };

    let rate = savings_rate(balance, income);
    let prev_rate = savings_rate(prev_balance, prev_income);
    // Unlike the three deltas above this is an absolute difference in
    // percentage points, not a relative change. Kept as-is.
    let savings_rate_change = if prev_rate.is_zero() {
        Decimal::ZERO
    } else {
        rate - prev_rate
    };

    FinancialSummary {
        balance,
        balance_change,
        income,
        income_change: percent_change(income, prev_income),
        expenses,
        expenses_change: percent_change(expenses, prev_expenses),
        savings_rate: rate,
        savings_rate_change,
    }
}

// ==================== Monthly Time Series ====================

/// One month of chart data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// Three-letter month label ("Jan" .. "Dec")
    pub month: String,
    /// Sum of positive amounts in the month
    pub income: Decimal,
    /// Sum of absolute negative amounts in the month
    pub expenses: Decimal,
}

impl MonthlyPoint {
    /// Round the monetary fields to two decimal places for display
    pub fn rounded(self) -> Self {
        Self {
            month: self.month,
            income: self.income.round_dp(2),
            expenses: self.expenses.round_dp(2),
        }
    }
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}

/// Group transactions into per-month income/expense totals over the
/// trailing window.
///
/// Only months with at least one transaction produce a point; empty
/// months are gaps, never zero-filled. Points are chronological and
/// never exceed `months`.
pub fn monthly_series(
    transactions: &[Transaction],
    today: NaiveDate,
    months: u32,
) -> Vec<MonthlyPoint> {
    let window = trailing_window(today, months);

    let mut grouped: HashMap<(i32, u32), (Decimal, Decimal)> = HashMap::new();
    for tx in transactions {
        let date = tx.transaction_date;
        if !window.contains(date) {
            continue;
        }
        let entry = grouped
            .entry((date.year(), date.month()))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        if tx.amount > Decimal::ZERO {
            entry.0 += tx.amount;
        } else {
            entry.1 += tx.amount.abs();
        }
    }

    let mut keys: Vec<(i32, u32)> = grouped.keys().copied().collect();
    keys.sort();

    keys.into_iter()
        .map(|key| {
            let (income, expenses) = grouped[&key];
            MonthlyPoint {
                month: month_label(key.1).to_string(),
                income,
                expenses,
            }
        })
        .collect()
}

// ==================== Category Rollups ====================

/// Absolute expense total for one resolved category name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Resolved category name, "Uncategorized" when absent
    pub category: String,
    /// Sum of absolute expense amounts
    pub total: Decimal,
}

/// Group expenses by resolved category name, summing absolute amounts,
/// sorted by total descending. Ties break on name so the digest built
/// from the rollup stays deterministic.
pub fn expense_rollup(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut grouped: HashMap<String, Decimal> = HashMap::new();
    for tx in transactions.iter().filter(|t| t.amount < Decimal::ZERO) {
        *grouped.entry(tx.category_name().to_string()).or_insert(Decimal::ZERO) +=
            tx.amount.abs();
    }

    let mut rollup: Vec<CategoryTotal> = grouped
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect();
    rollup.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    rollup
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, TransactionKind};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(amount: Decimal, on: NaiveDate) -> Transaction {
        let kind = if amount < Decimal::ZERO {
            TransactionKind::Expense
        } else {
            TransactionKind::Income
        };
        Transaction {
            id: format!("tx-{}-{}", on, amount),
            user_id: "u1".to_string(),
            kind,
            amount,
            description: "test".to_string(),
            category_id: None,
            category: None,
            transaction_date: on,
            created_at: None,
            updated_at: None,
        }
    }

    fn tx_in_category(amount: Decimal, on: NaiveDate, name: &str) -> Transaction {
        let mut t = tx(amount, on);
        t.category = Some(Category {
            id: format!("cat-{}", name),
            name: name.to_string(),
            kind: "expense".to_string(),
            color: None,
            icon: None,
            created_at: None,
            updated_at: None,
        });
        t
    }

    #[test]
    fn test_month_windows() {
        let w = current_month(date(2025, 6, 15));
        assert_eq!(w.start, date(2025, 6, 1));
        assert_eq!(w.end, date(2025, 6, 30));

        let p = previous_month(date(2025, 6, 15));
        assert_eq!(p.start, date(2025, 5, 1));
        assert_eq!(p.end, date(2025, 5, 31));
    }

    #[test]
    fn test_month_windows_wrap_year() {
        let w = current_month(date(2025, 12, 3));
        assert_eq!(w.end, date(2025, 12, 31));

        let p = previous_month(date(2025, 1, 20));
        assert_eq!(p.start, date(2024, 12, 1));
        assert_eq!(p.end, date(2024, 12, 31));
    }

    #[test]
    fn test_trailing_window_spans_twelve_months() {
        let w = trailing_window(date(2025, 8, 8), 12);
        assert_eq!(w.start, date(2024, 9, 1));
        assert_eq!(w.end, date(2025, 8, 31));
    }

    #[test]
    fn test_summary_reference_scenario() {
        let today = date(2025, 6, 15);
        let current = vec![
            tx(dec!(1000), today),
            tx(dec!(-300), today),
            tx(dec!(-200), today),
        ];
        let previous = vec![tx(dec!(800), date(2025, 5, 10)), tx(dec!(-400), date(2025, 5, 12))];

        let summary = financial_summary(&current, &previous);
        assert_eq!(summary.balance, dec!(500));
        assert_eq!(summary.income, dec!(1000));
        assert_eq!(summary.expenses, dec!(500));
        assert_eq!(summary.income_change, dec!(25));
        assert_eq!(summary.expenses_change, dec!(25));
        assert_eq!(summary.balance_change, dec!(25));
        assert_eq!(summary.savings_rate, dec!(50));
        assert_eq!(summary.savings_rate_change, dec!(0));
    }

    #[test]
    fn test_balance_is_income_minus_expenses() {
        let today = date(2025, 6, 1);
        let set = vec![
            tx(dec!(12.34), today),
            tx(dec!(0.01), today),
            tx(dec!(-3.33), today),
            tx(dec!(-0.02), today),
        ];
        let summary = financial_summary(&set, &[]);
        assert_eq!(summary.balance, summary.income - summary.expenses);
    }

    #[test]
    fn test_percent_change_zero_previous() {
        assert_eq!(percent_change(dec!(500), dec!(0)), dec!(0));
        assert_eq!(percent_change(dec!(0), dec!(0)), dec!(0));
        assert_eq!(percent_change(dec!(-10), dec!(0)), dec!(0));
    }

    #[test]
    fn test_income_from_zero_reports_zero_change() {
        let summary = financial_summary(&[tx(dec!(500), date(2025, 6, 2))], &[]);
        assert_eq!(summary.income_change, dec!(0));
    }

    #[test]
    fn test_balance_change_uses_absolute_denominator() {
        // Previous balance is negative; the delta still has the sign of
        // the improvement.
        let current = vec![tx(dec!(100), date(2025, 6, 2))];
        let previous = vec![tx(dec!(-200), date(2025, 5, 2))];
        let summary = financial_summary(&current, &previous);
        // (100 - (-200)) / |-200| * 100 = 150
        assert_eq!(summary.balance_change, dec!(150));
    }

    #[test]
    fn test_savings_rate_zero_income() {
        let summary = financial_summary(&[tx(dec!(-50), date(2025, 6, 2))], &[]);
        assert_eq!(summary.savings_rate, dec!(0));
        assert_eq!(summary.savings_rate_change, dec!(0));
    }

    #[test]
    fn test_summary_is_idempotent() {
        let current = vec![tx(dec!(1000), date(2025, 6, 1)), tx(dec!(-250.75), date(2025, 6, 2))];
        let previous = vec![tx(dec!(900), date(2025, 5, 1))];
        let a = financial_summary(&current, &previous);
        let b = financial_summary(&current, &previous);
        assert_eq!(a, b);
    }

    #[test]
    fn test_exact_decimal_accumulation() {
        // One hundred 0.10 expenses sum to exactly 10.00
        let today = date(2025, 6, 1);
        let set: Vec<Transaction> = (0..100).map(|_| tx(dec!(-0.10), today)).collect();
        let summary = financial_summary(&set, &[]);
        assert_eq!(summary.expenses, dec!(10.00));
    }

    #[test]
    fn test_monthly_series_skips_empty_months() {
        let today = date(2025, 8, 8);
        let set = vec![
            tx(dec!(100), date(2025, 3, 5)),
            tx(dec!(-40), date(2025, 3, 20)),
            // April and May have no transactions
            tx(dec!(200), date(2025, 6, 1)),
        ];
        let series = monthly_series(&set, today, 12);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].month, "Mar");
        assert_eq!(series[0].income, dec!(100));
        assert_eq!(series[0].expenses, dec!(40));
        assert_eq!(series[1].month, "Jun");
    }

    #[test]
    fn test_monthly_series_caps_at_window() {
        let today = date(2025, 8, 8);
        // One transaction in every month for two years
        let mut set = Vec::new();
        for year in [2024, 2025] {
            for month in 1..=12 {
                set.push(tx(dec!(10), date(year, month, 15)));
            }
        }
        let series = monthly_series(&set, today, 12);
        assert_eq!(series.len(), 12);
        assert_eq!(series[0].month, "Sep");
        assert_eq!(series[11].month, "Aug");
    }

    #[test]
    fn test_monthly_series_chronological_order() {
        let today = date(2025, 8, 8);
        let set = vec![
            tx(dec!(5), date(2025, 7, 1)),
            tx(dec!(5), date(2025, 1, 1)),
            tx(dec!(5), date(2025, 4, 1)),
        ];
        let labels: Vec<String> = monthly_series(&set, today, 12)
            .into_iter()
            .map(|p| p.month)
            .collect();
        assert_eq!(labels, vec!["Jan", "Apr", "Jul"]);
    }

    #[test]
    fn test_expense_rollup_groups_and_sorts() {
        let today = date(2025, 6, 1);
        let set = vec![
            tx_in_category(dec!(-30), today, "Food"),
            tx_in_category(dec!(-70), today, "Rent"),
            tx_in_category(dec!(-20), today, "Food"),
            tx(dec!(-5), today),
            tx(dec!(1000), today),
        ];
        let rollup = expense_rollup(&set);
        assert_eq!(rollup.len(), 3);
        assert_eq!(rollup[0].category, "Rent");
        assert_eq!(rollup[0].total, dec!(70));
        assert_eq!(rollup[1].category, "Food");
        assert_eq!(rollup[1].total, dec!(50));
        assert_eq!(rollup[2].category, "Uncategorized");
        assert_eq!(rollup[2].total, dec!(5));
    }

    #[test]
    fn test_expense_rollup_total_matches_sum() {
        let today = date(2025, 6, 1);
        let set = vec![
            tx_in_category(dec!(-10.10), today, "Food"),
            tx_in_category(dec!(-20.20), today, "Food"),
        ];
        let rollup = expense_rollup(&set);
        assert_eq!(rollup[0].total, dec!(30.30));
    }

    #[test]
    fn test_rounding_only_at_display() {
        let today = date(2025, 6, 1);
        let current = vec![tx(dec!(3), today), tx(dec!(-1), today)];
        let previous = vec![tx(dec!(3), date(2025, 5, 1))];
        let summary = financial_summary(&current, &previous);
        // 2/3 of income saved: exact value keeps full precision
        assert!(summary.savings_rate > dec!(66.66));
        assert!(summary.savings_rate < dec!(66.67));
        assert_eq!(summary.rounded().savings_rate, dec!(66.67));
    }
}
