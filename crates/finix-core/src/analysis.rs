//! Spending analysis
//!
//! Aggregates a user's transactions into the monthly and per-category
//! statistics the savings projection and the prompt are built from.
//! All sums use exact decimal arithmetic; nothing is rounded here.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Transaction, TransactionSummary, TravelGoal};

/// Categories treated as necessary spending (exact, case-sensitive match)
pub const ESSENTIAL_CATEGORIES: [&str; 9] = [
    "Food",
    "Groceries",
    "Utilities",
    "Rent",
    "Transport",
    "Transportation",
    "Healthcare",
    "Bills",
    "Insurance",
];

/// Whether a raw category label is on the essential allowlist
pub fn is_essential(category: &str) -> bool {
    ESSENTIAL_CATEGORIES.contains(&category)
}

/// Spending total for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// "YYYY-MM"
    pub month: String,
    pub total: Decimal,
}

/// Aggregate statistics over a set of transactions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpendingAnalysis {
    /// Mean of the per-month totals (months without transactions are skipped)
    pub average_monthly_spending: Decimal,
    /// Spending outside the essential categories
    pub non_essential_spending: Decimal,
    pub category_breakdown: BTreeMap<String, Decimal>,
    pub total_spending: Decimal,
    pub transaction_count: usize,
    /// Ascending by month
    pub monthly_totals: Vec<MonthlyTotal>,
}

impl SpendingAnalysis {
    /// Categories sorted by total spend, highest first (ties by name)
    pub fn top_categories(&self, limit: usize) -> Vec<(&str, Decimal)> {
        let mut categories: Vec<(&str, Decimal)> = self
            .category_breakdown
            .iter()
            .map(|(name, total)| (name.as_str(), *total))
            .collect();
        categories.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        categories.truncate(limit);
        categories
    }

    /// Highest-spend category; the alphabetically first one wins a tie
    pub fn top_category(&self) -> Option<&str> {
        self.top_categories(1).first().map(|(name, _)| *name)
    }
}

/// Analyze transactions for a goal
///
/// The goal is accepted for context only; none of the figures depend on it.
/// Fails with [`Error::InvalidData`] if a running total would overflow.
pub fn analyze_transactions(
    transactions: &[Transaction],
    _goal: &TravelGoal,
) -> Result<SpendingAnalysis> {
    if transactions.is_empty() {
        return Ok(SpendingAnalysis::default());
    }

    let mut by_month: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    let mut category_breakdown: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut total_spending = Decimal::ZERO;
    let mut non_essential_spending = Decimal::ZERO;

    for tx in transactions {
        accumulate(
            by_month
                .entry((tx.date.year(), tx.date.month()))
                .or_insert(Decimal::ZERO),
            tx.amount,
        )?;
        accumulate(
            category_breakdown
                .entry(tx.category.clone())
                .or_insert(Decimal::ZERO),
            tx.amount,
        )?;
        accumulate(&mut total_spending, tx.amount)?;
        if !is_essential(&tx.category) {
            accumulate(&mut non_essential_spending, tx.amount)?;
        }
    }

    // The monthly totals partition the overall total
    let average_monthly_spending = total_spending / Decimal::from(by_month.len());

    let monthly_totals = by_month
        .into_iter()
        .map(|((year, month), total)| MonthlyTotal {
            month: format!("{:04}-{:02}", year, month),
            total,
        })
        .collect();

    Ok(SpendingAnalysis {
        average_monthly_spending,
        non_essential_spending,
        category_breakdown,
        total_spending,
        transaction_count: transactions.len(),
        monthly_totals,
    })
}

/// Summarize transactions without any goal context
pub fn summarize_transactions(transactions: &[Transaction]) -> Result<TransactionSummary> {
    let mut categories: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut total_amount = Decimal::ZERO;

    for tx in transactions {
        accumulate(
            categories
                .entry(tx.category.clone())
                .or_insert(Decimal::ZERO),
            tx.amount,
        )?;
        accumulate(&mut total_amount, tx.amount)?;
    }

    let average_amount = if transactions.is_empty() {
        Decimal::ZERO
    } else {
        total_amount / Decimal::from(transactions.len())
    };

    Ok(TransactionSummary {
        total_transactions: transactions.len(),
        total_amount,
        average_amount,
        categories,
    })
}

fn accumulate(total: &mut Decimal, amount: Decimal) -> Result<()> {
    *total = total
        .checked_add(amount)
        .ok_or_else(|| Error::InvalidData(format!("Spending total overflows adding {}", amount)))?;
    Ok(())
}
