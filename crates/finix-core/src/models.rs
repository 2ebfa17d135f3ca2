//! Data models for Finix
//!
//! Transactions and travel goals are owned by the external store and are
//! read-only here. Suggestions and the final response are built fresh for
//! every request.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Currency used when a record does not carry one
pub const DEFAULT_CURRENCY: &str = "USD";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// A user account (only used by the store collaborator)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// ISO 4217 code; stored, never converted
    #[serde(default = "default_currency")]
    pub home_currency: String,
}

/// A spending transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Always positive
    pub amount: Decimal,
    /// Raw category label, e.g. "Food" or "Entertainment"
    pub category: String,
    /// ISO 4217 code, upper-cased
    #[serde(default = "default_currency")]
    pub currency: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
}

impl Transaction {
    /// Create a transaction in the default currency
    pub fn new(amount: Decimal, category: &str, date: NaiveDate) -> Self {
        Self {
            amount,
            category: category.to_string(),
            currency: default_currency(),
            date,
            description: None,
        }
    }

    /// Set the currency code (normalized to upper case)
    pub fn with_currency(mut self, currency: &str) -> Self {
        self.currency = currency.trim().to_uppercase();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Normalize fields that arrive raw from JSON (currency case)
    pub fn normalized(self) -> Self {
        let currency = self.currency.clone();
        self.with_currency(&currency)
    }

    /// Check the record invariants before it enters the pipeline
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::InvalidData(format!(
                "Transaction amount must be positive, got {}",
                self.amount
            )));
        }
        if self.category.trim().is_empty() {
            return Err(Error::InvalidData(
                "Transaction category must not be empty".into(),
            ));
        }
        validate_currency(&self.currency)
    }
}

/// A savings target for a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelGoal {
    pub name: String,
    pub target_amount: Decimal,
    /// May exceed `target_amount`; never clamped
    #[serde(default)]
    pub current_saved: Decimal,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub destination: Option<String>,
}

impl TravelGoal {
    pub fn new(name: &str, target_amount: Decimal, current_saved: Decimal) -> Self {
        Self {
            name: name.to_string(),
            target_amount,
            current_saved,
            target_date: None,
            destination: None,
        }
    }

    pub fn with_destination(mut self, destination: &str) -> Self {
        self.destination = Some(destination.to_string());
        self
    }

    pub fn with_target_date(mut self, target_date: NaiveDate) -> Self {
        self.target_date = Some(target_date);
        self
    }

    /// Amount still to save (negative when the goal is already exceeded)
    pub fn remaining_amount(&self) -> Decimal {
        self.target_amount - self.current_saved
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidData("Goal name must not be empty".into()));
        }
        if self.target_amount <= Decimal::ZERO {
            return Err(Error::InvalidData(format!(
                "Goal target amount must be positive, got {}",
                self.target_amount
            )));
        }
        if self.current_saved < Decimal::ZERO {
            return Err(Error::InvalidData(format!(
                "Goal current savings must not be negative, got {}",
                self.current_saved
            )));
        }
        Ok(())
    }
}

fn validate_currency(code: &str) -> Result<()> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(Error::InvalidData(format!(
            "Currency must be a 3-letter code, got {:?}",
            code
        )))
    }
}

/// A single savings suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub description: String,
    /// Estimated monthly savings, never negative
    pub potential_savings: Decimal,
    /// Effect on the trip timeline, in words
    pub impact: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Where the suggestion list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    /// Parsed from the language model response
    Model,
    /// Rule-based suggestions (offline mode or model failure)
    Fallback,
}

impl SuggestionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionSource::Model => "model",
            SuggestionSource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for SuggestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SuggestionSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "model" => Ok(SuggestionSource::Model),
            "fallback" => Ok(SuggestionSource::Fallback),
            _ => Err(format!("Unknown suggestion source: {}", s)),
        }
    }
}

/// Final result of suggestion generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    /// Store identity, absent for stateless requests
    pub user_id: Option<i64>,
    pub travel_goal_name: String,
    pub destination: Option<String>,
    pub target_amount: Decimal,
    pub current_saved: Decimal,
    pub remaining_amount: Decimal,
    pub average_monthly_spending: Decimal,
    pub non_essential_spending: Decimal,
    pub total_spending: Decimal,
    pub transaction_count: usize,
    pub current_monthly_savings: Decimal,
    pub months_to_goal_current: Option<Decimal>,
    pub months_to_goal_optimized: Option<Decimal>,
    pub category_breakdown: BTreeMap<String, Decimal>,
    pub suggestions: Vec<Suggestion>,
    pub source: SuggestionSource,
    pub generated_at: DateTime<Utc>,
}

/// Flat summary of a transaction list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub total_transactions: usize,
    pub total_amount: Decimal,
    /// Mean amount per transaction (zero when empty)
    pub average_amount: Decimal,
    pub categories: BTreeMap<String, Decimal>,
}
