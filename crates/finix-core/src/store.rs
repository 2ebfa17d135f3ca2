//! Read access to users, transactions and travel goals
//!
//! The pipeline only reads from a store. `MemoryStore` is the bundled
//! implementation, loadable from a JSON dataset:
//!
//! ```json
//! {"users": [{"id": 1, "username": "alex", "home_currency": "USD",
//!             "transactions": [{"amount": 42.5, "category": "Dining", "date": "2024-01-05"}],
//!             "travel_goal": {"name": "Tokyo", "target_amount": 4000, "current_saved": 500}}]}
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{Transaction, TravelGoal, User, DEFAULT_CURRENCY};

/// Read-only store of the records the pipeline consumes
pub trait FinanceStore: Send + Sync {
    /// Look up a user
    fn user(&self, user_id: i64) -> Result<Option<User>>;

    /// All transactions of a user, in any order (empty for unknown users)
    fn transactions_for(&self, user_id: i64) -> Result<Vec<Transaction>>;

    /// The user's travel goal, if one is set
    fn goal_for(&self, user_id: i64) -> Result<Option<TravelGoal>>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: BTreeMap<i64, User>,
    transactions: HashMap<i64, Vec<Transaction>>,
    goals: HashMap<i64, TravelGoal>,
}

#[derive(Debug, Deserialize)]
struct Dataset {
    #[serde(default)]
    users: Vec<DatasetUser>,
}

#[derive(Debug, Deserialize)]
struct DatasetUser {
    id: i64,
    username: String,
    #[serde(default)]
    home_currency: Option<String>,
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(default)]
    travel_goal: Option<TravelGoal>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON dataset, validating every record
    pub fn from_json(json: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(json)?;
        let mut store = Self::new();

        for entry in dataset.users {
            if store.users.contains_key(&entry.id) {
                return Err(Error::InvalidData(format!("Duplicate user id {}", entry.id)));
            }

            let mut transactions = Vec::with_capacity(entry.transactions.len());
            for tx in entry.transactions {
                let tx = tx.normalized();
                tx.validate().map_err(|e| {
                    Error::InvalidData(format!("User {}: {}", entry.id, e))
                })?;
                transactions.push(tx);
            }

            store.add_user(User {
                id: entry.id,
                username: entry.username,
                home_currency: entry
                    .home_currency
                    .map(|c| c.trim().to_uppercase())
                    .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            });
            store.add_transactions(entry.id, transactions);

            if let Some(goal) = entry.travel_goal {
                goal.validate()
                    .map_err(|e| Error::InvalidData(format!("User {}: {}", entry.id, e)))?;
                store.set_goal(entry.id, goal);
            }
        }

        tracing::debug!(users = store.users.len(), "Loaded dataset");
        Ok(store)
    }

    /// Load a JSON dataset file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn add_user(&mut self, user: User) {
        self.users.insert(user.id, user);
    }

    pub fn add_transactions(&mut self, user_id: i64, transactions: Vec<Transaction>) {
        self.transactions
            .entry(user_id)
            .or_default()
            .extend(transactions);
    }

    pub fn set_goal(&mut self, user_id: i64, goal: TravelGoal) {
        self.goals.insert(user_id, goal);
    }

    /// All users, by id
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }
}

impl FinanceStore for MemoryStore {
    fn user(&self, user_id: i64) -> Result<Option<User>> {
        Ok(self.users.get(&user_id).cloned())
    }

    fn transactions_for(&self, user_id: i64) -> Result<Vec<Transaction>> {
        Ok(self
            .transactions
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    fn goal_for(&self, user_id: i64) -> Result<Option<TravelGoal>> {
        Ok(self.goals.get(&user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const DATASET: &str = r#"{
        "users": [
            {
                "id": 1,
                "username": "alex",
                "home_currency": "usd",
                "transactions": [
                    {"amount": 100, "category": "Food", "date": "2024-01-05"},
                    {"amount": "50.25", "category": "Entertainment", "currency": "eur", "date": "2024-01-10"}
                ],
                "travel_goal": {"name": "Tokyo", "target_amount": 4000, "current_saved": 500, "destination": "Japan"}
            },
            {"id": 2, "username": "sam"}
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let store = MemoryStore::from_json(DATASET).unwrap();

        let alex = store.user(1).unwrap().unwrap();
        assert_eq!(alex.home_currency, "USD");

        let transactions = store.transactions_for(1).unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[1].amount, dec!(50.25));
        assert_eq!(transactions[1].currency, "EUR");

        let goal = store.goal_for(1).unwrap().unwrap();
        assert_eq!(goal.remaining_amount(), dec!(3500));
    }

    #[test]
    fn test_user_without_goal_or_transactions() {
        let store = MemoryStore::from_json(DATASET).unwrap();
        assert!(store.goal_for(2).unwrap().is_none());
        assert!(store.transactions_for(2).unwrap().is_empty());
        assert!(store.user(99).unwrap().is_none());
        assert_eq!(store.users().count(), 2);
    }

    #[test]
    fn test_invalid_records_rejected() {
        let negative = r#"{"users": [{"id": 1, "username": "a",
            "transactions": [{"amount": -5, "category": "Food", "date": "2024-01-05"}]}]}"#;
        assert!(matches!(
            MemoryStore::from_json(negative),
            Err(Error::InvalidData(_))
        ));

        let duplicate = r#"{"users": [{"id": 1, "username": "a"}, {"id": 1, "username": "b"}]}"#;
        assert!(MemoryStore::from_json(duplicate).is_err());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finix.json");
        fs::write(&path, DATASET).unwrap();
        assert_eq!(MemoryStore::load(&path).unwrap().users().count(), 2);
    }
}
