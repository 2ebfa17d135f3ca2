//! Transaction summary command implementations

use std::path::Path;

use anyhow::{bail, Context, Result};
use finix_core::import::import_transactions_file;
use finix_core::{summarize_transactions, FinanceStore};

use super::{open_store, print_summary};

/// Summarize a transactions CSV file
pub fn cmd_summary_file(path: &Path, json: bool) -> Result<()> {
    let transactions = import_transactions_file(path)
        .with_context(|| format!("Failed to import {}", path.display()))?;
    print_summary(&summarize_transactions(&transactions)?, json)
}

/// Summarize a dataset user's transactions
pub fn cmd_summary_user(data_path: &Path, user_id: i64, json: bool) -> Result<()> {
    let store = open_store(data_path)?;
    if store.user(user_id)?.is_none() {
        bail!("User with ID {} not found in {}", user_id, data_path.display());
    }

    let transactions = store.transactions_for(user_id)?;
    print_summary(&summarize_transactions(&transactions)?, json)
}
