//! Suggestions for a user in the dataset

use std::path::Path;

use anyhow::{bail, Result};
use finix_core::FinanceStore;

use super::{build_generator, open_store, print_suggestions};

pub async fn cmd_suggest(data_path: &Path, user_id: i64, offline: bool, json: bool) -> Result<()> {
    let store = open_store(data_path)?;
    let Some(user) = store.user(user_id)? else {
        bail!("User with ID {} not found in {}", user_id, data_path.display());
    };

    let generator = build_generator(offline)?;
    if !json {
        println!("🔍 Analyzing spending for {}...", user.username);
    }

    let response = generator.generate_for_user(&store, user_id).await?;
    print_suggestions(&response, json)
}
