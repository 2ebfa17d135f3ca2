//! Status command implementation

use std::path::Path;

use anyhow::Result;
use finix_core::ai::AIBackend;
use finix_core::config::default_config_path;
use finix_core::prompts::default_prompts_dir;
use finix_core::{FinanceStore, MemoryStore, PromptId, SuggestionPrompt};

use super::build_generator;

pub async fn cmd_status(data_path: &Path, offline: bool) -> Result<()> {
    println!();
    println!("📊 Finix Status");
    println!("   ─────────────────────────────────────────────────────────────");

    // Dataset
    println!("   Dataset: {}", data_path.display());
    if data_path.exists() {
        match MemoryStore::load(data_path) {
            Ok(store) => print_dataset_stats(&store),
            Err(e) => println!("   ❌ Error loading dataset: {}", e),
        }
    } else {
        println!("   Users: (dataset not found)");
    }

    // Model backend
    println!();
    let generator = match build_generator(offline) {
        Ok(generator) => generator,
        Err(e) => {
            println!("   ❌ {:#}", e);
            println!();
            return Ok(());
        }
    };
    match generator.ai() {
        None if offline => println!("   🤖 Model: disabled (--offline)"),
        None => {
            println!("   🤖 Model: not configured (rule-based suggestions)");
            println!("      Set GROQ_API_KEY or OPENAI_COMPATIBLE_HOST to enable");
        }
        Some(client) => {
            println!(
                "   🤖 Model: {} via {} ({})",
                client.model(),
                client.host(),
                client.kind()
            );
            if client.health_check().await {
                println!("      ✅ Reachable");
            } else {
                println!("      ⚠️  Not responding, suggestions will fall back");
            }
        }
    }

    // Generation settings
    let config = generator.config();
    println!(
        "   Temperature: {}  Timeout: {}s  Suggestions: {}-{}  Travel options: {}",
        config.temperature,
        config.timeout.as_secs(),
        config.min_suggestions,
        config.max_suggestions,
        config.travel_suggestions
    );
    match default_config_path() {
        Some(path) if path.exists() => println!("   Config: override {}", path.display()),
        _ => println!("   Config: embedded defaults"),
    }

    for (label, id) in [
        ("Prompt", PromptId::SavingsSuggestions),
        ("Travel prompt", PromptId::TravelSuggestions),
    ] {
        print_prompt_status(label, id);
    }
    if let Some(dir) = default_prompts_dir() {
        println!("   Prompt override directory: {}", dir.display());
    }

    println!();
    Ok(())
}

fn print_prompt_status(label: &str, id: PromptId) {
    match SuggestionPrompt::load_for(id) {
        Ok(prompt) => match &prompt.override_path {
            Some(path) => println!(
                "   {}: v{} (override {})",
                label,
                prompt.metadata.version,
                path.display()
            ),
            None => println!("   {}: v{} (default)", label, prompt.metadata.version),
        },
        Err(e) => println!("   ❌ {} override invalid: {}", label, e),
    }
}

fn print_dataset_stats(store: &MemoryStore) {
    let mut users = 0;
    let mut transactions = 0;
    let mut goals = 0;

    for user in store.users() {
        users += 1;
        transactions += store
            .transactions_for(user.id)
            .map(|t| t.len())
            .unwrap_or_default();
        if matches!(store.goal_for(user.id), Ok(Some(_))) {
            goals += 1;
        }
    }

    println!("   Users: {}", users);
    println!("   Transactions: {}", transactions);
    println!("   Travel goals: {}", goals);
}
