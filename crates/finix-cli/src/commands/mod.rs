//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `calculate` - Suggestions from a CSV file and a travel goal
//! - `report` - Shared suggestion and summary output
//! - `serve` - Web server command
//! - `status` - Dataset, backend and override status
//! - `suggest` - Suggestions for a dataset user
//! - `summary` - Transaction summaries
//! - `travel` - Travel options for a destination

pub mod calculate;
pub mod report;
pub mod serve;
pub mod status;
pub mod suggest;
pub mod summary;
pub mod travel;

// Re-export command functions for main.rs
pub use calculate::*;
pub use report::*;
pub use serve::*;
pub use status::*;
pub use suggest::*;
pub use summary::*;
pub use travel::*;

use std::path::Path;

use anyhow::{Context, Result};
use finix_core::{GeneratorConfig, MemoryStore, SuggestionGenerator};

/// Load the JSON dataset
pub fn open_store(data_path: &Path) -> Result<MemoryStore> {
    MemoryStore::load(data_path)
        .with_context(|| format!("Failed to load dataset {}", data_path.display()))
}

/// Build the suggestion generator, honoring --offline
pub fn build_generator(offline: bool) -> Result<SuggestionGenerator> {
    if offline {
        let config = GeneratorConfig::load().context("Failed to load generator config")?;
        return Ok(SuggestionGenerator::new(None, config));
    }
    SuggestionGenerator::from_env().context("Failed to load generator config or prompt")
}

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
