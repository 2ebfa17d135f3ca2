//! Finix Core Library
//!
//! Shared functionality for the Finix travel savings advisor:
//! - Spending analysis and savings timeline projection
//! - Prompt templates for savings suggestions and travel options
//! - Pluggable language model backends (OpenAI-compatible, mock)
//! - Suggestion generator with deterministic rule-based fallback
//! - Travel options for a destination and per-category budgets
//! - Store collaborator and CSV transaction import

pub mod ai;
pub mod analysis;
pub mod config;
pub mod error;
pub mod format;
pub mod import;
pub mod models;
pub mod projection;
pub mod prompts;
pub mod store;
pub mod suggestions;
pub mod travel;

/// Test utilities including mock chat completions server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{AIBackend, AIClient, BackendInfo, CompletionRequest, MockBackend, OpenAICompatibleBackend};
pub use analysis::{analyze_transactions, summarize_transactions, MonthlyTotal, SpendingAnalysis};
pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use models::{
    Suggestion, SuggestionResponse, SuggestionSource, Transaction, TransactionSummary, TravelGoal,
    User,
};
pub use projection::{project_savings, SavingsMetrics};
pub use prompts::{build_suggestion_prompt, PromptId, SuggestionPrompt};
pub use store::{FinanceStore, MemoryStore};
pub use suggestions::{fallback_suggestions, SuggestionGenerator};
pub use travel::{
    placeholder_travel_suggestions, TravelCategory, TravelSuggestion, TravelSuggestionResponse,
};
