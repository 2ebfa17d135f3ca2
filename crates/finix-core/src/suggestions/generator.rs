//! Suggestion generation pipeline
//!
//! analyze → project → build prompt → call model → parse, with the rule-based
//! suggestions taking over whenever the model path cannot produce a valid batch.
//! Model failures never reach the caller; they are logged with the stage that
//! failed. Travel option queries take the same model path with their own
//! prompt and fall back to a placeholder list.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;

use tracing::{debug, info, warn};

use crate::ai::parsing::{parse_suggestions, parse_travel_suggestions};
use crate::ai::{AIBackend, AIClient, CompletionRequest};
use crate::analysis::{analyze_transactions, SpendingAnalysis};
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::models::{Suggestion, SuggestionResponse, SuggestionSource, Transaction, TravelGoal};
use crate::projection::{project_savings, SavingsMetrics};
use crate::prompts::{PromptId, SuggestionPrompt};
use crate::store::FinanceStore;
use crate::travel::{
    placeholder_travel_suggestions, validate_travel_request, TravelSuggestion,
    TravelSuggestionResponse,
};

use super::assembler::assemble_response;
use super::fallback::fallback_suggestions;

/// Step of the model path, reported when it fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    CallingModel,
    ParsingResponse,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::CallingModel => "calling_model",
            Stage::ParsingResponse => "parsing_response",
        };
        write!(f, "{}", name)
    }
}

/// Generates savings suggestions for a travel goal
///
/// Immutable once built; clone it freely across requests.
#[derive(Clone)]
pub struct SuggestionGenerator {
    ai: Option<AIClient>,
    config: GeneratorConfig,
    prompt: SuggestionPrompt,
    travel_prompt: SuggestionPrompt,
}

impl SuggestionGenerator {
    /// Create a generator; `None` runs in offline mode
    pub fn new(ai: Option<AIClient>, config: GeneratorConfig) -> Self {
        Self {
            ai,
            config,
            prompt: SuggestionPrompt::embedded(),
            travel_prompt: SuggestionPrompt::embedded_for(PromptId::TravelSuggestions),
        }
    }

    /// Generator that never calls a model
    pub fn offline() -> Self {
        Self::new(None, GeneratorConfig::default())
    }

    /// Build from the environment, config override and prompt override
    pub fn from_env() -> Result<Self> {
        let config = GeneratorConfig::load()?;
        let prompt = SuggestionPrompt::load()?;
        let travel_prompt = SuggestionPrompt::load_for(PromptId::TravelSuggestions)?;
        Ok(Self::new(AIClient::from_env(), config)
            .with_prompt(prompt)
            .with_travel_prompt(travel_prompt))
    }

    /// Use a different savings prompt template
    pub fn with_prompt(mut self, prompt: SuggestionPrompt) -> Self {
        self.prompt = prompt;
        self
    }

    /// Use a different travel prompt template
    pub fn with_travel_prompt(mut self, prompt: SuggestionPrompt) -> Self {
        self.travel_prompt = prompt;
        self
    }

    /// The configured model client, if any
    pub fn ai(&self) -> Option<&AIClient> {
        self.ai.as_ref()
    }

    pub fn is_offline(&self) -> bool {
        self.ai.is_none()
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the whole pipeline
    ///
    /// Model failures fall back to rule-based suggestions and never reach the
    /// caller; only unusable input (totals that overflow) is an error.
    pub async fn generate(
        &self,
        user_id: Option<i64>,
        transactions: &[Transaction],
        goal: &TravelGoal,
    ) -> Result<SuggestionResponse> {
        let analysis = analyze_transactions(transactions, goal)?;
        let metrics = project_savings(&analysis, goal);
        debug!(
            transactions = analysis.transaction_count,
            months = analysis.monthly_totals.len(),
            "Spending analyzed"
        );

        let (suggestions, source) = self.suggestions(&analysis, goal, &metrics).await;
        info!(goal = %goal.name, source = %source, count = suggestions.len(), "Suggestions generated");

        Ok(assemble_response(
            user_id,
            goal,
            &analysis,
            &metrics,
            suggestions,
            source,
        ))
    }

    /// Load a user's transactions and goal from the store, then generate
    ///
    /// Fails with [`Error::NotFound`] when the user has no goal.
    pub async fn generate_for_user(
        &self,
        store: &dyn FinanceStore,
        user_id: i64,
    ) -> Result<SuggestionResponse> {
        let goal = store
            .goal_for(user_id)?
            .ok_or_else(|| Error::NotFound(format!("No travel goal found for user {}", user_id)))?;
        let transactions = store.transactions_for(user_id)?;

        self.generate(Some(user_id), &transactions, &goal).await
    }

    /// Travel options for a destination within per-category budgets
    ///
    /// Fails with [`Error::InvalidData`] for a blank destination or a negative
    /// budget. Without a valid model answer the placeholder list is returned.
    pub async fn travel_suggestions(
        &self,
        destination: &str,
        budgets: &BTreeMap<String, Decimal>,
    ) -> Result<TravelSuggestionResponse> {
        validate_travel_request(destination, budgets)?;
        let destination = destination.trim();

        let (suggestions, source) = match &self.ai {
            None => {
                debug!("Offline mode, using placeholder travel suggestions");
                (
                    placeholder_travel_suggestions(destination, budgets),
                    SuggestionSource::Fallback,
                )
            }
            Some(client) => {
                let prompt = self.travel_prompt.build_travel(
                    destination,
                    budgets,
                    self.config.travel_suggestions,
                );
                debug!(prompt = %prompt, "Travel prompt built");

                match self.request_travel_suggestions(client, prompt).await {
                    Ok(suggestions) => (suggestions, SuggestionSource::Model),
                    Err((stage, e)) => {
                        warn!(
                            stage = %stage,
                            backend = client.kind(),
                            model = client.model(),
                            error = %e,
                            "Model travel suggestions failed, using placeholders"
                        );
                        (
                            placeholder_travel_suggestions(destination, budgets),
                            SuggestionSource::Fallback,
                        )
                    }
                }
            }
        };
        info!(destination = %destination, source = %source, count = suggestions.len(), "Travel suggestions generated");

        Ok(TravelSuggestionResponse {
            destination: destination.to_string(),
            suggestions,
            source,
        })
    }

    /// Model suggestions when possible, rule-based otherwise
    async fn suggestions(
        &self,
        analysis: &SpendingAnalysis,
        goal: &TravelGoal,
        metrics: &SavingsMetrics,
    ) -> (Vec<Suggestion>, SuggestionSource) {
        let Some(client) = &self.ai else {
            debug!("Offline mode, using rule-based suggestions");
            return (
                fallback_suggestions(analysis, goal, metrics),
                SuggestionSource::Fallback,
            );
        };

        let prompt = self.prompt.build(analysis, goal, metrics);
        debug!(prompt = %prompt, "Suggestion prompt built");

        match self.request_suggestions(client, prompt).await {
            Ok(suggestions) => (suggestions, SuggestionSource::Model),
            Err((stage, e)) => {
                warn!(
                    stage = %stage,
                    backend = client.kind(),
                    model = client.model(),
                    error = %e,
                    "Model suggestions failed, using rule-based suggestions"
                );
                (
                    fallback_suggestions(analysis, goal, metrics),
                    SuggestionSource::Fallback,
                )
            }
        }
    }

    async fn request_suggestions(
        &self,
        client: &AIClient,
        prompt: String,
    ) -> std::result::Result<Vec<Suggestion>, (Stage, Error)> {
        let text = self.complete(client, prompt).await?;

        parse_suggestions(
            &text,
            self.config.min_suggestions,
            self.config.max_suggestions,
        )
        .map_err(|e| (Stage::ParsingResponse, e))
    }

    async fn request_travel_suggestions(
        &self,
        client: &AIClient,
        prompt: String,
    ) -> std::result::Result<Vec<TravelSuggestion>, (Stage, Error)> {
        let text = self.complete(client, prompt).await?;

        parse_travel_suggestions(&text, self.config.travel_suggestions)
            .map_err(|e| (Stage::ParsingResponse, e))
    }

    /// One bounded model call
    async fn complete(
        &self,
        client: &AIClient,
        prompt: String,
    ) -> std::result::Result<String, (Stage, Error)> {
        let request = CompletionRequest::new(prompt, self.config.temperature);

        let text = tokio::time::timeout(self.config.timeout, client.complete(&request))
            .await
            .map_err(|_| (Stage::CallingModel, Error::Timeout(self.config.timeout)))?
            .map_err(|e| (Stage::CallingModel, e))?;
        debug!(response = %text, "Model response received");

        Ok(text)
    }
}
