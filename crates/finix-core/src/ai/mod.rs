//! Pluggable language model backend abstraction
//!
//! This module provides a backend-agnostic interface for the one model call the
//! suggestion pipeline makes: a single-turn chat completion returning free text.
//!
//! # Architecture
//!
//! - `AIBackend` trait: defines the interface for all backends
//! - `AIClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `OpenAICompatibleBackend`, `MockBackend`
//!
//! There is no global client. Callers build an `Option<AIClient>` and hand it to
//! the generator; `None` is offline mode.
//!
//! # Usage
//!
//! ```rust,ignore
//! let ai = AIClient::from_env();
//! let generator = SuggestionGenerator::new(ai, GeneratorConfig::load()?);
//! ```
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_BACKEND`: Backend to use (openai_compatible, groq, openai, mock, offline).
//!   Default: openai_compatible
//! - `OPENAI_COMPATIBLE_HOST`: Server URL (default: Groq when `GROQ_API_KEY` is set)
//! - `OPENAI_COMPATIBLE_MODEL` / `GROQ_MODEL`: Model name (default: llama-3.1-70b-versatile)
//! - `OPENAI_COMPATIBLE_API_KEY` / `GROQ_API_KEY`: API key

mod mock;
mod openai_compatible;
pub mod parsing;
pub mod types;

pub use mock::MockBackend;
pub use openai_compatible::{OpenAICompatibleBackend, DEFAULT_GROQ_HOST, DEFAULT_MODEL};
pub use types::*;

use async_trait::async_trait;

use crate::error::Result;

/// Trait defining the interface for all AI backends
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait AIBackend: Send + Sync {
    /// Send one prompt and return the raw text of the first choice
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AIClient {
    /// OpenAI-compatible chat completions (Groq, OpenAI, vLLM, llama-server, ...)
    OpenAICompatible(OpenAICompatibleBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AIClient {
    /// Create an AI client from environment variables
    ///
    /// Checks `AI_BACKEND` to determine which backend to use:
    /// - `openai_compatible` (default), `groq`, `openai`: chat completions API
    /// - `mock`: canned responses, no network
    /// - `offline`, `none`: no client
    ///
    /// Returns None (offline mode) if the required environment variables are not set.
    pub fn from_env() -> Option<Self> {
        let backend =
            std::env::var("AI_BACKEND").unwrap_or_else(|_| "openai_compatible".to_string());

        let client = match backend.to_lowercase().as_str() {
            "openai_compatible" | "groq" | "openai" => {
                OpenAICompatibleBackend::from_env().map(AIClient::OpenAICompatible)
            }
            "mock" => Some(AIClient::Mock(MockBackend::new())),
            "offline" | "none" => None,
            _ => {
                tracing::warn!(backend = %backend, "Unknown AI_BACKEND, falling back to openai_compatible");
                OpenAICompatibleBackend::from_env().map(AIClient::OpenAICompatible)
            }
        };

        match &client {
            Some(c) => tracing::info!(backend = c.kind(), model = c.model(), "AI backend configured"),
            None => tracing::info!("No AI backend configured, suggestions use the rule-based fallback"),
        }

        client
    }

    /// Create a Groq backend directly
    pub fn groq(api_key: &str, model: &str) -> Self {
        AIClient::OpenAICompatible(OpenAICompatibleBackend::groq(api_key, model))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }

    /// Create a new instance with a different model
    pub fn with_model(&self, model: &str) -> Self {
        match self {
            AIClient::OpenAICompatible(b) => AIClient::OpenAICompatible(b.with_model(model)),
            AIClient::Mock(b) => AIClient::Mock(b.with_model(model)),
        }
    }

    /// Short backend name for logs and status output
    pub fn kind(&self) -> &'static str {
        match self {
            AIClient::OpenAICompatible(_) => "openai_compatible",
            AIClient::Mock(_) => "mock",
        }
    }

    /// Backend description for status output
    pub fn info(&self) -> BackendInfo {
        BackendInfo {
            kind: self.kind().to_string(),
            model: self.model().to_string(),
            host: self.host().to_string(),
        }
    }
}

// Implement AIBackend for AIClient by delegating to the inner backend
#[async_trait]
impl AIBackend for AIClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        match self {
            AIClient::OpenAICompatible(b) => b.complete(request).await,
            AIClient::Mock(b) => b.complete(request).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AIClient::OpenAICompatible(b) => b.health_check().await,
            AIClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::OpenAICompatible(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::OpenAICompatible(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client_dispatch() {
        let client = AIClient::mock();
        assert_eq!(client.kind(), "mock");
        assert!(client.health_check().await);

        let text = client
            .complete(&CompletionRequest::new("anything", 0.2))
            .await
            .unwrap();
        assert!(text.contains("potential_savings"));
    }

    #[test]
    fn test_with_model_keeps_backend_kind() {
        let client = AIClient::groq("gsk-test", DEFAULT_MODEL).with_model("llama-3.1-8b-instant");
        assert_eq!(client.kind(), "openai_compatible");
        assert_eq!(client.model(), "llama-3.1-8b-instant");
        assert_eq!(client.host(), DEFAULT_GROQ_HOST);
    }

    #[test]
    fn test_info() {
        let info = AIClient::groq("gsk-test", DEFAULT_MODEL).info();
        assert_eq!(info.kind, "openai_compatible");
        assert_eq!(info.model, DEFAULT_MODEL);
        assert_eq!(info.host, DEFAULT_GROQ_HOST);
    }
}
