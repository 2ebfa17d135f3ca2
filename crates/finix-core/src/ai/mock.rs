//! Mock backend for testing
//!
//! Returns a scripted reply without any network access. Useful for unit tests
//! and for running the server or CLI without an API key (`AI_BACKEND=mock`).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::types::CompletionRequest;
use super::AIBackend;

/// Canned response: a valid three-item suggestion array in a labeled fence
pub const DEFAULT_MOCK_RESPONSE: &str = r#"```json
[
  {
    "title": "Brew Coffee at Home",
    "description": "Daily cafe visits add up quickly. Brewing at home keeps that money for your trip.",
    "potential_savings": 60.00,
    "impact": "Saves about 1 month toward your trip",
    "category": "Coffee"
  },
  {
    "title": "Pause One Streaming Service",
    "description": "Rotate subscriptions instead of paying for all of them at once.",
    "potential_savings": 15.99,
    "impact": "Adds a nice dinner abroad every few months",
    "category": "Subscriptions"
  },
  {
    "title": "Plan a Weekly Meal Prep",
    "description": "Cooking in batches cuts takeout orders and grocery waste.",
    "potential_savings": 110.00,
    "impact": "Saves about 2 months toward your trip",
    "category": "Dining"
  }
]
```"#;

#[derive(Clone)]
enum MockReply {
    Text(String),
    Fail(String),
}

/// Mock AI backend for testing
///
/// Returns a predictable response for every request. Clones share the call counter.
#[derive(Clone)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
    reply: MockReply,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self {
            healthy: true,
            reply: MockReply::Text(DEFAULT_MOCK_RESPONSE.to_string()),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create an unhealthy mock backend
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            ..Self::new()
        }
    }

    /// Reply with `text` instead of the canned response
    pub fn with_response(text: &str) -> Self {
        Self {
            reply: MockReply::Text(text.to_string()),
            ..Self::new()
        }
    }

    /// Fail every request with a backend error
    pub fn failing(message: &str) -> Self {
        Self {
            reply: MockReply::Fail(message.to_string()),
            ..Self::new()
        }
    }

    /// Wait `delay` before replying
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Create a new instance with a different model (no-op for mock)
    pub fn with_model(&self, _model: &str) -> Self {
        self.clone()
    }

    /// Number of completed or attempted requests
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AIBackend for MockBackend {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Fail(message) => Err(Error::Backend(message.clone())),
        }
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
