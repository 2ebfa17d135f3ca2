//! AI backend request and status types
//!
//! These types are backend-agnostic and used across all AI implementations.

use serde::Serialize;

/// A single-turn completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// User message sent to the model
    pub prompt: String,
    /// Sampling temperature
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            temperature,
        }
    }
}

/// Backend description for status output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendInfo {
    /// Backend kind ("openai_compatible", "mock")
    pub kind: String,
    pub model: String,
    pub host: String,
}
