//! Health check handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppState, SERVICE_NAME};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    /// Backend kind, or "offline" when suggestions are rule-based only
    pub ai_backend: &'static str,
}

/// GET /api/health - Verify the API is running
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        ai_backend: state.generator.ai().map(|c| c.kind()).unwrap_or("offline"),
    })
}
