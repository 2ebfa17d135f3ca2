//! Travel option handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{AppError, AppState};
use finix_core::TravelSuggestionResponse;

/// Travel options request
#[derive(Debug, Deserialize)]
pub struct TravelRequest {
    #[serde(default)]
    pub destination: String,
    /// Budget per category, keyed like "Accommodation" or "flight"
    #[serde(default)]
    pub budgets: BTreeMap<String, Decimal>,
}

/// POST /api/travel/suggestions - Options for a destination within budgets
pub async fn travel_suggestions(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TravelRequest>, JsonRejection>,
) -> Result<Json<TravelSuggestionResponse>, AppError> {
    let Json(request) = body.map_err(|e| AppError::bad_request(&e.body_text()))?;

    let response = state
        .generator
        .travel_suggestions(&request.destination, &request.budgets)
        .await
        .map_err(AppError::from_core)?;

    Ok(Json(response))
}
