//! Savings suggestion handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState};
use finix_core::{SuggestionResponse, Transaction, TravelGoal};

/// Stateless suggestion request
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    pub travel_goal: TravelGoal,
}

/// GET /api/suggestions/:user_id - Suggestions from the user's stored data
pub async fn get_suggestions(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<SuggestionResponse>, AppError> {
    if state.store.user(user_id)?.is_none() {
        return Err(AppError::not_found(&format!(
            "User with ID {} not found",
            user_id
        )));
    }

    let response = state
        .generator
        .generate_for_user(state.store.as_ref(), user_id)
        .await
        .map_err(AppError::from_core)?;

    Ok(Json(response))
}

/// POST /api/suggestions/calculate - Suggestions from data in the request body
pub async fn calculate_suggestions(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<SuggestionResponse>, AppError> {
    let Json(request) = body.map_err(|e| AppError::bad_request(&e.body_text()))?;

    let transactions = validate_transactions(request.transactions)?;
    request
        .travel_goal
        .validate()
        .map_err(AppError::from_core)?;

    let response = state
        .generator
        .generate(request.user_id, &transactions, &request.travel_goal)
        .await
        .map_err(AppError::from_core)?;

    Ok(Json(response))
}

/// Normalize and validate transactions from a request body
pub(crate) fn validate_transactions(
    transactions: Vec<Transaction>,
) -> Result<Vec<Transaction>, AppError> {
    transactions
        .into_iter()
        .enumerate()
        .map(|(index, tx)| {
            let tx = tx.normalized();
            tx.validate()
                .map_err(|e| AppError::bad_request(&format!("Transaction {}: {}", index, e)))?;
            Ok(tx)
        })
        .collect()
}
