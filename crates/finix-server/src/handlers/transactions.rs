//! Transaction summary handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;

use super::suggestions::validate_transactions;
use crate::{AppError, AppState};
use finix_core::{summarize_transactions, Transaction, TransactionSummary};

/// Stateless summary request
#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// POST /api/transactions/summary - Summarize transactions in the request body
pub async fn summarize(
    body: Result<Json<SummaryRequest>, JsonRejection>,
) -> Result<Json<TransactionSummary>, AppError> {
    let Json(request) = body.map_err(|e| AppError::bad_request(&e.body_text()))?;
    let transactions = validate_transactions(request.transactions)?;

    let summary = summarize_transactions(&transactions).map_err(AppError::from_core)?;
    Ok(Json(summary))
}

/// GET /api/transactions/:user_id/summary - Summarize a user's stored transactions
pub async fn get_user_summary(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<TransactionSummary>, AppError> {
    if state.store.user(user_id)?.is_none() {
        return Err(AppError::not_found(&format!(
            "User with ID {} not found",
            user_id
        )));
    }

    let transactions = state.store.transactions_for(user_id)?;
    let summary = summarize_transactions(&transactions).map_err(AppError::from_core)?;
    Ok(Json(summary))
}
