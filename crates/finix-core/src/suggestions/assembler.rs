//! Response assembly

use chrono::{DateTime, Utc};

use crate::analysis::SpendingAnalysis;
use crate::models::{Suggestion, SuggestionResponse, SuggestionSource, TravelGoal};
use crate::projection::SavingsMetrics;

/// Package the pipeline outputs into the final response, stamped now
pub fn assemble_response(
    user_id: Option<i64>,
    goal: &TravelGoal,
    analysis: &SpendingAnalysis,
    metrics: &SavingsMetrics,
    suggestions: Vec<Suggestion>,
    source: SuggestionSource,
) -> SuggestionResponse {
    assemble_response_at(user_id, goal, analysis, metrics, suggestions, source, Utc::now())
}

/// Same as [`assemble_response`] with an explicit timestamp
pub fn assemble_response_at(
    user_id: Option<i64>,
    goal: &TravelGoal,
    analysis: &SpendingAnalysis,
    metrics: &SavingsMetrics,
    suggestions: Vec<Suggestion>,
    source: SuggestionSource,
    generated_at: DateTime<Utc>,
) -> SuggestionResponse {
    SuggestionResponse {
        user_id,
        travel_goal_name: goal.name.clone(),
        destination: goal.destination.clone(),
        target_amount: goal.target_amount,
        current_saved: goal.current_saved,
        remaining_amount: metrics.remaining_amount,
        average_monthly_spending: analysis.average_monthly_spending,
        non_essential_spending: analysis.non_essential_spending,
        total_spending: analysis.total_spending,
        transaction_count: analysis.transaction_count,
        current_monthly_savings: metrics.current_monthly_savings,
        months_to_goal_current: metrics.months_to_goal_current,
        months_to_goal_optimized: metrics.months_to_goal_optimized,
        category_breakdown: analysis.category_breakdown.clone(),
        suggestions,
        source,
        generated_at,
    }
}
