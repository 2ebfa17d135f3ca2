//! Rule-based suggestions
//!
//! Used in offline mode and whenever the model call or its response fails.
//! The output depends only on the inputs: no clock, no randomness.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::analysis::SpendingAnalysis;
use crate::format::{format_currency, format_months};
use crate::models::{Suggestion, TravelGoal};
use crate::projection::SavingsMetrics;

/// Category named when there is no spending to look at
pub const DEFAULT_TOP_CATEGORY: &str = "Entertainment";

/// Share of non-essential spending the first suggestion claims
pub const FALLBACK_SAVINGS_RATE: Decimal = dec!(0.15);

const SUBSCRIPTION_SAVINGS: Decimal = dec!(75.00);
const MEAL_PREP_SAVINGS: Decimal = dec!(125.00);

/// Build the three fixed suggestions for a goal
pub fn fallback_suggestions(
    analysis: &SpendingAnalysis,
    goal: &TravelGoal,
    metrics: &SavingsMetrics,
) -> Vec<Suggestion> {
    let top_category = analysis.top_category().unwrap_or(DEFAULT_TOP_CATEGORY);
    let savings = analysis.non_essential_spending * FALLBACK_SAVINGS_RATE;

    let destination = goal
        .destination
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or("your destination");

    vec![
        Suggestion {
            title: format!("Reduce {} Spending", top_category),
            description: format!(
                "Based on your spending patterns, reducing {} expenses by 30% could save you {} per month. \
                 This directly accelerates your timeline to {}.",
                top_category,
                format_currency(savings),
                goal.name
            ),
            potential_savings: savings,
            impact: timeline_impact(metrics),
            category: Some(top_category.to_string()),
        },
        Suggestion {
            title: "Review Subscriptions".to_string(),
            description: "Identify and cancel unused subscriptions. The average person has $50-100 \
                          in forgotten monthly subscriptions that could be redirected toward your travel fund."
                .to_string(),
            potential_savings: SUBSCRIPTION_SAVINGS,
            impact: "Every $75 saved monthly brings your trip 1 month closer".to_string(),
            category: Some("Subscriptions".to_string()),
        },
        Suggestion {
            title: "Meal Prep Instead of Dining Out".to_string(),
            description: format!(
                "Cooking at home 2 more times per week can save $100-150 monthly. \
                 This savings directly funds more experiences at {}.",
                destination
            ),
            potential_savings: MEAL_PREP_SAVINGS,
            impact: "Accelerates your savings by 15-20%".to_string(),
            category: Some("Food".to_string()),
        },
    ]
}

/// Timeline difference between the two scenarios, in words
fn timeline_impact(metrics: &SavingsMetrics) -> String {
    match (metrics.months_to_goal_current, metrics.months_to_goal_optimized) {
        (Some(current), Some(optimized)) if !current.is_zero() && !optimized.is_zero() => format!(
            "Saves approximately {} months toward your trip",
            format_months(optimized - current)
        ),
        _ => "Accelerates your savings timeline".to_string(),
    }
}
