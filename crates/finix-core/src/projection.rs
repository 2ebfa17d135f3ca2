//! Savings timeline projection
//!
//! Two scenarios are modeled: the current pace (a fixed share of average
//! monthly spending is saved) and an optimized pace (half of non-essential
//! spending is cut on top of that). A timeline that cannot be computed is
//! `None`, never an error.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::analysis::SpendingAnalysis;
use crate::models::TravelGoal;

/// Share of average monthly spending assumed to be saved
pub const CURRENT_SAVINGS_RATE: Decimal = dec!(0.20);

/// Share of non-essential spending assumed to be cut in the optimized scenario
pub const NON_ESSENTIAL_CUT_RATE: Decimal = dec!(0.50);

/// Projected savings figures for a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsMetrics {
    /// `target_amount - current_saved`, may be zero or negative
    pub remaining_amount: Decimal,
    pub months_to_goal_current: Option<Decimal>,
    pub months_to_goal_optimized: Option<Decimal>,
    pub current_monthly_savings: Decimal,
}

/// Project how long the goal takes under both scenarios
pub fn project_savings(analysis: &SpendingAnalysis, goal: &TravelGoal) -> SavingsMetrics {
    let remaining_amount = goal.remaining_amount();

    let current_monthly_savings = if analysis.average_monthly_spending > Decimal::ZERO {
        analysis.average_monthly_spending * CURRENT_SAVINGS_RATE
    } else {
        Decimal::ZERO
    };

    let months_to_goal_current = months_at_rate(remaining_amount, current_monthly_savings);

    let months_to_goal_optimized = if analysis.non_essential_spending > Decimal::ZERO {
        let potential_cut = analysis.non_essential_spending * NON_ESSENTIAL_CUT_RATE;
        months_at_rate(remaining_amount, current_monthly_savings + potential_cut)
    } else {
        months_to_goal_current
    };

    SavingsMetrics {
        remaining_amount,
        months_to_goal_current,
        months_to_goal_optimized,
        current_monthly_savings,
    }
}

/// Months needed to save `remaining` at `monthly_savings` per month
///
/// `None` for a non-positive rate or when the quotient overflows.
fn months_at_rate(remaining: Decimal, monthly_savings: Decimal) -> Option<Decimal> {
    if monthly_savings <= Decimal::ZERO {
        return None;
    }
    remaining.checked_div(monthly_savings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn analysis(average: Decimal, non_essential: Decimal) -> SpendingAnalysis {
        SpendingAnalysis {
            average_monthly_spending: average,
            non_essential_spending: non_essential,
            category_breakdown: BTreeMap::new(),
            total_spending: average,
            transaction_count: 1,
            monthly_totals: Vec::new(),
        }
    }

    #[test]
    fn test_remaining_is_target_minus_saved() {
        let goal = TravelGoal::new("Trip", dec!(1000), dec!(100));
        let metrics = project_savings(&analysis(dec!(175), dec!(50)), &goal);
        assert_eq!(metrics.remaining_amount, dec!(900));
    }

    #[test]
    fn test_remaining_negative_when_goal_exceeded() {
        let goal = TravelGoal::new("Trip", dec!(1000), dec!(1250));
        let metrics = project_savings(&analysis(dec!(100), dec!(0)), &goal);
        assert_eq!(metrics.remaining_amount, dec!(-250));
        // Negative remaining still divides; nothing is clamped
        assert_eq!(metrics.months_to_goal_current, Some(dec!(-12.5)));
    }

    #[test]
    fn test_both_scenarios() {
        let goal = TravelGoal::new("Trip", dec!(1000), dec!(100));
        let metrics = project_savings(&analysis(dec!(175), dec!(50)), &goal);

        // 175 * 0.2 = 35; 900 / 35
        assert_eq!(metrics.current_monthly_savings, dec!(35));
        assert_eq!(metrics.months_to_goal_current, Some(dec!(900) / dec!(35)));
        // 35 + 25 = 60; 900 / 60 = 15
        assert_eq!(metrics.months_to_goal_optimized, Some(dec!(15)));
    }

    #[test]
    fn test_zero_average_has_no_current_timeline() {
        let goal = TravelGoal::new("Trip", dec!(1000), dec!(0));
        let metrics = project_savings(&analysis(dec!(0), dec!(0)), &goal);
        assert_eq!(metrics.current_monthly_savings, Decimal::ZERO);
        assert_eq!(metrics.months_to_goal_current, None);
        assert_eq!(metrics.months_to_goal_optimized, None);
    }

    #[test]
    fn test_zero_average_with_non_essential_has_optimized_timeline() {
        let goal = TravelGoal::new("Trip", dec!(1000), dec!(0));
        let metrics = project_savings(&analysis(dec!(0), dec!(200)), &goal);
        assert_eq!(metrics.months_to_goal_current, None);
        assert_eq!(metrics.months_to_goal_optimized, Some(dec!(10)));
    }

    #[test]
    fn test_no_non_essential_matches_current() {
        let goal = TravelGoal::new("Trip", dec!(500), dec!(0));
        let metrics = project_savings(&analysis(dec!(250), dec!(0)), &goal);
        assert_eq!(metrics.months_to_goal_current, Some(dec!(10)));
        assert_eq!(metrics.months_to_goal_optimized, metrics.months_to_goal_current);
    }
}
