//! Suggestions from a transactions CSV and a travel goal

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use finix_core::import::import_transactions_file;
use finix_core::TravelGoal;
use rust_decimal::Decimal;

use super::{build_generator, print_suggestions};
use crate::cli::GoalArgs;

pub async fn cmd_calculate(
    transactions_path: &Path,
    goal_args: &GoalArgs,
    user_id: Option<i64>,
    offline: bool,
    json: bool,
) -> Result<()> {
    let goal = resolve_goal(goal_args)?;
    let transactions = import_transactions_file(transactions_path)
        .with_context(|| format!("Failed to import {}", transactions_path.display()))?;

    if !json {
        println!(
            "🔍 Analyzing {} transactions from {}...",
            transactions.len(),
            transactions_path.display()
        );
    }

    let generator = build_generator(offline)?;
    let response = generator.generate(user_id, &transactions, &goal).await?;
    print_suggestions(&response, json)
}

/// Build the travel goal from a JSON file or from individual flags
pub fn resolve_goal(args: &GoalArgs) -> Result<TravelGoal> {
    let goal = match &args.goal {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read goal file {}", path.display()))?;
            serde_json::from_str::<TravelGoal>(&content)
                .with_context(|| format!("Invalid goal file {}", path.display()))?
        }
        None => {
            let (Some(name), Some(target)) = (&args.name, args.target) else {
                bail!("Pass --goal <FILE> or both --name and --target");
            };

            let mut goal = TravelGoal::new(name, target, args.saved.unwrap_or(Decimal::ZERO));
            if let Some(destination) = &args.destination {
                goal = goal.with_destination(destination);
            }
            if let Some(date) = args.target_date {
                goal = goal.with_target_date(date);
            }
            goal
        }
    };

    goal.validate()?;
    Ok(goal)
}
