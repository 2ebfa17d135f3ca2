//! Travel options command implementation

use std::collections::BTreeMap;

use anyhow::Result;
use rust_decimal::Decimal;

use super::{build_generator, print_travel};

pub async fn cmd_travel(
    destination: &str,
    budgets: &[(String, Decimal)],
    offline: bool,
    json: bool,
) -> Result<()> {
    // A repeated category keeps its last value
    let budgets: BTreeMap<String, Decimal> = budgets.iter().cloned().collect();

    if !json {
        println!("🔍 Finding travel options for {}...", destination.trim());
    }

    let generator = build_generator(offline)?;
    let response = generator.travel_suggestions(destination, &budgets).await?;
    print_travel(&response, json)
}
