//! Terminal output shared by the suggestion, summary and travel commands

use anyhow::Result;
use finix_core::format::{format_currency, format_timeline};
use finix_core::{
    SuggestionResponse, SuggestionSource, TransactionSummary, TravelSuggestionResponse,
};

use super::truncate;

/// Print a suggestion response as a report or as JSON
pub fn print_suggestions(response: &SuggestionResponse, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
        return Ok(());
    }

    println!();
    match &response.destination {
        Some(destination) => println!(
            "✈️  {} ({})",
            response.travel_goal_name, destination
        ),
        None => println!("✈️  {}", response.travel_goal_name),
    }
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Saved: {} of {} ({} to go)",
        format_currency(response.current_saved),
        format_currency(response.target_amount),
        format_currency(response.remaining_amount)
    );
    println!(
        "   Spending: {} over {} transactions ({}/mo avg, {} non-essential)",
        format_currency(response.total_spending),
        response.transaction_count,
        format_currency(response.average_monthly_spending),
        format_currency(response.non_essential_spending)
    );
    println!(
        "   Timeline: {} months at current pace, {} months optimized",
        format_timeline(response.months_to_goal_current),
        format_timeline(response.months_to_goal_optimized)
    );

    println!();
    match response.source {
        SuggestionSource::Model => println!("💡 Suggestions (🤖 model)"),
        SuggestionSource::Fallback => println!("💡 Suggestions (📋 rule-based)"),
    }
    println!("   ─────────────────────────────────────────────────────────────");
    for (i, suggestion) in response.suggestions.iter().enumerate() {
        println!(
            "   {}. {} (saves {}/mo)",
            i + 1,
            truncate(&suggestion.title, 50),
            format_currency(suggestion.potential_savings)
        );
        println!("      {}", suggestion.description);
        println!("      → {}", suggestion.impact);
        if i + 1 < response.suggestions.len() {
            println!();
        }
    }
    println!();

    Ok(())
}

/// Print a transaction summary as a table or as JSON
pub fn print_summary(summary: &TransactionSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!();
    println!("📊 Transaction Summary");
    println!("   ─────────────────────────────");
    println!("   Transactions: {}", summary.total_transactions);
    println!("   Total: {}", format_currency(summary.total_amount));
    println!("   Average: {}", format_currency(summary.average_amount));

    if summary.categories.is_empty() {
        println!();
        return Ok(());
    }

    // Largest categories first
    let mut categories: Vec<_> = summary.categories.iter().collect();
    categories.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    println!();
    println!("   {:<28} {:>12}", "CATEGORY", "TOTAL");
    println!("   {}", "-".repeat(41));
    for (category, total) in categories {
        println!(
            "   {:<28} {:>12}",
            truncate(category, 28),
            format_currency(*total)
        );
    }
    println!();

    Ok(())
}

/// Print travel options as a list or as JSON
pub fn print_travel(response: &TravelSuggestionResponse, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
        return Ok(());
    }

    println!();
    match response.source {
        SuggestionSource::Model => println!("🧳 {} (🤖 model)", response.destination),
        SuggestionSource::Fallback => println!("🧳 {} (📋 placeholders)", response.destination),
    }
    println!("   ─────────────────────────────────────────────────────────────");
    for (i, option) in response.suggestions.iter().enumerate() {
        println!(
            "   {}. [{}] {} - {} {} ★ {}",
            i + 1,
            option.category,
            truncate(&option.name, 40),
            format_currency(option.price),
            option.price_label,
            option.rating
        );
        if !option.description.is_empty() {
            println!("      {}", option.description);
        }
        let details: Vec<&str> = [
            &option.location,
            &option.airline,
            &option.timing,
            &option.cuisine,
        ]
        .into_iter()
        .filter_map(|detail| detail.as_deref())
        .collect();
        if !details.is_empty() {
            println!("      {}", details.join(" · "));
        }
    }
    println!();

    Ok(())
}
