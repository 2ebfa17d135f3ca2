//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

/// Finix - Turn spending habits into a travel fund
#[derive(Parser)]
#[command(name = "finix")]
#[command(about = "Travel savings advisor", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Dataset path (JSON users with transactions and travel goals)
    #[arg(long, default_value = "finix.json", global = true)]
    pub data: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Never call a language model, use rule-based suggestions only
    #[arg(long, global = true)]
    pub offline: bool,

    /// Print machine-readable JSON instead of a report
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Suggestions for a user in the dataset
    Suggest {
        /// User ID
        #[arg(short, long)]
        user: i64,
    },

    /// Suggestions from a transactions CSV and a travel goal
    Calculate {
        /// CSV file (date,amount,category[,currency][,description])
        #[arg(short, long)]
        transactions: PathBuf,

        /// User ID to echo in the response
        #[arg(long)]
        user_id: Option<i64>,

        #[command(flatten)]
        goal: GoalArgs,
    },

    /// Summarize transactions from a CSV file or a dataset user
    Summary {
        /// CSV file to summarize
        #[arg(short, long, conflicts_with = "user")]
        transactions: Option<PathBuf>,

        /// User ID in the dataset
        #[arg(short, long)]
        user: Option<i64>,
    },

    /// Places to stay, flights, restaurants and activities for a destination
    Travel {
        /// Where the trip goes
        #[arg(short, long)]
        destination: String,

        /// Category budget, repeatable (e.g., --budget Accommodation=1500)
        #[arg(short, long = "budget", value_name = "CATEGORY=AMOUNT", value_parser = parse_budget)]
        budgets: Vec<(String, Decimal)>,
    },

    /// Show dataset, model backend and override status
    Status,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

/// Travel goal, either from a JSON file or from individual flags
#[derive(Args, Debug, Default)]
pub struct GoalArgs {
    /// JSON file with a travel goal object
    #[arg(short, long, conflicts_with_all = ["name", "target", "saved", "destination", "target_date"])]
    pub goal: Option<PathBuf>,

    /// Goal name (e.g., "Japan 2025")
    #[arg(long)]
    pub name: Option<String>,

    /// Target amount
    #[arg(long)]
    pub target: Option<Decimal>,

    /// Amount already saved
    #[arg(long)]
    pub saved: Option<Decimal>,

    /// Destination shown in suggestions
    #[arg(long)]
    pub destination: Option<String>,

    /// Target date (YYYY-MM-DD)
    #[arg(long)]
    pub target_date: Option<NaiveDate>,
}

/// Parse a `Category=Amount` budget flag
pub fn parse_budget(s: &str) -> Result<(String, Decimal), String> {
    let (category, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=AMOUNT, got {:?}", s))?;

    let category = category.trim();
    if category.is_empty() {
        return Err(format!("missing category in {:?}", s));
    }
    let amount: Decimal = amount
        .trim()
        .parse()
        .map_err(|_| format!("invalid amount {:?}", amount.trim()))?;

    Ok((category.to_string(), amount))
}
