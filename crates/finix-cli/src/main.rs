//! Finix CLI - Travel savings advisor
//!
//! Usage:
//!   finix suggest --user 1                         Suggestions for a dataset user
//!   finix calculate -t spend.csv --name Trip --target 2000
//!   finix summary -t spend.csv                     Transaction summary
//!   finix travel -d Lisbon -b Flight=600           Travel options for a destination
//!   finix serve --port 8000                        Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Suggest { user } => {
            commands::cmd_suggest(&cli.data, user, cli.offline, cli.json).await
        }
        Commands::Calculate {
            transactions,
            user_id,
            goal,
        } => commands::cmd_calculate(&transactions, &goal, user_id, cli.offline, cli.json).await,
        Commands::Summary { transactions, user } => match (transactions, user) {
            (Some(path), _) => commands::cmd_summary_file(&path, cli.json),
            (None, Some(user)) => commands::cmd_summary_user(&cli.data, user, cli.json),
            (None, None) => anyhow::bail!("Pass --transactions <CSV> or --user <ID>"),
        },
        Commands::Travel {
            destination,
            budgets,
        } => commands::cmd_travel(&destination, &budgets, cli.offline, cli.json).await,
        Commands::Status => commands::cmd_status(&cli.data, cli.offline).await,
        Commands::Serve { port, host } => {
            commands::cmd_serve(&cli.data, &host, port, cli.offline).await
        }
    }
}
