//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use crate::cli::{parse_budget, Cli, Commands, GoalArgs};
use crate::commands::{self, truncate};

const DATASET: &str = r#"{
    "users": [
        {
            "id": 1,
            "username": "alex",
            "transactions": [
                {"amount": 100, "category": "Food", "date": "2024-01-05"},
                {"amount": 50, "category": "Entertainment", "date": "2024-01-10"},
                {"amount": 200, "category": "Food", "date": "2024-02-01"}
            ],
            "travel_goal": {"name": "Paris Trip", "target_amount": 1000, "current_saved": 100, "destination": "Paris"}
        },
        {"id": 2, "username": "sam"}
    ]
}"#;

const CSV: &str = "date,amount,category,currency,description
2024-01-05,100.00,Food,USD,Groceries
2024-01-10,50.00,Entertainment,,Concert
02/01/2024,200.00,Food,usd,
";

fn setup_dir() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("finix.json");
    let csv = dir.path().join("spend.csv");
    fs::write(&data, DATASET).unwrap();
    fs::write(&csv, CSV).unwrap();
    (dir, data, csv)
}

fn flag_goal() -> GoalArgs {
    GoalArgs {
        name: Some("Lisbon".to_string()),
        target: Some(dec!(1500)),
        saved: Some(dec!(250)),
        destination: Some("Portugal".to_string()),
        ..Default::default()
    }
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_global_flags() {
    let cli = Cli::try_parse_from([
        "finix", "suggest", "--user", "3", "--offline", "--json", "--data", "x.json",
    ])
    .unwrap();

    assert!(cli.offline);
    assert!(cli.json);
    assert_eq!(cli.data, PathBuf::from("x.json"));
    assert!(matches!(cli.command, Commands::Suggest { user: 3 }));
}

#[test]
fn test_parse_calculate_goal_flags() {
    let cli = Cli::try_parse_from([
        "finix",
        "calculate",
        "-t",
        "spend.csv",
        "--name",
        "Japan",
        "--target",
        "4000.50",
        "--target-date",
        "2025-06-01",
    ])
    .unwrap();

    let Commands::Calculate { goal, user_id, .. } = cli.command else {
        panic!("expected calculate");
    };
    assert_eq!(goal.target, Some(dec!(4000.50)));
    assert_eq!(goal.target_date, NaiveDate::from_ymd_opt(2025, 6, 1));
    assert!(user_id.is_none());
}

#[test]
fn test_parse_goal_file_conflicts_with_flags() {
    let result = Cli::try_parse_from([
        "finix", "calculate", "-t", "spend.csv", "--goal", "goal.json", "--name", "Japan",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_parse_rejects_bad_amount() {
    let result = Cli::try_parse_from([
        "finix", "calculate", "-t", "spend.csv", "--name", "Japan", "--target", "lots",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_serve_defaults() {
    let cli = Cli::try_parse_from(["finix", "serve"]).unwrap();
    let Commands::Serve { port, host } = cli.command else {
        panic!("expected serve");
    };
    assert_eq!(port, 8000);
    assert_eq!(host, "127.0.0.1");
}

#[test]
fn test_parse_travel_budgets() {
    let cli = Cli::try_parse_from([
        "finix",
        "travel",
        "-d",
        "Lisbon",
        "--budget",
        "Accommodation=1500",
        "-b",
        "flight = 620.50",
    ])
    .unwrap();

    let Commands::Travel {
        destination,
        budgets,
    } = cli.command
    else {
        panic!("expected travel");
    };
    assert_eq!(destination, "Lisbon");
    assert_eq!(
        budgets,
        vec![
            ("Accommodation".to_string(), dec!(1500)),
            ("flight".to_string(), dec!(620.50)),
        ]
    );
}

#[test]
fn test_parse_budget_rejects_malformed_values() {
    assert!(parse_budget("Flight").is_err());
    assert!(parse_budget("=100").is_err());
    assert!(parse_budget("Flight=cheap").is_err());
    assert!(Cli::try_parse_from(["finix", "travel", "-d", "Rome", "-b", "Hotel"]).is_err());
    assert!(Cli::try_parse_from(["finix", "travel"]).is_err());
}

// ========== Goal Resolution Tests ==========

#[test]
fn test_resolve_goal_from_flags() {
    let goal = commands::resolve_goal(&flag_goal()).unwrap();
    assert_eq!(goal.name, "Lisbon");
    assert_eq!(goal.remaining_amount(), dec!(1250));
    assert_eq!(goal.destination.as_deref(), Some("Portugal"));
}

#[test]
fn test_resolve_goal_defaults_saved_to_zero() {
    let args = GoalArgs {
        name: Some("Rome".to_string()),
        target: Some(dec!(800)),
        ..Default::default()
    };
    let goal = commands::resolve_goal(&args).unwrap();
    assert_eq!(goal.current_saved, dec!(0));
}

#[test]
fn test_resolve_goal_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("goal.json");
    fs::write(
        &path,
        r#"{"name": "Tokyo", "target_amount": 4000, "current_saved": 500, "target_date": "2025-03-01"}"#,
    )
    .unwrap();

    let args = GoalArgs {
        goal: Some(path),
        ..Default::default()
    };
    let goal = commands::resolve_goal(&args).unwrap();
    assert_eq!(goal.name, "Tokyo");
    assert_eq!(goal.target_date, NaiveDate::from_ymd_opt(2025, 3, 1));
}

#[test]
fn test_resolve_goal_requires_name_and_target() {
    let args = GoalArgs {
        name: Some("Rome".to_string()),
        ..Default::default()
    };
    assert!(commands::resolve_goal(&args).is_err());
}

#[test]
fn test_resolve_goal_rejects_invalid_values() {
    let args = GoalArgs {
        name: Some("Rome".to_string()),
        target: Some(dec!(0)),
        ..Default::default()
    };
    assert!(commands::resolve_goal(&args).is_err());
}

// ========== Command Tests ==========

#[tokio::test]
async fn test_cmd_suggest_offline() {
    let (_dir, data, _) = setup_dir();
    assert!(commands::cmd_suggest(&data, 1, true, false).await.is_ok());
    assert!(commands::cmd_suggest(&data, 1, true, true).await.is_ok());
}

#[tokio::test]
async fn test_cmd_suggest_user_without_goal() {
    let (_dir, data, _) = setup_dir();
    let err = commands::cmd_suggest(&data, 2, true, false)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("No travel goal"));
}

#[tokio::test]
async fn test_cmd_suggest_unknown_user() {
    let (_dir, data, _) = setup_dir();
    assert!(commands::cmd_suggest(&data, 99, true, false).await.is_err());
}

#[tokio::test]
async fn test_cmd_suggest_missing_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let err = commands::cmd_suggest(&missing, 1, true, false)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to load dataset"));
}

#[tokio::test]
async fn test_cmd_calculate_offline() {
    let (_dir, _, csv) = setup_dir();
    let result = commands::cmd_calculate(&csv, &flag_goal(), Some(7), true, true).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cmd_calculate_bad_csv() {
    let (dir, _, _) = setup_dir();
    let bad = dir.path().join("bad.csv");
    fs::write(&bad, "date,amount,category\n2024-01-05,-3,Food\n").unwrap();

    let err = commands::cmd_calculate(&bad, &flag_goal(), None, true, false)
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("Line 2"));
}

#[test]
fn test_cmd_summary_file_and_user() {
    let (_dir, data, csv) = setup_dir();
    assert!(commands::cmd_summary_file(&csv, false).is_ok());
    assert!(commands::cmd_summary_file(&csv, true).is_ok());
    assert!(commands::cmd_summary_user(&data, 1, false).is_ok());
    assert!(commands::cmd_summary_user(&data, 2, false).is_ok());
    assert!(commands::cmd_summary_user(&data, 42, false).is_err());
}

#[tokio::test]
async fn test_cmd_status_offline() {
    let (_dir, data, _) = setup_dir();
    assert!(commands::cmd_status(&data, true).await.is_ok());

    let missing = data.with_file_name("missing.json");
    assert!(commands::cmd_status(&missing, true).await.is_ok());
}

#[tokio::test]
async fn test_cmd_travel_offline() {
    let budgets = vec![("Flight".to_string(), dec!(600))];
    assert!(commands::cmd_travel("Lisbon", &budgets, true, false).await.is_ok());
    assert!(commands::cmd_travel("Lisbon", &[], true, true).await.is_ok());
}

#[tokio::test]
async fn test_cmd_travel_rejects_blank_destination_and_negative_budget() {
    let err = commands::cmd_travel("  ", &[], true, false).await.unwrap_err();
    assert!(err.to_string().contains("destination is required"));

    let negative = vec![("Activity".to_string(), dec!(-20))];
    assert!(commands::cmd_travel("Lisbon", &negative, true, false).await.is_err());
}

#[test]
fn test_open_store_counts_users() {
    let (_dir, data, _) = setup_dir();
    let store = commands::open_store(&data).unwrap();
    assert_eq!(store.users().count(), 2);
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("Brew Coffee at Home", 10), "Brew Co...");
    assert_eq!(truncate("Café Crème Brûlée", 8), "Café ...");
}
