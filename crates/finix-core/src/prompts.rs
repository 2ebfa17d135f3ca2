//! Prompt templates
//!
//! Two templates: savings suggestions for a goal, and travel options for a
//! destination. Each is loaded with a two-layer resolution:
//! 1. Check for an override in the data dir (~/.local/share/finix/prompts/)
//! 2. Fall back to the embedded default (compiled into binary)
//!
//! Each template ends with the output contract its response parser relies on.
//! For savings: a JSON array of 3-5 objects with `title`, `description`,
//! `potential_savings`, `impact` and `category`.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::analysis::SpendingAnalysis;
use crate::error::{Error, Result};
use crate::format::{format_currency, format_timeline};
use crate::models::TravelGoal;
use crate::projection::SavingsMetrics;
use crate::travel::{budget_for, TravelCategory};

/// Embedded default prompts (compiled into binary)
const DEFAULT_PROMPT: &str = include_str!("../../../prompts/savings_suggestions.md");
const DEFAULT_TRAVEL_PROMPT: &str = include_str!("../../../prompts/travel_suggestions.md");

/// File name of the savings prompt, both embedded and as an override
pub const PROMPT_FILE_NAME: &str = "savings_suggestions.md";

/// How many categories the prompt lists
pub const MAX_PROMPT_CATEGORIES: usize = 10;

/// Identifies one of the prompt templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptId {
    SavingsSuggestions,
    TravelSuggestions,
}

impl PromptId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptId::SavingsSuggestions => "savings_suggestions",
            PromptId::TravelSuggestions => "travel_suggestions",
        }
    }

    /// File name, both embedded and as an override
    pub fn file_name(&self) -> &'static str {
        match self {
            PromptId::SavingsSuggestions => PROMPT_FILE_NAME,
            PromptId::TravelSuggestions => "travel_suggestions.md",
        }
    }

    fn default_content(&self) -> &'static str {
        match self {
            PromptId::SavingsSuggestions => DEFAULT_PROMPT,
            PromptId::TravelSuggestions => DEFAULT_TRAVEL_PROMPT,
        }
    }
}

/// Prompt frontmatter metadata
#[derive(Debug, Clone, Deserialize)]
pub struct PromptMetadata {
    pub id: String,
    /// Version number for tracking changes
    pub version: u32,
}

/// A loaded prompt template
#[derive(Debug, Clone)]
pub struct SuggestionPrompt {
    pub metadata: PromptMetadata,
    /// Template body with `{{variable}}` placeholders
    pub content: String,
    /// Path to the override file, if one was used
    pub override_path: Option<PathBuf>,
}

impl SuggestionPrompt {
    /// The embedded default savings template
    pub fn embedded() -> Self {
        Self::embedded_for(PromptId::SavingsSuggestions)
    }

    /// The embedded default of any template
    pub fn embedded_for(id: PromptId) -> Self {
        let raw = id.default_content();
        // Checked by `test_default_prompts_parse`; the raw text is used if that ever regresses
        let (metadata, content) = parse_prompt(raw).unwrap_or_else(|_| {
            (
                PromptMetadata {
                    id: id.as_str().to_string(),
                    version: 0,
                },
                raw.to_string(),
            )
        });
        Self {
            metadata,
            content,
            override_path: None,
        }
    }

    /// Load the savings template from the default override directory
    pub fn load() -> Result<Self> {
        Self::load_for(PromptId::SavingsSuggestions)
    }

    /// Load a template from the default override directory, falling back to the embedded one
    pub fn load_for(id: PromptId) -> Result<Self> {
        match default_prompts_dir() {
            Some(dir) => Self::load_from_dir_for(&dir, id),
            None => Ok(Self::embedded_for(id)),
        }
    }

    /// Load the savings template from a specific override directory
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        Self::load_from_dir_for(dir, PromptId::SavingsSuggestions)
    }

    /// Load a template from a specific override directory, falling back to the embedded one
    pub fn load_from_dir_for(dir: &Path, id: PromptId) -> Result<Self> {
        let override_path = dir.join(id.file_name());
        if !override_path.exists() {
            return Ok(Self::embedded_for(id));
        }

        let content = fs::read_to_string(&override_path)
            .map_err(|e| Error::InvalidData(format!("Failed to read prompt override: {}", e)))?;
        let (metadata, body) = parse_prompt(&content)?;
        tracing::info!(path = %override_path.display(), version = metadata.version, "Using prompt override");

        Ok(Self {
            metadata,
            content: body,
            override_path: Some(override_path),
        })
    }

    /// Whether this template came from an override file
    pub fn is_override(&self) -> bool {
        self.override_path.is_some()
    }

    /// Render the template with variables replaced
    ///
    /// One left-to-right pass over the template: substituted values are never
    /// scanned again, so user text containing `{{...}}` comes out verbatim.
    /// Unknown placeholders are left in place.
    pub fn render(&self, vars: &HashMap<&str, String>) -> String {
        let mut result = String::with_capacity(self.content.len());
        let mut rest = self.content.as_str();

        while let Some(open) = rest.find("{{") {
            result.push_str(&rest[..open]);
            let after_open = &rest[open + 2..];

            let Some(close) = after_open.find("}}") else {
                result.push_str(&rest[open..]);
                rest = "";
                break;
            };

            let key = &after_open[..close];
            match vars.get(key) {
                Some(value) => result.push_str(value),
                None => result.push_str(&rest[open..open + 2 + close + 2]),
            }
            rest = &after_open[close + 2..];
        }

        result.push_str(rest);
        result
    }

    /// Build the suggestion request for one goal
    pub fn build(
        &self,
        analysis: &SpendingAnalysis,
        goal: &TravelGoal,
        metrics: &SavingsMetrics,
    ) -> String {
        self.render(&template_vars(analysis, goal, metrics))
    }

    /// Build the travel options request for one destination
    pub fn build_travel(
        &self,
        destination: &str,
        budgets: &BTreeMap<String, Decimal>,
        count: usize,
    ) -> String {
        self.render(&travel_vars(destination, budgets, count))
    }
}

impl Default for SuggestionPrompt {
    fn default() -> Self {
        Self::embedded()
    }
}

/// Build the suggestion request with the embedded template
pub fn build_suggestion_prompt(
    analysis: &SpendingAnalysis,
    goal: &TravelGoal,
    metrics: &SavingsMetrics,
) -> String {
    SuggestionPrompt::embedded().build(analysis, goal, metrics)
}

/// Default prompt override directory
pub fn default_prompts_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("finix").join("prompts"))
}

fn template_vars(
    analysis: &SpendingAnalysis,
    goal: &TravelGoal,
    metrics: &SavingsMetrics,
) -> HashMap<&'static str, String> {
    let mut vars = HashMap::new();

    vars.insert("goal_name", goal.name.clone());
    vars.insert(
        "destination",
        goal.destination
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| "Not specified".to_string()),
    );
    vars.insert("target_amount", format_currency(goal.target_amount));
    vars.insert("current_saved", format_currency(goal.current_saved));
    vars.insert("remaining_amount", format_currency(metrics.remaining_amount));

    vars.insert(
        "average_monthly_spending",
        format_currency(analysis.average_monthly_spending),
    );
    vars.insert(
        "non_essential_spending",
        format_currency(analysis.non_essential_spending),
    );
    vars.insert("transaction_count", analysis.transaction_count.to_string());

    let categories = analysis.top_categories(MAX_PROMPT_CATEGORIES);
    let top_categories = if categories.is_empty() {
        "  - No spending recorded".to_string()
    } else {
        categories
            .iter()
            .map(|(name, total)| format!("  - {}: {}", name, format_currency(*total)))
            .collect::<Vec<_>>()
            .join("\n")
    };
    vars.insert("top_categories", top_categories);

    vars.insert("months_current", format_timeline(metrics.months_to_goal_current));
    vars.insert(
        "months_optimized",
        format_timeline(metrics.months_to_goal_optimized),
    );

    vars
}

fn travel_vars(
    destination: &str,
    budgets: &BTreeMap<String, Decimal>,
    count: usize,
) -> HashMap<&'static str, String> {
    let budget_lines = TravelCategory::ALL
        .iter()
        .map(|category| {
            let budget = budget_for(budgets, *category)
                .map(format_currency)
                .unwrap_or_else(|| "No limit".to_string());
            format!("  - {}: {}", category.title(), budget)
        })
        .collect::<Vec<_>>()
        .join("\n");

    HashMap::from([
        ("destination", destination.trim().to_string()),
        ("budgets", budget_lines),
        ("suggestion_count", count.to_string()),
    ])
}

/// Parse a prompt file into metadata and body
fn parse_prompt(content: &str) -> Result<(PromptMetadata, String)> {
    let content = content.trim();

    if !content.starts_with("---") {
        return Err(Error::InvalidData(
            "Prompt must start with YAML frontmatter (---)".into(),
        ));
    }

    let rest = &content[3..];
    let end = rest.find("---").ok_or_else(|| {
        Error::InvalidData("Prompt frontmatter not closed (missing second ---)".into())
    })?;

    let frontmatter = rest[..end].trim();
    let body = rest[end + 3..].trim();

    let metadata: PromptMetadata = serde_yaml::from_str(frontmatter)
        .map_err(|e| Error::InvalidData(format!("Invalid prompt frontmatter: {}", e)))?;

    Ok((metadata, body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_transactions;
    use crate::models::Transaction;
    use crate::projection::project_savings;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn sample() -> (SpendingAnalysis, TravelGoal, SavingsMetrics) {
        let date = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
        let transactions = vec![
            Transaction::new(dec!(1200), "Rent", date(1, 1)),
            Transaction::new(dec!(85.5), "Dining", date(1, 12)),
            Transaction::new(dec!(1200), "Rent", date(2, 1)),
            Transaction::new(dec!(42), "Entertainment", date(2, 20)),
        ];
        let goal = TravelGoal::new("Tokyo Spring", dec!(5000), dec!(750)).with_destination("Tokyo");
        let analysis = analyze_transactions(&transactions, &goal).unwrap();
        let metrics = project_savings(&analysis, &goal);
        (analysis, goal, metrics)
    }

    #[test]
    fn test_default_prompts_parse() {
        let (metadata, body) = parse_prompt(DEFAULT_PROMPT).unwrap();
        assert_eq!(metadata.id, "savings_suggestions");
        assert!(body.contains("{{goal_name}}"));
        assert!(!body.starts_with("---"));

        let (metadata, body) = parse_prompt(DEFAULT_TRAVEL_PROMPT).unwrap();
        assert_eq!(metadata.id, PromptId::TravelSuggestions.as_str());
        assert!(body.contains("{{destination}}"));
        assert!(body.contains("{{budgets}}"));
    }

    #[test]
    fn test_travel_prompt_lists_budgets_and_contract() {
        let budgets = BTreeMap::from([
            ("Accommodation".to_string(), dec!(1500)),
            ("flight".to_string(), dec!(800)),
        ]);
        let prompt = SuggestionPrompt::embedded_for(PromptId::TravelSuggestions)
            .build_travel("  Lisbon ", &budgets, 6);

        assert!(prompt.contains("plan a trip to Lisbon."));
        assert!(prompt.contains("  - Accommodation: $1,500.00"));
        assert!(prompt.contains("  - Flight: $800.00"));
        assert!(prompt.contains("  - Restaurant: No limit"));
        assert!(prompt.contains("Suggest 6 concrete options"));
        for field in ["\"priceLabel\"", "\"imageUrl\"", "\"rating\"", "\"cuisine\""] {
            assert!(prompt.contains(field), "missing {}", field);
        }
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_travel_override_uses_its_own_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(PromptId::TravelSuggestions.file_name()),
            "---\nid: travel_suggestions\nversion: 2\n---\nGo to {{destination}}.",
        )
        .unwrap();

        let travel =
            SuggestionPrompt::load_from_dir_for(dir.path(), PromptId::TravelSuggestions).unwrap();
        assert!(travel.is_override());
        assert_eq!(travel.build_travel("Oslo", &BTreeMap::new(), 8), "Go to Oslo.");

        let savings = SuggestionPrompt::load_from_dir(dir.path()).unwrap();
        assert!(!savings.is_override());
    }

    #[test]
    fn test_prompt_contains_goal_and_figures() {
        let (analysis, goal, metrics) = sample();
        let prompt = build_suggestion_prompt(&analysis, &goal, &metrics);

        assert!(prompt.contains("- Goal Name: Tokyo Spring"));
        assert!(prompt.contains("- Destination: Tokyo"));
        assert!(prompt.contains("- Target Amount: $5,000.00"));
        assert!(prompt.contains("- Currently Saved: $750.00"));
        assert!(prompt.contains("- Remaining to Save: $4,250.00"));
        assert!(prompt.contains("- Total Transactions Analyzed: 4"));
        assert!(prompt.contains("  - Rent: $2,400.00"));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_prompt_states_output_contract() {
        let (analysis, goal, metrics) = sample();
        let prompt = build_suggestion_prompt(&analysis, &goal, &metrics);

        for field in ["\"title\"", "\"description\"", "\"potential_savings\"", "\"impact\"", "\"category\""] {
            assert!(prompt.contains(field), "missing {}", field);
        }
        assert!(prompt.contains("JSON array of 3-5 objects"));
        assert!(prompt.contains("Return ONLY the JSON array"));
    }

    #[test]
    fn test_categories_sorted_descending() {
        let (analysis, goal, metrics) = sample();
        let prompt = build_suggestion_prompt(&analysis, &goal, &metrics);
        let rent = prompt.find("  - Rent:").unwrap();
        let dining = prompt.find("  - Dining:").unwrap();
        let fun = prompt.find("  - Entertainment:").unwrap();
        assert!(rent < dining && dining < fun);
    }

    #[test]
    fn test_missing_destination_and_timelines() {
        let goal = TravelGoal::new("Somewhere", dec!(800), dec!(0));
        let analysis = SpendingAnalysis::default();
        let metrics = project_savings(&analysis, &goal);
        assert_eq!(metrics.current_monthly_savings, Decimal::ZERO);

        let prompt = build_suggestion_prompt(&analysis, &goal, &metrics);
        assert!(prompt.contains("- Destination: Not specified"));
        assert!(prompt.contains("- Current pace: N/A months"));
        assert!(prompt.contains("- Optimized pace: N/A months"));
        assert!(prompt.contains("No spending recorded"));
    }

    #[test]
    fn test_override_dir_without_file_uses_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let prompt = SuggestionPrompt::load_from_dir(dir.path()).unwrap();
        assert!(!prompt.is_override());
    }

    #[test]
    fn test_override_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(PROMPT_FILE_NAME),
            "---\nid: savings_suggestions\nversion: 7\n---\nSave for {{goal_name}}.",
        )
        .unwrap();

        let prompt = SuggestionPrompt::load_from_dir(dir.path()).unwrap();
        assert!(prompt.is_override());
        assert_eq!(prompt.metadata.version, 7);

        let (analysis, goal, metrics) = sample();
        assert_eq!(prompt.build(&analysis, &goal, &metrics), "Save for Tokyo Spring.");
    }

    #[test]
    fn test_invalid_override_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PROMPT_FILE_NAME), "no frontmatter here").unwrap();
        assert!(SuggestionPrompt::load_from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_placeholder_text_in_user_values_is_not_expanded() {
        let (analysis, _, metrics) = sample();
        let goal = TravelGoal::new("Trip {{destination}}", dec!(5000), dec!(750))
            .with_destination("Rome");

        let first = build_suggestion_prompt(&analysis, &goal, &metrics);
        assert!(first.contains("- Goal Name: Trip {{destination}}\n"));
        assert!(first.contains("- Destination: Rome\n"));

        for _ in 0..20 {
            assert_eq!(build_suggestion_prompt(&analysis, &goal, &metrics), first);
        }
    }

    #[test]
    fn test_render_leaves_unknown_and_unclosed_placeholders() {
        let prompt = SuggestionPrompt {
            content: "{{a}} {{missing}} {{a}}{{b".to_string(),
            ..SuggestionPrompt::embedded()
        };
        let vars = HashMap::from([("a", "x{{a}}".to_string())]);
        assert_eq!(prompt.render(&vars), "x{{a}} {{missing}} x{{a}}{{b");
    }
}
