//! Parsing of model responses into suggestions
//!
//! Model output is untrusted. The text may wrap the payload in one Markdown
//! code fence (labeled `json` or not) or surround it with prose. Extraction
//! finds the JSON candidate, then validation accepts the batch only if every
//! element is a well-formed suggestion.

use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::Suggestion;
use crate::travel::{TravelSuggestion, MAX_RATING};

const FENCE: &str = "```";

/// Longest slice of raw model text quoted in an error
const MAX_ERROR_EXCERPT: usize = 200;

/// How the JSON payload was wrapped in the model response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    /// No code fence; the payload is sliced from the first `[` to the last `]`
    NoFence,
    /// A fence opened with ```` ```json ````
    Labeled,
    /// A bare ```` ``` ```` fence, or one labeled with anything but `json`
    Unlabeled,
}

/// Find the JSON array candidate in a model response
///
/// Exactly one fence wrapper is stripped: the content between the first and
/// the second fence marker. An unclosed fence runs to the end of the text.
pub fn extract_json_candidate(text: &str) -> (FenceKind, &str) {
    let text = text.trim();

    let Some(open) = text.find(FENCE) else {
        let candidate = match (text.find('['), text.rfind(']')) {
            (Some(s), Some(e)) if s < e => &text[s..=e],
            _ => text,
        };
        return (FenceKind::NoFence, candidate);
    };

    let after_open = &text[open + FENCE.len()..];

    // The rest of the opening line is the fence label
    let line_end = after_open.find('\n').unwrap_or(after_open.len());
    let label = after_open[..line_end].trim();
    let (kind, body) = if label.eq_ignore_ascii_case("json") {
        (FenceKind::Labeled, &after_open[line_end..])
    } else if label.is_empty() {
        (FenceKind::Unlabeled, &after_open[line_end..])
    } else {
        // Anything else after the marker is payload on the fence line itself
        // (```[...]```). Other labels such as `javascript` are not stripped,
        // so the body starts with the label text and fails to parse.
        (FenceKind::Unlabeled, after_open)
    };

    let body = match body.find(FENCE) {
        Some(close) => &body[..close],
        None => body,
    };

    (kind, body.trim())
}

/// Parse and validate a suggestion batch from a model response
///
/// All-or-nothing: an element that fails to deserialize, an empty title, a
/// negative `potential_savings`, or a batch size outside `min..=max` rejects
/// the whole response.
pub fn parse_suggestions(text: &str, min: usize, max: usize) -> Result<Vec<Suggestion>> {
    let (kind, candidate) = extract_json_candidate(text);
    tracing::debug!(fence = ?kind, chars = candidate.len(), "Extracted JSON candidate");

    let suggestions: Vec<Suggestion> = serde_json::from_str(candidate).map_err(|e| {
        Error::InvalidData(format!(
            "Invalid suggestion JSON from AI: {} | Raw: {}",
            e,
            excerpt(candidate)
        ))
    })?;

    if suggestions.len() < min || suggestions.len() > max {
        return Err(Error::InvalidData(format!(
            "Expected {}-{} suggestions from AI, got {}",
            min,
            max,
            suggestions.len()
        )));
    }

    for (index, suggestion) in suggestions.iter().enumerate() {
        validate_suggestion(suggestion)
            .map_err(|reason| Error::InvalidData(format!("Suggestion {}: {}", index, reason)))?;
    }

    Ok(suggestions)
}

fn validate_suggestion(suggestion: &Suggestion) -> std::result::Result<(), String> {
    if suggestion.title.trim().is_empty() {
        return Err("empty title".to_string());
    }
    if suggestion.potential_savings < Decimal::ZERO {
        return Err(format!(
            "negative potential_savings {}",
            suggestion.potential_savings
        ));
    }
    Ok(())
}

/// Parse and validate a batch of travel options from a model response
///
/// Same extraction and all-or-nothing rule as [`parse_suggestions`]: between
/// 1 and `max` options, each with a name, a non-negative price and a rating
/// from 0 to 5. A missing `priceLabel` is filled from the category.
pub fn parse_travel_suggestions(text: &str, max: usize) -> Result<Vec<TravelSuggestion>> {
    let (kind, candidate) = extract_json_candidate(text);
    tracing::debug!(fence = ?kind, chars = candidate.len(), "Extracted travel JSON candidate");

    let mut suggestions: Vec<TravelSuggestion> = serde_json::from_str(candidate).map_err(|e| {
        Error::InvalidData(format!(
            "Invalid travel suggestion JSON from AI: {} | Raw: {}",
            e,
            excerpt(candidate)
        ))
    })?;

    if suggestions.is_empty() || suggestions.len() > max {
        return Err(Error::InvalidData(format!(
            "Expected 1-{} travel suggestions from AI, got {}",
            max,
            suggestions.len()
        )));
    }

    for (index, suggestion) in suggestions.iter_mut().enumerate() {
        validate_travel_suggestion(suggestion).map_err(|reason| {
            Error::InvalidData(format!("Travel suggestion {}: {}", index, reason))
        })?;
        if suggestion.price_label.trim().is_empty() {
            suggestion.price_label = suggestion.category.price_label().to_string();
        }
    }

    Ok(suggestions)
}

fn validate_travel_suggestion(suggestion: &TravelSuggestion) -> std::result::Result<(), String> {
    if suggestion.name.trim().is_empty() {
        return Err("empty name".to_string());
    }
    if suggestion.price < Decimal::ZERO {
        return Err(format!("negative price {}", suggestion.price));
    }
    if suggestion.rating < Decimal::ZERO || suggestion.rating > MAX_RATING {
        return Err(format!("rating {} outside 0-{}", suggestion.rating, MAX_RATING));
    }
    Ok(())
}

/// Truncate long responses for the error message
fn excerpt(text: &str) -> String {
    if text.chars().count() > MAX_ERROR_EXCERPT {
        let head: String = text.chars().take(MAX_ERROR_EXCERPT).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
