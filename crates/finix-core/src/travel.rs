//! Destination suggestions for a trip budget
//!
//! Given a destination and per-category budgets, list concrete options:
//! places to stay, flights, restaurants and activities. The model is asked
//! for a JSON array of these; without a usable model answer a fixed
//! placeholder list is returned so clients always get something to render.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::SuggestionSource;

/// Image shown for every placeholder option
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1507525428034-b723cf961d3e";

/// Number of placeholder options
pub const PLACEHOLDER_COUNT: usize = 8;

/// Highest rating an option can carry
pub const MAX_RATING: Decimal = dec!(5);

/// Kind of travel option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelCategory {
    #[serde(alias = "Accommodation")]
    Accommodation,
    #[serde(alias = "Flight")]
    Flight,
    #[serde(alias = "Restaurant")]
    Restaurant,
    #[serde(alias = "Activity")]
    Activity,
}

impl TravelCategory {
    /// Rotation order of the placeholder list
    pub const ALL: [TravelCategory; 4] = [
        TravelCategory::Accommodation,
        TravelCategory::Flight,
        TravelCategory::Restaurant,
        TravelCategory::Activity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelCategory::Accommodation => "accommodation",
            TravelCategory::Flight => "flight",
            TravelCategory::Restaurant => "restaurant",
            TravelCategory::Activity => "activity",
        }
    }

    /// Name used for budgets and display ("Accommodation")
    pub fn title(&self) -> &'static str {
        match self {
            TravelCategory::Accommodation => "Accommodation",
            TravelCategory::Flight => "Flight",
            TravelCategory::Restaurant => "Restaurant",
            TravelCategory::Activity => "Activity",
        }
    }

    /// What the price is quoted per
    pub fn price_label(&self) -> &'static str {
        match self {
            TravelCategory::Accommodation => "per night",
            TravelCategory::Flight => "round trip",
            TravelCategory::Restaurant | TravelCategory::Activity => "per person",
        }
    }
}

impl fmt::Display for TravelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TravelCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "accommodation" => Ok(TravelCategory::Accommodation),
            "flight" => Ok(TravelCategory::Flight),
            "restaurant" => Ok(TravelCategory::Restaurant),
            "activity" => Ok(TravelCategory::Activity),
            _ => Err(format!("Unknown travel category: {}", s)),
        }
    }
}

/// One bookable option at the destination
///
/// Field names are camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelSuggestion {
    pub name: String,
    pub category: TravelCategory,
    /// Never negative
    pub price: Decimal,
    /// Filled from the category when the model leaves it out
    #[serde(default)]
    pub price_label: String,
    /// 0 to 5
    pub rating: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub airline: Option<String>,
    #[serde(default)]
    pub timing: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
}

/// Result of a travel suggestion query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelSuggestionResponse {
    pub destination: String,
    pub suggestions: Vec<TravelSuggestion>,
    pub source: SuggestionSource,
}

/// Check a travel query before any work is done
///
/// The destination must have text and no budget may be negative.
pub fn validate_travel_request(
    destination: &str,
    budgets: &BTreeMap<String, Decimal>,
) -> Result<()> {
    if destination.trim().is_empty() {
        return Err(Error::InvalidData("destination is required".into()));
    }
    if let Some((category, amount)) = budgets
        .iter()
        .find(|(_, amount)| **amount < Decimal::ZERO)
    {
        return Err(Error::InvalidData(format!(
            "Budget for {} must not be negative, got {}",
            category, amount
        )));
    }
    Ok(())
}

/// Budget for a category; keys match case-insensitively ("Flight", "flight")
pub fn budget_for(
    budgets: &BTreeMap<String, Decimal>,
    category: TravelCategory,
) -> Option<Decimal> {
    budgets
        .get(category.title())
        .or_else(|| {
            budgets
                .iter()
                .find(|(key, _)| key.trim().eq_ignore_ascii_case(category.as_str()))
                .map(|(_, amount)| amount)
        })
        .copied()
}

/// Deterministic options used when no model answer is available
///
/// Categories rotate accommodation, flight, restaurant, activity. The i-th
/// option (from 0) is priced at 1000 + 500 × i, capped by the category budget.
pub fn placeholder_travel_suggestions(
    destination: &str,
    budgets: &BTreeMap<String, Decimal>,
) -> Vec<TravelSuggestion> {
    (0..PLACEHOLDER_COUNT)
        .map(|i| {
            let category = TravelCategory::ALL[i % TravelCategory::ALL.len()];
            let list_price = Decimal::from(1000 + 500 * i as i64);
            let price = budget_for(budgets, category)
                .map_or(list_price, |budget| budget.min(list_price));

            TravelSuggestion {
                name: format!("Mock {} Option {}", category.title(), i + 1),
                category,
                price,
                price_label: category.price_label().to_string(),
                rating: dec!(4),
                description: format!(
                    "A placeholder {} suggestion for {}.",
                    category, destination
                ),
                features: vec![
                    "feature1".to_string(),
                    "feature2".to_string(),
                    "feature3".to_string(),
                ],
                location: matches!(
                    category,
                    TravelCategory::Accommodation | TravelCategory::Restaurant
                )
                .then(|| destination.to_string()),
                image_url: Some(PLACEHOLDER_IMAGE_URL.to_string()),
                airline: (category == TravelCategory::Flight).then(|| "MockAir".to_string()),
                timing: matches!(category, TravelCategory::Activity | TravelCategory::Flight)
                    .then(|| "09:00 - 18:00".to_string()),
                cuisine: (category == TravelCategory::Restaurant)
                    .then(|| "International".to_string()),
            }
        })
        .collect()
}
