//! Savings suggestion generation
//!
//! - `generator`: the pipeline, model call and fallback decision
//! - `fallback`: deterministic rule-based suggestions
//! - `assembler`: final response construction

mod assembler;
mod fallback;
mod generator;

pub use assembler::{assemble_response, assemble_response_at};
pub use fallback::{fallback_suggestions, DEFAULT_TOP_CATEGORY, FALLBACK_SAVINGS_RATE};
pub use generator::SuggestionGenerator;
