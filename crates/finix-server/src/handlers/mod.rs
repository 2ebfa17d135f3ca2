//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod health;
pub mod suggestions;
pub mod transactions;
pub mod travel;

// Re-export all handlers for use in router
pub use health::*;
pub use suggestions::*;
pub use transactions::*;
pub use travel::*;
