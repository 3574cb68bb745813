//! Tally Core Library
//!
//! Shared functionality for the Tally budgeting backend:
//! - Domain models (categories, priorities, periods, suggestions)
//! - Encrypted SQLite store with migrations
//! - Budget suggestion engine over pluggable storage traits

pub mod budget;
pub mod db;
pub mod error;
pub mod models;

/// In-memory store for engine tests
#[cfg(test)]
pub mod test_utils;

pub use budget::{
    BudgetStore, Forecast, ForecastBasis, SuggestionBreakdown, SuggestionEngine, Synthesis,
};
pub use db::Database;
pub use error::{Error, Result};
