//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_db, period/category resolution)
//! - `categories` - Category registry commands
//! - `priorities` - Per-user priority commands
//! - `ledger` - Expense and income recording
//! - `suggestions` - Generate, preview, list and track suggestions
//! - `serve` - Web server command

pub mod categories;
pub mod core;
pub mod ledger;
pub mod priorities;
pub mod serve;
pub mod suggestions;

// Re-export command functions for main.rs
pub use categories::*;
pub use core::*;
pub use ledger::*;
pub use priorities::*;
pub use serve::*;
pub use suggestions::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
