//! Budget suggestion engine
//!
//! Turns a user's category priorities, spending history and income into a
//! recommended spending ceiling per category:
//! - `history`: expense rows to per-category monthly series
//! - `forecast`: least-squares trend over a series
//! - `weights`: priority and expense weights per category
//! - `synthesizer`: bounded, normalized, rounded amounts
//! - `engine`: reads a store, synthesizes, replaces the stored set
//! - `store`: the storage traits the engine runs against

pub mod engine;
pub mod forecast;
pub mod history;
pub mod store;
pub mod synthesizer;
pub mod weights;

pub use engine::SuggestionEngine;
pub use forecast::{forecast_next, Forecast, ForecastBasis, LinearTrend};
pub use history::{aggregate_monthly, monthly_series, period_index};
pub use store::{
    BudgetStore, CategoryRegistry, ExpenseLedger, IncomeLedger, PriorityRegistry, SuggestionStore,
};
pub use synthesizer::{synthesize, CategoryInput, SuggestionBreakdown, Synthesis, SynthesisInput};
pub use weights::{compute_weights, CategoryWeight, EXPENSE_SHARE, PRIORITY_SHARE};
