//! Storage interfaces consumed by the suggestion engine
//!
//! The engine never reaches for a global handle: every read and the final
//! replace go through a store passed in by the caller. `Database` implements
//! all of them; tests can substitute the in-memory store from `test_utils`.

use crate::db::Database;
use crate::error::Result;
use crate::models::{Category, MonthBucket, NewSuggestion, Period, Priority, Suggestion};

/// Known spending categories
pub trait CategoryRegistry {
    fn list_categories(&self) -> Result<Vec<Category>>;
}

/// Per-user category priorities
pub trait PriorityRegistry {
    fn list_priorities(&self, user_id: i64) -> Result<Vec<Priority>>;
}

/// Read access to the expense ledger
pub trait ExpenseLedger {
    /// Total spent in one category during one calendar month
    fn sum_by_category_month(
        &self,
        user_id: i64,
        category_id: i64,
        year: i32,
        month: u32,
    ) -> Result<f64>;

    /// Per-month totals for one category, oldest first
    fn series_by_category(&self, user_id: i64, category_id: i64) -> Result<Vec<MonthBucket>>;
}

/// Read access to income
pub trait IncomeLedger {
    /// Additional income recorded for the period
    fn sum_additional_income(&self, user_id: i64, period: Period) -> Result<f64>;

    /// Fixed per-user baseline (salary)
    fn base_income(&self, user_id: i64) -> Result<f64>;
}

/// Owner of suggestion records
pub trait SuggestionStore {
    /// Atomically swap the full set for (user, period); all-or-nothing
    fn replace_suggestions(
        &self,
        user_id: i64,
        period: Period,
        suggestions: &[NewSuggestion],
    ) -> Result<()>;

    /// Suggestions for the user, optionally filtered to one period
    fn fetch_suggestions(&self, user_id: i64, period: Option<Period>) -> Result<Vec<Suggestion>>;
}

/// Everything the engine needs to generate suggestions
pub trait BudgetStore:
    CategoryRegistry + PriorityRegistry + ExpenseLedger + IncomeLedger + SuggestionStore
{
}

impl<T> BudgetStore for T where
    T: CategoryRegistry + PriorityRegistry + ExpenseLedger + IncomeLedger + SuggestionStore + ?Sized
{
}

impl CategoryRegistry for Database {
    fn list_categories(&self) -> Result<Vec<Category>> {
        Database::list_categories(self)
    }
}

impl PriorityRegistry for Database {
    fn list_priorities(&self, user_id: i64) -> Result<Vec<Priority>> {
        Database::list_priorities(self, user_id)
    }
}

impl ExpenseLedger for Database {
    fn sum_by_category_month(
        &self,
        user_id: i64,
        category_id: i64,
        year: i32,
        month: u32,
    ) -> Result<f64> {
        self.sum_expenses_for_month(user_id, category_id, year, month)
    }

    fn series_by_category(&self, user_id: i64, category_id: i64) -> Result<Vec<MonthBucket>> {
        self.monthly_expense_buckets(user_id, category_id)
    }
}

impl IncomeLedger for Database {
    fn sum_additional_income(&self, user_id: i64, period: Period) -> Result<f64> {
        self.sum_income(user_id, period)
    }

    fn base_income(&self, user_id: i64) -> Result<f64> {
        self.get_base_income(user_id)
    }
}

impl SuggestionStore for Database {
    fn replace_suggestions(
        &self,
        user_id: i64,
        period: Period,
        suggestions: &[NewSuggestion],
    ) -> Result<()> {
        Database::replace_suggestions(self, user_id, period, suggestions)
    }

    fn fetch_suggestions(&self, user_id: i64, period: Option<Period>) -> Result<Vec<Suggestion>> {
        Database::fetch_suggestions(self, user_id, period)
    }
}
