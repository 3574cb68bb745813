//! Test utilities for tally-core
//!
//! `MemoryStore` implements every storage trait the suggestion engine uses,
//! backed by plain collections. It can be told to fail the next replace so
//! callers can check that a failed write leaves the previous set in place.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::{Datelike, NaiveDate};

use crate::budget::history::bucket_expenses;
use crate::budget::store::{
    CategoryRegistry, ExpenseLedger, IncomeLedger, PriorityRegistry, SuggestionStore,
};
use crate::error::{Error, Result};
use crate::models::{
    Category, Expense, MonthBucket, NewSuggestion, Period, Priority, PriorityLevel, Suggestion,
};

#[derive(Default)]
struct State {
    categories: Vec<Category>,
    priorities: Vec<Priority>,
    expenses: Vec<Expense>,
    base_income: HashMap<i64, f64>,
    income: Vec<(i64, Period, f64)>,
    suggestions: BTreeMap<(i64, Period), Vec<NewSuggestion>>,
}

/// In-memory implementation of the engine's storage traits
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    fail_next_replace: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a category and return its id
    pub fn add_category(&self, name: &str) -> i64 {
        let mut state = self.lock();
        let id = state.categories.len() as i64 + 1;
        state.categories.push(Category {
            id,
            name: name.to_string(),
        });
        id
    }

    /// Set (or change) a user's priority for a category
    pub fn set_priority(&self, user_id: i64, category_id: i64, level: PriorityLevel) {
        let mut state = self.lock();
        let category_name = state
            .categories
            .iter()
            .find(|c| c.id == category_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();

        state
            .priorities
            .retain(|p| !(p.user_id == user_id && p.category_id == category_id));
        let id = state.priorities.len() as i64 + 1;
        state.priorities.push(Priority {
            id,
            user_id,
            category_id,
            category_name,
            level,
        });
    }

    /// Record an expense on the first day of the given month
    pub fn add_expense(&self, user_id: i64, category_id: i64, year: i32, month: u32, amount: f64) {
        let date = NaiveDate::from_ymd_opt(year, month, 1).expect("valid expense month");
        let mut state = self.lock();
        let id = state.expenses.len() as i64 + 1;
        state.expenses.push(Expense {
            id,
            user_id,
            category_id,
            amount,
            date,
            details: None,
            source: None,
        });
    }

    pub fn set_base_income(&self, user_id: i64, amount: f64) {
        self.lock().base_income.insert(user_id, amount);
    }

    pub fn add_income(&self, user_id: i64, period: Period, amount: f64) {
        self.lock().income.push((user_id, period, amount));
    }

    /// Make the next `replace_suggestions` call fail without writing
    pub fn fail_next_replace(&self) {
        self.fail_next_replace.store(true, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A panicking test must not poison the others
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CategoryRegistry for MemoryStore {
    fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.lock().categories.clone())
    }
}

impl PriorityRegistry for MemoryStore {
    fn list_priorities(&self, user_id: i64) -> Result<Vec<Priority>> {
        let mut priorities: Vec<Priority> = self
            .lock()
            .priorities
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        priorities.sort_by(|a, b| a.category_name.cmp(&b.category_name));
        Ok(priorities)
    }
}

impl ExpenseLedger for MemoryStore {
    fn sum_by_category_month(
        &self,
        user_id: i64,
        category_id: i64,
        year: i32,
        month: u32,
    ) -> Result<f64> {
        Ok(self
            .lock()
            .expenses
            .iter()
            .filter(|e| {
                e.user_id == user_id
                    && e.category_id == category_id
                    && e.date.year() == year
                    && e.date.month() == month
            })
            .map(|e| e.amount)
            .sum())
    }

    fn series_by_category(&self, user_id: i64, category_id: i64) -> Result<Vec<MonthBucket>> {
        let state = self.lock();
        Ok(bucket_expenses(
            state
                .expenses
                .iter()
                .filter(|e| e.user_id == user_id && e.category_id == category_id),
        ))
    }
}

impl IncomeLedger for MemoryStore {
    fn sum_additional_income(&self, user_id: i64, period: Period) -> Result<f64> {
        Ok(self
            .lock()
            .income
            .iter()
            .filter(|(user, p, _)| *user == user_id && *p == period)
            .map(|(_, _, amount)| amount)
            .sum())
    }

    fn base_income(&self, user_id: i64) -> Result<f64> {
        Ok(self.lock().base_income.get(&user_id).copied().unwrap_or(0.0))
    }
}

impl SuggestionStore for MemoryStore {
    fn replace_suggestions(
        &self,
        user_id: i64,
        period: Period,
        suggestions: &[NewSuggestion],
    ) -> Result<()> {
        if self.fail_next_replace.swap(false, Ordering::SeqCst) {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "injected replace failure",
            )));
        }
        self.lock()
            .suggestions
            .insert((user_id, period), suggestions.to_vec());
        Ok(())
    }

    fn fetch_suggestions(&self, user_id: i64, period: Option<Period>) -> Result<Vec<Suggestion>> {
        let state = self.lock();
        let name_of = |id: i64| {
            state
                .categories
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.clone())
                .unwrap_or_default()
        };

        let mut out = Vec::new();
        for ((user, p), rows) in &state.suggestions {
            if *user != user_id || period.is_some_and(|want| want != *p) {
                continue;
            }
            let mut batch: Vec<Suggestion> = rows
                .iter()
                .map(|row| Suggestion {
                    category_id: row.category_id,
                    category_name: name_of(row.category_id),
                    suggested_amount: row.suggested_amount,
                    period: *p,
                })
                .collect();
            batch.sort_by(|a, b| a.category_name.cmp(&b.category_name));
            out.extend(batch);
        }
        Ok(out)
    }
}
