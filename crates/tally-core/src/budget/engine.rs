//! Suggestion engine: gathers inputs from a store, synthesizes, persists

use std::collections::HashMap;

use tracing::{debug, info};

use super::history::monthly_series;
use super::store::{BudgetStore, SuggestionStore};
use super::synthesizer::{synthesize, CategoryInput, Synthesis, SynthesisInput};
use crate::error::Result;
use crate::models::{Period, Suggestion};

/// Generates and retrieves budget suggestions against an explicit store
pub struct SuggestionEngine<'a, S: ?Sized> {
    store: &'a S,
    /// Fixed forecast month; `None` means the month after today
    forecast_target: Option<Period>,
}

impl<'a, S: ?Sized> SuggestionEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            forecast_target: None,
        }
    }

    /// Forecast a fixed month instead of the month after today
    pub fn with_forecast_target(mut self, target: Period) -> Self {
        self.forecast_target = Some(target);
        self
    }

    /// The month every category forecast predicts
    ///
    /// Always relative to the real-world date, whatever period is being budgeted.
    pub fn forecast_target(&self) -> Period {
        self.forecast_target.unwrap_or_else(|| Period::current().next())
    }
}

impl<'a, S: BudgetStore + ?Sized> SuggestionEngine<'a, S> {
    /// Compute suggestions for the period without persisting them
    pub fn explain(&self, user_id: i64, period: Period) -> Result<Synthesis> {
        let input = self.load_input(user_id, period)?;
        synthesize(&input)
    }

    /// Compute suggestions for the period and replace the stored set
    ///
    /// On any error the stored set for (user, period) is left as it was.
    /// The returned list is ordered by category name, as `fetch` returns it.
    pub fn generate(&self, user_id: i64, period: Period) -> Result<Vec<Suggestion>> {
        info!(user_id, period = %period, "Generating budget suggestions");

        let synthesis = self.explain(user_id, period)?;
        self.store
            .replace_suggestions(user_id, period, &synthesis.new_suggestions())?;

        let mut suggestions: Vec<Suggestion> = synthesis
            .items
            .into_iter()
            .map(|item| Suggestion {
                category_id: item.category_id,
                category_name: item.category_name,
                suggested_amount: item.suggested_amount,
                period,
            })
            .collect();
        suggestions.sort_by(|a, b| a.category_name.cmp(&b.category_name));

        info!(
            "Generated {} suggestions for user {} in {} (income {:.2})",
            suggestions.len(),
            user_id,
            period,
            synthesis.total_income
        );
        Ok(suggestions)
    }

    fn load_input(&self, user_id: i64, period: Period) -> Result<SynthesisInput> {
        let priorities = self.store.list_priorities(user_id)?;

        let mut current_totals = HashMap::new();
        for category in self.store.list_categories()? {
            let total = self.store.sum_by_category_month(
                user_id,
                category.id,
                period.year(),
                period.month(),
            )?;
            current_totals.insert(category.id, total);
        }

        let categories = priorities
            .into_iter()
            .map(|p| {
                Ok(CategoryInput {
                    history: monthly_series(self.store, user_id, p.category_id)?,
                    category_id: p.category_id,
                    category_name: p.category_name,
                    level: p.level,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let base = self.store.base_income(user_id)?;
        let additional = self.store.sum_additional_income(user_id, period)?;

        debug!(
            user_id,
            prioritized = categories.len(),
            registered = current_totals.len(),
            base,
            additional,
            "Loaded synthesis input"
        );

        Ok(SynthesisInput {
            user_id,
            period,
            forecast_target: self.forecast_target(),
            total_income: base + additional,
            categories,
            current_totals,
        })
    }
}

impl<'a, S: SuggestionStore + ?Sized> SuggestionEngine<'a, S> {
    /// Stored suggestions, optionally restricted to one period
    pub fn fetch(&self, user_id: i64, period: Option<Period>) -> Result<Vec<Suggestion>> {
        self.store.fetch_suggestions(user_id, period)
    }
}
