//! Suggestion synthesis
//!
//! Combines per-category forecasts, weights and total income into bounded
//! suggestion amounts. Pure: reads nothing and writes nothing, the engine
//! gathers the inputs and hands the result to the store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::forecast::{forecast_next, Forecast};
use super::weights::{compute_weights, CategoryWeight};
use crate::error::{Error, Result};
use crate::models::{MonthlyTotal, NewSuggestion, Period, PriorityLevel};

/// A prioritized category together with its spending history
#[derive(Debug, Clone)]
pub struct CategoryInput {
    pub category_id: i64,
    pub category_name: String,
    pub level: PriorityLevel,
    pub history: Vec<MonthlyTotal>,
}

/// Everything needed to synthesize one user's suggestions for a period
#[derive(Debug, Clone)]
pub struct SynthesisInput {
    pub user_id: i64,
    pub period: Period,
    /// Month every forecast predicts; the month after today, not after `period`
    pub forecast_target: Period,
    /// Base income plus additional income recorded for the period
    pub total_income: f64,
    /// Prioritized categories only
    pub categories: Vec<CategoryInput>,
    /// Current-period spending for every registered category
    pub current_totals: HashMap<i64, f64>,
}

/// How one category's suggestion was reached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionBreakdown {
    pub category_id: i64,
    pub category_name: String,
    pub level: PriorityLevel,
    pub forecast: Forecast,
    pub weight: CategoryWeight,
    /// `total_income * combined weight`
    pub income_share: f64,
    /// `min(forecast, income_share)` before normalization
    pub candidate: f64,
    /// Final amount after scaling and rounding
    pub suggested_amount: f64,
}

/// Result of a synthesis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synthesis {
    pub period: Period,
    pub total_income: f64,
    pub total_candidate: f64,
    /// Set when candidates exceeded income and were scaled down
    pub scale_factor: Option<f64>,
    pub items: Vec<SuggestionBreakdown>,
}

impl Synthesis {
    /// Rows for the suggestion store
    pub fn new_suggestions(&self) -> Vec<NewSuggestion> {
        self.items
            .iter()
            .map(|item| NewSuggestion {
                category_id: item.category_id,
                suggested_amount: item.suggested_amount,
            })
            .collect()
    }

    pub fn total_suggested(&self) -> f64 {
        self.items.iter().map(|i| i.suggested_amount).sum()
    }
}

/// Round half away from zero to cents
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Factor that brings the candidate total down to income, if it exceeds it
pub fn normalization_factor(total_candidate: f64, total_income: f64) -> Option<f64> {
    (total_candidate > total_income && total_candidate > 0.0)
        .then(|| total_income / total_candidate)
}

/// Produce bounded suggestions for every prioritized category
///
/// Fails with `NoPrioritiesConfigured` when there is nothing to synthesize and
/// with `InsufficientIncomeData` when total income is not positive. Both are
/// checked before any computation.
pub fn synthesize(input: &SynthesisInput) -> Result<Synthesis> {
    if input.categories.is_empty() {
        return Err(Error::NoPrioritiesConfigured {
            user_id: input.user_id,
        });
    }
    if !input.total_income.is_finite() || input.total_income <= 0.0 {
        return Err(Error::InsufficientIncomeData {
            total_income: input.total_income,
        });
    }

    let levels: Vec<(i64, PriorityLevel)> = input
        .categories
        .iter()
        .map(|c| (c.category_id, c.level))
        .collect();
    let weights = compute_weights(&levels, &input.current_totals);
    let target_index = input.forecast_target.index();

    let mut items: Vec<SuggestionBreakdown> = input
        .categories
        .iter()
        .zip(weights)
        .map(|(category, weight)| {
            let forecast = forecast_next(&category.history, target_index);
            let income_share = input.total_income * weight.combined;
            let candidate = forecast.value.min(income_share);

            debug!(
                category = %category.category_name,
                forecast = forecast.value,
                basis = forecast.basis.as_str(),
                priority_weight = weight.priority_weight,
                expense_weight = weight.expense_weight,
                candidate,
                "Category candidate"
            );

            SuggestionBreakdown {
                category_id: category.category_id,
                category_name: category.category_name.clone(),
                level: category.level,
                forecast,
                weight,
                income_share,
                candidate,
                suggested_amount: candidate,
            }
        })
        .collect();

    let total_candidate: f64 = items.iter().map(|i| i.candidate).sum();
    let scale_factor = normalization_factor(total_candidate, input.total_income);
    if let Some(factor) = scale_factor {
        warn!(
            user_id = input.user_id,
            total_candidate,
            total_income = input.total_income,
            factor,
            "Candidates exceed income, scaling down"
        );
    }

    for item in &mut items {
        let scaled = match scale_factor {
            Some(factor) => item.candidate * factor,
            None => item.candidate,
        };
        item.suggested_amount = round_cents(scaled);
    }

    Ok(Synthesis {
        period: input.period,
        total_income: input.total_income,
        total_candidate,
        scale_factor,
        items,
    })
}
