//! Category weights: how much of total income a category may claim

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::PriorityLevel;

/// Share of the combined weight taken from the declared priority
pub const PRIORITY_SHARE: f64 = 0.6;

/// Share of the combined weight taken from current-period spending
pub const EXPENSE_SHARE: f64 = 0.4;

/// Weights of one prioritized category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeight {
    pub category_id: i64,
    /// Priority weight normalized over the user's prioritized categories
    pub priority_weight: f64,
    /// Category's share of all current-period spending
    pub expense_weight: f64,
    pub combined: f64,
}

/// Compute weights for each prioritized category
///
/// `current_totals` holds this period's spending for every category in the
/// registry; categories without a priority still count toward the expense
/// denominator. Output order follows `priorities`.
pub fn compute_weights(
    priorities: &[(i64, PriorityLevel)],
    current_totals: &HashMap<i64, f64>,
) -> Vec<CategoryWeight> {
    let priority_total: f64 = priorities.iter().map(|(_, level)| level.weight()).sum();
    let expense_total: f64 = current_totals.values().sum();

    priorities
        .iter()
        .map(|&(category_id, level)| {
            let priority_weight = if priority_total > 0.0 {
                level.weight() / priority_total
            } else {
                0.0
            };

            let expense_weight = if expense_total > 0.0 {
                current_totals.get(&category_id).copied().unwrap_or(0.0) / expense_total
            } else {
                0.0
            };

            CategoryWeight {
                category_id,
                priority_weight,
                expense_weight,
                combined: PRIORITY_SHARE * priority_weight + EXPENSE_SHARE * expense_weight,
            }
        })
        .collect()
}
