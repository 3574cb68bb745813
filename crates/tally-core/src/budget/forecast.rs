//! Trend forecasting over a monthly spending series
//!
//! Fits an ordinary least-squares line of monthly total against period index
//! and evaluates it at a target month. Fewer than two points is not an error:
//! the forecaster falls back to the last observed total (or zero).

use serde::{Deserialize, Serialize};

use crate::models::MonthlyTotal;

/// How a forecast value was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastBasis {
    /// Linear trend over two or more months
    Trend,
    /// Single month of history, reported unchanged
    LastObserved,
    /// No history at all
    NoHistory,
}

impl ForecastBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trend => "trend",
            Self::LastObserved => "last_observed",
            Self::NoHistory => "no_history",
        }
    }

    /// True for the insufficient-history fallbacks
    pub fn is_degenerate(&self) -> bool {
        !matches!(self, Self::Trend)
    }
}

/// Predicted spending for a target month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Predicted total, never negative
    pub value: f64,
    pub basis: ForecastBasis,
    pub target_index: i32,
}

/// Least-squares line `total = slope * index + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearTrend {
    /// Fit over all points; `None` with fewer than two distinct indexes
    pub fn fit(series: &[MonthlyTotal]) -> Option<Self> {
        if series.len() < 2 {
            return None;
        }

        let n = series.len() as f64;
        let mean_x = series.iter().map(|p| p.period_index as f64).sum::<f64>() / n;
        let mean_y = series.iter().map(|p| p.total).sum::<f64>() / n;

        // Centered sums keep precision with indexes around 24_000
        let (sxy, sxx) = series.iter().fold((0.0, 0.0), |(sxy, sxx), p| {
            let dx = p.period_index as f64 - mean_x;
            (sxy + dx * (p.total - mean_y), sxx + dx * dx)
        });

        if sxx == 0.0 {
            return None;
        }

        let slope = sxy / sxx;
        Some(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn predict(&self, index: i32) -> f64 {
        self.slope * index as f64 + self.intercept
    }
}

/// Forecast the total at `target_index` from a chronological series
///
/// The target is chosen by the caller (the month after the budgeted month),
/// not derived from the last data point, so stale history extrapolates across
/// the gap.
pub fn forecast_next(series: &[MonthlyTotal], target_index: i32) -> Forecast {
    match LinearTrend::fit(series) {
        Some(trend) => Forecast {
            value: trend.predict(target_index).max(0.0),
            basis: ForecastBasis::Trend,
            target_index,
        },
        None => match series.last() {
            Some(last) => Forecast {
                value: last.total.max(0.0),
                basis: ForecastBasis::LastObserved,
                target_index,
            },
            None => Forecast {
                value: 0.0,
                basis: ForecastBasis::NoHistory,
                target_index,
            },
        },
    }
}
