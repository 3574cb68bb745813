//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod categories;
pub mod health;
pub mod ledger;
pub mod priorities;
pub mod suggestions;

// Re-export all handlers for use in router
pub use categories::*;
pub use health::*;
pub use ledger::*;
pub use priorities::*;
pub use suggestions::*;

use axum::body::Bytes;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{AppError, MAX_BODY_SIZE};
use tally_core::models::Period;

/// Parse a JSON request body, rejecting oversized or malformed input
pub(crate) fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    if body.len() > MAX_BODY_SIZE {
        return Err(AppError::bad_request("Request body too large"));
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::bad_request(&format!("Invalid JSON: {}", e)))
}

/// `?month=&year=` query parameters
///
/// `month` accepts a number or a name. A missing year means the current year.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub month: Option<String>,
    pub year: Option<i32>,
}

impl PeriodQuery {
    /// The requested period, or `None` when neither parameter is present
    pub fn optional(&self) -> Result<Option<Period>, AppError> {
        match (&self.month, self.year) {
            (None, None) => Ok(None),
            (None, Some(_)) => Err(AppError::bad_request("year given without month")),
            (Some(month), year) => {
                let year = year.unwrap_or_else(|| Period::current().year());
                Period::parse(month, year)
                    .map(Some)
                    .map_err(|e| AppError::bad_request(&e.to_string()))
            }
        }
    }

    /// The requested period, defaulting to the current month
    pub fn or_current(&self) -> Result<Period, AppError> {
        Ok(self.optional()?.unwrap_or_else(Period::current))
    }
}
