//! Error types for Tally

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No priorities configured for user {user_id}")]
    NoPrioritiesConfigured { user_id: i64 },

    #[error("No valid income data available (total income {total_income:.2})")]
    InsufficientIncomeData { total_income: f64 },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl Error {
    /// True for failures raised by the underlying store rather than by the
    /// suggestion logic itself. A generation that fails this way was not applied.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Pool(_) | Self::Encryption(_) | Self::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
