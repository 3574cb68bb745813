//! Income operations: fixed base income and the additional income ledger

use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::{Error, Result};
use crate::models::{IncomeRecord, Period};

fn validate_amount(amount: f64, what: &str) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidData(format!(
            "{} must be a non-negative number, got {}",
            what, amount
        )));
    }
    Ok(())
}

impl Database {
    /// Set a user's fixed base income (salary)
    pub fn set_base_income(&self, user_id: i64, amount: f64) -> Result<()> {
        validate_amount(amount, "Base income")?;

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO users (id, base_income) VALUES (?1, ?2)
            ON CONFLICT(id) DO UPDATE SET base_income = ?2, updated_at = CURRENT_TIMESTAMP
            "#,
            params![user_id, amount],
        )?;
        Ok(())
    }

    /// A user's base income; 0 if never set
    pub fn get_base_income(&self, user_id: i64) -> Result<f64> {
        let conn = self.conn()?;
        let amount: Option<f64> = conn
            .query_row(
                "SELECT base_income FROM users WHERE id = ?",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(amount.unwrap_or(0.0))
    }

    /// Record additional income for a period
    pub fn add_income(&self, user_id: i64, amount: f64, period: Period) -> Result<i64> {
        validate_amount(amount, "Income amount")?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO additional_income (user_id, amount, month) VALUES (?, ?, ?)",
            params![user_id, amount, period.income_label()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// List additional income records for a period
    pub fn list_income(&self, user_id: i64, period: Period) -> Result<Vec<IncomeRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, amount, month
            FROM additional_income
            WHERE user_id = ? AND month = ?
            ORDER BY id
            "#,
        )?;

        let records = stmt
            .query_map(params![user_id, period.income_label()], |row| {
                Ok(IncomeRecord {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    amount: row.get(2)?,
                    month: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Sum of additional income for a period
    pub fn sum_income(&self, user_id: i64, period: Period) -> Result<f64> {
        let conn = self.conn()?;
        let total: f64 = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM additional_income WHERE user_id = ? AND month = ?",
            params![user_id, period.income_label()],
            |row| row.get(0),
        )?;
        Ok(total)
    }
}
