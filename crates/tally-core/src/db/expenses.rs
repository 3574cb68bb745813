//! Expense ledger operations

use chrono::NaiveDate;
use rusqlite::{params, types::Type};

use super::Database;
use crate::error::{Error, Result};
use crate::models::{Expense, MonthBucket, NewExpense, Period};

impl Database {
    /// Record an expense for a user
    pub fn add_expense(&self, user_id: i64, expense: &NewExpense) -> Result<i64> {
        if !expense.amount.is_finite() || expense.amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "Expense amount must be a non-negative number, got {}",
                expense.amount
            )));
        }
        self.require_category(expense.category_id)?;

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO expenses (user_id, category_id, amount, date, details, source)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                expense.category_id,
                expense.amount,
                expense.date.to_string(),
                expense.details,
                expense.source
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List a user's expenses, newest first, optionally limited to one period
    pub fn list_expenses(&self, user_id: i64, period: Option<Period>) -> Result<Vec<Expense>> {
        let conn = self.conn()?;

        // ISO dates compare correctly as text
        let (from, to) = match period {
            Some(p) => (p.first_day().to_string(), p.next().first_day().to_string()),
            None => ("0000-01-01".to_string(), "9999-12-31".to_string()),
        };

        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, category_id, amount, date, details, source
            FROM expenses
            WHERE user_id = ? AND date >= ? AND date < ?
            ORDER BY date DESC, id DESC
            "#,
        )?;

        let expenses = stmt
            .query_map(params![user_id, from, to], |row| {
                let date_str: String = row.get(4)?;
                let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
                })?;
                Ok(Expense {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    category_id: row.get(2)?,
                    amount: row.get(3)?,
                    date,
                    details: row.get(5)?,
                    source: row.get(6)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    /// Total spent by a user in one category during one calendar month
    pub fn sum_expenses_for_month(
        &self,
        user_id: i64,
        category_id: i64,
        year: i32,
        month: u32,
    ) -> Result<f64> {
        let period = Period::new(month, year)?;
        let conn = self.conn()?;

        let total: f64 = conn.query_row(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM expenses
            WHERE user_id = ? AND category_id = ? AND date >= ? AND date < ?
            "#,
            params![
                user_id,
                category_id,
                period.first_day().to_string(),
                period.next().first_day().to_string()
            ],
            |row| row.get(0),
        )?;

        Ok(total)
    }

    /// Monthly totals for one user and category, oldest month first
    ///
    /// Months without expenses are absent.
    pub fn monthly_expense_buckets(
        &self,
        user_id: i64,
        category_id: i64,
    ) -> Result<Vec<MonthBucket>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT CAST(strftime('%Y', date) AS INTEGER) AS year,
                   CAST(strftime('%m', date) AS INTEGER) AS month,
                   SUM(amount)
            FROM expenses
            WHERE user_id = ? AND category_id = ?
            GROUP BY year, month
            ORDER BY year, month
            "#,
        )?;

        let buckets = stmt
            .query_map(params![user_id, category_id], |row| {
                Ok(MonthBucket {
                    year: row.get(0)?,
                    month: row.get(1)?,
                    total: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(buckets)
    }
}
