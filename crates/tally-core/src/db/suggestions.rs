//! Suggestion store operations

use rusqlite::params;
use tracing::debug;

use super::Database;
use crate::error::{Error, Result};
use crate::models::{BudgetProgress, NewSuggestion, Period, Suggestion};

impl Database {
    /// Replace the whole suggestion set for (user, period)
    ///
    /// Delete and inserts run in one transaction: if any insert fails the
    /// previous set is left untouched.
    pub fn replace_suggestions(
        &self,
        user_id: i64,
        period: Period,
        suggestions: &[NewSuggestion],
    ) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let removed = tx.execute(
            "DELETE FROM suggestions WHERE user_id = ? AND month_number = ? AND year = ?",
            params![user_id, period.month(), period.year()],
        )?;

        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO suggestions (user_id, category_id, suggested_amount, month, month_number, year)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )?;
            for s in suggestions {
                stmt.execute(params![
                    user_id,
                    s.category_id,
                    s.suggested_amount,
                    period.month_name(),
                    period.month(),
                    period.year()
                ])?;
            }
        }

        tx.commit()?;

        debug!(
            user_id,
            period = %period,
            removed,
            inserted = suggestions.len(),
            "Replaced suggestion set"
        );
        Ok(())
    }

    /// Fetch a user's suggestions, optionally limited to one period
    pub fn fetch_suggestions(
        &self,
        user_id: i64,
        period: Option<Period>,
    ) -> Result<Vec<Suggestion>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT s.category_id, c.name, s.suggested_amount, s.month_number, s.year
            FROM suggestions s
            INNER JOIN categories c ON s.category_id = c.id
            WHERE s.user_id = ?1
              AND (?2 IS NULL OR (s.month_number = ?2 AND s.year = ?3))
            ORDER BY s.year, s.month_number, c.name
            "#,
        )?;

        let rows = stmt
            .query_map(
                params![
                    user_id,
                    period.map(|p| p.month()),
                    period.map(|p| p.year())
                ],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, f64>(2)?,
                        row.get::<_, u32>(3)?,
                        row.get::<_, i32>(4)?,
                    ))
                },
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(category_id, category_name, suggested_amount, month, year)| {
                Ok(Suggestion {
                    category_id,
                    category_name,
                    suggested_amount,
                    period: Period::new(month, year)?,
                })
            })
            .collect()
    }

    /// Spending so far in each category that has a suggestion for the period
    pub fn budget_progress(&self, user_id: i64, period: Period) -> Result<Vec<BudgetProgress>> {
        let suggestions = self.fetch_suggestions(user_id, Some(period))?;
        if suggestions.is_empty() {
            return Err(Error::NotFound(format!(
                "No suggestions for user {} in {}",
                user_id, period
            )));
        }

        suggestions
            .iter()
            .map(|s| {
                let spent = self.sum_expenses_for_month(
                    user_id,
                    s.category_id,
                    period.year(),
                    period.month(),
                )?;
                Ok(BudgetProgress::new(s, spent))
            })
            .collect()
    }
}
