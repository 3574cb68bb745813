//! Priority registry operations

use rusqlite::params;

use super::{map_unique_violation, Database};
use crate::error::{Error, Result};
use crate::models::{Priority, PriorityLevel};

impl Database {
    /// Declare a priority for a (user, category) pair
    ///
    /// Fails with `Conflict` if the pair already has a priority; use
    /// `update_priority` to change an existing level.
    pub fn add_priority(
        &self,
        user_id: i64,
        category_id: i64,
        level: PriorityLevel,
    ) -> Result<i64> {
        self.require_category(category_id)?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO priorities (user_id, category_id, level) VALUES (?, ?, ?)",
            params![user_id, category_id, level.as_str()],
        )
        .map_err(|e| map_unique_violation(e, "Priority already exists for this category"))?;

        Ok(conn.last_insert_rowid())
    }

    /// Change the level of an existing priority
    pub fn update_priority(
        &self,
        user_id: i64,
        category_id: i64,
        level: PriorityLevel,
    ) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE priorities SET level = ? WHERE user_id = ? AND category_id = ?",
            params![level.as_str(), user_id, category_id],
        )?;

        if updated == 0 {
            return Err(Error::NotFound(format!(
                "Priority for user {} and category {}",
                user_id, category_id
            )));
        }
        Ok(())
    }

    /// Remove a priority; returns false if none existed
    pub fn remove_priority(&self, user_id: i64, category_id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM priorities WHERE user_id = ? AND category_id = ?",
            params![user_id, category_id],
        )?;
        Ok(deleted > 0)
    }

    /// List a user's priorities with category names
    pub fn list_priorities(&self, user_id: i64) -> Result<Vec<Priority>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT p.id, p.user_id, p.category_id, c.name, p.level
            FROM priorities p
            INNER JOIN categories c ON p.category_id = c.id
            WHERE p.user_id = ?
            ORDER BY c.name
            "#,
        )?;

        let priorities = stmt
            .query_map(params![user_id], |row| {
                let level_str: String = row.get(4)?;
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                    level_str,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        priorities
            .into_iter()
            .map(|(id, user_id, category_id, category_name, level_str)| {
                let level = level_str.parse::<PriorityLevel>().map_err(Error::InvalidData)?;
                Ok(Priority {
                    id,
                    user_id,
                    category_id,
                    category_name,
                    level,
                })
            })
            .collect()
    }
}
