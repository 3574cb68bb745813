//! Category registry operations

use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::{Error, Result};
use crate::models::Category;

impl Database {
    /// Create or get a category by name
    pub fn upsert_category(&self, name: &str) -> Result<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData("Category name cannot be empty".into()));
        }

        let conn = self.conn()?;

        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM categories WHERE name = ?",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        if let Some(id) = existing {
            return Ok(id);
        }

        conn.execute("INSERT INTO categories (name) VALUES (?)", params![name])?;

        Ok(conn.last_insert_rowid())
    }

    /// List all categories
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, name FROM categories ORDER BY name")?;

        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    /// Get a category by ID
    pub fn get_category(&self, id: i64) -> Result<Option<Category>> {
        let conn = self.conn()?;
        let category = conn
            .query_row(
                "SELECT id, name FROM categories WHERE id = ?",
                params![id],
                |row| {
                    Ok(Category {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(category)
    }

    /// Resolve a category by numeric ID or by name (case-insensitive)
    pub fn resolve_category(&self, id_or_name: &str) -> Result<Option<Category>> {
        if let Ok(id) = id_or_name.trim().parse::<i64>() {
            return self.get_category(id);
        }

        let conn = self.conn()?;
        let category = conn
            .query_row(
                "SELECT id, name FROM categories WHERE name = ? COLLATE NOCASE",
                params![id_or_name.trim()],
                |row| {
                    Ok(Category {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(category)
    }

    /// Fail with `NotFound` unless the category exists
    pub(crate) fn require_category(&self, id: i64) -> Result<Category> {
        self.get_category(id)?
            .ok_or_else(|| Error::NotFound(format!("Category {}", id)))
    }
}
