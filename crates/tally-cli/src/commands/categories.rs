//! Category command implementations

use anyhow::Result;
use tally_core::db::Database;

pub fn cmd_categories_list(db: &Database) -> Result<()> {
    let categories = db.list_categories()?;

    if categories.is_empty() {
        println!("No categories yet. Add one with:");
        println!("  tally categories add Food");
        return Ok(());
    }

    println!();
    println!("🏷️  Categories");
    println!("   ─────────────────────────────");
    for category in categories {
        println!("   {:>4}  {}", category.id, category.name);
    }

    Ok(())
}

pub fn cmd_categories_add(db: &Database, name: &str) -> Result<()> {
    let id = db.upsert_category(name)?;
    println!("✅ Category '{}' (ID: {})", name.trim(), id);
    Ok(())
}
