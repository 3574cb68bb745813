//! Priority command implementations

use anyhow::Result;
use tally_core::db::Database;
use tally_core::models::PriorityLevel;

use super::{find_category, truncate};

pub fn cmd_priorities_list(db: &Database, user_id: i64) -> Result<()> {
    let priorities = db.list_priorities(user_id)?;

    if priorities.is_empty() {
        println!("No priorities for user {}. Set one with:", user_id);
        println!("  tally priorities --user {} set Food high", user_id);
        return Ok(());
    }

    println!();
    println!("🎯 Priorities for user {}", user_id);
    println!("   ─────────────────────────────");
    for priority in priorities {
        println!(
            "   {:20} │ {}",
            truncate(&priority.category_name, 20),
            priority.level
        );
    }

    Ok(())
}

/// Add a priority, or change its level if the category already has one
pub fn cmd_priorities_set(db: &Database, user_id: i64, category: &str, level: &str) -> Result<()> {
    let category = find_category(db, category)?;
    let level: PriorityLevel = level.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let exists = db
        .list_priorities(user_id)?
        .iter()
        .any(|p| p.category_id == category.id);

    if exists {
        db.update_priority(user_id, category.id, level)?;
        println!("✅ {} is now {} priority", category.name, level);
    } else {
        db.add_priority(user_id, category.id, level)?;
        println!("✅ {} added as {} priority", category.name, level);
    }

    Ok(())
}

pub fn cmd_priorities_remove(db: &Database, user_id: i64, category: &str) -> Result<()> {
    let category = find_category(db, category)?;

    if db.remove_priority(user_id, category.id)? {
        println!("✅ Removed priority for {}", category.name);
    } else {
        println!("No priority set for {}", category.name);
    }

    Ok(())
}
