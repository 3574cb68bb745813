//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `resolve_period` / `resolve_optional_period` - Turn `--month`/`--year` into a `Period`
//! - `find_category` - Look up a category by ID or name

use std::path::Path;

use anyhow::{bail, Context, Result};
use tally_core::db::Database;
use tally_core::models::{Category, Period};

use crate::cli::PeriodArgs;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;
    let categories = db.list_categories()?;
    println!("   Categories: {}", categories.len());

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Add categories:    tally categories add Food");
    println!("  2. Set priorities:    tally priorities --user 1 set Food high");
    println!("  3. Record income:     tally income --user 1 base 3000");
    println!("  4. Get suggestions:   tally suggest --user 1");

    Ok(())
}

/// Period from `--month`/`--year`, defaulting to the current month
pub fn resolve_period(args: &PeriodArgs) -> Result<Period> {
    Ok(resolve_optional_period(args)?.unwrap_or_else(Period::current))
}

/// Period from `--month`/`--year`, or `None` when neither is given
///
/// A missing year means the current year. A year without a month is rejected.
pub fn resolve_optional_period(args: &PeriodArgs) -> Result<Option<Period>> {
    match (&args.month, args.year) {
        (None, None) => Ok(None),
        (None, Some(_)) => bail!("--year requires --month"),
        (Some(month), year) => {
            let year = year.unwrap_or_else(|| Period::current().year());
            let period = Period::parse(month, year).context("Invalid --month")?;
            Ok(Some(period))
        }
    }
}

/// Look up a category by numeric ID or name
pub fn find_category(db: &Database, id_or_name: &str) -> Result<Category> {
    db.resolve_category(id_or_name)?
        .ok_or_else(|| anyhow::anyhow!("Category not found: {}", id_or_name))
}
