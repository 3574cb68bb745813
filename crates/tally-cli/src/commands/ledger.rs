//! Expense and income command implementations

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tally_core::db::Database;
use tally_core::models::{NewExpense, Period};

use super::find_category;

pub fn cmd_expense_add(
    db: &Database,
    user_id: i64,
    category: &str,
    amount: f64,
    date: Option<&str>,
    details: Option<&str>,
) -> Result<()> {
    let category = find_category(db, category)?;
    let date = date
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("Invalid --date format (use YYYY-MM-DD)")?
        .unwrap_or_else(|| Local::now().date_naive());

    let id = db.add_expense(
        user_id,
        &NewExpense {
            category_id: category.id,
            amount,
            date,
            details: details.map(String::from),
            source: Some("cli".to_string()),
        },
    )?;

    println!(
        "✅ Recorded ${:.2} for {} on {} (ID: {})",
        amount, category.name, date, id
    );
    Ok(())
}

pub fn cmd_income_show(db: &Database, user_id: i64, period: Period) -> Result<()> {
    let base = db.get_base_income(user_id)?;
    let records = db.list_income(user_id, period)?;
    let additional: f64 = records.iter().map(|r| r.amount).sum();

    println!();
    println!("💰 Income for user {} in {}", user_id, period);
    println!("   ─────────────────────────────");
    println!("   Base income:       ${:>10.2}", base);
    for record in &records {
        println!("   + Additional:      ${:>10.2}", record.amount);
    }
    println!("   Total:             ${:>10.2}", base + additional);

    Ok(())
}

pub fn cmd_income_base(db: &Database, user_id: i64, amount: f64) -> Result<()> {
    db.set_base_income(user_id, amount)?;
    println!("✅ Base income for user {} set to ${:.2}", user_id, amount);
    Ok(())
}

pub fn cmd_income_add(db: &Database, user_id: i64, amount: f64, period: Period) -> Result<()> {
    db.add_income(user_id, amount, period)?;
    println!(
        "✅ Recorded ${:.2} additional income for {}",
        amount, period
    );
    Ok(())
}
