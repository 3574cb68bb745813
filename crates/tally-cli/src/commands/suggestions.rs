//! Suggestion command implementations

use anyhow::Result;
use tally_core::db::Database;
use tally_core::models::{Period, Suggestion};
use tally_core::SuggestionEngine;

use super::truncate;

pub fn cmd_suggest(db: &Database, user_id: i64, period: Period, json: bool) -> Result<()> {
    let suggestions = SuggestionEngine::new(db).generate(user_id, period)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    println!();
    println!("✨ Suggestions for user {} in {}", user_id, period);
    print_suggestions(&suggestions);
    println!();
    println!("   Track spending with: tally progress --user {}", user_id);

    Ok(())
}

/// `suggest --dry-run`: full breakdown, nothing stored
pub fn cmd_suggest_preview(db: &Database, user_id: i64, period: Period, json: bool) -> Result<()> {
    let synthesis = SuggestionEngine::new(db).explain(user_id, period)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&synthesis)?);
        return Ok(());
    }

    println!();
    println!("🔎 Preview for user {} in {} (not saved)", user_id, period);
    println!("   Total income: ${:.2}", synthesis.total_income);
    println!("   ─────────────────────────────────────────────────────────────────────────");
    println!(
        "   {:20} │ {:>6} │ {:>10} {:13} │ {:>6} │ {:>10}",
        "Category", "Level", "Forecast", "", "Weight", "Suggested"
    );
    for item in &synthesis.items {
        println!(
            "   {:20} │ {:>6} │ {:>10.2} {:13} │ {:>6.3} │ {:>10.2}",
            truncate(&item.category_name, 20),
            item.level,
            item.forecast.value,
            format!("({})", item.forecast.basis.as_str()),
            item.weight.combined,
            item.suggested_amount
        );
    }
    println!("   ─────────────────────────────────────────────────────────────────────────");
    println!("   Total suggested: ${:.2}", synthesis.total_suggested());
    if let Some(factor) = synthesis.scale_factor {
        println!("   ⚠️  Scaled down by {:.3} to fit income", factor);
    }

    Ok(())
}

pub fn cmd_suggestions_list(
    db: &Database,
    user_id: i64,
    period: Option<Period>,
    json: bool,
) -> Result<()> {
    let suggestions = SuggestionEngine::new(db).fetch(user_id, period)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    if suggestions.is_empty() {
        println!("No suggestions stored for user {}. Run:", user_id);
        println!("  tally suggest --user {}", user_id);
        return Ok(());
    }

    // Grouped by period, oldest first
    let mut current: Option<Period> = None;
    let mut group = Vec::new();
    for suggestion in suggestions {
        if current.is_some_and(|p| p != suggestion.period) {
            print_period_group(current, &group);
            group.clear();
        }
        current = Some(suggestion.period);
        group.push(suggestion);
    }
    print_period_group(current, &group);

    Ok(())
}

pub fn cmd_progress(db: &Database, user_id: i64, period: Period) -> Result<()> {
    let progress = db.budget_progress(user_id, period)?;

    println!();
    println!("📊 Budget progress for user {} in {}", user_id, period);
    println!("   ─────────────────────────────────────────────────────────────");
    for item in progress {
        let icon = if item.is_over_budget() { "🔴" } else { "🟢" };
        println!(
            "   {} {:20} │ ${:>9.2} of ${:>9.2} │ {:>5.1}%",
            icon,
            truncate(&item.category_name, 20),
            item.spent,
            item.suggested_amount,
            item.percent_used
        );
    }

    Ok(())
}

fn print_period_group(period: Option<Period>, group: &[Suggestion]) {
    if let Some(period) = period {
        println!();
        println!("📅 {}", period);
        print_suggestions(group);
    }
}

fn print_suggestions(suggestions: &[Suggestion]) {
    println!("   ─────────────────────────────");
    for suggestion in suggestions {
        println!(
            "   {:20} │ ${:>10.2}",
            truncate(&suggestion.category_name, 20),
            suggestion.suggested_amount
        );
    }
    let total: f64 = suggestions.iter().map(|s| s.suggested_amount).sum();
    println!("   ─────────────────────────────");
    println!("   {:20} │ ${:>10.2}", "Total", total);
}
