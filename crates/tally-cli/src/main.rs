//! Tally CLI - Budget suggestion engine
//!
//! Usage:
//!   tally init                          Initialize database
//!   tally priorities -u 1 set Food high Declare a priority
//!   tally suggest -u 1                  Generate suggestions for this month
//!   tally serve --port 3000             Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Categories { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(CategoriesAction::List) => commands::cmd_categories_list(&db),
                Some(CategoriesAction::Add { name }) => commands::cmd_categories_add(&db, &name),
            }
        }
        Commands::Priorities { user, action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(PrioritiesAction::List) => commands::cmd_priorities_list(&db, user),
                Some(PrioritiesAction::Set { category, level }) => {
                    commands::cmd_priorities_set(&db, user, &category, &level)
                }
                Some(PrioritiesAction::Remove { category }) => {
                    commands::cmd_priorities_remove(&db, user, &category)
                }
            }
        }
        Commands::Expense {
            user,
            category,
            amount,
            date,
            details,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_expense_add(
                &db,
                user,
                &category,
                amount,
                date.as_deref(),
                details.as_deref(),
            )
        }
        Commands::Income {
            user,
            action,
            period,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let period = commands::resolve_period(&period)?;
            match action {
                None => commands::cmd_income_show(&db, user, period),
                Some(IncomeAction::Base { amount }) => {
                    commands::cmd_income_base(&db, user, amount)
                }
                Some(IncomeAction::Add { amount }) => {
                    commands::cmd_income_add(&db, user, amount, period)
                }
            }
        }
        Commands::Suggest {
            user,
            period,
            dry_run,
            json,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let period = commands::resolve_period(&period)?;
            if dry_run {
                commands::cmd_suggest_preview(&db, user, period, json)
            } else {
                commands::cmd_suggest(&db, user, period, json)
            }
        }
        Commands::Suggestions { user, period, json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let period = commands::resolve_optional_period(&period)?;
            commands::cmd_suggestions_list(&db, user, period, json)
        }
        Commands::Progress { user, period } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let period = commands::resolve_period(&period)?;
            commands::cmd_progress(&db, user, period)
        }
        Commands::Serve {
            port,
            host,
            static_dir,
        } => {
            commands::cmd_serve(&cli.db, &host, port, cli.no_encrypt, static_dir.as_deref())
                .await
        }
    }
}
