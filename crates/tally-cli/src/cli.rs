//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Tally - Budget suggestions from your priorities and spending history
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Self-hosted budget suggestion engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "tally.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set TALLY_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Optional budgeting period (both default to the current month)
#[derive(Args, Debug, Clone, Default)]
pub struct PeriodArgs {
    /// Month, as a number (10) or a name (October)
    #[arg(long)]
    pub month: Option<String>,

    /// Year (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// List or add spending categories
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// List or change a user's category priorities
    Priorities {
        /// User ID
        #[arg(short, long)]
        user: i64,

        #[command(subcommand)]
        action: Option<PrioritiesAction>,
    },

    /// Record an expense
    Expense {
        /// User ID
        #[arg(short, long)]
        user: i64,

        /// Category ID or name
        #[arg(short, long)]
        category: String,

        /// Amount spent
        #[arg(short, long)]
        amount: f64,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Free-form note
        #[arg(long)]
        details: Option<String>,
    },

    /// Show or record income
    Income {
        /// User ID
        #[arg(short, long)]
        user: i64,

        #[command(subcommand)]
        action: Option<IncomeAction>,

        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Generate budget suggestions for a period
    Suggest {
        /// User ID
        #[arg(short, long)]
        user: i64,

        #[command(flatten)]
        period: PeriodArgs,

        /// Show the per-category breakdown without storing anything
        #[arg(long)]
        dry_run: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show stored suggestions (all periods unless --month is given)
    Suggestions {
        /// User ID
        #[arg(short, long)]
        user: i64,

        #[command(flatten)]
        period: PeriodArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show spending against stored suggestions
    Progress {
        /// User ID
        #[arg(short, long)]
        user: i64,

        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// List all categories
    List,

    /// Add a category (no-op if it already exists)
    Add {
        /// Category name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum PrioritiesAction {
    /// List priorities
    List,

    /// Set a category's priority (adds it or changes the level)
    Set {
        /// Category ID or name
        category: String,

        /// Priority level: high, medium, low
        level: String,
    },

    /// Remove a category's priority
    Remove {
        /// Category ID or name
        category: String,
    },
}

#[derive(Subcommand)]
pub enum IncomeAction {
    /// Set the base (salary) income
    Base {
        /// Amount per month
        amount: f64,
    },

    /// Record additional income for a period
    Add {
        /// Amount received
        amount: f64,
    },
}
