//! CLI argument definitions using clap
//!
//! The command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Payoff - plan your way out of debt
#[derive(Parser)]
#[command(name = "payoff")]
#[command(about = "Explainable debt payoff planner", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Planner configuration file (TOML)
    ///
    /// Defaults to <data dir>/payoff/config/planner.toml when present,
    /// otherwise the built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a debt portfolio and print the full state as JSON
    Analyze {
        /// Request file: {"userId", "debts": [...], "income": {...}} or a bare debt array
        #[arg(short, long)]
        input: PathBuf,

        /// User id (overrides the one in the request)
        #[arg(short, long)]
        user: Option<String>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        /// Write JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show a payoff dashboard for a debt portfolio
    Summary {
        /// Request file (same format as `analyze`)
        #[arg(short, long)]
        input: PathBuf,

        /// User id (overrides the one in the request)
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Show the config file in use and the effective settings
    Config,
}
