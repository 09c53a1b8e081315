//! Payoff CLI - debt payoff planner
//!
//! Usage:
//!   payoff analyze --input debts.json     Full analysis as JSON
//!   payoff summary --input debts.json     Human-readable dashboard
//!   payoff config                         Show effective configuration

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // stdout carries the analysis output
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Analyze {
            input,
            user,
            pretty,
            output,
        } => commands::cmd_analyze(config, &input, user.as_deref(), pretty, output.as_deref()),
        Commands::Summary { input, user } => {
            commands::cmd_summary(config, &input, user.as_deref())
        }
        Commands::Config => commands::cmd_config(config),
    }
}
