//! Analyze command and shared loading helpers
//!
//! This module contains:
//! - `load_planner` - Build a planner from the resolved configuration
//! - `read_request` - Read an analysis request from a JSON file
//! - `run_analysis` - Load both and run the planner
//! - `cmd_analyze` - Print or write the full analysis state

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use payoff_core::{AgentState, AnalysisRequest, DebtPlanner, PlannerConfig};
use serde_json::Value;

/// Build a planner from `--config`, the data-dir override, or the defaults
pub fn load_planner(config: Option<&Path>) -> Result<DebtPlanner> {
    let config = PlannerConfig::load(config).context("Failed to load planner configuration")?;
    Ok(DebtPlanner::with_config(config))
}

/// Read a request envelope, or a bare array of debt records
pub fn read_request(path: &Path, user: Option<&str>) -> Result<AnalysisRequest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    let mut request = match value {
        Value::Array(debts) => AnalysisRequest::new(debts, None),
        other => serde_json::from_value(other)
            .with_context(|| format!("Invalid analysis request in {}", path.display()))?,
    };

    if let Some(user) = user {
        request = request.with_user(user);
    }
    Ok(request)
}

/// Load configuration and input, then run the full analysis
pub fn run_analysis(
    config: Option<&Path>,
    input: &Path,
    user: Option<&str>,
) -> Result<AgentState> {
    let planner = load_planner(config)?;
    let request = read_request(input, user)?;

    tracing::debug!(
        input = %input.display(),
        debts = request.debts.len(),
        "Running analysis"
    );

    planner
        .analyze(&request)
        .with_context(|| format!("Analysis of {} failed", input.display()))
}

pub fn cmd_analyze(
    config: Option<&Path>,
    input: &Path,
    user: Option<&str>,
    pretty: bool,
    output: Option<&Path>,
) -> Result<()> {
    let state = run_analysis(config, input, user)?;

    let json = if pretty {
        serde_json::to_string_pretty(&state)
    } else {
        serde_json::to_string(&state)
    }
    .context("Failed to serialize analysis")?;

    match output {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("✅ Analysis written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
