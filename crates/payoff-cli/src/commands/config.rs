//! Config command

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use payoff_core::config::{default_config_path, resolve_config_path};

use super::load_planner;

pub fn cmd_config(config: Option<&Path>) -> Result<()> {
    print!("{}", render_config(config)?);
    Ok(())
}

/// Config file in use (as TOML comments) followed by the effective settings
pub fn render_config(config: Option<&Path>) -> Result<String> {
    let planner = load_planner(config)?;
    let mut out = String::new();

    match resolve_config_path(config) {
        Some(path) => writeln!(out, "# Konfigurasjonsfil: {}", path.display())?,
        None => {
            writeln!(out, "# Konfigurasjonsfil: (innebygde standardverdier)")?;
            if let Some(path) = default_config_path() {
                writeln!(out, "# Overstyr ved å opprette {}", path.display())?;
            }
        }
    }
    writeln!(out)?;
    out.push_str(&planner.config().to_toml()?);

    Ok(out)
}
