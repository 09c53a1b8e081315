//! CLI command implementations
//!
//! Commands are organized by purpose:
//! - `analyze` - Full analysis as JSON, plus shared loading helpers
//! - `summary` - Human-readable payoff dashboard
//! - `config` - Effective configuration

pub mod analyze;
pub mod config;
pub mod summary;

// Re-export command functions for main.rs
pub use analyze::*;
pub use config::*;
pub use summary::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
