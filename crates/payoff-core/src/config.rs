//! Planner configuration
//!
//! Every heuristic the engine uses (budget multiplier, confidence scores,
//! bucket thresholds, consolidation parameters) lives here.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a three-layer resolution:
//! 1. Explicit path (e.g. `payoff --config planner.toml`)
//! 2. Override in data dir (~/.local/share/payoff/config/planner.toml)
//! 3. Embedded defaults (compiled into binary)
//!
//! Keys missing from an override file keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::StrategyKind;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/planner.toml");

/// Monthly budget policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Monthly budget = sum of minimum payments x multiplier
    pub multiplier: f64,
    /// Term assumed when a debt has no remaining term
    pub default_term_months: u32,
}

/// Fixed confidence score per strategy kind (0-100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceConfig {
    pub snowball: u8,
    pub avalanche: u8,
    pub hybrid: u8,
}

impl ConfidenceConfig {
    pub fn for_kind(&self, kind: StrategyKind) -> u8 {
        match kind {
            StrategyKind::Snowball => self.snowball,
            StrategyKind::Avalanche => self.avalanche,
            StrategyKind::Hybrid => self.hybrid,
        }
    }
}

/// Bucket and selection thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub high_interest_rate: f64,
    pub small_balance: f64,
    pub large_balance: f64,
    pub hybrid_balance_cutoff: f64,
    pub quick_win_balance: f64,
    pub quick_win_count: usize,
    pub high_dti: f64,
    pub small_balance_min_rate: f64,
    pub savings_baseline_rate: f64,
}

/// Portfolio consolidation heuristics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidationConfig {
    /// Consolidation is suggested when there are more debts than this
    pub min_debts: usize,
    pub priority_rate: f64,
    pub target_rate: f64,
}

/// Complete planner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub budget: BudgetConfig,
    pub confidence: ConfidenceConfig,
    pub thresholds: ThresholdConfig,
    pub consolidation: ConsolidationConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            budget: BudgetConfig {
                multiplier: 1.2,
                default_term_months: 60,
            },
            confidence: ConfidenceConfig {
                snowball: 85,
                avalanche: 95,
                hybrid: 80,
            },
            thresholds: ThresholdConfig {
                high_interest_rate: 15.0,
                small_balance: 10_000.0,
                large_balance: 100_000.0,
                hybrid_balance_cutoff: 20_000.0,
                quick_win_balance: 20_000.0,
                quick_win_count: 2,
                high_dti: 40.0,
                small_balance_min_rate: 10.0,
                savings_baseline_rate: 10.0,
            },
            consolidation: ConsolidationConfig {
                min_debts: 3,
                priority_rate: 12.0,
                target_rate: 8.0,
            },
        }
    }
}

impl PlannerConfig {
    /// Load configuration (explicit path, then data-dir override, then embedded)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let content = match resolve_config_path(override_path) {
            Some(path) => fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            })?,
            None => DEFAULT_CONFIG.to_string(),
        };

        parse_config(&content)
    }

    /// The embedded defaults, parsed
    pub fn embedded() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to render config: {}", e)))
    }

    /// Reject values that would make the engine produce nonsense
    pub fn validate(&self) -> Result<()> {
        if !self.budget.multiplier.is_finite() || self.budget.multiplier <= 0.0 {
            return Err(Error::Config(format!(
                "budget.multiplier must be positive, got {}",
                self.budget.multiplier
            )));
        }
        if self.budget.default_term_months == 0 {
            return Err(Error::Config(
                "budget.default_term_months must be at least 1".to_string(),
            ));
        }

        for kind in StrategyKind::all() {
            let score = self.confidence.for_kind(*kind);
            if score > 100 {
                return Err(Error::Config(format!(
                    "confidence.{} must be within 0-100, got {}",
                    kind, score
                )));
            }
        }

        let t = &self.thresholds;
        let c = &self.consolidation;
        let amounts = [
            ("thresholds.high_interest_rate", t.high_interest_rate),
            ("thresholds.small_balance", t.small_balance),
            ("thresholds.large_balance", t.large_balance),
            ("thresholds.hybrid_balance_cutoff", t.hybrid_balance_cutoff),
            ("thresholds.quick_win_balance", t.quick_win_balance),
            ("thresholds.high_dti", t.high_dti),
            ("thresholds.small_balance_min_rate", t.small_balance_min_rate),
            ("thresholds.savings_baseline_rate", t.savings_baseline_rate),
            ("consolidation.priority_rate", c.priority_rate),
            ("consolidation.target_rate", c.target_rate),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("payoff").join("config").join("planner.toml"))
}

/// The file `PlannerConfig::load` would read, or `None` for embedded defaults
///
/// An explicit path must exist; the data-dir override is only used when present.
pub fn resolve_config_path(override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path.to_path_buf());
    }
    default_config_path().filter(|p| p.exists())
}

/// Raw config structure for TOML parsing
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    budget: Option<RawBudget>,
    confidence: Option<RawConfidence>,
    thresholds: Option<RawThresholds>,
    consolidation: Option<RawConsolidation>,
}

#[derive(Debug, Deserialize)]
struct RawBudget {
    multiplier: Option<f64>,
    default_term_months: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawConfidence {
    snowball: Option<u8>,
    avalanche: Option<u8>,
    hybrid: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct RawThresholds {
    high_interest_rate: Option<f64>,
    small_balance: Option<f64>,
    large_balance: Option<f64>,
    hybrid_balance_cutoff: Option<f64>,
    quick_win_balance: Option<f64>,
    quick_win_count: Option<usize>,
    high_dti: Option<f64>,
    small_balance_min_rate: Option<f64>,
    savings_baseline_rate: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawConsolidation {
    min_debts: Option<usize>,
    priority_rate: Option<f64>,
    target_rate: Option<f64>,
}

/// Parse config from TOML content, overlaying defaults
fn parse_config(content: &str) -> Result<PlannerConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = PlannerConfig::default();

    if let Some(budget) = raw.budget {
        if let Some(multiplier) = budget.multiplier {
            config.budget.multiplier = multiplier;
        }
        if let Some(term) = budget.default_term_months {
            config.budget.default_term_months = term;
        }
    }

    if let Some(confidence) = raw.confidence {
        if let Some(score) = confidence.snowball {
            config.confidence.snowball = score;
        }
        if let Some(score) = confidence.avalanche {
            config.confidence.avalanche = score;
        }
        if let Some(score) = confidence.hybrid {
            config.confidence.hybrid = score;
        }
    }

    if let Some(t) = raw.thresholds {
        let target = &mut config.thresholds;
        overlay(&mut target.high_interest_rate, t.high_interest_rate);
        overlay(&mut target.small_balance, t.small_balance);
        overlay(&mut target.large_balance, t.large_balance);
        overlay(&mut target.hybrid_balance_cutoff, t.hybrid_balance_cutoff);
        overlay(&mut target.quick_win_balance, t.quick_win_balance);
        overlay(&mut target.quick_win_count, t.quick_win_count);
        overlay(&mut target.high_dti, t.high_dti);
        overlay(&mut target.small_balance_min_rate, t.small_balance_min_rate);
        overlay(&mut target.savings_baseline_rate, t.savings_baseline_rate);
    }

    if let Some(c) = raw.consolidation {
        overlay(&mut config.consolidation.min_debts, c.min_debts);
        overlay(&mut config.consolidation.priority_rate, c.priority_rate);
        overlay(&mut config.consolidation.target_rate, c.target_rate);
    }

    config.validate()?;
    Ok(config)
}

fn overlay<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
