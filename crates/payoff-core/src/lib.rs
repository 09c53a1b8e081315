//! Payoff Core Library
//!
//! Debt payoff planning engine:
//! - Intake and validation of loosely-typed debt/income records
//! - Portfolio aggregates (projected interest, debt-to-income, buckets)
//! - Snowball, avalanche and hybrid payoff strategies via rollover amortization
//! - Ranked, explainable recommendations from pluggable rules
//! - Read-only insight summary for observability
//! - TOML configuration for every planning heuristic

pub mod aggregate;
pub mod amortization;
pub mod config;
pub mod error;
pub mod explanation;
pub mod insights;
pub mod intake;
pub mod models;
pub mod planner;
pub mod recommend;
pub mod strategy;

/// Test utilities including portfolio fixture builders
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::{PortfolioAggregates, PortfolioBuckets};
pub use config::PlannerConfig;
pub use error::{Error, Result, ValidationError};
pub use explanation::{Explanation, MAX_EXPLANATION_CHARS};
pub use insights::{DebtHighlight, InsightSummary};
pub use intake::{AnalysisRequest, ValidatedPortfolio};
pub use models::{
    ActionKind, AgentState, Debt, DebtPayoff, DebtType, Priority, Recommendation,
    RecommendationTarget, Strategy, StrategyKind, Tier,
};
pub use planner::DebtPlanner;
pub use recommend::{RecommendationEngine, RecommendationRule, RuleContext, RuleKind};
pub use strategy::StrategyPlan;
