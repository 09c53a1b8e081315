//! Recommendation Generator
//!
//! Turns the validated portfolio and its aggregates into a ranked list of
//! bounded, explainable action items. Rules are pluggable: each one may emit
//! a recommendation per debt, one for the portfolio as a whole, or both.
//!
//! ## Built-in Rules
//!
//! - **High Interest** - pay down debts above the high-interest threshold faster
//! - **Small Balance** - clear small, moderately priced debts outright
//! - **Consolidation** - suggest a consolidation loan for larger portfolios
//!
//! ## Usage
//!
//! ```rust,ignore
//! use payoff_core::recommend::{RecommendationEngine, RuleContext};
//!
//! let engine = RecommendationEngine::new();
//! let ctx = RuleContext::new(&debts, &aggregates, total_debt, &config);
//! let recommendations = engine.generate(&ctx);
//! ```

pub mod consolidation;
pub mod engine;
pub mod high_interest;
pub mod small_balance;

pub use consolidation::ConsolidationRule;
pub use engine::{
    sort_recommendations, RecommendationEngine, RecommendationRule, RuleContext, RuleKind,
};
pub use high_interest::HighInterestRule;
pub use small_balance::SmallBalanceRule;
