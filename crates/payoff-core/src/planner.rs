//! Debt planner - runs the five analysis phases in order
//!
//! Each phase is a pure function of the previous phases' output:
//!
//! 1. Intake & validation ([`crate::intake`])
//! 2. Aggregate reasoning ([`crate::aggregate`])
//! 3. Strategy planning ([`crate::strategy`])
//! 4. Recommendation generation ([`crate::recommend`])
//! 5. Insight summary ([`crate::insights`]), logged but never fed back
//!
//! The first error aborts the run; no partial state is returned.

use chrono::{DateTime, Utc};

use crate::aggregate;
use crate::config::PlannerConfig;
use crate::error::Result;
use crate::insights;
use crate::intake::{self, AnalysisRequest};
use crate::models::{AgentState, ENGINE_VERSION};
use crate::recommend::{RecommendationEngine, RuleContext};
use crate::strategy;

/// User id stamped on runs whose request carries none
pub const ANONYMOUS_USER: &str = "anonymous";

/// Runs analyses with a fixed configuration and rule set
pub struct DebtPlanner {
    config: PlannerConfig,
    engine: RecommendationEngine,
}

impl DebtPlanner {
    /// Create a planner with configuration resolved from the default locations
    pub fn new() -> Result<Self> {
        Ok(Self::with_config(PlannerConfig::load(None)?))
    }

    /// Create a planner with an explicit configuration
    pub fn with_config(config: PlannerConfig) -> Self {
        Self::with_engine(config, RecommendationEngine::new())
    }

    /// Create a planner with a custom rule set
    pub fn with_engine(config: PlannerConfig, engine: RecommendationEngine) -> Self {
        Self { config, engine }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Run a full analysis stamped with the current time
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AgentState> {
        self.analyze_at(request, Utc::now())
    }

    /// Run a full analysis stamped with `now`
    ///
    /// Fails with [`Error::Config`](crate::error::Error::Config) before any
    /// phase runs if the configuration is out of range.
    pub fn analyze_at(
        &self,
        request: &AnalysisRequest,
        now: DateTime<Utc>,
    ) -> Result<AgentState> {
        self.config.validate()?;

        let user_id = request
            .user_id
            .clone()
            .unwrap_or_else(|| ANONYMOUS_USER.to_string());

        let portfolio = intake::validate(&request.debts, request.income.as_ref())?;
        let aggregates = aggregate::reason(&portfolio.debts, &self.config);
        let plan = strategy::plan(
            &portfolio.debts,
            portfolio.debt_to_income_ratio,
            &self.config,
        )?;

        let ctx = RuleContext::new(
            &portfolio.debts,
            &aggregates,
            portfolio.total_debt,
            &self.config,
        );
        let recommendations = self.engine.generate(&ctx);

        let state = AgentState {
            user_id,
            analysis_date: now,
            debts: portfolio.debts,
            strategies: plan.strategies,
            recommendations,
            current_strategy: plan.current_strategy,
            monthly_budget: plan.monthly_budget,
            monthly_income: portfolio.monthly_income,
            total_debt: portfolio.total_debt,
            total_minimum_payments: portfolio.total_minimum_payments,
            total_interest: aggregates.total_interest,
            debt_to_income_ratio: portfolio.debt_to_income_ratio,
            version: ENGINE_VERSION.to_string(),
        };

        let summary = insights::summarize(&state);
        tracing::info!(
            user = state.user_id.as_str(),
            debts = summary.debt_count,
            average_rate = summary.average_interest_rate,
            dti = ?summary.debt_to_income_ratio,
            strategy = state.current_strategy.as_str(),
            recommendations = summary.recommendation_count,
            "{}",
            summary.explainability_summary
        );

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::StrategyKind;
    use crate::test_utils::request;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_full_run_populates_state() {
        let planner = DebtPlanner::with_config(PlannerConfig::default());
        let state = planner
            .analyze_at(
                &request(&[("a", 10_000.0, 20.0, 300.0)], Some(5_000.0)),
                fixed_now(),
            )
            .unwrap();

        assert_eq!(state.user_id, "test-user");
        assert_eq!(state.analysis_date, fixed_now());
        assert_eq!(state.debts.len(), 1);
        assert_eq!(state.strategies.len(), 3);
        assert_eq!(state.total_debt, 10_000.0);
        assert_eq!(state.total_minimum_payments, 300.0);
        assert!((state.monthly_budget - 360.0).abs() < 1e-9);
        assert!((state.total_interest - 10_000.0).abs() < 1e-6);
        assert!((state.debt_to_income_ratio.unwrap() - 6.0).abs() < 1e-9);
        assert_eq!(state.current_strategy, StrategyKind::Avalanche);
        assert!(state.version.starts_with("payoff-core/"));
        assert!(state.selected_strategy().is_some());
    }

    #[test]
    fn test_missing_user_is_anonymous() {
        let planner = DebtPlanner::with_config(PlannerConfig::default());
        let mut req = request(&[("a", 1_000.0, 5.0, 50.0)], None);
        req.user_id = None;

        let state = planner.analyze_at(&req, fixed_now()).unwrap();
        assert_eq!(state.user_id, ANONYMOUS_USER);
    }

    #[test]
    fn test_validation_error_aborts_run() {
        let planner = DebtPlanner::with_config(PlannerConfig::default());
        let result = planner.analyze_at(
            &request(&[("a", 1_000.0, 5.0, 50.0), ("b", -1.0, 5.0, 50.0)], None),
            fixed_now(),
        );
        match result {
            Err(Error::Validation(e)) => {
                assert_eq!(e.record, Some(1));
                assert_eq!(e.field, "balance");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_config_changes_budget_and_scores() {
        let mut config = PlannerConfig::default();
        config.budget.multiplier = 1.5;
        config.confidence.avalanche = 99;

        let planner = DebtPlanner::with_config(config);
        let state = planner
            .analyze_at(&request(&[("a", 10_000.0, 20.0, 300.0)], None), fixed_now())
            .unwrap();

        assert!((state.monthly_budget - 450.0).abs() < 1e-9);
        assert_eq!(state.strategy(StrategyKind::Avalanche).unwrap().confidence, 99);
    }

    #[test]
    fn test_out_of_range_config_is_rejected() {
        let mut config = PlannerConfig::default();
        config.confidence.avalanche = 150;
        let planner = DebtPlanner::with_config(config);

        let req = request(&[("a", 1_000.0, 5.0, 50.0)], None);
        let result = planner.analyze_at(&req, fixed_now());
        assert!(matches!(result, Err(Error::Config(_))));

        let mut config = PlannerConfig::default();
        config.budget.multiplier = f64::NAN;
        let planner = DebtPlanner::with_config(config);

        let result = planner.analyze_at(&request(&[], None), fixed_now());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_engine_yields_no_recommendations() {
        let planner =
            DebtPlanner::with_engine(PlannerConfig::default(), RecommendationEngine::empty());
        let state = planner
            .analyze_at(&request(&[("a", 5_000.0, 25.0, 150.0)], None), fixed_now())
            .unwrap();
        assert!(state.recommendations.is_empty());
    }
}
