//! Recommendation engine - runs rules and ranks their output

use std::fmt;

use crate::aggregate::PortfolioAggregates;
use crate::config::PlannerConfig;
use crate::models::{Debt, Recommendation};

use super::{ConsolidationRule, HighInterestRule, SmallBalanceRule};

/// Identifiers of the built-in rules; also the prefix of recommendation ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    HighInterest,
    SmallBalance,
    Consolidation,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::HighInterest => "high_interest",
            RuleKind::SmallBalance => "small_balance",
            RuleKind::Consolidation => "consolidation",
        }
    }

    /// Recommendation id for this rule and a target (`<rule>:<target>`)
    pub fn recommendation_id(&self, target: &str) -> String {
        format!("{}:{}", self.as_str(), target)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything a rule may look at
pub struct RuleContext<'a> {
    pub debts: &'a [Debt],
    pub aggregates: &'a PortfolioAggregates,
    pub total_debt: f64,
    pub config: &'a PlannerConfig,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        debts: &'a [Debt],
        aggregates: &'a PortfolioAggregates,
        total_debt: f64,
        config: &'a PlannerConfig,
    ) -> Self {
        Self {
            debts,
            aggregates,
            total_debt,
            config,
        }
    }
}

/// A recommendation rule
pub trait RecommendationRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> RuleKind;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Recommendation for a single debt, if the rule applies to it
    fn evaluate_debt(&self, _debt: &Debt, _ctx: &RuleContext<'_>) -> Option<Recommendation> {
        None
    }

    /// Portfolio-wide recommendation, if the rule applies
    fn evaluate_portfolio(&self, _ctx: &RuleContext<'_>) -> Option<Recommendation> {
        None
    }
}

/// Runs registered rules and ranks the result
pub struct RecommendationEngine {
    rules: Vec<Box<dyn RecommendationRule>>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationEngine {
    /// Create an engine with the built-in rules
    pub fn new() -> Self {
        let mut engine = Self { rules: vec![] };

        engine.register(Box::new(HighInterestRule::new()));
        engine.register(Box::new(SmallBalanceRule::new()));
        engine.register(Box::new(ConsolidationRule::new()));

        engine
    }

    /// Create an engine with no rules
    pub fn empty() -> Self {
        Self { rules: vec![] }
    }

    /// Register a rule; rules run in registration order
    pub fn register(&mut self, rule: Box<dyn RecommendationRule>) {
        self.rules.push(rule);
    }

    /// Generate and rank recommendations
    ///
    /// Generation is debt-major (every rule for the first debt, then the
    /// next), followed by portfolio-wide rules.
    pub fn generate(&self, ctx: &RuleContext<'_>) -> Vec<Recommendation> {
        let mut recommendations = vec![];

        for debt in ctx.debts {
            for rule in &self.rules {
                if let Some(recommendation) = rule.evaluate_debt(debt, ctx) {
                    tracing::debug!(
                        rule = rule.id().as_str(),
                        name = rule.name(),
                        debt = debt.id.as_str(),
                        "Rule matched debt"
                    );
                    recommendations.push(recommendation);
                }
            }
        }

        for rule in &self.rules {
            if let Some(recommendation) = rule.evaluate_portfolio(ctx) {
                tracing::debug!(
                    rule = rule.id().as_str(),
                    name = rule.name(),
                    "Rule matched portfolio"
                );
                recommendations.push(recommendation);
            }
        }

        sort_recommendations(&mut recommendations);

        tracing::debug!(
            count = recommendations.len(),
            "Recommendation generation complete"
        );
        recommendations
    }

    /// Get list of registered rules
    pub fn rule_kinds(&self) -> Vec<RuleKind> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Human-readable names of registered rules
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

/// Sort by priority (critical first), then impact (high first); ties keep
/// generation order
pub fn sort_recommendations(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| {
        b.priority
            .rank()
            .cmp(&a.priority.rank())
            .then_with(|| b.impact.rank().cmp(&a.impact.rank()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate;
    use crate::explanation::{Explanation, MAX_EXPLANATION_CHARS};
    use crate::models::{ActionKind, Priority, RecommendationTarget, Tier};
    use crate::test_utils::debt;

    fn recommendation(id: &str, priority: Priority, impact: Tier) -> Recommendation {
        Recommendation {
            id: id.to_string(),
            debt_id: RecommendationTarget::General,
            title: id.to_string(),
            description: String::new(),
            action: ActionKind::Negotiate,
            impact,
            effort: Tier::Low,
            priority,
            explanation: Explanation::new("test"),
            action_steps: vec![],
            expected_savings: 0.0,
            timeframe: String::new(),
            confidence: 50,
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = RecommendationEngine::new();
        assert_eq!(
            engine.rule_kinds(),
            vec![
                RuleKind::HighInterest,
                RuleKind::SmallBalance,
                RuleKind::Consolidation
            ]
        );
        assert_eq!(
            engine.rule_names(),
            vec!["High Interest", "Small Balance", "Consolidation"]
        );
    }

    #[test]
    fn test_sort_priority_then_impact_stable() {
        let mut recs = vec![
            recommendation("low", Priority::Low, Tier::High),
            recommendation("med-low", Priority::Medium, Tier::Low),
            recommendation("crit", Priority::Critical, Tier::Low),
            recommendation("med-high-1", Priority::Medium, Tier::High),
            recommendation("high", Priority::High, Tier::Medium),
            recommendation("med-high-2", Priority::Medium, Tier::High),
        ];
        sort_recommendations(&mut recs);

        let ids: Vec<&str> = recs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["crit", "high", "med-high-1", "med-high-2", "med-low", "low"]
        );
    }

    #[test]
    fn test_generation_is_debt_major() {
        let debts = vec![
            debt("a", 3_000.0, 20.0, 90.0),
            debt("b", 9_000.0, 16.0, 250.0),
        ];
        let config = PlannerConfig::default();
        let aggregates = aggregate::reason(&debts, &config);
        let ctx = RuleContext::new(&debts, &aggregates, 12_000.0, &config);

        let recs = RecommendationEngine::new().generate(&ctx);
        let ids: Vec<&str> = recs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "high_interest:a",
                "high_interest:b",
                "small_balance:a",
                "small_balance:b"
            ]
        );
    }

    #[test]
    fn test_empty_engine_generates_nothing() {
        let debts = vec![debt("a", 3_000.0, 20.0, 90.0)];
        let config = PlannerConfig::default();
        let aggregates = aggregate::reason(&debts, &config);
        let ctx = RuleContext::new(&debts, &aggregates, 3_000.0, &config);

        assert!(RecommendationEngine::empty().generate(&ctx).is_empty());
    }

    #[test]
    fn test_all_explanations_bounded() {
        let long_name = "Forbrukslån med et svært langt navn ".repeat(10);
        let mut long = debt("long", 5_000.0, 25.0, 150.0);
        long.name = long_name;
        let debts = vec![
            long,
            debt("b", 9_000.0, 16.0, 250.0),
            debt("c", 25_000.0, 12.0, 500.0),
            debt("d", 60_000.0, 8.0, 900.0),
        ];
        let config = PlannerConfig::default();
        let aggregates = aggregate::reason(&debts, &config);
        let ctx = RuleContext::new(&debts, &aggregates, 99_000.0, &config);

        let recs = RecommendationEngine::new().generate(&ctx);
        assert!(!recs.is_empty());
        for rec in &recs {
            assert!(rec.explanation.char_len() <= MAX_EXPLANATION_CHARS);
        }
    }
}
