//! Consolidation Rule
//!
//! Portfolios with many debts may be cheaper as one consolidation loan.
//! Savings are estimated by re-rating the whole balance from the average
//! rate down to the assumed consolidation rate for one year.

use crate::explanation::{format_kr, format_rate, Explanation};
use crate::models::{ActionKind, Priority, Recommendation, RecommendationTarget, Tier};

use super::engine::{RecommendationRule, RuleContext, RuleKind};

const CONFIDENCE: u8 = 75;

/// Rule that suggests consolidating a larger portfolio
pub struct ConsolidationRule;

impl ConsolidationRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsolidationRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationRule for ConsolidationRule {
    fn id(&self) -> RuleKind {
        RuleKind::Consolidation
    }

    fn name(&self) -> &'static str {
        "Consolidation"
    }

    fn evaluate_portfolio(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        let settings = &ctx.config.consolidation;
        let count = ctx.debts.len();
        if count <= settings.min_debts {
            return None;
        }

        let average_rate = ctx.aggregates.average_rate;
        let (priority, impact) = if average_rate > settings.priority_rate {
            (Priority::High, Tier::High)
        } else {
            (Priority::Medium, Tier::Medium)
        };
        let expected_savings =
            ctx.total_debt * (average_rate - settings.target_rate).max(0.0) / 100.0;
        let target = RecommendationTarget::General;

        Some(Recommendation {
            id: self.id().recommendation_id(target.as_str()),
            debt_id: target,
            title: "Samle gjelden i ett lån".to_string(),
            description: format!(
                "Du har {} lån med en gjennomsnittlig rente på {}.",
                count,
                format_rate(average_rate)
            ),
            action: ActionKind::Consolidate,
            impact,
            effort: Tier::Medium,
            priority,
            explanation: Explanation::new(format!(
                "Med {} lån og snittrente {} kan et samlelån til rundt {} spare omtrent {} i året og gi én fast betaling.",
                count,
                format_rate(average_rate),
                format_rate(settings.target_rate),
                format_kr(expected_savings)
            )),
            action_steps: vec![
                "Hent tilbud på samlelån fra flere banker".to_string(),
                "Sammenlign effektiv rente og gebyrer".to_string(),
                "Innfri de dyreste lånene med samlelånet først".to_string(),
            ],
            expected_savings,
            timeframe: "1-2 måneder".to_string(),
            confidence: CONFIDENCE,
        })
    }
}
