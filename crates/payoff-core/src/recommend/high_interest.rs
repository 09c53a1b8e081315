//! High Interest Rule
//!
//! Debts above the high-interest threshold should get more than the minimum.
//! Savings are estimated as one year of the rate gap against the baseline
//! rate on the current balance.

use crate::explanation::{format_kr, format_rate, Explanation};
use crate::models::{ActionKind, Debt, Priority, Recommendation, RecommendationTarget, Tier};

use super::engine::{RecommendationRule, RuleContext, RuleKind};

const CONFIDENCE: u8 = 90;

/// Rule that flags expensive debts for accelerated payment
pub struct HighInterestRule;

impl HighInterestRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighInterestRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationRule for HighInterestRule {
    fn id(&self) -> RuleKind {
        RuleKind::HighInterest
    }

    fn name(&self) -> &'static str {
        "High Interest"
    }

    fn evaluate_debt(&self, debt: &Debt, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        if !ctx.aggregates.buckets.is_high_interest(&debt.id) {
            return None;
        }

        let thresholds = &ctx.config.thresholds;
        let rate_gap = (debt.interest_rate - thresholds.savings_baseline_rate).max(0.0);
        let expected_savings = debt.balance * rate_gap / 100.0 / 12.0 * 12.0;

        Some(Recommendation {
            id: self.id().recommendation_id(&debt.id),
            debt_id: RecommendationTarget::Debt(debt.id.clone()),
            title: format!("Betal ned {} raskere", debt.name),
            description: format!(
                "{} har {} rente. Ekstra innbetalinger reduserer rentekostnadene betydelig.",
                debt.name,
                format_rate(debt.interest_rate)
            ),
            action: ActionKind::IncreasePayment,
            impact: Tier::High,
            effort: Tier::Medium,
            priority: Priority::High,
            explanation: Explanation::new(format!(
                "Renten på {} er over grensen på {}. Økt innbetaling kan spare rundt {} i året på {}.",
                format_rate(debt.interest_rate),
                format_rate(thresholds.high_interest_rate),
                format_kr(expected_savings),
                debt.name
            )),
            action_steps: vec![
                format!("Sett opp en fast ekstra innbetaling til {}", debt.name),
                "Bruk bonuser og skatteoppgjør til nedbetaling".to_string(),
                "Be långiver om lavere rente".to_string(),
            ],
            expected_savings,
            timeframe: "3-6 måneder".to_string(),
            confidence: CONFIDENCE,
        })
    }
}
