//! Small Balance Rule
//!
//! Small debts carrying a meaningful rate are quick wins: clearing one frees
//! its minimum payment for the rest of the plan. Savings are estimated as six
//! months of interest at the current rate.

use crate::explanation::{format_kr, format_rate, Explanation};
use crate::models::{ActionKind, Debt, Priority, Recommendation, RecommendationTarget, Tier};

use super::engine::{RecommendationRule, RuleContext, RuleKind};

const CONFIDENCE: u8 = 85;
const SAVINGS_MONTHS: f64 = 6.0;

/// Rule that suggests paying off small balances outright
pub struct SmallBalanceRule;

impl SmallBalanceRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SmallBalanceRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationRule for SmallBalanceRule {
    fn id(&self) -> RuleKind {
        RuleKind::SmallBalance
    }

    fn name(&self) -> &'static str {
        "Small Balance"
    }

    fn evaluate_debt(&self, debt: &Debt, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        if !ctx.aggregates.buckets.is_small_balance(&debt.id)
            || debt.interest_rate <= ctx.config.thresholds.small_balance_min_rate
        {
            return None;
        }

        let expected_savings = debt.balance * debt.monthly_rate() * SAVINGS_MONTHS;

        Some(Recommendation {
            id: self.id().recommendation_id(&debt.id),
            debt_id: RecommendationTarget::Debt(debt.id.clone()),
            title: format!("Innfri {}", debt.name),
            description: format!(
                "Saldoen på {} kan innfris raskt og frigjøre {} i måneden.",
                format_kr(debt.balance),
                format_kr(debt.minimum_payment)
            ),
            action: ActionKind::PayOff,
            impact: Tier::Medium,
            effort: Tier::Low,
            priority: Priority::Medium,
            explanation: Explanation::new(format!(
                "Lav saldo ({}) og {} rente gjør dette til en rask gevinst. Innfrielse sparer rundt {} i renter det neste halvåret.",
                format_kr(debt.balance),
                format_rate(debt.interest_rate),
                format_kr(expected_savings)
            )),
            action_steps: vec![
                format!("Sett av ekstra midler til {}", debt.name),
                "Innfri saldoen i sin helhet".to_string(),
                "Flytt minstebeløpet til neste lån i planen".to_string(),
            ],
            expected_savings,
            timeframe: "1-3 måneder".to_string(),
            confidence: CONFIDENCE,
        })
    }
}
