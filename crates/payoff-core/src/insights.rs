//! Insight Summarizer
//!
//! Read-only descriptive statistics derived from a finished [`AgentState`],
//! for callers that log or display them. Nothing here alters strategies or
//! recommendations, and the same state always yields the same summary.

use serde::{Deserialize, Serialize};

use crate::aggregate::average_rate;
use crate::explanation::{format_kr, Explanation};
use crate::models::{AgentState, Debt, Strategy, StrategyKind};

/// Compact reference to one debt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtHighlight {
    pub id: String,
    pub name: String,
    pub balance: f64,
    pub interest_rate: f64,
}

impl From<&Debt> for DebtHighlight {
    fn from(debt: &Debt) -> Self {
        Self {
            id: debt.id.clone(),
            name: debt.name.clone(),
            balance: debt.balance,
            interest_rate: debt.interest_rate,
        }
    }
}

/// Descriptive statistics for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightSummary {
    pub debt_count: usize,
    pub average_interest_rate: f64,
    pub highest_interest_debt: Option<DebtHighlight>,
    pub lowest_balance_debt: Option<DebtHighlight>,
    pub debt_to_income_ratio: Option<f64>,
    /// Strategy with the lowest total interest
    pub cheapest_strategy: Option<StrategyKind>,
    /// Strategy with the fewest payoff months
    pub fastest_strategy: Option<StrategyKind>,
    /// Snowball interest minus avalanche interest
    pub avalanche_interest_advantage: Option<f64>,
    pub recommendation_count: usize,
    pub total_expected_savings: f64,
    /// Single-sentence audit string
    pub explainability_summary: Explanation,
}

/// Summarize a finished analysis run
pub fn summarize(state: &AgentState) -> InsightSummary {
    let avalanche_interest_advantage = match (
        state.strategy(StrategyKind::Snowball),
        state.strategy(StrategyKind::Avalanche),
    ) {
        (Some(snowball), Some(avalanche)) => {
            Some(snowball.total_interest - avalanche.total_interest)
        }
        _ => None,
    };

    InsightSummary {
        debt_count: state.debts.len(),
        average_interest_rate: average_rate(&state.debts),
        highest_interest_debt: highest_interest(&state.debts).map(DebtHighlight::from),
        lowest_balance_debt: lowest_balance(&state.debts).map(DebtHighlight::from),
        debt_to_income_ratio: state.debt_to_income_ratio,
        cheapest_strategy: best_strategy(&state.strategies, |s| s.total_interest),
        fastest_strategy: best_strategy(&state.strategies, |s| s.payoff_months as f64),
        avalanche_interest_advantage,
        recommendation_count: state.recommendations.len(),
        total_expected_savings: state
            .recommendations
            .iter()
            .map(|r| r.expected_savings)
            .sum(),
        explainability_summary: explainability_summary(state),
    }
}

/// The audit sentence: selected strategy, total debt and recommendation count
pub fn explainability_summary(state: &AgentState) -> Explanation {
    Explanation::new(format!(
        "Anbefalt strategi: {}. Total gjeld {} fordelt på {} lån, {} anbefalinger.",
        state.current_strategy.display_name(),
        format_kr(state.total_debt),
        state.debts.len(),
        state.recommendations.len()
    ))
}

/// First debt with the strictly highest rate
fn highest_interest(debts: &[Debt]) -> Option<&Debt> {
    debts.iter().fold(None, |best: Option<&Debt>, d| match best {
        Some(b) if b.interest_rate >= d.interest_rate => Some(b),
        _ => Some(d),
    })
}

/// First debt with the strictly lowest balance
fn lowest_balance(debts: &[Debt]) -> Option<&Debt> {
    debts.iter().fold(None, |best: Option<&Debt>, d| match best {
        Some(b) if b.balance <= d.balance => Some(b),
        _ => Some(d),
    })
}

/// Strategy minimizing `key`; earlier strategies win ties
fn best_strategy(
    strategies: &[Strategy],
    key: impl Fn(&Strategy) -> f64,
) -> Option<StrategyKind> {
    strategies
        .iter()
        .fold(None, |best: Option<&Strategy>, s| match best {
            Some(b) if key(b) <= key(s) => Some(b),
            _ => Some(s),
        })
        .map(|s| s.strategy)
}
