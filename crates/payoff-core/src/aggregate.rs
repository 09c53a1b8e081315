//! Aggregate reasoning over the validated portfolio

use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::models::Debt;

/// Descriptive partition of the portfolio, consumed by recommendation rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioBuckets {
    /// Ids of debts with rate above the high-interest threshold
    pub high_interest: Vec<String>,
    pub small_balance: Vec<String>,
    /// Reported to callers only; no built-in rule reads it
    pub large_balance: Vec<String>,
}

impl PortfolioBuckets {
    pub fn is_high_interest(&self, debt_id: &str) -> bool {
        self.high_interest.iter().any(|id| id == debt_id)
    }

    pub fn is_small_balance(&self, debt_id: &str) -> bool {
        self.small_balance.iter().any(|id| id == debt_id)
    }
}

/// Portfolio-level statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAggregates {
    /// Coarse interest estimate at minimum payments over each debt's term
    pub total_interest: f64,
    /// Simple mean of interest rates, 0 for an empty portfolio
    pub average_rate: f64,
    pub buckets: PortfolioBuckets,
}

/// Compute aggregates for a validated debt list
pub fn reason(debts: &[Debt], config: &PlannerConfig) -> PortfolioAggregates {
    let default_term = config.budget.default_term_months;
    let thresholds = &config.thresholds;

    let total_interest = debts
        .iter()
        .map(|d| d.balance * d.monthly_rate() * d.term_or(default_term) as f64)
        .sum::<f64>();

    let mut buckets = PortfolioBuckets::default();
    for debt in debts {
        if debt.interest_rate > thresholds.high_interest_rate {
            buckets.high_interest.push(debt.id.clone());
        }
        if debt.balance < thresholds.small_balance {
            buckets.small_balance.push(debt.id.clone());
        }
        if debt.balance > thresholds.large_balance {
            buckets.large_balance.push(debt.id.clone());
        }
    }

    let aggregates = PortfolioAggregates {
        total_interest,
        average_rate: average_rate(debts),
        buckets,
    };

    tracing::debug!(
        total_interest = aggregates.total_interest,
        average_rate = aggregates.average_rate,
        high_interest = aggregates.buckets.high_interest.len(),
        small_balance = aggregates.buckets.small_balance.len(),
        large_balance = aggregates.buckets.large_balance.len(),
        "Aggregate reasoning complete"
    );

    aggregates
}

/// Simple (unweighted) mean interest rate
pub fn average_rate(debts: &[Debt]) -> f64 {
    if debts.is_empty() {
        return 0.0;
    }
    debts.iter().map(|d| d.interest_rate).sum::<f64>() / debts.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::debt;

    #[test]
    fn test_total_interest_uses_term_or_default() {
        let mut with_term = debt("a", 12_000.0, 12.0, 300.0);
        with_term.remaining_term = Some(24);
        let without_term = debt("b", 6_000.0, 6.0, 100.0);

        let aggregates = reason(&[with_term, without_term], &PlannerConfig::default());

        // 12000 * 0.01 * 24 + 6000 * 0.005 * 60
        assert!((aggregates.total_interest - (2880.0 + 1800.0)).abs() < 1e-6);
    }

    #[test]
    fn test_buckets() {
        let debts = vec![
            debt("card", 4_000.0, 22.0, 120.0),
            debt("car", 45_000.0, 6.5, 900.0),
            debt("house", 2_400_000.0, 4.9, 12_000.0),
            debt("edge", 10_000.0, 15.0, 250.0),
        ];

        let aggregates = reason(&debts, &PlannerConfig::default());

        assert_eq!(aggregates.buckets.high_interest, vec!["card"]);
        assert_eq!(aggregates.buckets.small_balance, vec!["card"]);
        assert_eq!(aggregates.buckets.large_balance, vec!["house"]);
        assert!(aggregates.buckets.is_high_interest("card"));
        assert!(!aggregates.buckets.is_high_interest("edge"));
    }

    #[test]
    fn test_average_rate() {
        let debts = vec![debt("a", 1.0, 20.0, 1.0), debt("b", 1.0, 8.0, 1.0)];
        assert_eq!(average_rate(&debts), 14.0);
        assert_eq!(average_rate(&[]), 0.0);
    }
}
