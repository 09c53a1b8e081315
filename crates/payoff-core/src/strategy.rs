//! Strategy planner
//!
//! Builds the snowball, avalanche and hybrid payoff plans from the same debt
//! list and the same monthly budget, and picks the one to recommend.
//!
//! Each plan retires debts one at a time in its ordering. The debt at
//! position k is paid with the monthly budget plus the minimum payments of
//! every debt still queued behind it, and its clock starts when the debts
//! ahead of it are retired. Totals are sums over these sequential slots; this
//! is the classic snowball/avalanche approximation, not a joint month-by-month
//! simulation.

use crate::amortization;
use crate::config::{PlannerConfig, ThresholdConfig};
use crate::error::Result;
use crate::explanation::{format_kr, format_years, Explanation};
use crate::models::{Debt, DebtPayoff, Strategy, StrategyKind};

/// Output of the strategy planning phase
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyPlan {
    pub monthly_budget: f64,
    /// Snowball, avalanche, hybrid in that order
    pub strategies: Vec<Strategy>,
    pub current_strategy: StrategyKind,
}

/// Sum of minimum payments accelerated by the configured multiplier
pub fn monthly_budget(debts: &[Debt], config: &PlannerConfig) -> f64 {
    debts.iter().map(|d| d.minimum_payment).sum::<f64>() * config.budget.multiplier
}

/// Plan all strategies and select the recommended one
pub fn plan(
    debts: &[Debt],
    debt_to_income_ratio: Option<f64>,
    config: &PlannerConfig,
) -> Result<StrategyPlan> {
    let budget = monthly_budget(debts, config);

    let strategies = StrategyKind::all()
        .iter()
        .map(|kind| simulate(*kind, debts, budget, config))
        .collect::<Result<Vec<_>>>()?;

    let current_strategy = select(debts, debt_to_income_ratio, &config.thresholds);

    tracing::debug!(
        monthly_budget = budget,
        selected = current_strategy.as_str(),
        "Strategy planning complete"
    );

    Ok(StrategyPlan {
        monthly_budget: budget,
        strategies,
        current_strategy,
    })
}

/// Order debts according to a strategy's policy (stable on ties)
pub fn order_debts<'a>(
    kind: StrategyKind,
    debts: &'a [Debt],
    thresholds: &ThresholdConfig,
) -> Vec<&'a Debt> {
    let mut ordered: Vec<&Debt> = debts.iter().collect();
    match kind {
        StrategyKind::Snowball => {
            ordered.sort_by(|a, b| a.balance.total_cmp(&b.balance));
        }
        StrategyKind::Avalanche => {
            ordered.sort_by(|a, b| b.interest_rate.total_cmp(&a.interest_rate));
        }
        StrategyKind::Hybrid => {
            let (mut small, mut rest): (Vec<&Debt>, Vec<&Debt>) = ordered
                .into_iter()
                .partition(|d| d.balance < thresholds.hybrid_balance_cutoff);
            small.sort_by(|a, b| a.balance.total_cmp(&b.balance));
            rest.sort_by(|a, b| b.interest_rate.total_cmp(&a.interest_rate));
            small.extend(rest);
            ordered = small;
        }
    }
    ordered
}

/// Run the sequential rollover amortization for one strategy
pub fn simulate(
    kind: StrategyKind,
    debts: &[Debt],
    budget: f64,
    config: &PlannerConfig,
) -> Result<Strategy> {
    let ordered = order_debts(kind, debts, &config.thresholds);
    let default_term = config.budget.default_term_months;

    let mut payoff_order = Vec::with_capacity(ordered.len());
    let mut total_interest = 0.0;
    let mut total_payments = 0.0;
    let mut clock: u32 = 0;

    for (i, debt) in ordered.iter().enumerate() {
        let queued_minimums: f64 = ordered[i + 1..].iter().map(|d| d.minimum_payment).sum();
        let payment = budget + queued_minimums;

        let estimate = amortization::estimate(debt, payment, default_term)?;

        total_interest += estimate.interest;
        total_payments += debt.balance + estimate.interest;

        let start_month = clock;
        clock = clock.saturating_add(estimate.months);

        payoff_order.push(DebtPayoff {
            debt_id: debt.id.clone(),
            position: i + 1,
            monthly_payment: payment,
            months: estimate.months,
            interest: estimate.interest,
            start_month,
            end_month: clock,
        });
    }

    let profile = StrategyProfile::for_kind(kind, config);
    let explanation = Explanation::new(format!(
        "Totale renter {} og gjeldfri om {} år ({} mnd) med {} per måned. {}",
        format_kr(total_interest),
        format_years(clock),
        clock,
        format_kr(budget),
        profile.rationale
    ));

    tracing::debug!(
        strategy = kind.as_str(),
        total_interest,
        payoff_months = clock,
        "Strategy simulated"
    );

    Ok(Strategy {
        strategy: kind,
        name: kind.display_name().to_string(),
        description: profile.description,
        total_interest,
        total_payments,
        payoff_months: clock,
        monthly_payment: budget,
        explanation,
        pros: profile.pros,
        cons: profile.cons,
        confidence: config.confidence.for_kind(kind),
        payoff_order,
    })
}

/// Pick the strategy to recommend
///
/// Avalanche under a heavy debt burden; snowball when there are enough quick
/// wins; avalanche otherwise. An undefined ratio counts as 0.
pub fn select(
    debts: &[Debt],
    debt_to_income_ratio: Option<f64>,
    thresholds: &ThresholdConfig,
) -> StrategyKind {
    if debt_to_income_ratio.unwrap_or(0.0) > thresholds.high_dti {
        return StrategyKind::Avalanche;
    }

    let quick_wins = debts
        .iter()
        .filter(|d| d.balance < thresholds.quick_win_balance)
        .count();
    if quick_wins > thresholds.quick_win_count {
        return StrategyKind::Snowball;
    }

    StrategyKind::Avalanche
}

/// Hand-authored text attached to each strategy kind
struct StrategyProfile {
    description: String,
    rationale: &'static str,
    pros: Vec<String>,
    cons: Vec<String>,
}

impl StrategyProfile {
    fn for_kind(kind: StrategyKind, config: &PlannerConfig) -> Self {
        let strings =
            |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        match kind {
            StrategyKind::Snowball => Self {
                description: "Betal ned gjelden med lavest saldo først".to_string(),
                rationale: "Raske innfrielser gir motivasjon og frigjør minstebeløp tidlig.",
                pros: strings(&[
                    "Raske gevinster gir motivasjon",
                    "Færre lån å holde styr på tidlig",
                    "Enkel å følge",
                ]),
                cons: strings(&[
                    "Kan gi høyere totale rentekostnader",
                    "Tar ikke hensyn til rentesatsen",
                ]),
            },
            StrategyKind::Avalanche => Self {
                description: "Betal ned gjelden med høyest rente først".to_string(),
                rationale: "Dyreste gjeld først gir lavest rentekostnad med samme budsjett.",
                pros: strings(&[
                    "Lavest totale rentekostnader",
                    "Matematisk optimal rekkefølge",
                    "Reduserer dyr gjeld raskest",
                ]),
                cons: strings(&[
                    "Første lån kan ta lang tid å innfri",
                    "Krever disiplin uten tidlige gevinster",
                ]),
            },
            StrategyKind::Hybrid => Self {
                description: format!(
                    "Lån under {} innfris minst først, deretter høyest rente",
                    format_kr(config.thresholds.hybrid_balance_cutoff)
                ),
                rationale: "Små lån gir raske gevinster før dyr gjeld prioriteres.",
                pros: strings(&[
                    "Kombinerer motivasjon og rentebesparelse",
                    "Raske gevinster på små lån",
                    "Prioriterer dyr gjeld etterpå",
                ]),
                cons: strings(&[
                    "Ikke like rimelig som skredmetoden",
                    "Litt mer krevende å følge",
                ]),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::explanation::MAX_EXPLANATION_CHARS;
    use crate::test_utils::debt;

    fn ids(ordered: &[&Debt]) -> Vec<String> {
        ordered.iter().map(|d| d.id.clone()).collect()
    }

    fn mixed_portfolio() -> Vec<Debt> {
        vec![
            debt("big-low", 50_000.0, 5.0, 900.0),
            debt("big-high", 60_000.0, 20.0, 1_500.0),
            debt("small-b", 15_000.0, 10.0, 400.0),
            debt("small-a", 2_000.0, 25.0, 80.0),
        ]
    }

    /// Three debts where the two policies disagree on order
    fn diverging_portfolio() -> Vec<Debt> {
        vec![
            debt("a", 3_000.0, 6.0, 100.0),
            debt("b", 12_000.0, 24.0, 360.0),
            debt("c", 8_000.0, 18.0, 240.0),
        ]
    }

    #[test]
    fn test_snowball_order() {
        let debts = mixed_portfolio();
        let t = PlannerConfig::default().thresholds;
        assert_eq!(
            ids(&order_debts(StrategyKind::Snowball, &debts, &t)),
            vec!["small-a", "small-b", "big-low", "big-high"]
        );
    }

    #[test]
    fn test_avalanche_order() {
        let debts = mixed_portfolio();
        let t = PlannerConfig::default().thresholds;
        assert_eq!(
            ids(&order_debts(StrategyKind::Avalanche, &debts, &t)),
            vec!["small-a", "big-high", "small-b", "big-low"]
        );
    }

    #[test]
    fn test_hybrid_order() {
        let debts = mixed_portfolio();
        let t = PlannerConfig::default().thresholds;
        assert_eq!(
            ids(&order_debts(StrategyKind::Hybrid, &debts, &t)),
            vec!["small-a", "small-b", "big-high", "big-low"]
        );
    }

    #[test]
    fn test_ties_keep_input_order() {
        let debts = vec![
            debt("first", 1_000.0, 10.0, 50.0),
            debt("second", 1_000.0, 10.0, 50.0),
        ];
        let t = PlannerConfig::default().thresholds;
        for kind in StrategyKind::all() {
            assert_eq!(
                ids(&order_debts(*kind, &debts, &t)),
                vec!["first", "second"]
            );
        }
    }

    #[test]
    fn test_monthly_budget() {
        let debts = diverging_portfolio();
        assert!((monthly_budget(&debts, &PlannerConfig::default()) - 840.0).abs() < 1e-9);
    }

    #[test]
    fn test_rollover_payments() {
        let debts = diverging_portfolio();
        let config = PlannerConfig::default();
        let strategy = simulate(StrategyKind::Avalanche, &debts, 840.0, &config).unwrap();

        let payments: Vec<f64> = strategy
            .payoff_order
            .iter()
            .map(|p| p.monthly_payment)
            .collect();
        // b first with both queued minimums, a last with the bare budget
        assert!((payments[0] - 1_180.0).abs() < 1e-9);
        assert!((payments[1] - 940.0).abs() < 1e-9);
        assert!((payments[2] - 840.0).abs() < 1e-9);
        assert_eq!(strategy.payoff_order[0].debt_id, "b");
    }

    #[test]
    fn test_clocks_are_sequential() {
        let debts = diverging_portfolio();
        let config = PlannerConfig::default();
        let strategy = simulate(StrategyKind::Snowball, &debts, 840.0, &config).unwrap();

        let mut expected_start = 0;
        for slot in &strategy.payoff_order {
            assert_eq!(slot.start_month, expected_start);
            assert_eq!(slot.end_month, slot.start_month + slot.months);
            expected_start = slot.end_month;
        }
        assert_eq!(strategy.payoff_months, expected_start);
    }

    #[test]
    fn test_totals_are_non_negative() {
        let debts = mixed_portfolio();
        let config = PlannerConfig::default();
        let plan = plan(&debts, None, &config).unwrap();
        let total_balance: f64 = debts.iter().map(|d| d.balance).sum();

        assert_eq!(plan.strategies.len(), 3);
        for strategy in &plan.strategies {
            assert!(strategy.total_interest >= 0.0);
            assert!(strategy.total_payments >= total_balance);
            assert!(
                (strategy.total_payments - total_balance - strategy.total_interest).abs() < 1e-6
            );
        }
    }

    #[test]
    fn test_avalanche_beats_snowball_when_orders_differ() {
        let debts = diverging_portfolio();
        let config = PlannerConfig::default();
        let plan = plan(&debts, None, &config).unwrap();

        let snowball = &plan.strategies[0];
        let avalanche = &plan.strategies[1];
        assert_eq!(snowball.strategy, StrategyKind::Snowball);
        assert_eq!(avalanche.strategy, StrategyKind::Avalanche);
        assert!(avalanche.total_interest < snowball.total_interest);
    }

    #[test]
    fn test_single_debt_strategies_converge() {
        let debts = vec![debt("only", 10_000.0, 20.0, 300.0)];
        let plan = plan(&debts, None, &PlannerConfig::default()).unwrap();

        for strategy in &plan.strategies {
            assert_eq!(strategy.payoff_months, 38);
            assert!((strategy.total_interest - 3_680.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_confidence_and_names() {
        let debts = vec![debt("only", 10_000.0, 20.0, 300.0)];
        let plan = plan(&debts, None, &PlannerConfig::default()).unwrap();

        let scores: Vec<u8> = plan.strategies.iter().map(|s| s.confidence).collect();
        assert_eq!(scores, vec![85, 95, 80]);
        assert_eq!(plan.strategies[0].name, "Snøballmetoden");
        assert!(!plan.strategies[2].pros.is_empty());
        assert!(!plan.strategies[2].cons.is_empty());
    }

    #[test]
    fn test_explanation_names_interest_and_years() {
        let debts = vec![debt("only", 10_000.0, 20.0, 300.0)];
        let plan = plan(&debts, None, &PlannerConfig::default()).unwrap();

        for strategy in &plan.strategies {
            let text = strategy.explanation.as_str();
            assert!(strategy.explanation.char_len() <= MAX_EXPLANATION_CHARS);
            assert!(text.contains("3 680 kr"), "{}", text);
            assert!(text.contains("3,2 år"), "{}", text);
        }
    }

    #[test]
    fn test_empty_portfolio() {
        let plan = plan(&[], None, &PlannerConfig::default()).unwrap();
        assert_eq!(plan.monthly_budget, 0.0);
        for strategy in &plan.strategies {
            assert_eq!(strategy.payoff_months, 0);
            assert_eq!(strategy.total_interest, 0.0);
            assert!(strategy.payoff_order.is_empty());
        }
        assert_eq!(plan.current_strategy, StrategyKind::Avalanche);
    }

    #[test]
    fn test_divergent_portfolio_is_computation_error() {
        // Minimum far below the monthly interest accrual
        let debts = vec![debt("deep", 500_000.0, 24.0, 100.0)];
        let result = plan(&debts, None, &PlannerConfig::default());
        assert!(matches!(result, Err(Error::Computation(_))));
    }

    #[test]
    fn test_select_high_dti_prefers_avalanche() {
        let t = PlannerConfig::default().thresholds;
        let small: Vec<Debt> = (0..4)
            .map(|i| debt(&format!("d{}", i), 1_000.0, 10.0, 50.0))
            .collect();
        assert_eq!(select(&small, Some(40.5), &t), StrategyKind::Avalanche);
        assert_eq!(select(&small, Some(40.0), &t), StrategyKind::Snowball);
    }

    #[test]
    fn test_select_quick_wins_need_more_than_two() {
        let t = PlannerConfig::default().thresholds;
        let two_small = vec![
            debt("a", 1_000.0, 10.0, 50.0),
            debt("b", 19_999.0, 10.0, 50.0),
            debt("c", 20_000.0, 10.0, 50.0),
        ];
        assert_eq!(select(&two_small, None, &t), StrategyKind::Avalanche);

        let three_small = vec![
            debt("a", 1_000.0, 10.0, 50.0),
            debt("b", 19_999.0, 10.0, 50.0),
            debt("c", 5_000.0, 10.0, 50.0),
        ];
        assert_eq!(select(&three_small, Some(10.0), &t), StrategyKind::Snowball);
    }
}
