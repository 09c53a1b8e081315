//! Domain models for the payoff engine

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::explanation::Explanation;

/// Engine/schema version stamped on every AgentState
pub const ENGINE_VERSION: &str = concat!("payoff-core/", env!("CARGO_PKG_VERSION"));

/// Sentinel target for portfolio-wide recommendations
pub const GENERAL_TARGET: &str = "general";

/// Debt category (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtType {
    /// Revolving credit (credit cards, credit lines)
    CreditCard,
    InstallmentLoan,
    Mortgage,
    StudentLoan,
    PersonalLoan,
}

impl DebtType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::InstallmentLoan => "installment_loan",
            Self::Mortgage => "mortgage",
            Self::StudentLoan => "student_loan",
            Self::PersonalLoan => "personal_loan",
        }
    }
}

impl FromStr for DebtType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "credit_card" | "revolving_credit" | "revolving" => Ok(Self::CreditCard),
            "installment_loan" | "installment" | "loan" => Ok(Self::InstallmentLoan),
            "mortgage" => Ok(Self::Mortgage),
            "student_loan" => Ok(Self::StudentLoan),
            "personal_loan" => Ok(Self::PersonalLoan),
            _ => Err(format!("Unknown debt type: {}", s)),
        }
    }
}

impl fmt::Display for DebtType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Priority tier, used both as the advisory tag on a debt and to rank
/// recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Numeric rank for sorting (higher = more urgent)
    pub fn rank(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Impact/effort tier of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a recommendation asks the user to do (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    IncreasePayment,
    Refinance,
    Consolidate,
    Negotiate,
    PayOff,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IncreasePayment => "increase_payment",
            Self::Refinance => "refinance",
            Self::Consolidate => "consolidate",
            Self::Negotiate => "negotiate",
            Self::PayOff => "pay_off",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Debt ordering policy of a payoff strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Smallest balance first
    Snowball,
    /// Highest interest rate first
    Avalanche,
    /// Small balances smallest-first, then the rest by rate
    Hybrid,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Snowball => "snowball",
            Self::Avalanche => "avalanche",
            Self::Hybrid => "hybrid",
        }
    }

    /// All strategies in the order they are planned and reported
    pub fn all() -> &'static [StrategyKind] {
        &[Self::Snowball, Self::Avalanche, Self::Hybrid]
    }

    /// Norwegian display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Snowball => "Snøballmetoden",
            Self::Avalanche => "Skredmetoden",
            Self::Hybrid => "Hybridmetoden",
        }
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "snowball" => Ok(Self::Snowball),
            "avalanche" => Ok(Self::Avalanche),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(format!("Unknown strategy: {}", s)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single validated liability. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: String,
    pub name: String,
    /// Outstanding balance, >= 0
    pub balance: f64,
    /// Nominal annual rate in percent, >= 0
    pub interest_rate: f64,
    /// Minimum monthly payment, >= 0
    pub minimum_payment: f64,
    #[serde(rename = "type")]
    pub debt_type: DebtType,
    /// Advisory only; not used for ordering
    pub priority: Priority,
    pub is_secured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_term: Option<u32>,
}

impl Debt {
    /// Monthly interest rate as a fraction
    pub fn monthly_rate(&self) -> f64 {
        self.interest_rate / 100.0 / 12.0
    }

    /// Remaining term, or the given default when unknown
    pub fn term_or(&self, default_months: u32) -> u32 {
        self.remaining_term.unwrap_or(default_months)
    }
}

/// One debt's slot in a strategy's sequential payoff schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPayoff {
    pub debt_id: String,
    /// 1-based position in the strategy order
    pub position: usize,
    /// Payment applied to this debt each month
    pub monthly_payment: f64,
    pub months: u32,
    pub interest: f64,
    /// Month the debt becomes the target (0-based, after all debts ahead of it)
    pub start_month: u32,
    pub end_month: u32,
}

/// A complete payoff plan for the portfolio under one ordering policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub strategy: StrategyKind,
    pub name: String,
    pub description: String,
    pub total_interest: f64,
    /// Principal plus interest
    pub total_payments: f64,
    pub payoff_months: u32,
    pub monthly_payment: f64,
    pub explanation: Explanation,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    /// 0-100
    pub confidence: u8,
    pub payoff_order: Vec<DebtPayoff>,
}

/// What a recommendation is about: one debt, or the portfolio as a whole
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum RecommendationTarget {
    Debt(String),
    General,
}

impl RecommendationTarget {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Debt(id) => id,
            Self::General => GENERAL_TARGET,
        }
    }
}

impl From<String> for RecommendationTarget {
    fn from(s: String) -> Self {
        if s == GENERAL_TARGET {
            Self::General
        } else {
            Self::Debt(s)
        }
    }
}

impl From<RecommendationTarget> for String {
    fn from(target: RecommendationTarget) -> Self {
        match target {
            RecommendationTarget::Debt(id) => id,
            RecommendationTarget::General => GENERAL_TARGET.to_string(),
        }
    }
}

impl fmt::Display for RecommendationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An actionable suggestion for one debt or the whole portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// `<rule>:<target>`, e.g. `high_interest:card-1`
    pub id: String,
    pub debt_id: RecommendationTarget,
    pub title: String,
    pub description: String,
    pub action: ActionKind,
    pub impact: Tier,
    pub effort: Tier,
    pub priority: Priority,
    pub explanation: Explanation,
    pub action_steps: Vec<String>,
    pub expected_savings: f64,
    pub timeframe: String,
    /// 0-100
    pub confidence: u8,
}

/// Aggregate root for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentState {
    pub user_id: String,
    pub analysis_date: DateTime<Utc>,
    pub debts: Vec<Debt>,
    /// Snowball, avalanche, hybrid in that order
    pub strategies: Vec<Strategy>,
    pub recommendations: Vec<Recommendation>,
    pub current_strategy: StrategyKind,
    pub monthly_budget: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<f64>,
    pub total_debt: f64,
    pub total_minimum_payments: f64,
    /// Coarse interest-at-minimums reference (not any strategy's interest)
    pub total_interest: f64,
    /// `None` when no (or zero) income was supplied
    pub debt_to_income_ratio: Option<f64>,
    pub version: String,
}

impl AgentState {
    pub fn strategy(&self, kind: StrategyKind) -> Option<&Strategy> {
        self.strategies.iter().find(|s| s.strategy == kind)
    }

    /// The strategy named by `current_strategy`
    pub fn selected_strategy(&self) -> Option<&Strategy> {
        self.strategy(self.current_strategy)
    }

    pub fn debt(&self, id: &str) -> Option<&Debt> {
        self.debts.iter().find(|d| d.id == id)
    }
}
