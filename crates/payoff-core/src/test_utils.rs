//! Test utilities for payoff-core
//!
//! Fixture builders for validated debts and for the raw JSON records the
//! intake phase consumes.

use serde_json::{json, Value};

use crate::intake::AnalysisRequest;
use crate::models::{Debt, DebtType, Priority};

/// A validated credit-card debt with defaults for the optional fields
pub fn debt(id: &str, balance: f64, interest_rate: f64, minimum_payment: f64) -> Debt {
    Debt {
        id: id.to_string(),
        name: format!("Lån {}", id),
        balance,
        interest_rate,
        minimum_payment,
        debt_type: DebtType::CreditCard,
        priority: Priority::Medium,
        is_secured: false,
        remaining_term: None,
    }
}

/// A raw debt record as the HTTP layer would send it
pub fn raw_debt(id: &str, balance: f64, interest_rate: f64, minimum_payment: f64) -> Value {
    json!({
        "id": id,
        "name": format!("Lån {}", id),
        "balance": balance,
        "interestRate": interest_rate,
        "minimumPayment": minimum_payment,
        "type": "credit_card"
    })
}

/// A request built from `(id, balance, rate, minimum)` tuples
pub fn request(debts: &[(&str, f64, f64, f64)], monthly_income: Option<f64>) -> AnalysisRequest {
    let raw = debts
        .iter()
        .map(|(id, balance, rate, minimum)| raw_debt(id, *balance, *rate, *minimum))
        .collect();
    let income = monthly_income.map(|monthly| json!({ "monthly": monthly }));
    AnalysisRequest::new(raw, income).with_user("test-user")
}
