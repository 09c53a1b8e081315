//! Intake & validation
//!
//! Turns loosely-typed debt and income records from the caller into
//! validated [`Debt`] values. Any violation aborts the whole run with a
//! [`ValidationError`] naming the record and field; nothing is coerced.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, ValidationError};
use crate::models::{Debt, DebtType, Priority, GENERAL_TARGET};

/// Request envelope as supplied by the HTTP/UI layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    pub debts: Vec<Value>,
    #[serde(default)]
    pub income: Option<Value>,
}

impl AnalysisRequest {
    pub fn new(debts: Vec<Value>, income: Option<Value>) -> Self {
        Self {
            user_id: None,
            debts,
            income,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Parse a request from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Output of the intake phase
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPortfolio {
    pub debts: Vec<Debt>,
    pub total_debt: f64,
    pub total_minimum_payments: f64,
    /// Monthly income, when supplied
    pub monthly_income: Option<f64>,
    /// (minimum payments / monthly income) x 100; `None` without usable income
    pub debt_to_income_ratio: Option<f64>,
}

/// Validate raw debt records and the optional income record
pub fn validate(raw_debts: &[Value], raw_income: Option<&Value>) -> Result<ValidatedPortfolio> {
    let mut debts = Vec::with_capacity(raw_debts.len());
    let mut seen_ids = HashSet::new();

    for (index, raw) in raw_debts.iter().enumerate() {
        let debt = parse_debt(index, raw)?;
        if !seen_ids.insert(debt.id.clone()) {
            return Err(ValidationError::debt(
                index,
                "id",
                format!("duplicate id '{}'", debt.id),
            )
            .into());
        }
        debts.push(debt);
    }

    let monthly_income = match raw_income {
        Some(value) => parse_income(value)?,
        None => None,
    };

    let total_debt: f64 = debts.iter().map(|d| d.balance).sum();
    let total_minimum_payments: f64 = debts.iter().map(|d| d.minimum_payment).sum();

    let debt_to_income_ratio = match monthly_income {
        Some(income) if income > 0.0 => Some(total_minimum_payments / income * 100.0),
        Some(_) => {
            tracing::warn!("Monthly income is zero; debt-to-income ratio is undefined");
            None
        }
        None => None,
    };

    tracing::debug!(
        debts = debts.len(),
        total_debt,
        dti = ?debt_to_income_ratio,
        "Intake complete"
    );

    Ok(ValidatedPortfolio {
        debts,
        total_debt,
        total_minimum_payments,
        monthly_income,
        debt_to_income_ratio,
    })
}

/// Parse one raw record into a validated debt
fn parse_debt(index: usize, raw: &Value) -> Result<Debt> {
    let record = raw
        .as_object()
        .ok_or_else(|| ValidationError::debt(index, "record", "must be an object"))?;

    let id = match field(record, "id") {
        None => format!("debt-{}", index + 1),
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) if n.is_u64() || n.is_i64() => n.to_string(),
        Some(_) => {
            return Err(
                ValidationError::debt(index, "id", "must be a non-empty string or integer").into(),
            )
        }
    };
    if id == GENERAL_TARGET {
        return Err(ValidationError::debt(
            index,
            "id",
            format!("'{}' is reserved for portfolio-wide items", GENERAL_TARGET),
        )
        .into());
    }

    let name = match field(record, "name") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(_) => {
            return Err(ValidationError::debt(index, "name", "must be a non-empty string").into())
        }
        None => return Err(ValidationError::debt(index, "name", "is required").into()),
    };

    let balance = required_amount(index, record, "balance")?;
    let interest_rate = required_amount(index, record, "interestRate")?;
    let minimum_payment = required_amount(index, record, "minimumPayment")?;

    let debt_type = match field(record, "type") {
        Some(Value::String(s)) => s
            .parse::<DebtType>()
            .map_err(|e| ValidationError::debt(index, "type", e))?,
        Some(_) => return Err(ValidationError::debt(index, "type", "must be a string").into()),
        None => return Err(ValidationError::debt(index, "type", "is required").into()),
    };

    let priority = match field(record, "priority") {
        None => Priority::default(),
        Some(Value::String(s)) => s
            .parse::<Priority>()
            .map_err(|e| ValidationError::debt(index, "priority", e))?,
        Some(_) => {
            return Err(ValidationError::debt(index, "priority", "must be a string").into())
        }
    };

    let is_secured = match field(record, "isSecured") {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            return Err(ValidationError::debt(index, "isSecured", "must be a boolean").into())
        }
    };

    let remaining_term = match field(record, "remainingTerm") {
        None => None,
        Some(Value::Number(n)) => match n.as_u64() {
            Some(months) if months > 0 && months <= u32::MAX as u64 => Some(months as u32),
            _ => {
                return Err(ValidationError::debt(
                    index,
                    "remainingTerm",
                    "must be a positive whole number of months",
                )
                .into())
            }
        },
        Some(_) => {
            return Err(
                ValidationError::debt(index, "remainingTerm", "must be a number").into(),
            )
        }
    };

    Ok(Debt {
        id,
        name,
        balance,
        interest_rate,
        minimum_payment,
        debt_type,
        priority,
        is_secured,
        remaining_term,
    })
}

/// Monthly income from `{monthly?, annual?}`; `monthly` wins over `annual / 12`
fn parse_income(raw: &Value) -> Result<Option<f64>> {
    let record = match raw {
        Value::Null => return Ok(None),
        Value::Object(map) => map,
        _ => return Err(ValidationError::income("income", "must be an object").into()),
    };

    if let Some(monthly) = optional_amount(record, "monthly", "income.monthly")? {
        return Ok(Some(monthly));
    }
    Ok(optional_amount(record, "annual", "income.annual")?.map(|annual| annual / 12.0))
}

/// A present, non-null field
fn field<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|v| !v.is_null())
}

fn required_amount(index: usize, record: &Map<String, Value>, key: &str) -> Result<f64> {
    match field(record, key) {
        None => Err(ValidationError::debt(index, key, "is required").into()),
        Some(value) => {
            let amount = value
                .as_f64()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ValidationError::debt(index, key, "must be a number"))?;
            if amount < 0.0 {
                return Err(ValidationError::debt(index, key, "must be non-negative").into());
            }
            Ok(amount)
        }
    }
}

fn optional_amount(record: &Map<String, Value>, key: &str, label: &str) -> Result<Option<f64>> {
    match field(record, key) {
        None => Ok(None),
        Some(value) => {
            let amount = value
                .as_f64()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ValidationError::income(label, "must be a number"))?;
            if amount < 0.0 {
                return Err(ValidationError::income(label, "must be non-negative").into());
            }
            Ok(Some(amount))
        }
    }
}
