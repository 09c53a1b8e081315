//! Closed-form amortization math
//!
//! Payoff time for a fixed monthly payment:
//!
//! ```text
//! months = -ln(1 - balance * r / payment) / ln(1 + r),   r = annual% / 100 / 12
//! ```
//!
//! rounded up to whole months. With `r == 0` this degenerates to
//! `ceil(balance / payment)`. Divergent inputs are reported as
//! [`Error::Computation`] rather than leaking NaN or infinity.

use crate::error::{Error, Result};
use crate::models::Debt;

/// Months and interest needed to retire one debt at a fixed payment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoffEstimate {
    pub months: u32,
    /// `max(0, payment * months - balance)`
    pub interest: f64,
}

/// Estimate payoff of `debt` when `payment` is applied every month
///
/// A payment that does not exceed the debt's own minimum falls back to the
/// remaining term (or `default_term`) instead of the closed form.
pub fn estimate(debt: &Debt, payment: f64, default_term: u32) -> Result<PayoffEstimate> {
    if debt.balance <= 0.0 {
        return Ok(PayoffEstimate {
            months: 0,
            interest: 0.0,
        });
    }

    if !payment.is_finite() || payment <= 0.0 {
        return Err(Error::Computation(format!(
            "debt '{}' has balance {} but the available payment is {}",
            debt.id, debt.balance, payment
        )));
    }

    let months = if payment <= debt.minimum_payment {
        debt.term_or(default_term)
    } else {
        payoff_months(debt.balance, debt.monthly_rate(), payment).map_err(|reason| {
            Error::Computation(format!("debt '{}': {}", debt.id, reason))
        })?
    };

    let interest = (payment * months as f64 - debt.balance).max(0.0);
    Ok(PayoffEstimate { months, interest })
}

/// Whole months to pay `balance` at `monthly_rate` with a fixed `payment`
pub fn payoff_months(
    balance: f64,
    monthly_rate: f64,
    payment: f64,
) -> std::result::Result<u32, String> {
    if monthly_rate == 0.0 {
        return to_months((balance / payment).ceil());
    }

    let interest_share = (balance * monthly_rate) / payment;
    if interest_share >= 1.0 {
        return Err(format!(
            "payment {:.2} does not exceed monthly interest {:.2}",
            payment,
            balance * monthly_rate
        ));
    }

    // ln_1p keeps precision where 1 + r rounds to 1
    let growth = monthly_rate.ln_1p();
    if growth == 0.0 {
        return to_months((balance / payment).ceil());
    }

    let months = -(-interest_share).ln_1p() / growth;
    to_months(months.ceil())
}

fn to_months(value: f64) -> std::result::Result<u32, String> {
    if !value.is_finite() || value < 0.0 || value > u32::MAX as f64 {
        return Err(format!("payoff time {} is out of range", value));
    }
    Ok(value as u32)
}
