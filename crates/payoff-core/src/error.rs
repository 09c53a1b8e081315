//! Error types for the payoff engine

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A raw input record that failed schema or range checks
#[derive(Error, Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// 0-based index of the debt record, `None` for the income record
    pub record: Option<usize>,
    /// Offending field, e.g. `balance` or `income.monthly`
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn debt(record: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            record: Some(record),
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn income(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            record: None,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.record {
            Some(index) => write!(
                f,
                "debt record {}, field '{}': {}",
                index, self.field, self.message
            ),
            None => write!(f, "field '{}': {}", self.field, self.message),
        }
    }
}
