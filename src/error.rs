//! Error types for offer validation and loading

use std::fmt;
use thiserror::Error;

/// Fields of an offer that were left empty on one input row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields {
    /// Label of the offending row (auto-assigned if the row had none)
    pub label: String,
    /// Names of the missing numeric fields
    pub fields: Vec<&'static str>,
}

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.fields.join(", "))
    }
}

/// Input rejected before any comparison runs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("duplicate labels: {}", .0.join(", "))]
    DuplicateLabels(Vec<String>),

    #[error("offer #{index} has an empty label")]
    EmptyLabel { index: usize },

    #[error("missing required fields: {}", join_missing(.0))]
    MissingRequiredFields(Vec<MissingFields>),

    #[error("offer '{label}': {field} must be a non-negative number (got {value})")]
    InvalidValue {
        label: String,
        field: &'static str,
        value: f64,
    },

    #[error("at least {min} offers are needed for a comparison (got {count})")]
    TooFewOffers { count: usize, min: usize },

    #[error("at most {max} offers can be compared at once (got {count})")]
    TooManyOffers { count: usize, max: usize },

    #[error("setting {name} is out of range (got {value})")]
    InvalidSetting { name: &'static str, value: f64 },
}

fn join_missing(missing: &[MissingFields]) -> String {
    missing
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure while reading offers from a file or stream
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid offers: {0}")]
    Validation(#[from] ValidationError),
}
