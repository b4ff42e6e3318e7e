//! Error types for the interest engine and its loaders

use thiserror::Error;

/// Errors raised while validating input or loading tables.
///
/// The calculation core itself never fails; every variant here comes from the
/// validation and loading layers that sit in front of it.
#[derive(Debug, Error)]
pub enum InterestError {
    #[error("Invalid contribution month: {month} (expected 1-12)")]
    InvalidMonth { month: u32 },

    #[error("Era year {year} is outside the supported range {min}-{max}")]
    EraYearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("Principal must be non-negative, got {0}")]
    NegativePrincipal(i64),

    #[error("Cannot parse principal from {0:?}")]
    InvalidPrincipal(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("No deadline given: supply a deadline date or a contribution period")]
    MissingDeadline,

    #[error("Rate table is empty")]
    EmptyRateTable,

    #[error("Invalid rate {rate} for year {year}")]
    InvalidRate { year: i32, rate: f64 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, InterestError>;
