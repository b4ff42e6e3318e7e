//! Pension Interest - overdue-interest estimator for national pension contributions
//!
//! This library provides:
//! - Year-keyed rate schedules with fallback to the latest known rate
//! - Statutory payment deadlines derived from two-month contribution periods
//! - Year-segmented simple interest with per-segment truncation and half-up rounding
//! - The small-amount exemption rule applied when interest is collected
//! - Request validation and parallel CSV batch evaluation

pub mod error;
pub mod rates;
pub mod deadline;
pub mod interest;
pub mod collection;
pub mod request;
pub mod config;
pub mod batch;

// Re-export commonly used types
pub use error::{InterestError, Result};
pub use rates::RateTable;
pub use deadline::{ContributionPeriod, deadline_for};
pub use interest::{CalculationResult, InterestCalculator, InterestSegment, compute_interest};
pub use collection::{CollectionStatus, ExemptionPolicy};
pub use request::{CalculationRequest, DeadlineSource, RequestInput};
pub use config::CalculatorConfig;
