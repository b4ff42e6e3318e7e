//! Overdue interest calculation

mod window;
mod result;
mod calculator;

pub use window::{AccrualWindow, YearSpan, YearSpans};
pub use result::{CalculationResult, InterestSegment};
pub use calculator::{
    InterestCalculator, compute_interest, round_to_unit, segment_interest, truncate_to_tenth,
    DAYS_PER_YEAR, ROUNDING_EPSILON,
};
