//! Calculation output: per-year segments and the rounded total

use serde::{Deserialize, Serialize};

use super::window::AccrualWindow;

/// One row of the breakdown: interest accrued within a single calendar year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestSegment {
    pub year: i32,
    /// Overdue days falling in `year`
    pub days: u32,
    /// Annual rate applied, in percent
    pub rate: f64,
    /// Interest for the year, truncated to one decimal place
    pub interest: f64,
}

/// Result of an interest calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Total interest rounded to whole currency units
    pub final_interest: u64,

    /// Chronological per-year breakdown
    pub segments: Vec<InterestSegment>,

    /// Days on which interest accrued; `None` when paid on time
    pub window: Option<AccrualWindow>,
}

impl CalculationResult {
    /// Result for a payment made on or before the deadline
    pub fn paid_on_time() -> Self {
        Self {
            final_interest: 0,
            segments: Vec::new(),
            window: None,
        }
    }

    pub fn is_paid_on_time(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of the truncated segment interests before final rounding
    pub fn raw_total(&self) -> f64 {
        self.segments.iter().fold(0.0, |total, s| total + s.interest)
    }

    /// Total overdue days across all segments
    pub fn overdue_days(&self) -> u32 {
        self.segments.iter().map(|s| s.days).sum()
    }
}
