//! Year-segmented simple interest on overdue contributions
//!
//! The pipeline is fixed and its order matters:
//! 1. split the accrual window into calendar-year segments
//! 2. price each segment at its year's rate and truncate to one decimal place
//! 3. add the truncated segment amounts
//! 4. round the sum half-up to whole currency units
//!
//! Truncating per segment gives a different total than truncating once at the end,
//! and the published figures follow the per-segment order.

use chrono::NaiveDate;
use log::debug;

use super::result::{CalculationResult, InterestSegment};
use super::window::AccrualWindow;
use crate::rates::RateTable;

/// Day-count divisor; leap years are still divided by 365
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Added before rounding so that totals sitting on .5 round up even when the
/// binary sum lands a hair below it
pub const ROUNDING_EPSILON: f64 = 1e-5;

/// Untruncated interest for `days` overdue days at an annual `rate` in percent
pub fn segment_interest(principal: u64, rate: f64, days: u32) -> f64 {
    principal as f64 * rate * 0.01 * days as f64 / DAYS_PER_YEAR
}

/// Drop everything past the first decimal place (toward zero for non-negative values)
pub fn truncate_to_tenth(amount: f64) -> f64 {
    (amount * 10.0).floor() / 10.0
}

/// Round a summed total half-up to whole currency units
pub fn round_to_unit(raw_total: f64) -> u64 {
    (raw_total + ROUNDING_EPSILON).round() as u64
}

/// Interest owed on `principal` for a payment made on `payment_date` against `deadline`.
///
/// Payments on or before the deadline yield a zero result with no segments.
pub fn compute_interest(
    principal: u64,
    deadline: NaiveDate,
    payment_date: NaiveDate,
    rates: &RateTable,
) -> CalculationResult {
    let window = match AccrualWindow::between(deadline, payment_date) {
        Some(window) => window,
        None => return CalculationResult::paid_on_time(),
    };

    let segments: Vec<InterestSegment> = window
        .year_spans()
        .map(|span| {
            let days = span.days();
            let rate = rates.rate_for(span.year);
            let raw = segment_interest(principal, rate, days);
            let interest = truncate_to_tenth(raw);

            debug!(
                "{}: {} days at {}% -> {} (untruncated {})",
                span.year, days, rate, interest, raw
            );

            InterestSegment {
                year: span.year,
                days,
                rate,
                interest,
            }
        })
        .collect();

    let raw_total = segments.iter().fold(0.0, |total, s| total + s.interest);
    let final_interest = round_to_unit(raw_total);

    debug!(
        "Principal {} overdue {} days: raw total {:.1}, rounded {}",
        principal,
        window.days(),
        raw_total,
        final_interest
    );

    CalculationResult {
        final_interest,
        segments,
        window: Some(window),
    }
}

/// Interest calculator bound to one rate table
///
/// The table is read-only, so one calculator can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct InterestCalculator {
    rates: RateTable,
}

impl InterestCalculator {
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn compute(
        &self,
        principal: u64,
        deadline: NaiveDate,
        payment_date: NaiveDate,
    ) -> CalculationResult {
        compute_interest(principal, deadline, payment_date, &self.rates)
    }
}
