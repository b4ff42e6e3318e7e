//! Contribution periods and the statutory payment deadline rule
//!
//! Contributions are billed in two-month periods (Jan-Feb, Mar-Apr, ...). The bill
//! for a period falls due on the last day of the second month after the period ends,
//! so the Jan-Feb bill is due on April 30 and the Nov-Dec bill on the last day of
//! the following February.

use chrono::NaiveDate;
use serde::Serialize;

use super::calendar::{era_to_gregorian, last_day_of_month};
use crate::error::{InterestError, Result};

/// Earliest era year accepted: the national pension scheme started in October 2008
pub const MIN_ERA_YEAR: i32 = 97;

/// Latest era year accepted, keeping the Gregorian year within four digits
pub const MAX_ERA_YEAR: i32 = 9999 - super::calendar::ERA_YEAR_OFFSET;

/// Months between the end of a billing period and the month its bill falls due
const MONTHS_UNTIL_DUE: u32 = 2;

/// Billing period a contribution covers, identified by era year and month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ContributionPeriod {
    era_year: i32,
    month: u32,
}

impl ContributionPeriod {
    /// Validate and build a period. `month` must be 1-12 and `era_year` within
    /// [`MIN_ERA_YEAR`, `MAX_ERA_YEAR`].
    pub fn new(era_year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(InterestError::InvalidMonth { month });
        }
        if !(MIN_ERA_YEAR..=MAX_ERA_YEAR).contains(&era_year) {
            return Err(InterestError::EraYearOutOfRange {
                year: era_year,
                min: MIN_ERA_YEAR,
                max: MAX_ERA_YEAR,
            });
        }
        Ok(Self { era_year, month })
    }

    pub fn era_year(&self) -> i32 {
        self.era_year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn gregorian_year(&self) -> i32 {
        era_to_gregorian(self.era_year)
    }

    /// Last month of the two-month billing period containing this month
    pub fn coverage_end_month(&self) -> u32 {
        if self.month % 2 == 1 {
            self.month + 1
        } else {
            self.month
        }
    }

    /// Year and month in which the bill for this period falls due
    pub fn due_month(&self) -> (i32, u32) {
        let month = self.coverage_end_month() + MONTHS_UNTIL_DUE;
        if month > 12 {
            (self.gregorian_year() + 1, month - 12)
        } else {
            (self.gregorian_year(), month)
        }
    }

    /// Statutory payment deadline: last day of the due month
    pub fn deadline(&self) -> NaiveDate {
        let (year, month) = self.due_month();
        last_day_of_month(year, month)
            .expect("due month of a validated period is always a real month")
    }
}

/// Statutory deadline for a validated contribution period
pub fn deadline_for(period: &ContributionPeriod) -> NaiveDate {
    period.deadline()
}
