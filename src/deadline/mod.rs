//! Statutory payment deadlines derived from contribution periods

mod calendar;
mod period;

pub use calendar::{
    ERA_YEAR_OFFSET, days_in_month, era_date, era_to_gregorian, is_leap_year, last_day_of_month,
};
pub use period::{ContributionPeriod, MAX_ERA_YEAR, MIN_ERA_YEAR, deadline_for};
