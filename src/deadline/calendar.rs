//! Calendar helpers: leap years, month lengths, and era-year conversion

use chrono::NaiveDate;

use crate::error::{InterestError, Result};

/// Offset between the era year printed on notices and the Gregorian year
pub const ERA_YEAR_OFFSET: i32 = 1911;

/// Gregorian leap year rule: every 4th year, except centuries not divisible by 400
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`, or `None` when `month` is not in 1-12
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

/// Last calendar day of `month` in `year`
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let day = days_in_month(year, month)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn era_to_gregorian(era_year: i32) -> i32 {
    era_year + ERA_YEAR_OFFSET
}

/// Build a calendar date from an era-dated triple such as 112/07/31
pub fn era_date(era_year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(era_to_gregorian(era_year), month, day).ok_or_else(|| {
        InterestError::InvalidDate(format!("{}/{:02}/{:02} (era)", era_year, month, day))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_year_rule() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2100));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2024, 4), Some(30));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 0), None);
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2024, 2), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(last_day_of_month(2100, 2), NaiveDate::from_ymd_opt(2100, 2, 28));
        assert_eq!(last_day_of_month(2023, 6), NaiveDate::from_ymd_opt(2023, 6, 30));
        assert_eq!(last_day_of_month(2023, 14), None);
    }

    #[test]
    fn test_era_conversion() {
        assert_eq!(era_to_gregorian(112), 2023);
        assert_eq!(era_to_gregorian(97), 2008);
        assert_eq!(era_date(112, 7, 31).unwrap(), NaiveDate::from_ymd_opt(2023, 7, 31).unwrap());
        assert!(matches!(era_date(112, 2, 30), Err(InterestError::InvalidDate(_))));
    }
}
