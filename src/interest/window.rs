//! Accrual window and its split into calendar-year spans

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive range of days on which interest accrues: from the day after the
/// deadline through the day before payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AccrualWindow {
    /// Window for a payment made on `payment_date` against `deadline`.
    /// Returns `None` when nothing accrues (payment on or before the deadline,
    /// or the day after the deadline is the payment day itself).
    pub fn between(deadline: NaiveDate, payment_date: NaiveDate) -> Option<Self> {
        let start = deadline.succ_opt()?;
        let end = payment_date.pred_opt()?;
        (start <= end).then_some(Self { start, end })
    }

    /// Number of days in the window, both ends included
    pub fn days(&self) -> u32 {
        ((self.end - self.start).num_days() + 1) as u32
    }

    /// Calendar-year pieces of the window in chronological order
    pub fn year_spans(&self) -> YearSpans {
        YearSpans {
            cursor: Some(self.start),
            end: self.end,
        }
    }
}

/// Part of an accrual window that falls inside a single calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSpan {
    pub year: i32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl YearSpan {
    pub fn days(&self) -> u32 {
        ((self.end - self.start).num_days() + 1) as u32
    }
}

/// Iterator over the [`YearSpan`]s of an [`AccrualWindow`]
#[derive(Debug, Clone)]
pub struct YearSpans {
    cursor: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for YearSpans {
    type Item = YearSpan;

    fn next(&mut self) -> Option<YearSpan> {
        let start = self.cursor.filter(|&d| d <= self.end)?;
        let year = start.year();

        // Year end or the window end, whichever comes first
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .map_or(self.end, |year_end| year_end.min(self.end));

        self.cursor = if end < self.end { end.succ_opt() } else { None };

        Some(YearSpan { year, start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_bounds() {
        let window = AccrualWindow::between(date(2023, 6, 30), date(2023, 8, 15)).unwrap();
        assert_eq!(window.start, date(2023, 7, 1));
        assert_eq!(window.end, date(2023, 8, 14));
        assert_eq!(window.days(), 45);
    }

    #[test]
    fn test_no_window_when_paid_on_time() {
        let deadline = date(2023, 6, 30);
        assert!(AccrualWindow::between(deadline, date(2023, 6, 1)).is_none());
        assert!(AccrualWindow::between(deadline, deadline).is_none());
        // Paid the day after the deadline: start would be after end
        assert!(AccrualWindow::between(deadline, date(2023, 7, 1)).is_none());
    }

    #[test]
    fn test_single_day_window() {
        let window = AccrualWindow::between(date(2023, 6, 30), date(2023, 7, 2)).unwrap();
        assert_eq!(window.days(), 1);
        assert_eq!(window.year_spans().count(), 1);
    }

    #[test]
    fn test_year_spans_split_on_year_end() {
        let window = AccrualWindow::between(date(2022, 12, 1), date(2023, 3, 1)).unwrap();
        let spans: Vec<_> = window.year_spans().collect();

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0], YearSpan { year: 2022, start: date(2022, 12, 2), end: date(2022, 12, 31) });
        assert_eq!(spans[1], YearSpan { year: 2023, start: date(2023, 1, 1), end: date(2023, 2, 28) });
        assert_eq!(spans[0].days(), 30);
        assert_eq!(spans[1].days(), 59);
    }

    #[test]
    fn test_spans_cover_window_without_gaps() {
        let window = AccrualWindow::between(date(2019, 5, 31), date(2024, 3, 15)).unwrap();
        let spans: Vec<_> = window.year_spans().collect();

        let years: Vec<i32> = spans.iter().map(|s| s.year).collect();
        assert_eq!(years, vec![2019, 2020, 2021, 2022, 2023, 2024]);

        assert_eq!(spans[0].start, window.start);
        assert_eq!(spans[spans.len() - 1].end, window.end);
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end.succ_opt().unwrap(), pair[1].start);
        }

        // Full leap year inside the window
        assert_eq!(spans[1].days(), 366);
        let total: u32 = spans.iter().map(|s| s.days()).sum();
        assert_eq!(total, window.days());
    }

    #[test]
    fn test_window_ending_on_december_31() {
        let window = AccrualWindow::between(date(2023, 11, 30), date(2024, 1, 1)).unwrap();
        let spans: Vec<_> = window.year_spans().collect();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].end, date(2023, 12, 31));
        assert_eq!(spans[0].days(), 31);
    }
}
