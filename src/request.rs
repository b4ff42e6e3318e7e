//! Validated calculation requests
//!
//! Everything the interest core assumes about its input is checked here: the
//! principal is a non-negative whole amount, the contribution month is 1-12, and
//! the era year is plausible. Requests that get through can be evaluated without
//! any further error handling.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::collection::ExemptionPolicy;
use crate::deadline::{era_date, ContributionPeriod};
use crate::error::{InterestError, Result};
use crate::interest::{CalculationResult, InterestCalculator};

/// Where the statutory deadline of a request comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineSource {
    /// Deadline printed on the notice
    Date(NaiveDate),
    /// Deadline derived from the billing period
    Period(ContributionPeriod),
}

impl DeadlineSource {
    /// Pick a deadline source from optional inputs.
    ///
    /// An explicit date wins over a contribution period; a period needs both the
    /// era year and the month.
    pub fn from_parts(
        deadline: Option<NaiveDate>,
        era_year: Option<i32>,
        month: Option<u32>,
    ) -> Result<Self> {
        match (deadline, era_year, month) {
            (Some(date), _, _) => Ok(DeadlineSource::Date(date)),
            (None, Some(year), Some(month)) => {
                Ok(DeadlineSource::Period(ContributionPeriod::new(year, month)?))
            }
            _ => Err(InterestError::MissingDeadline),
        }
    }

    pub fn resolve(&self) -> NaiveDate {
        match self {
            DeadlineSource::Date(date) => *date,
            DeadlineSource::Period(period) => period.deadline(),
        }
    }
}

/// A request ready for the interest calculator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationRequest {
    pub principal: u64,
    pub deadline: DeadlineSource,
    pub payment_date: NaiveDate,
}

impl CalculationRequest {
    /// Validate a signed principal; negative amounts are rejected
    pub fn new(principal: i64, deadline: DeadlineSource, payment_date: NaiveDate) -> Result<Self> {
        let principal =
            u64::try_from(principal).map_err(|_| InterestError::NegativePrincipal(principal))?;
        Ok(Self {
            principal,
            deadline,
            payment_date,
        })
    }

    pub fn deadline_date(&self) -> NaiveDate {
        self.deadline.resolve()
    }

    pub fn evaluate(&self, calculator: &InterestCalculator) -> CalculationResult {
        calculator.compute(self.principal, self.deadline_date(), self.payment_date)
    }
}

/// Loosely typed request as it arrives over JSON
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestInput {
    /// Principal in whole currency units
    pub principal: i64,

    /// Deadline printed on the notice, in any form [`parse_date`] accepts
    #[serde(default)]
    pub deadline: Option<String>,

    /// Era year of the contribution period, used when no deadline is given
    #[serde(default)]
    pub period_year: Option<i32>,

    /// Month of the contribution period (1-12)
    #[serde(default)]
    pub period_month: Option<u32>,

    /// Payment date; `today` is used when absent
    #[serde(default)]
    pub payment_date: Option<String>,

    /// Override for the configured exemption threshold
    #[serde(default)]
    pub exemption_threshold: Option<u64>,
}

impl RequestInput {
    /// Validate into a request, defaulting the payment date to `today`
    pub fn to_request(&self, today: NaiveDate) -> Result<CalculationRequest> {
        let deadline = self.deadline.as_deref().map(parse_date).transpose()?;
        let source = DeadlineSource::from_parts(deadline, self.period_year, self.period_month)?;
        let payment_date = match self.payment_date.as_deref() {
            Some(text) => parse_date(text)?,
            None => today,
        };
        CalculationRequest::new(self.principal, source, payment_date)
    }

    /// The configured policy unless this request carries its own threshold
    pub fn exemption_policy(&self, configured: ExemptionPolicy) -> ExemptionPolicy {
        self.exemption_threshold
            .map(ExemptionPolicy::new)
            .unwrap_or(configured)
    }
}

/// Parse a principal such as `"12,345"`, dropping thousands separators
pub fn parse_principal(text: &str) -> Result<u64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    let value: i64 = cleaned
        .parse()
        .map_err(|_| InterestError::InvalidPrincipal(text.to_string()))?;

    u64::try_from(value).map_err(|_| InterestError::NegativePrincipal(value))
}

/// Parse a date written as `YYYY-MM-DD`, `YYYY/MM/DD`, or in era form.
///
/// Era dates are recognised by a year of at most three digits: `112/07/31`,
/// `112.07.31`, the compact `1120731` / `990731` printed on notices, and the mixed
/// `112/0731`. An eight-digit run is a Gregorian `YYYYMMDD`. Gregorian years
/// must have four digits, so a zero-padded `0112/07/31` is rejected rather than
/// read as year 112.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    let invalid = || InterestError::InvalidDate(text.to_string());

    let parts: Vec<&str> = text.split(|c: char| c == '-' || c == '/' || c == '.').collect();
    if !parts.iter().all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit())) {
        return Err(invalid());
    }

    let (year, month, day) = match parts.as_slice() {
        [year, month, day] => (*year, *month, *day),
        [compact] if compact.len() == 8 => (&compact[..4], &compact[4..6], &compact[6..]),
        [compact] if (6..=7).contains(&compact.len()) => {
            let split = compact.len() - 4;
            (&compact[..split], &compact[split..split + 2], &compact[split + 2..])
        }
        [year, month_day] if year.len() <= 3 && month_day.len() == 4 => {
            (*year, &month_day[..2], &month_day[2..])
        }
        _ => return Err(invalid()),
    };

    let y: i32 = year.parse().map_err(|_| invalid())?;
    let m: u32 = month.parse().map_err(|_| invalid())?;
    let d: u32 = day.parse().map_err(|_| invalid())?;

    if year.len() <= 3 {
        era_date(y, m, d)
    } else if year.len() == 4 && y >= 1000 {
        NaiveDate::from_ymd_opt(y, m, d).ok_or_else(invalid)
    } else {
        Err(invalid())
    }
}
