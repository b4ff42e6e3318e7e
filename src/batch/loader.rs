//! Load calculation requests from a CSV file
//!
//! Columns: RequestID, Principal, Deadline, PeriodYear, PeriodMonth, PaymentDate.
//! Each row needs either a Deadline or both period columns; a Deadline wins when
//! both are present. Principal may carry thousands separators.

use csv::Reader;
use log::warn;
use std::io::Read;
use std::path::Path;

use crate::error::{InterestError, Result};
use crate::request::{parse_date, parse_principal, CalculationRequest, DeadlineSource};

/// Raw CSV row matching the request file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "RequestID")]
    request_id: String,
    #[serde(rename = "Principal")]
    principal: String,
    #[serde(rename = "Deadline", default)]
    deadline: Option<String>,
    #[serde(rename = "PeriodYear", default)]
    period_year: Option<String>,
    #[serde(rename = "PeriodMonth", default)]
    period_month: Option<String>,
    #[serde(rename = "PaymentDate")]
    payment_date: String,
}

impl CsvRow {
    fn to_request(&self) -> Result<CalculationRequest> {
        let principal = parse_principal(&self.principal)?;

        let deadline = match self.deadline.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Some(parse_date(text)?),
            _ => None,
        };
        let period_year = parse_optional(self.period_year.as_deref(), "PeriodYear")?;
        let period_month = parse_optional(self.period_month.as_deref(), "PeriodMonth")?;
        let source = DeadlineSource::from_parts(deadline, period_year, period_month)?;

        let payment_date = parse_date(&self.payment_date)?;

        Ok(CalculationRequest {
            principal,
            deadline: source,
            payment_date,
        })
    }
}

/// Blank cells are absent; anything else must parse as `T`
fn parse_optional<T: std::str::FromStr>(
    text: Option<&str>,
    field: &'static str,
) -> Result<Option<T>> {
    match text.map(str::trim) {
        Some(value) if !value.is_empty() => value
            .parse()
            .map(Some)
            .map_err(|_| InterestError::InvalidField {
                field,
                value: value.to_string(),
            }),
        _ => Ok(None),
    }
}

/// A request row that passed validation
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub request_id: String,
    pub request: CalculationRequest,
}

/// A request row that was rejected, with the reason
#[derive(Debug)]
pub struct RejectedRow {
    pub request_id: String,
    /// 1-based data row number (header excluded)
    pub row: usize,
    pub error: InterestError,
}

/// Validated and rejected rows of one request file
#[derive(Debug, Default)]
pub struct LoadedBatch {
    pub requests: Vec<BatchRequest>,
    pub rejected: Vec<RejectedRow>,
}

/// Load all requests from a CSV file
pub fn load_requests<P: AsRef<Path>>(path: P) -> Result<LoadedBatch> {
    let file = std::fs::File::open(path)?;
    load_requests_from_reader(file)
}

/// Load requests from any reader (e.g., string buffer, network stream).
///
/// Malformed CSV (unreadable records, wrong column count) aborts the load. Rows
/// with unparseable or invalid values are collected in [`LoadedBatch::rejected`]
/// so the rest of the file still runs.
pub fn load_requests_from_reader<R: Read>(reader: R) -> Result<LoadedBatch> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    collect_rows(&mut csv_reader)
}

fn collect_rows<R: Read>(csv_reader: &mut Reader<R>) -> Result<LoadedBatch> {
    let mut batch = LoadedBatch::default();

    for (idx, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        match row.to_request() {
            Ok(request) => batch.requests.push(BatchRequest {
                request_id: row.request_id,
                request,
            }),
            Err(error) => {
                warn!("Skipping request {} (row {}): {}", row.request_id, idx + 1, error);
                batch.rejected.push(RejectedRow {
                    request_id: row.request_id,
                    row: idx + 1,
                    error,
                });
            }
        }
    }

    Ok(batch)
}
