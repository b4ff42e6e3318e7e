//! Batch runner for many independent calculation requests
//!
//! One calculator (and its rate table) is shared read-only across all requests,
//! which are evaluated in parallel.

use std::io::Write;

use chrono::NaiveDate;
use log::info;
use rayon::prelude::*;
use serde::Serialize;

use super::loader::BatchRequest;
use crate::collection::{CollectionStatus, ExemptionPolicy};
use crate::config::CalculatorConfig;
use crate::error::Result;
use crate::interest::InterestCalculator;

/// Outcome of one request in a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub request_id: String,
    pub deadline: NaiveDate,
    pub payment_date: NaiveDate,
    pub overdue_days: u32,
    /// Sum of truncated yearly amounts before rounding
    pub raw_total: f64,
    pub final_interest: u64,
    pub status: CollectionStatus,
    pub amount_due: u64,
}

/// Totals across a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub requests: usize,
    pub payable: usize,
    pub exempt: usize,
    /// Sum of computed interest, including waived amounts
    pub total_interest: u64,
    /// Sum of interest actually collected
    pub total_due: u64,
}

#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    calculator: InterestCalculator,
    policy: ExemptionPolicy,
}

impl BatchRunner {
    pub fn new(calculator: InterestCalculator, policy: ExemptionPolicy) -> Self {
        Self { calculator, policy }
    }

    /// Create runner from configuration (loads the rate table once)
    pub fn from_config(config: &CalculatorConfig) -> Result<Self> {
        Ok(Self {
            calculator: config.calculator()?,
            policy: config.exemption_policy(),
        })
    }

    pub fn calculator(&self) -> &InterestCalculator {
        &self.calculator
    }

    pub fn run(&self, item: &BatchRequest) -> BatchResult {
        let request = &item.request;
        let result = request.evaluate(&self.calculator);

        BatchResult {
            request_id: item.request_id.clone(),
            deadline: request.deadline_date(),
            payment_date: request.payment_date,
            overdue_days: result.overdue_days(),
            raw_total: result.raw_total(),
            final_interest: result.final_interest,
            status: self.policy.assess(&result),
            amount_due: self.policy.amount_due(&result),
        }
    }

    /// Evaluate all requests in parallel; output order follows input order
    pub fn run_batch(&self, requests: &[BatchRequest]) -> Vec<BatchResult> {
        let results: Vec<BatchResult> = requests.par_iter().map(|item| self.run(item)).collect();
        info!("Evaluated {} requests", results.len());
        results
    }
}

pub fn summarize(results: &[BatchResult]) -> BatchSummary {
    results.iter().fold(BatchSummary::default(), |mut summary, r| {
        summary.requests += 1;
        match r.status {
            CollectionStatus::Payable => summary.payable += 1,
            CollectionStatus::Exempt => summary.exempt += 1,
        }
        summary.total_interest = summary.total_interest.saturating_add(r.final_interest);
        summary.total_due = summary.total_due.saturating_add(r.amount_due);
        summary
    })
}

/// Write results as CSV with a header row
pub fn write_results<W: Write>(writer: W, results: &[BatchResult]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "RequestID",
        "Deadline",
        "PaymentDate",
        "OverdueDays",
        "RawTotal",
        "FinalInterest",
        "Status",
        "AmountDue",
    ])?;

    for r in results {
        csv_writer.write_record([
            r.request_id.clone(),
            r.deadline.to_string(),
            r.payment_date.to_string(),
            r.overdue_days.to_string(),
            format!("{:.1}", r.raw_total),
            r.final_interest.to_string(),
            r.status.to_string(),
            r.amount_due.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::loader::load_requests_from_reader;

    const SAMPLE: &str = "\
RequestID,Principal,Deadline,PeriodYear,PeriodMonth,PaymentDate
A1,5000,2023-06-30,,,2023-08-15
A2,10000,2022-12-01,,,2023-03-01
A3,20000,2019-05-31,,,2024-03-15
A4,5000,2023-06-30,,,2023-06-30
";

    fn run_sample() -> Vec<BatchResult> {
        let batch = load_requests_from_reader(SAMPLE.as_bytes()).unwrap();
        BatchRunner::default().run_batch(&batch.requests)
    }

    #[test]
    fn test_batch_results_follow_input_order() {
        let results = run_sample();
        let ids: Vec<&str> = results.iter().map(|r| r.request_id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "A2", "A3", "A4"]);

        assert_eq!(results[0].final_interest, 9);
        assert_eq!(results[0].overdue_days, 45);
        assert_eq!(results[1].final_interest, 30);
        assert_eq!(results[2].final_interest, 1002);
        assert_eq!(results[3].final_interest, 0);
        assert_eq!(results[3].overdue_days, 0);
    }

    #[test]
    fn test_exemption_applied_per_request() {
        let results = run_sample();

        // 30 is still exempt, 1002 is payable
        assert_eq!(results[1].status, CollectionStatus::Exempt);
        assert_eq!(results[1].amount_due, 0);
        assert_eq!(results[2].status, CollectionStatus::Payable);
        assert_eq!(results[2].amount_due, 1002);

        let summary = summarize(&results);
        assert_eq!(summary.requests, 4);
        assert_eq!(summary.payable, 1);
        assert_eq!(summary.exempt, 3);
        assert_eq!(summary.total_interest, 9 + 30 + 1002);
        assert_eq!(summary.total_due, 1002);
    }

    #[test]
    fn test_summary_totals_saturate() {
        let huge = BatchResult {
            request_id: "H".to_string(),
            deadline: NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
            payment_date: NaiveDate::from_ymd_opt(2023, 8, 15).unwrap(),
            overdue_days: 45,
            raw_total: u64::MAX as f64,
            final_interest: u64::MAX,
            status: CollectionStatus::Payable,
            amount_due: u64::MAX,
        };
        let summary = summarize(&[huge.clone(), huge]);

        assert_eq!(summary.requests, 2);
        assert_eq!(summary.total_interest, u64::MAX);
        assert_eq!(summary.total_due, u64::MAX);
    }

    #[test]
    fn test_write_results_csv() {
        let results = run_sample();
        let mut out = Vec::new();
        write_results(&mut out, &results).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "RequestID,Deadline,PaymentDate,OverdueDays,RawTotal,FinalInterest,Status,AmountDue"
        );
        assert_eq!(lines[2], "A2,2022-12-01,2023-03-01,89,30.2,30,exempt,0");
        assert_eq!(lines.len(), 5);
    }
}
