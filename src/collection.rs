//! Collection rule for small interest amounts
//!
//! Interest totals at or below the threshold are waived. The calculator always
//! reports the true amount; this rule only decides whether it is collected.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::interest::CalculationResult;

/// Totals at or below this many currency units are not collected
pub const DEFAULT_EXEMPTION_THRESHOLD: u64 = 30;

/// Whether computed interest is collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionStatus {
    /// Total is at or below the threshold and is waived
    Exempt,
    /// Total exceeds the threshold and is due with the contribution
    Payable,
}

impl fmt::Display for CollectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionStatus::Exempt => write!(f, "exempt"),
            CollectionStatus::Payable => write!(f, "payable"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExemptionPolicy {
    pub threshold: u64,
}

impl ExemptionPolicy {
    pub fn new(threshold: u64) -> Self {
        Self { threshold }
    }

    pub fn status(&self, final_interest: u64) -> CollectionStatus {
        if final_interest <= self.threshold {
            CollectionStatus::Exempt
        } else {
            CollectionStatus::Payable
        }
    }

    pub fn assess(&self, result: &CalculationResult) -> CollectionStatus {
        self.status(result.final_interest)
    }

    /// Amount actually collected: zero when exempt, the full total otherwise
    pub fn amount_due(&self, result: &CalculationResult) -> u64 {
        match self.assess(result) {
            CollectionStatus::Exempt => 0,
            CollectionStatus::Payable => result.final_interest,
        }
    }
}

impl Default for ExemptionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_EXEMPTION_THRESHOLD)
    }
}
