//! Runtime configuration
//!
//! Environment variables:
//!   PENSION_RATE_TABLE           path to a `Year,Rate` CSV (default: built-in schedule)
//!   PENSION_EXEMPTION_THRESHOLD  interest at or below this is waived (default: 30)

use std::env;
use std::path::PathBuf;

use log::{info, warn};

use crate::collection::{ExemptionPolicy, DEFAULT_EXEMPTION_THRESHOLD};
use crate::error::Result;
use crate::interest::InterestCalculator;
use crate::rates::RateTable;

pub const RATE_TABLE_ENV: &str = "PENSION_RATE_TABLE";
pub const EXEMPTION_THRESHOLD_ENV: &str = "PENSION_EXEMPTION_THRESHOLD";

#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorConfig {
    /// Rate CSV to load; `None` uses the built-in postal deposit schedule
    pub rate_table_path: Option<PathBuf>,

    pub exemption_threshold: u64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            rate_table_path: None,
            exemption_threshold: DEFAULT_EXEMPTION_THRESHOLD,
        }
    }
}

impl CalculatorConfig {
    /// Read config from environment or use defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build config from any key lookup (environment, request parameters, ...)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let rate_table_path = lookup(RATE_TABLE_ENV)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let exemption_threshold = match lookup(EXEMPTION_THRESHOLD_ENV) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(
                    "Ignoring {}={:?}: not a whole number, using {}",
                    EXEMPTION_THRESHOLD_ENV, raw, DEFAULT_EXEMPTION_THRESHOLD
                );
                DEFAULT_EXEMPTION_THRESHOLD
            }),
            None => DEFAULT_EXEMPTION_THRESHOLD,
        };

        Self {
            rate_table_path,
            exemption_threshold,
        }
    }

    /// Override the rate table path when one is given
    pub fn with_rate_table(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.rate_table_path = path;
        }
        self
    }

    /// Override the exemption threshold when one is given
    pub fn with_exemption_threshold(mut self, threshold: Option<u64>) -> Self {
        if let Some(threshold) = threshold {
            self.exemption_threshold = threshold;
        }
        self
    }

    pub fn load_rate_table(&self) -> Result<RateTable> {
        match &self.rate_table_path {
            Some(path) => {
                info!("Loading rate table from {}", path.display());
                RateTable::from_csv_path(path)
            }
            None => Ok(RateTable::postal_deposit_rates()),
        }
    }

    pub fn calculator(&self) -> Result<InterestCalculator> {
        Ok(InterestCalculator::new(self.load_rate_table()?))
    }

    pub fn exemption_policy(&self) -> ExemptionPolicy {
        ExemptionPolicy::new(self.exemption_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = CalculatorConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, CalculatorConfig::default());
        assert_eq!(config.exemption_policy().threshold, 30);
        assert_eq!(config.load_rate_table().unwrap(), RateTable::postal_deposit_rates());
    }

    #[test]
    fn test_reads_variables() {
        let config = CalculatorConfig::from_lookup(lookup_from(&[
            (RATE_TABLE_ENV, "data/rates/postal_deposit_rates.csv"),
            (EXEMPTION_THRESHOLD_ENV, " 50 "),
        ]));
        assert_eq!(
            config.rate_table_path,
            Some(PathBuf::from("data/rates/postal_deposit_rates.csv"))
        );
        assert_eq!(config.exemption_threshold, 50);
        assert_eq!(config.calculator().unwrap().rates().latest_year(), 2026);
    }

    #[test]
    fn test_bad_threshold_falls_back_to_default() {
        let config =
            CalculatorConfig::from_lookup(lookup_from(&[(EXEMPTION_THRESHOLD_ENV, "thirty")]));
        assert_eq!(config.exemption_threshold, DEFAULT_EXEMPTION_THRESHOLD);
    }

    #[test]
    fn test_overrides() {
        let config = CalculatorConfig::default()
            .with_rate_table(None)
            .with_exemption_threshold(Some(0));
        assert!(config.rate_table_path.is_none());
        assert_eq!(config.exemption_threshold, 0);

        let config = config.with_rate_table(Some(PathBuf::from("missing.csv")));
        assert!(config.load_rate_table().is_err());
    }
}
