//! Annual overdue-interest rates keyed by calendar year
//!
//! The rates are the one-year fixed deposit rates of the postal savings bank,
//! quoted as percentages (1.725 means 1.725% per annum). A lookup for a year the
//! table does not cover resolves to the rate of the latest tabulated year, both
//! for future years and for years before the first entry.

use std::collections::BTreeMap;
use std::path::Path;

use log::debug;

use crate::error::{InterestError, Result};

/// Immutable year -> rate schedule with fallback to the latest known rate
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    /// Annual rate in percent, by calendar year
    rates: BTreeMap<i32, f64>,

    /// Greatest year key and its rate, used for every miss
    latest_year: i32,
    latest_rate: f64,
}

impl RateTable {
    /// Build a table from `(year, rate)` pairs.
    ///
    /// Later duplicates of a year replace earlier ones. Fails on an empty input
    /// or on a negative or non-finite rate.
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (i32, f64)>,
    {
        let mut rates = BTreeMap::new();
        for (year, rate) in entries {
            if !rate.is_finite() || rate < 0.0 {
                return Err(InterestError::InvalidRate { year, rate });
            }
            rates.insert(year, rate);
        }

        let (&latest_year, &latest_rate) = rates
            .last_key_value()
            .ok_or(InterestError::EmptyRateTable)?;

        Ok(Self {
            rates,
            latest_year,
            latest_rate,
        })
    }

    /// Postal one-year fixed deposit rates as published for overdue pension interest.
    /// 2026 carries the 2025 rate forward until a new rate is announced.
    pub fn postal_deposit_rates() -> Self {
        let rates: BTreeMap<i32, f64> = [
            (2009, 1.39),
            (2010, 0.83),
            (2011, 1.08),
            (2012, 1.37),
            (2013, 1.37),
            (2014, 1.37),
            (2015, 1.37),
            (2016, 1.20),
            (2017, 1.04),
            (2018, 1.04),
            (2019, 1.04),
            (2020, 1.04),
            (2021, 0.78),
            (2022, 0.78),
            (2023, 1.475),
            (2024, 1.600),
            (2025, 1.725),
            (2026, 1.725),
        ]
        .into_iter()
        .collect();

        Self {
            rates,
            latest_year: 2026,
            latest_rate: 1.725,
        }
    }

    /// Load a table from a `Year,Rate` CSV file
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let entries = super::loader::load_rate_entries(path)?;
        Self::new(entries)
    }

    /// Annual rate (percent) applied to overdue days falling in `year`
    pub fn rate_for(&self, year: i32) -> f64 {
        match self.rates.get(&year) {
            Some(&rate) => rate,
            None => {
                debug!(
                    "No rate tabulated for {}, falling back to {} rate {}",
                    year, self.latest_year, self.latest_rate
                );
                self.latest_rate
            }
        }
    }

    /// Whether `year` has its own entry (as opposed to resolving through the fallback)
    pub fn contains(&self, year: i32) -> bool {
        self.rates.contains_key(&year)
    }

    pub fn latest_year(&self) -> i32 {
        self.latest_year
    }

    pub fn latest_rate(&self) -> f64 {
        self.latest_rate
    }

    pub fn earliest_year(&self) -> i32 {
        self.rates.keys().next().copied().unwrap_or(self.latest_year)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Tabulated entries in ascending year order
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.rates.iter().map(|(&year, &rate)| (year, rate))
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::postal_deposit_rates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_lookup() {
        let table = RateTable::postal_deposit_rates();

        assert_eq!(table.rate_for(2009), 1.39);
        assert_eq!(table.rate_for(2016), 1.20);
        assert_eq!(table.rate_for(2022), 0.78);
        assert_eq!(table.rate_for(2023), 1.475);
        assert_eq!(table.rate_for(2024), 1.600);
    }

    #[test]
    fn test_future_year_uses_latest_rate() {
        let table = RateTable::postal_deposit_rates();

        assert_eq!(table.latest_year(), 2026);
        assert_eq!(table.rate_for(2027), table.rate_for(2026));
        assert_eq!(table.rate_for(2100), 1.725);
        assert_eq!(table.rate_for(i32::MAX), 1.725);
    }

    #[test]
    fn test_past_year_also_uses_latest_rate() {
        // Years before the first entry do not get the earliest rate
        let table = RateTable::postal_deposit_rates();

        assert_eq!(table.rate_for(2008), 1.725);
        assert_eq!(table.rate_for(1990), 1.725);
        assert_eq!(table.rate_for(i32::MIN), 1.725);
        assert_ne!(table.rate_for(2008), table.rate_for(table.earliest_year()));
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let table = RateTable::postal_deposit_rates();
        for year in [1900, 2011, 2020, 2026, 3000] {
            assert_eq!(table.rate_for(year), table.rate_for(year));
        }
    }

    #[test]
    fn test_sparse_table_fallback() {
        let table = RateTable::new(vec![(2030, 2.0), (2010, 1.0), (2020, 1.5)]).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.earliest_year(), 2010);
        assert_eq!(table.latest_year(), 2030);
        // Gap inside the range resolves to the latest entry, not the neighbour
        assert_eq!(table.rate_for(2015), 2.0);
        assert_eq!(table.rate_for(2020), 1.5);
        assert!(!table.contains(2015));
    }

    #[test]
    fn test_rejects_empty_and_invalid_tables() {
        assert!(matches!(
            RateTable::new(Vec::<(i32, f64)>::new()),
            Err(InterestError::EmptyRateTable)
        ));
        assert!(matches!(
            RateTable::new(vec![(2020, -0.5)]),
            Err(InterestError::InvalidRate { year: 2020, .. })
        ));
        assert!(matches!(
            RateTable::new(vec![(2020, f64::NAN)]),
            Err(InterestError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_builtin_matches_constructor() {
        let built = RateTable::new(RateTable::postal_deposit_rates().iter()).unwrap();
        assert_eq!(built, RateTable::postal_deposit_rates());
    }
}
