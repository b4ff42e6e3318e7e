//! CSV-based rate table loader
//!
//! Loads overdue-interest rate schedules from CSV files in data/rates/

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;

use crate::error::Result;

/// Default path to the rate table directory
pub const DEFAULT_RATES_PATH: &str = "data/rates";

/// File name of the postal fixed deposit schedule inside the rates directory
pub const POSTAL_DEPOSIT_RATES_FILE: &str = "postal_deposit_rates.csv";

/// Raw CSV row of a rate schedule
#[derive(Debug, serde::Deserialize)]
struct RateRow {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Rate")]
    rate: f64,
}

/// Load `(year, rate)` entries from a CSV file with a `Year,Rate` header
pub fn load_rate_entries(path: &Path) -> Result<Vec<(i32, f64)>> {
    let file = File::open(path)?;
    let entries = load_rate_entries_from_reader(file)?;
    info!("Loaded {} rate entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Load `(year, rate)` entries from any reader (e.g., string buffer, request body)
pub fn load_rate_entries_from_reader<R: Read>(reader: R) -> Result<Vec<(i32, f64)>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut entries = Vec::new();

    for result in csv_reader.deserialize() {
        let row: RateRow = result?;
        entries.push((row.year, row.rate));
    }

    Ok(entries)
}

/// Path of the shipped postal deposit schedule under the default directory
pub fn default_rates_file() -> std::path::PathBuf {
    Path::new(DEFAULT_RATES_PATH).join(POSTAL_DEPOSIT_RATES_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::RateTable;

    #[test]
    fn test_load_default_rate_file() {
        let result = load_rate_entries(&default_rates_file());
        assert!(result.is_ok(), "Failed to load rates: {:?}", result.err());

        let entries = result.unwrap();
        assert_eq!(entries.len(), 18);
        assert_eq!(entries[0], (2009, 1.39));
        assert_eq!(entries[entries.len() - 1], (2026, 1.725));
    }

    #[test]
    fn test_shipped_file_matches_builtin_schedule() {
        let loaded = RateTable::from_csv_path(&default_rates_file()).unwrap();
        assert_eq!(loaded, RateTable::postal_deposit_rates());
    }

    #[test]
    fn test_load_from_reader() {
        let data = "Year,Rate\n2030, 2.1\n2029,1.9\n";
        let entries = load_rate_entries_from_reader(data.as_bytes()).unwrap();
        assert_eq!(entries, vec![(2030, 2.1), (2029, 1.9)]);
    }

    #[test]
    fn test_malformed_rate_is_an_error() {
        let data = "Year,Rate\n2030,abc\n";
        assert!(load_rate_entries_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_rate_entries(Path::new("data/rates/does_not_exist.csv")).is_err());
    }
}
