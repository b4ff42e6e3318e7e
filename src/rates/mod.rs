//! Overdue-interest rate schedules

mod table;
pub mod loader;

pub use table::RateTable;
pub use loader::{DEFAULT_RATES_PATH, load_rate_entries, load_rate_entries_from_reader};
