//! Batch evaluation of calculation requests from CSV

pub mod loader;
mod runner;

pub use loader::{load_requests, load_requests_from_reader, BatchRequest, LoadedBatch, RejectedRow};
pub use runner::{summarize, write_results, BatchResult, BatchRunner, BatchSummary};
