//! Run interest calculations for every request in a CSV file
//!
//! Usage: run_batch [INPUT] [OUTPUT]
//!   INPUT   request CSV (default: data/sample_requests.csv)
//!   OUTPUT  result CSV (default: batch_interest_output.csv)
//! Rate table and exemption threshold come from PENSION_RATE_TABLE and
//! PENSION_EXEMPTION_THRESHOLD.

use anyhow::{Context, Result};
use pension_interest::batch::{load_requests, summarize, write_results, BatchRunner};
use pension_interest::CalculatorConfig;
use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

const DEFAULT_INPUT: &str = "data/sample_requests.csv";
const DEFAULT_OUTPUT: &str = "batch_interest_output.csv";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let input = args.next().unwrap_or_else(|| DEFAULT_INPUT.to_string());
    let output = args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    let start = Instant::now();
    println!("Loading requests from {}...", input);

    let batch = load_requests(&input).with_context(|| format!("Failed to load {}", input))?;
    println!(
        "Loaded {} requests ({} rejected) in {:?}",
        batch.requests.len(),
        batch.rejected.len(),
        start.elapsed()
    );
    for rejected in &batch.rejected {
        println!("  row {} ({}): {}", rejected.row, rejected.request_id, rejected.error);
    }

    let config = CalculatorConfig::from_env();
    let runner = BatchRunner::from_config(&config).context("Failed to load rate table")?;

    let calc_start = Instant::now();
    let results = runner.run_batch(&batch.requests);
    println!("Calculations complete in {:?}", calc_start.elapsed());

    let file = File::create(&output).with_context(|| format!("Failed to create {}", output))?;
    write_results(BufWriter::new(file), &results)?;
    println!("Output written to {}", output);

    let summary = summarize(&results);
    println!("\nBatch Summary:");
    println!("  Requests:        {}", summary.requests);
    println!("  Payable:         {}", summary.payable);
    println!("  Exempt (<= {}):  {}", config.exemption_threshold, summary.exempt);
    println!("  Total interest:  {}", summary.total_interest);
    println!("  Total due:       {}", summary.total_due);

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
