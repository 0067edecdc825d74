//! CLI tool to convert a Cargo Theft master file to CSV.
//!
//! Reads a fixed-width national master file and writes one CSV per
//! record type next to the input: `<stem>_batch_headers.csv` and
//! `<stem>_incident_reports.csv`. Records of other types (file headers,
//! trailers) are dropped.

use clap::Parser;
use masterfile_rs::{Converter, ErrorPolicy, layouts};
use std::path::PathBuf;
use std::process;

/// Convert a Cargo Theft master file (fixed-width records) to CSV.
#[derive(Parser)]
#[command(name = "ct-convert")]
struct Cli {
    /// Master file to convert
    input: PathBuf,

    /// Skip malformed records instead of aborting on the first one
    #[arg(long)]
    lenient: bool,

    /// Show input path and policy on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        process::exit(1);
    });

    if !cli.input.exists() {
        eprintln!("Error: file '{}' not found", cli.input.display());
        process::exit(1);
    }

    let policy = if cli.lenient {
        ErrorPolicy::Lenient
    } else {
        ErrorPolicy::Strict
    };

    let converter = match Converter::new(vec![layouts::batch_header(), layouts::incident_report()])
    {
        Ok(converter) => converter.with_policy(policy),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if cli.verbose {
        eprintln!("Input:  {}", cli.input.display());
        eprintln!("Policy: {}", if cli.lenient { "lenient" } else { "strict" });
    }

    match converter.convert_file(&cli.input) {
        Ok(report) => {
            for csv in &report.written {
                eprintln!("Wrote {} records -> {}", csv.rows, csv.path.display());
            }
            if report.written.is_empty() {
                eprintln!("No recognized records in '{}'", cli.input.display());
            }
            if report.skipped > 0 {
                eprintln!("Skipped {} malformed records", report.skipped);
            }
        }
        Err(e) => {
            eprintln!("Error processing '{}': {e}", cli.input.display());
            process::exit(1);
        }
    }
}
