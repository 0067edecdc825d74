//! CLI tool to union same-schema CSV files into one.
//!
//! The header row is taken from the first input; data rows of every
//! input are appended in listed order. Headers of later inputs are not
//! checked unless `--verify-headers` is given.

use clap::Parser;
use masterfile_rs::{UnionOptions, union_csv_files};
use std::path::PathBuf;
use std::process;

/// Union CSV files with identical headers into a single output file.
#[derive(Parser)]
#[command(name = "csv-union")]
struct Cli {
    /// Input CSV files to union, in order
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output CSV file path
    #[arg(short, long, default_value = "combined.csv")]
    output: PathBuf,

    /// Fail if a later input's header differs from the first input's
    #[arg(long)]
    verify_headers: bool,
}

fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        process::exit(1);
    });

    let options = UnionOptions {
        verify_headers: cli.verify_headers,
    };

    match union_csv_files(&cli.inputs, &cli.output, &options) {
        Ok(rows) => {
            eprintln!(
                "Combined {} files ({} rows) into {}",
                cli.inputs.len(),
                rows,
                cli.output.display()
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
