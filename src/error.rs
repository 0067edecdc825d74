//! Error types for the master file conversion pipelines.
//!
//! - [`ExtractError`] - fixed-width field extraction failures
//! - [`ConvertError`] - master file to CSV conversion failures
//! - [`UnionError`] - CSV union failures
//!
//! Conversion between levels is automatic via `From` implementations,
//! so `?` works across module boundaries. Nothing here is recovered
//! from locally: every error bubbles up to the binary's `main`, which
//! prints it and exits non-zero.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from slicing one line against a record layout.
///
/// Extraction is pure, so these carry no file position; [`ConvertError`]
/// adds the line number when a file is being processed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// The line is shorter than the layout requires.
    #[error("record is {actual} characters, layout '{layout}' requires {required}")]
    ShortRecord {
        layout: String,
        required: usize,
        actual: usize,
    },

    /// A numeric field contained non-numeric text.
    #[error("field '{field}' is not a number: '{value}'")]
    InvalidNumber { field: String, value: String },
}

/// Errors from converting a master file to CSV.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input path does not exist.
    #[error("file not found: {0}")]
    MissingFile(PathBuf),

    /// Reading the input or writing an output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A layout failed validation at converter construction.
    #[error("invalid layout '{layout}': {message}")]
    InvalidLayout { layout: String, message: String },

    /// A line failed extraction; `line` is 1-based.
    #[error("line {line}: {source}")]
    Record { line: usize, source: ExtractError },
}

/// Errors from the CSV union utility.
#[derive(Debug, Error)]
pub enum UnionError {
    /// An input path does not exist. Checked for every input before any
    /// reading or writing begins.
    #[error("file not found: {0}")]
    MissingFile(PathBuf),

    /// Reading an input or writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No input files were given.
    #[error("no input files given")]
    NoInputs,

    /// The first input has no header row to carry over.
    #[error("{0} is empty (no header row)")]
    EmptyHeader(PathBuf),

    /// A later input's header differs from the first input's. Only
    /// raised when header verification is enabled.
    #[error("header of {path} does not match the first input")]
    HeaderMismatch { path: PathBuf },
}
