//! Same-schema CSV concatenation.
//!
//! Joins multiple CSV files that share a header into one file: the
//! header row of the first input written once, then the data rows of
//! every input in listed order. Headers are not compared by default, so
//! mismatched schemas silently produce a malformed union;
//! [`UnionOptions::verify_headers`] turns on fail-fast comparison.

use std::path::{Path, PathBuf};

use crate::error::UnionError;

/// Options for [`union_csv_files`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnionOptions {
    /// Fail if a later input's header differs from the first input's.
    pub verify_headers: bool,
}

/// Concatenate `inputs` into `output`.
///
/// Every input path is checked for existence before anything is read or
/// written, so a missing file never leaves a partial output behind.
/// Returns the number of data rows written.
pub fn union_csv_files(
    inputs: &[PathBuf],
    output: &Path,
    options: &UnionOptions,
) -> Result<usize, UnionError> {
    if inputs.is_empty() {
        return Err(UnionError::NoInputs);
    }
    for path in inputs {
        if !path.exists() {
            return Err(UnionError::MissingFile(path.clone()));
        }
    }

    let header = {
        let mut first = reader(&inputs[0])?;
        first.headers()?.clone()
    };
    if header.is_empty() {
        return Err(UnionError::EmptyHeader(inputs[0].clone()));
    }

    // Ragged rows pass through untouched, like the header policy:
    // the union does not reshape its inputs.
    let mut writer = csv::WriterBuilder::new().flexible(true).from_path(output)?;
    writer.write_record(&header)?;

    let mut rows = 0;
    for path in inputs {
        let mut input = reader(path)?;
        if options.verify_headers && input.headers()? != &header {
            return Err(UnionError::HeaderMismatch { path: path.clone() });
        }
        for record in input.records() {
            writer.write_record(&record?)?;
            rows += 1;
        }
    }
    writer.flush()?;

    Ok(rows)
}

fn reader(path: &Path) -> Result<csv::Reader<std::fs::File>, UnionError> {
    Ok(csv::ReaderBuilder::new().flexible(true).from_path(path)?)
}
