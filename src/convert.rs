//! Master file to CSV conversion.
//!
//! A [`Converter`] owns an ordered table of record layouts. Each input
//! line is classified by its record-type prefix, sliced against the
//! selected layout, and accumulated into that layout's bucket. After the
//! whole file is consumed, every non-empty bucket becomes one CSV next
//! to the input file. Lines of unrecognized record types are dropped
//! silently: master files interleave header and trailer records the
//! converter does not care about.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;
use crate::extract::parse_record;
use crate::record::ParsedRecord;
use crate::schema::RecordLayout;

/// What to do with a line that fails extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Abort the run on the first malformed record (default).
    #[default]
    Strict,
    /// Skip malformed records and count them.
    Lenient,
}

/// Result of converting input text: one bucket per layout, in layout
/// order, plus the number of lines skipped under
/// [`ErrorPolicy::Lenient`].
#[derive(Debug)]
pub struct Conversion {
    pub buckets: Vec<Vec<ParsedRecord>>,
    pub skipped: usize,
}

/// One output file produced by [`Converter::convert_file`].
#[derive(Debug)]
pub struct WrittenCsv {
    pub path: PathBuf,
    pub rows: usize,
}

/// Outcome of [`Converter::convert_file`].
#[derive(Debug)]
pub struct FileReport {
    pub written: Vec<WrittenCsv>,
    pub skipped: usize,
}

/// Converts fixed-width master files to CSV using an ordered layout
/// table.
#[derive(Debug, Clone)]
pub struct Converter {
    layouts: Vec<RecordLayout>,
    policy: ErrorPolicy,
}

impl Converter {
    /// Build a converter over an ordered layout table.
    ///
    /// Layouts are validated here, so a bad offset table fails at
    /// construction rather than halfway through a file.
    pub fn new(layouts: Vec<RecordLayout>) -> Result<Self, ConvertError> {
        for layout in &layouts {
            layout
                .validate()
                .map_err(|message| ConvertError::InvalidLayout {
                    layout: layout.name().to_string(),
                    message,
                })?;
        }
        Ok(Self {
            layouts,
            policy: ErrorPolicy::Strict,
        })
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn layouts(&self) -> &[RecordLayout] {
        &self.layouts
    }

    /// Select the layout for a line by peeking its record-type prefix.
    ///
    /// First match wins; a layout without a tag matches any line. `None`
    /// means the line belongs to a record type this converter does not
    /// decode.
    pub fn layout_for(&self, line: &str) -> Option<usize> {
        self.layouts.iter().position(|layout| match layout.tag() {
            Some(tag) => line.starts_with(tag),
            None => true,
        })
    }

    /// Classify and slice every line of `input`, accumulating per-layout
    /// buckets in input order.
    pub fn convert_text(&self, input: &str) -> Result<Conversion, ConvertError> {
        let mut buckets: Vec<Vec<ParsedRecord>> = vec![Vec::new(); self.layouts.len()];
        let mut skipped = 0;

        for (line_idx, line) in input.lines().enumerate() {
            let Some(idx) = self.layout_for(line) else {
                continue;
            };
            match parse_record(line, &self.layouts[idx]) {
                Ok(record) => buckets[idx].push(record),
                Err(_) if self.policy == ErrorPolicy::Lenient => skipped += 1,
                Err(source) => {
                    return Err(ConvertError::Record {
                        line: line_idx + 1,
                        source,
                    });
                }
            }
        }

        Ok(Conversion { buckets, skipped })
    }

    /// Convert the file at `input` and write one CSV per non-empty
    /// bucket.
    ///
    /// Outputs land next to the input as `<stem>_<layout>.csv` and are
    /// overwritten if already present; empty buckets write nothing.
    pub fn convert_file(&self, input: &Path) -> Result<FileReport, ConvertError> {
        if !input.exists() {
            return Err(ConvertError::MissingFile(input.to_path_buf()));
        }

        let text = fs::read_to_string(input)?;
        let conversion = self.convert_text(&text)?;

        let mut written = Vec::new();
        for (layout, bucket) in self.layouts.iter().zip(&conversion.buckets) {
            if bucket.is_empty() {
                continue;
            }
            let path = output_path(input, layout.name());
            write_csv(&path, layout, bucket)?;
            written.push(WrittenCsv {
                path,
                rows: bucket.len(),
            });
        }

        Ok(FileReport {
            written,
            skipped: conversion.skipped,
        })
    }
}

/// Derive `<stem>_<suffix>.csv` next to `input`.
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}_{suffix}.csv"))
}

/// Write one bucket as CSV: a header row of field names in declaration
/// order, then one row per record in the same order.
fn write_csv(
    path: &Path,
    layout: &RecordLayout,
    records: &[ParsedRecord],
) -> Result<(), ConvertError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(layout.field_names())?;
    for record in records {
        writer.write_record(record.values().iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;
    use crate::layouts::{batch_header, incident_report};
    use crate::record::FieldValue;
    use crate::schema::{FieldKind, FieldSpec};

    /// Build a blank-padded line of `width` with `pieces` placed at
    /// their start offsets.
    fn line_with(width: usize, pieces: &[(usize, &str)]) -> String {
        let mut bytes = vec![b' '; width];
        for (start, text) in pieces {
            bytes[*start..start + text.len()].copy_from_slice(text.as_bytes());
        }
        String::from_utf8(bytes).unwrap()
    }

    fn bh_line() -> String {
        line_with(
            172,
            &[
                (0, "BH"),
                (2, "06"),
                (4, "CA0340200"),
                (13, "SACRAMENTO"),
                (60, "525041"),
                (148, "SACRAMENTO POLICE DEPT"),
            ],
        )
    }

    fn ir_line() -> String {
        line_with(
            439,
            &[
                (0, "IR"),
                (2, "CA0340200"),
                (11, "SACRAMENTO POLICE DEPT"),
                (35, "24-00117"),
                (47, "20240315"),
                (130, "125000"),
                (147, "40000"),
            ],
        )
    }

    fn cargo_theft_converter() -> Converter {
        Converter::new(vec![batch_header(), incident_report()]).unwrap()
    }

    #[test]
    fn test_layout_for_dispatches_by_prefix() {
        let converter = cargo_theft_converter();
        assert_eq!(converter.layout_for(&bh_line()), Some(0));
        assert_eq!(converter.layout_for(&ir_line()), Some(1));
        assert_eq!(converter.layout_for("ZZ unknown trailer"), None);
        assert_eq!(converter.layout_for(""), None);
    }

    #[test]
    fn test_layout_for_is_pure() {
        let converter = cargo_theft_converter();
        let line = bh_line();
        // Same line, same answer, regardless of what was seen before.
        assert_eq!(converter.layout_for(&line), converter.layout_for(&line));
    }

    #[test]
    fn test_untagged_layout_matches_every_line() {
        let layout = RecordLayout::untagged(
            "rows",
            vec![FieldSpec::new("a", 0, 3, FieldKind::Str)],
        );
        let converter = Converter::new(vec![layout]).unwrap();
        assert_eq!(converter.layout_for("ABCDEF"), Some(0));
        assert_eq!(converter.layout_for("XYZDEF"), Some(0));
    }

    #[test]
    fn test_new_rejects_invalid_layout() {
        let bad = RecordLayout::untagged(
            "bad",
            vec![
                FieldSpec::new("a", 0, 4, FieldKind::Str),
                FieldSpec::new("b", 2, 6, FieldKind::Str),
            ],
        );
        let err = Converter::new(vec![bad]).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidLayout { .. }));
    }

    #[test]
    fn test_convert_text_accumulates_buckets_in_input_order() {
        let converter = cargo_theft_converter();
        let input = format!(
            "{}\n{}\n{}\nZZ trailer record\n",
            bh_line(),
            ir_line(),
            ir_line()
        );

        let conversion = converter.convert_text(&input).unwrap();
        assert_eq!(conversion.buckets[0].len(), 1);
        assert_eq!(conversion.buckets[1].len(), 2);
        assert_eq!(conversion.skipped, 0);

        let bh = &conversion.buckets[0][0];
        let layout = batch_header();
        assert_eq!(
            bh.get(&layout, "record_type"),
            Some(&FieldValue::Str("BH".to_string()))
        );
        assert_eq!(
            bh.get(&layout, "state_code"),
            Some(&FieldValue::Str("06".to_string()))
        );
        assert_eq!(
            bh.get(&layout, "current_population_1"),
            Some(&FieldValue::Int(525041))
        );
        // Blank numeric column coerces to zero, not an error.
        assert_eq!(
            bh.get(&layout, "last_population_3"),
            Some(&FieldValue::Int(0))
        );

        let ir = &conversion.buckets[1][0];
        let layout = incident_report();
        assert_eq!(
            ir.get(&layout, "stolen_value"),
            Some(&FieldValue::Float(125000.0))
        );
        assert_eq!(
            ir.get(&layout, "recovered_value"),
            Some(&FieldValue::Float(40000.0))
        );
    }

    #[test]
    fn test_strict_policy_aborts_with_line_number() {
        let converter = cargo_theft_converter();
        let input = format!("{}\nBH too short\n", bh_line());

        let err = converter.convert_text(&input).unwrap_err();
        match err {
            ConvertError::Record { line, source } => {
                assert_eq!(line, 2);
                assert!(matches!(source, ExtractError::ShortRecord { .. }));
            }
            other => panic!("Expected Record error, got {other:?}"),
        }
    }

    #[test]
    fn test_lenient_policy_skips_and_counts() {
        let converter = cargo_theft_converter().with_policy(ErrorPolicy::Lenient);
        let input = format!("{}\nBH too short\n{}\n", bh_line(), ir_line());

        let conversion = converter.convert_text(&input).unwrap();
        assert_eq!(conversion.buckets[0].len(), 1);
        assert_eq!(conversion.buckets[1].len(), 1);
        assert_eq!(conversion.skipped, 1);
    }

    #[test]
    fn test_output_path_appends_suffix_to_stem() {
        let path = output_path(Path::new("/data/2020_CT_FILE.txt"), "batch_headers");
        assert_eq!(path, Path::new("/data/2020_CT_FILE_batch_headers.csv"));

        let path = output_path(Path::new("master.dat"), "processed");
        assert_eq!(path, Path::new("master_processed.csv"));
    }

    #[test]
    fn test_convert_file_writes_one_csv_per_nonempty_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("master.txt");
        // Batch headers only; the incident bucket stays empty.
        fs::write(&input, format!("{}\n{}\n", bh_line(), bh_line())).unwrap();

        let report = cargo_theft_converter().convert_file(&input).unwrap();
        assert_eq!(report.written.len(), 1);
        assert_eq!(report.written[0].rows, 2);
        assert_eq!(
            report.written[0].path,
            dir.path().join("master_batch_headers.csv")
        );
        // Empty bucket produced no file.
        assert!(!dir.path().join("master_incident_reports.csv").exists());

        let mut reader = csv::Reader::from_path(&report.written[0].path).unwrap();
        let headers = reader.headers().unwrap().clone();
        let binding = batch_header();
        let expected: Vec<&str> = binding.field_names().collect();
        assert_eq!(headers.iter().collect::<Vec<_>>(), expected);
        assert_eq!(reader.records().count(), 2);
    }

    #[test]
    fn test_csv_round_trips_stripped_values() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("master.txt");
        fs::write(&input, format!("{}\n{}\n", bh_line(), ir_line())).unwrap();

        let report = cargo_theft_converter().convert_file(&input).unwrap();
        assert_eq!(report.written.len(), 2);

        let mut reader =
            csv::Reader::from_path(dir.path().join("master_batch_headers.csv")).unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[0], "BH");
        assert_eq!(&row[1], "06");
        assert_eq!(&row[2], "CA0340200");
        assert_eq!(&row[3], "SACRAMENTO");
        assert_eq!(&row[12], "525041");
        assert_eq!(&row[26], "SACRAMENTO POLICE DEPT");

        let mut reader =
            csv::Reader::from_path(dir.path().join("master_incident_reports.csv")).unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[3], "24-00117");
        assert_eq!(&row[12], "125000"); // stolen_value
        assert_eq!(&row[14], "40000"); // recovered_value
    }

    #[test]
    fn test_human_trafficking_file_converts_through_catch_all_layout() {
        use crate::layouts::human_trafficking;

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("2020_HT_NATIONAL_MASTER_FILE.txt");
        let line = line_with(
            987,
            &[
                (0, "A"),
                (1, "29"),
                (3, "MO12345"),
                (45, "KANSAS CITY PD"),
                (75, "AAAAAAAAAAAA"), // monthly report codes
                (87, "    3"),        // jan commercial sex act offenses
            ],
        );
        fs::write(&input, format!("{line}\n{line}\n")).unwrap();

        let converter = Converter::new(vec![human_trafficking()]).unwrap();
        let report = converter.convert_file(&input).unwrap();
        assert_eq!(report.written.len(), 1);
        assert_eq!(report.written[0].rows, 2);
        assert_eq!(
            report.written[0].path,
            dir.path().join("2020_HT_NATIONAL_MASTER_FILE_processed.csv")
        );

        let mut reader = csv::Reader::from_path(&report.written[0].path).unwrap();
        assert_eq!(reader.headers().unwrap().len(), 208);
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[1], "29"); // state_code
        assert_eq!(&row[14], "KANSAS CITY PD"); // agency_name
        assert_eq!(&row[16], "A"); // jan_report_code
        assert_eq!(&row[28], "3"); // jan_offenses_commercial_sex_acts
    }

    #[test]
    fn test_convert_file_missing_input() {
        let err = cargo_theft_converter()
            .convert_file(Path::new("/no/such/master.txt"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::MissingFile(_)));
    }

    #[test]
    fn test_convert_file_overwrites_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("master.txt");
        fs::write(&input, format!("{}\n", bh_line())).unwrap();

        let stale = dir.path().join("master_batch_headers.csv");
        fs::write(&stale, "stale contents\n").unwrap();

        cargo_theft_converter().convert_file(&input).unwrap();
        let contents = fs::read_to_string(&stale).unwrap();
        assert!(contents.starts_with("record_type,"));
    }
}
