//! # masterfile-rs
//!
//! Fixed-width FBI UCR master file to CSV conversion.
//!
//! Master files are flat text files with one fixed-width record per
//! line. Fields occupy fixed character ranges with no delimiters; the
//! record type is a short prefix tag (`BH` batch header, `IR` incident
//! report). This library slices each line against a declarative
//! [`RecordLayout`] - a table of named, typed character ranges - and
//! emits one CSV per record type, plus a utility to concatenate
//! same-schema CSVs.
//!
//! ## Overview
//!
//! - [`schema`] - layouts as data: named, typed character ranges
//! - [`layouts`] - the UCR Cargo Theft and Human Trafficking tables
//! - [`extract`] - pure line-against-layout field slicing
//! - [`convert`] - dispatch by record-type tag, accumulate, emit CSV
//! - [`union`] - concatenate same-schema CSV files
//!
//! ## Example
//!
//! ```
//! use masterfile_rs::{Converter, layouts};
//!
//! let converter = Converter::new(vec![
//!     layouts::batch_header(),
//!     layouts::incident_report(),
//! ])
//! .unwrap();
//!
//! // One batch-header record, padded to the full 172-character width.
//! let input = format!("{:<172}", "BH06CA0340200SACRAMENTO");
//! let conversion = converter.convert_text(&input).unwrap();
//!
//! assert_eq!(conversion.buckets[0].len(), 1); // batch headers
//! assert_eq!(conversion.buckets[1].len(), 0); // incident reports
//! ```

pub mod convert;
pub mod error;
pub mod extract;
pub mod layouts;
pub mod record;
pub mod schema;
pub mod union;

pub use convert::{Conversion, Converter, ErrorPolicy, FileReport, WrittenCsv, output_path};
pub use error::{ConvertError, ExtractError, UnionError};
pub use extract::parse_record;
pub use record::{FieldValue, ParsedRecord};
pub use schema::{FieldKind, FieldSpec, RecordLayout};
pub use union::{UnionOptions, union_csv_files};
