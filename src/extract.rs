//! Fixed-width field extraction.
//!
//! Slices one text line against a [`RecordLayout`], producing a
//! [`ParsedRecord`]. Extraction is a pure function of (line, layout):
//! no I/O, no state, the same inputs always give the same result.

use crate::error::ExtractError;
use crate::record::{FieldValue, ParsedRecord};
use crate::schema::{FieldKind, RecordLayout};

/// Slice `line` against `layout`.
///
/// Each field takes the characters `start..end` (end-exclusive), trimmed
/// of surrounding whitespace. String fields keep the trimmed text;
/// numeric fields parse it, except that all-blank text coerces to zero
/// (master files pad absent counts with spaces).
///
/// Fails with [`ExtractError::ShortRecord`] when the line cannot supply
/// every declared range, and [`ExtractError::InvalidNumber`] when a
/// numeric field holds non-numeric text.
pub fn parse_record(line: &str, layout: &RecordLayout) -> Result<ParsedRecord, ExtractError> {
    let short = || ExtractError::ShortRecord {
        layout: layout.name().to_string(),
        required: layout.required_width(),
        actual: line.len(),
    };

    if line.len() < layout.required_width() {
        return Err(short());
    }

    let mut values = Vec::with_capacity(layout.fields().len());
    for field in layout.fields() {
        // Master files are ASCII; a range landing inside a multi-byte
        // character is treated like a truncated record.
        let raw = line.get(field.start..field.end).ok_or_else(short)?;
        let text = raw.trim();
        let value = match field.kind {
            FieldKind::Str => FieldValue::Str(text.to_string()),
            FieldKind::Int if text.is_empty() => FieldValue::Int(0),
            FieldKind::Int => {
                FieldValue::Int(text.parse().map_err(|_| ExtractError::InvalidNumber {
                    field: field.name.clone(),
                    value: text.to_string(),
                })?)
            }
            FieldKind::Float if text.is_empty() => FieldValue::Float(0.0),
            FieldKind::Float => {
                FieldValue::Float(text.parse().map_err(|_| ExtractError::InvalidNumber {
                    field: field.name.clone(),
                    value: text.to_string(),
                })?)
            }
        };
        values.push(value);
    }

    Ok(ParsedRecord::new(values))
}
