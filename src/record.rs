//! Parsed record values.
//!
//! A [`ParsedRecord`] is the result of slicing one fixed-width line
//! against a [`RecordLayout`]: typed values in field-declaration order.
//! Records are created once by the extractor and never mutated; the CSV
//! emitter walks the same order, so the layout is the single source of
//! truth for both.

use std::fmt;

use crate::schema::RecordLayout;

/// A single typed field value sliced out of a fixed-width record.
///
/// The `Display` form is exactly the text written to CSV cells: strings
/// as-is (already trimmed), integers in base 10, floats in Rust's
/// shortest round-trip decimal form.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Float(f64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Int(n) => write!(f, "{n}"),
            FieldValue::Float(x) => write!(f, "{x}"),
        }
    }
}

/// One record sliced against a layout: values in field-declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    values: Vec<FieldValue>,
}

impl ParsedRecord {
    pub(crate) fn new(values: Vec<FieldValue>) -> Self {
        Self { values }
    }

    /// Values in field-declaration order.
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Look up a value by field name through the layout that produced
    /// this record.
    pub fn get<'a>(&'a self, layout: &RecordLayout, name: &str) -> Option<&'a FieldValue> {
        let idx = layout.fields().iter().position(|f| f.name == name)?;
        self.values.get(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldKind, FieldSpec};

    #[test]
    fn test_display_matches_csv_cell_text() {
        assert_eq!(FieldValue::Str("BOSTON".to_string()).to_string(), "BOSTON");
        assert_eq!(FieldValue::Int(-42).to_string(), "-42");
        assert_eq!(FieldValue::Float(1250.5).to_string(), "1250.5");
        assert_eq!(FieldValue::Float(0.0).to_string(), "0");
    }

    #[test]
    fn test_get_by_field_name() {
        let layout = RecordLayout::untagged(
            "rows",
            vec![
                FieldSpec::new("ori", 0, 9, FieldKind::Str),
                FieldSpec::new("count", 9, 12, FieldKind::Int),
            ],
        );
        let record = ParsedRecord::new(vec![
            FieldValue::Str("MA0010100".to_string()),
            FieldValue::Int(3),
        ]);

        assert_eq!(
            record.get(&layout, "ori"),
            Some(&FieldValue::Str("MA0010100".to_string()))
        );
        assert_eq!(record.get(&layout, "count"), Some(&FieldValue::Int(3)));
        assert_eq!(record.get(&layout, "missing"), None);
    }
}
