//! Two-row CSV table flattened from the manifest metadata: labels, then values.

use crate::manifest::{flatten_value, MetadataEntry};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Which key of a metadata entry is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Label,
    Value,
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataField::Label => write!(f, "label"),
            MetadataField::Value => write!(f, "value"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("metadata entry #{index} has no \"{field}\" key")]
pub struct MetadataShapeError {
    /// 0-based position in the manifest's metadata array.
    pub index: usize,
    pub field: MetadataField,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataTable {
    pub headers: Vec<String>,
    pub values: Vec<String>,
}

impl MetadataTable {
    /// Build the table, failing on the first entry lacking a label or a value.
    pub fn from_entries(entries: &[MetadataEntry]) -> Result<Self, MetadataShapeError> {
        let mut table = MetadataTable::default();
        for (index, entry) in entries.iter().enumerate() {
            let label = entry.label.as_ref().ok_or(MetadataShapeError {
                index,
                field: MetadataField::Label,
            })?;
            let value = entry.value.as_ref().ok_or(MetadataShapeError {
                index,
                field: MetadataField::Value,
            })?;
            table.headers.push(flatten_value(label));
            table.values.push(flatten_value(value));
        }
        Ok(table)
    }

    /// Header line and value line, each terminated by `\n`.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        push_row(&mut out, &self.headers);
        push_row(&mut out, &self.values);
        out
    }

    pub fn write_csv(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_csv())
    }
}

fn push_row(out: &mut String, fields: &[String]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push('\n');
}

/// Quote only when needed: separator, quote, or line break inside the field.
fn push_field(out: &mut String, field: &str) {
    if field.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn title_and_date() {
        let entries = vec![
            MetadataEntry::new("Title", "Foo"),
            MetadataEntry::new("Date", "1850"),
        ];
        let table = MetadataTable::from_entries(&entries).unwrap();
        assert_eq!(table.to_csv(), "Title,Date\nFoo,1850\n");
    }

    #[test]
    fn empty_metadata_gives_two_empty_lines() {
        let table = MetadataTable::from_entries(&[]).unwrap();
        assert_eq!(table.to_csv(), "\n\n");
    }

    #[test]
    fn fields_with_separators_are_quoted() {
        let entries = vec![
            MetadataEntry::new("Creator", "Dupont, Jean"),
            MetadataEntry::new("Note", "dit \"le jeune\""),
        ];
        let table = MetadataTable::from_entries(&entries).unwrap();
        assert_eq!(
            table.to_csv(),
            "Creator,Note\n\"Dupont, Jean\",\"dit \"\"le jeune\"\"\"\n"
        );
    }

    #[test]
    fn missing_value_is_reported_with_position() {
        let entries = vec![
            MetadataEntry::new("Title", "Foo"),
            MetadataEntry {
                label: Some(json!("Date")),
                value: None,
            },
        ];
        let err = MetadataTable::from_entries(&entries).unwrap_err();
        assert_eq!(
            err,
            MetadataShapeError {
                index: 1,
                field: MetadataField::Value
            }
        );
        assert_eq!(err.to_string(), "metadata entry #1 has no \"value\" key");
    }

    #[test]
    fn missing_label_is_reported() {
        let entries = vec![MetadataEntry {
            label: None,
            value: Some(json!("x")),
        }];
        let err = MetadataTable::from_entries(&entries).unwrap_err();
        assert_eq!(err.field, MetadataField::Label);
    }

    #[test]
    fn null_value_gives_empty_cell_but_absent_key_still_fails() {
        let parsed: Vec<MetadataEntry> = serde_json::from_value(json!([
            {"label": "Title", "value": "Foo"},
            {"label": "Date", "value": null}
        ]))
        .unwrap();
        let table = MetadataTable::from_entries(&parsed).unwrap();
        assert_eq!(table.to_csv(), "Title,Date\nFoo,\n");

        let absent: Vec<MetadataEntry> =
            serde_json::from_value(json!([{"label": "Date"}])).unwrap();
        let err = MetadataTable::from_entries(&absent).unwrap_err();
        assert_eq!(err.field, MetadataField::Value);
    }

    #[test]
    fn language_tagged_values_are_flattened() {
        let entries = vec![MetadataEntry {
            label: Some(json!("Language")),
            value: Some(json!([{"@value": "français", "@language": "fr"}, {"@value": "latin"}])),
        }];
        let table = MetadataTable::from_entries(&entries).unwrap();
        assert_eq!(table.values, vec!["français | latin"]);
    }

    #[test]
    fn write_csv_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.csv");
        let table = MetadataTable::from_entries(&[MetadataEntry::new("Title", "Foo")]).unwrap();
        table.write_csv(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Title\nFoo\n");
    }
}
