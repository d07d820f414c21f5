//! Tabular data sources.
//!
//! A source is anything that can hand the renderer a sequence of records
//! (field name to value mappings) and, optionally, list its field names. When
//! a table has no heading yet, the field names become the heading.
//!
//! [`RecordSet`] is the in-memory implementation, with constructors for CSV
//! and JSON input. Query results from other libraries can implement
//! [`TabularSource`] directly.
//!
//! ```rust
//! use markup_table::{RecordSet, TabularSource};
//!
//! let source = RecordSet::from_csv("name,qty\nbolts,12\nnuts,40\n".as_bytes()).unwrap();
//!
//! assert_eq!(source.field_names(), Some(vec!["name".to_string(), "qty".to_string()]));
//! assert_eq!(source.records().count(), 2);
//! ```

use std::io;
use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use crate::cell::CellValue;
use crate::error::{Result, TableError};

/// One result row: field name to value, in field order.
pub type Record = IndexMap<String, CellValue>;

/// A source of records the renderer can ingest.
pub trait TabularSource {
    /// Returns the field names, or `None` if this source cannot list them.
    fn field_names(&self) -> Option<Vec<String>>;

    /// Iterates the records in order.
    fn records(&self) -> Box<dyn Iterator<Item = Record> + '_>;
}

impl<T: TabularSource + ?Sized> TabularSource for &T {
    fn field_names(&self) -> Option<Vec<String>> {
        (**self).field_names()
    }

    fn records(&self) -> Box<dyn Iterator<Item = Record> + '_> {
        (**self).records()
    }
}

/// An in-memory set of records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordSet {
    fields: Option<Vec<String>>,
    records: Vec<Record>,
}

impl RecordSet {
    /// Creates an empty set with known field names.
    pub fn new<S: Into<String>, I: IntoIterator<Item = S>>(fields: I) -> Self {
        RecordSet {
            fields: Some(fields.into_iter().map(Into::into).collect()),
            records: Vec::new(),
        }
    }

    /// Creates an empty set that cannot list its field names.
    pub fn without_fields() -> Self {
        RecordSet::default()
    }

    /// Appends a record, returning the set for chaining.
    pub fn record(mut self, record: Record) -> Self {
        self.push(record);
        self
    }

    /// Appends a record in place.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Reads CSV with a header line. Every value is text.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Csv`] on malformed input, including a row whose
    /// field count differs from the header's.
    pub fn from_csv<R: io::Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut set = RecordSet::new(headers.iter().cloned());
        for row in reader.records() {
            let row = row?;
            let record: Record = headers
                .iter()
                .zip(row.iter())
                .map(|(field, value)| (field.clone(), CellValue::from(value)))
                .collect();
            set.push(record);
        }

        debug!(fields = headers.len(), records = set.len(), "read csv source");
        Ok(set)
    }

    /// Reads a CSV file with a header line.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv(io::BufReader::new(file))
    }

    /// Builds a set from a JSON array of objects.
    ///
    /// Field names are the object keys in first-seen order across all
    /// records. Every record is laid out in that order, with `Null` for keys
    /// it lacks.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidSource`] if the value is not an array of
    /// objects.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Array(items) = value else {
            return Err(TableError::InvalidSource(
                "expected an array of objects".to_string(),
            ));
        };

        let mut fields: Vec<String> = Vec::new();
        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let serde_json::Value::Object(object) = item else {
                return Err(TableError::InvalidSource(format!(
                    "record {} is not an object",
                    index
                )));
            };

            let mut record = Record::with_capacity(object.len());
            for (field, value) in object {
                if !fields.contains(&field) {
                    fields.push(field.clone());
                }
                record.insert(field, CellValue::from(value));
            }
            records.push(record);
        }

        let records: Vec<Record> = records
            .into_iter()
            .map(|mut record| {
                fields
                    .iter()
                    .map(|field| {
                        let value = record.swap_remove(field).unwrap_or_default();
                        (field.clone(), value)
                    })
                    .collect()
            })
            .collect();

        debug!(fields = fields.len(), records = records.len(), "read json source");
        Ok(RecordSet {
            fields: Some(fields),
            records,
        })
    }

    /// Parses a JSON array of objects.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_json_value(serde_json::from_str(json)?)
    }
}

impl TabularSource for RecordSet {
    fn field_names(&self) -> Option<Vec<String>> {
        self.fields.clone()
    }

    fn records(&self) -> Box<dyn Iterator<Item = Record> + '_> {
        Box::new(self.records.iter().cloned())
    }
}
