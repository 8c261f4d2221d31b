// Query Result Implementation
//
// This module defines the value, record and result types shared by every
// stage of the query pipeline.

use std::fmt;

use linked_hash_map::LinkedHashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use crate::query::executor::type_conversion::format_number;

/// Scalar stored in a record column.
///
/// `Null` doubles as the absent sentinel: looking up a column a record does
/// not carry resolves to `Null`, and so does an explicit JSON `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    Null,
    Number(f64),
    Text(String),
    Boolean(bool),
}

static ABSENT: DataValue = DataValue::Null;

impl DataValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DataValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Build a value from untyped text such as a CLI argument: numeric text
    /// becomes a `Number`, anything else stays `Text`.
    pub fn from_untyped(text: &str) -> Self {
        match crate::query::executor::type_conversion::parse_numeric(text) {
            Some(n) => DataValue::Number(n),
            None => DataValue::Text(text.to_string()),
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Null => write!(f, "null"),
            DataValue::Number(n) => write!(f, "{}", format_number(*n)),
            DataValue::Text(s) => write!(f, "{}", s),
            DataValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl Serialize for DataValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DataValue::Null => serializer.serialize_unit(),
            DataValue::Number(n) => {
                // Integral numbers go out as JSON integers.
                if n.fract() == 0.0 && n.abs() < 9.0e15 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            DataValue::Text(s) => serializer.serialize_str(s),
            DataValue::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

impl From<f64> for DataValue {
    fn from(n: f64) -> Self {
        DataValue::Number(n)
    }
}

impl From<i64> for DataValue {
    fn from(n: i64) -> Self {
        DataValue::Number(n as f64)
    }
}

impl From<i32> for DataValue {
    fn from(n: i32) -> Self {
        DataValue::Number(f64::from(n))
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        DataValue::Boolean(b)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Text(s)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DataValue::Null, Into::into)
    }
}

/// One row: an insertion-ordered mapping from column name to value.
///
/// Column names are opaque. A dotted name such as `r.name` is a single key,
/// never a path into nested data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: LinkedHashMap<String, DataValue>,
}

impl Record {
    /// Create a new empty record
    pub fn new() -> Self {
        Record {
            values: LinkedHashMap::new(),
        }
    }

    /// Get a value by column name
    pub fn get(&self, column: &str) -> Option<&DataValue> {
        self.values.get(column)
    }

    /// Get a value by column name, resolving missing columns to `Null`
    pub fn resolve(&self, column: &str) -> &DataValue {
        self.values.get(column).unwrap_or(&ABSENT)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    /// Set a value for a column. An existing column keeps its position.
    pub fn set(&mut self, column: impl Into<String>, value: DataValue) {
        let column = column.into();
        match self.values.get_mut(&column) {
            Some(slot) => *slot = value,
            None => {
                self.values.insert(column, value);
            }
        }
    }

    /// Builder-style variant of [`Record::set`]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<DataValue>) -> Self {
        self.set(column, value.into());
        self
    }

    /// Column names in insertion order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<DataValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (column, value) in iter {
            record.set(column, value.into());
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in &self.values {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Ordered sequence of records
pub type Dataset = Vec<Record>;

/// One page of a paginated dataset
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Page {
    pub data: Dataset,
    /// Number of records in the whole dataset
    pub total: usize,
    /// Number of pages at the requested page size
    pub pages: usize,
}

/// Errors raised at the I/O boundary of the engine.
///
/// The pipeline itself never fails; malformed conditions, unknown columns
/// and unknown aggregate functions all have defined outcomes.
#[derive(Error, Debug)]
pub enum QueryError {
    /// Error from the filesystem
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// CSV encoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Input data had an unexpected shape
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
