// Projection Operator Implementation
//
// This module implements the projection operator for selecting specific columns.

use log::debug;

use crate::query::executor::operators::Operator;
use crate::query::executor::result::{Dataset, Record};

/// Marker that selects every column
pub const WILDCARD: &str = "*";

/// Column selection requested by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// Keep records as they are
    All,
    /// Keep only the named columns
    Columns(Vec<String>),
}

impl Projection {
    /// A list consisting of exactly the wildcard selects everything. Any other
    /// list, including one that mixes `*` with names, is a column list.
    pub fn from_columns<S: AsRef<str>>(columns: &[S]) -> Self {
        match columns {
            [only] if only.as_ref() == WILDCARD => Projection::All,
            _ => Projection::Columns(columns.iter().map(|c| c.as_ref().to_string()).collect()),
        }
    }
}

/// Projection operator that restricts records to a set of columns
pub struct ProjectOperator {
    projection: Projection,
}

impl ProjectOperator {
    /// Create a new projection operator
    pub fn new(projection: Projection) -> Self {
        ProjectOperator { projection }
    }

    /// Keep the requested columns, in the record's own column order.
    /// Requested columns the record lacks are skipped.
    fn project_record(columns: &[String], record: &Record) -> Record {
        record
            .iter()
            .filter(|(column, _)| columns.iter().any(|c| c == column))
            .map(|(column, value)| (column, value.clone()))
            .collect()
    }
}

impl Operator for ProjectOperator {
    fn name(&self) -> &'static str {
        "project"
    }

    fn execute(&self, input: Dataset) -> Dataset {
        match &self.projection {
            Projection::All => input,
            Projection::Columns(columns) => {
                debug!("Projecting {} records onto {:?}", input.len(), columns);
                input
                    .iter()
                    .map(|record| Self::project_record(columns, record))
                    .collect()
            }
        }
    }
}
