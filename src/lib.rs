// MemQuery: relational-style querying over in-memory records

pub mod common;
pub mod io;
pub mod query;

// Re-export key items for convenient access
pub use common::config::ExportConfig;
pub use io::csv::ExportOutcome;
pub use query::executor::engine::QueryEngine;
pub use query::executor::operators::agg::{Group, Grouping};
pub use query::executor::operators::{JoinType, SortDirection};
pub use query::executor::result::{DataValue, Dataset, Page, QueryError, QueryResult, Record};
pub use query::parser::{Condition, parse_condition};
