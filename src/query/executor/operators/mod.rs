// Query Operators Module
//
// This module defines the operators that make up the query pipeline. Each
// operator consumes the current dataset and produces the next one.

pub mod agg;
pub mod filter;
pub mod join;
pub mod limit;
pub mod project;
pub mod sort;

use crate::query::executor::result::Dataset;
use crate::query::parser::ast::Condition;

pub use self::filter::FilterOperator;
pub use self::join::{HashJoin, JoinType};
pub use self::limit::{LimitOperator, paginate};
pub use self::project::{ProjectOperator, Projection};
pub use self::sort::{SortDirection, SortOperator};

/// The Operator trait defines the interface for every dataset-to-dataset
/// step of the pipeline.
///
/// Operators never modify the records they are given in place; they take
/// ownership of the input dataset and return a new one.
pub trait Operator {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Transform `input` into the next dataset
    fn execute(&self, input: Dataset) -> Dataset;
}

// Factory functions for creating operators
pub fn create_filter(condition: Condition) -> Box<dyn Operator> {
    Box::new(FilterOperator::new(condition))
}

pub fn create_projection(projection: Projection) -> Box<dyn Operator> {
    Box::new(ProjectOperator::new(projection))
}

pub fn create_sort(column: &str, direction: SortDirection) -> Box<dyn Operator> {
    Box::new(SortOperator::new(column, direction))
}

pub fn create_limit(count: usize, offset: usize) -> Box<dyn Operator> {
    Box::new(LimitOperator::new(count, offset))
}
