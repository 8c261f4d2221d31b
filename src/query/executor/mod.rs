// Query Executor Module
//
// This module runs the query pipeline: the value model, condition
// evaluation, the operators and the engine that chains them.

pub mod engine;
pub mod expression_eval;
pub mod operators;
pub mod result;
pub mod type_conversion;

// Export key types
pub use self::engine::QueryEngine;
pub use self::expression_eval::ConditionEvaluator;
pub use self::operators::Operator;
pub use self::result::{DataValue, Dataset, Page, QueryError, QueryResult, Record};
