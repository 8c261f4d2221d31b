// Filter Operator Implementation
//
// This module implements the filter operator for keeping the records that
// satisfy a parsed condition.

use log::debug;

use crate::query::executor::expression_eval::ConditionEvaluator;
use crate::query::executor::operators::Operator;
use crate::query::executor::result::Dataset;
use crate::query::parser::ast::Condition;

/// Filter operator that keeps records matching a condition
pub struct FilterOperator {
    condition: Condition,
}

impl FilterOperator {
    /// Create a new filter operator
    pub fn new(condition: Condition) -> Self {
        FilterOperator { condition }
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }
}

impl Operator for FilterOperator {
    fn name(&self) -> &'static str {
        "filter"
    }

    /// Keep the matching records in their original relative order
    fn execute(&self, input: Dataset) -> Dataset {
        let evaluator = ConditionEvaluator::new(&self.condition);
        let before = input.len();
        let kept: Dataset = input
            .into_iter()
            .filter(|record| evaluator.matches(record))
            .collect();

        debug!("Filter kept {} of {} records", kept.len(), before);
        kept
    }
}
