// Condition Evaluation
//
// Evaluates a parsed condition against one record.

use std::cmp::Ordering;

use log::trace;

use crate::query::executor::result::{DataValue, Record};
use crate::query::executor::type_conversion::condition_cmp;
use crate::query::parser::ast::{Comparison, ComparisonOp, Condition, Connective};

/// Apply a comparison operator to two values
pub fn apply_operator(op: ComparisonOp, left: &DataValue, right: &DataValue) -> bool {
    let ordering = condition_cmp(left, right);
    match op {
        ComparisonOp::Equals => ordering == Ordering::Equal,
        ComparisonOp::NotEquals => ordering != Ordering::Equal,
        ComparisonOp::LessThan => ordering == Ordering::Less,
        ComparisonOp::LessEqual => ordering != Ordering::Greater,
        ComparisonOp::GreaterThan => ordering == Ordering::Greater,
        ComparisonOp::GreaterEqual => ordering != Ordering::Less,
    }
}

/// Evaluate a single comparison. Missing columns resolve to `Null`.
pub fn evaluate_comparison(comparison: &Comparison, record: &Record) -> bool {
    let actual = record.resolve(&comparison.column);
    apply_operator(comparison.op, actual, &comparison.value)
}

/// Evaluates a condition against records.
///
/// Comparison results are folded left to right: the n-th connective joins the
/// running result with the (n+1)-th comparison, so `a AND b OR c` means
/// `(a AND b) OR c`. A missing connective defaults to `AND`, and a condition
/// without any comparison matches nothing.
pub struct ConditionEvaluator<'a> {
    comparisons: Vec<&'a Comparison>,
    connectives: Vec<Connective>,
}

impl<'a> ConditionEvaluator<'a> {
    pub fn new(condition: &'a Condition) -> Self {
        ConditionEvaluator {
            comparisons: condition.comparisons().collect(),
            connectives: condition.connectives().collect(),
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        let mut results = self
            .comparisons
            .iter()
            .map(|comparison| evaluate_comparison(comparison, record));

        let Some(mut result) = results.next() else {
            return false;
        };

        for (i, next) in results.enumerate() {
            let connective = self.connectives.get(i).copied().unwrap_or(Connective::And);
            result = match connective {
                Connective::And => result && next,
                Connective::Or => result || next,
            };
        }

        trace!("Condition evaluated to {} for {:?}", result, record);
        result
    }
}
