// Aggregation Operators Module
//
// This module contains the terminal grouping and aggregation steps
// (COUNT, SUM, AVG, MIN, MAX and GROUP BY).

mod aggregate;
mod group;

pub use aggregate::{AggregateValue, aggregate};
pub use group::{Group, Grouping, group_by};

// Types of supported aggregate functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateType {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateType {
    /// Case-insensitive lookup. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "COUNT" => Some(AggregateType::Count),
            "SUM" => Some(AggregateType::Sum),
            "AVG" => Some(AggregateType::Avg),
            "MIN" => Some(AggregateType::Min),
            "MAX" => Some(AggregateType::Max),
            _ => None,
        }
    }
}
