use std::str::FromStr;

use log::debug;

use crate::query::executor::operators::Operator;
use crate::query::executor::result::Dataset;
use crate::query::executor::type_conversion::compare_values;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` in any case sorts descending; every other input sorts ascending.
    pub fn parse(direction: &str) -> Self {
        if direction.trim().eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

impl FromStr for SortDirection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortDirection::parse(s))
    }
}

/// Orders records by one column using the engine's value ordering.
/// `Desc` reverses the comparison, not the sorted output.
pub struct SortOperator {
    column: String,
    direction: SortDirection,
}

impl SortOperator {
    pub fn new(column: &str, direction: SortDirection) -> Self {
        SortOperator {
            column: column.to_string(),
            direction,
        }
    }
}

impl Operator for SortOperator {
    fn name(&self) -> &'static str {
        "sort"
    }

    fn execute(&self, mut input: Dataset) -> Dataset {
        debug!(
            "Sorting {} records by {} ({:?})",
            input.len(),
            self.column,
            self.direction
        );
        input.sort_by(|a, b| {
            let ord = compare_values(a.resolve(&self.column), b.resolve(&self.column));
            match self.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
        input
    }
}
