// Whole-dataset aggregation
//
// Each requested column is folded over every record of the current dataset.
// Records lacking the column contribute a `Null`.

use std::cmp::Ordering;

use linked_hash_map::LinkedHashMap;
use log::{debug, warn};

use super::AggregateType;
use crate::query::executor::result::{DataValue, Record};
use crate::query::executor::type_conversion::{as_number, compare_values};

/// Aggregate value calculation helper struct
#[derive(Debug, Clone)]
pub struct AggregateValue {
    agg_type: AggregateType,
    /// Every value seen, nulls included
    count: usize,
    /// Sum of the numeric-looking values
    sum: f64,
    min: Option<DataValue>,
    max: Option<DataValue>,
}

impl AggregateValue {
    pub fn new(agg_type: AggregateType) -> Self {
        AggregateValue {
            agg_type,
            count: 0,
            sum: 0.0,
            min: None,
            max: None,
        }
    }

    /// Update the aggregate with a new value
    pub fn update(&mut self, value: &DataValue) {
        self.count += 1;

        match self.agg_type {
            AggregateType::Count => {}
            AggregateType::Sum | AggregateType::Avg => {
                // Values that do not look numeric add nothing.
                if let Some(n) = as_number(value) {
                    self.sum += n;
                }
            }
            AggregateType::Min => {
                if self
                    .min
                    .as_ref()
                    .is_none_or(|current| compare_values(value, current) == Ordering::Less)
                {
                    self.min = Some(value.clone());
                }
            }
            AggregateType::Max => {
                if self
                    .max
                    .as_ref()
                    .is_none_or(|current| compare_values(value, current) == Ordering::Greater)
                {
                    self.max = Some(value.clone());
                }
            }
        }
    }

    /// Get the final aggregate value
    pub fn result(&self) -> DataValue {
        match self.agg_type {
            AggregateType::Count => DataValue::Number(self.count as f64),
            AggregateType::Sum => DataValue::Number(self.sum),
            AggregateType::Avg => {
                if self.count == 0 {
                    DataValue::Number(0.0)
                } else {
                    DataValue::Number(self.sum / self.count as f64)
                }
            }
            AggregateType::Min => self.min.clone().unwrap_or(DataValue::Null),
            AggregateType::Max => self.max.clone().unwrap_or(DataValue::Null),
        }
    }
}

/// Compute one aggregate per `(column, function)` pair over all `records`.
///
/// The result keeps the request order. An unknown function name maps its
/// column to `Null`; a column named twice keeps the last request.
pub fn aggregate<C, F>(records: &[Record], fields: &[(C, F)]) -> LinkedHashMap<String, DataValue>
where
    C: AsRef<str>,
    F: AsRef<str>,
{
    let mut results = LinkedHashMap::new();

    for (column, function) in fields {
        let column = column.as_ref();
        let value = match AggregateType::from_name(function.as_ref()) {
            Some(agg_type) => {
                let mut acc = AggregateValue::new(agg_type);
                for record in records {
                    acc.update(record.resolve(column));
                }
                acc.result()
            }
            None => {
                warn!("Unknown aggregate function {:?} for column {}", function.as_ref(), column);
                DataValue::Null
            }
        };
        debug!("{}({}) over {} records = {}", function.as_ref(), column, records.len(), value);
        results.insert(column.to_string(), value);
    }

    results
}
