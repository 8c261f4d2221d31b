// Hash Join Implementation
//
// This file implements the hash join algorithm, which is optimized for
// equality-based join conditions with O(n+m) time complexity. The foreign
// dataset is the build side; the current dataset is probed in order, so the
// output follows local record order.

use std::collections::HashMap;

use log::debug;

use super::JoinType;
use crate::query::executor::operators::Operator;
use crate::query::executor::result::{DataValue, Dataset, Record};
use crate::query::executor::type_conversion::ValueKey;

/// Foreign records bucketed by their join column, in original order.
/// Built once per join call.
pub struct JoinIndex<'a> {
    buckets: HashMap<ValueKey, Vec<&'a Record>>,
}

impl<'a> JoinIndex<'a> {
    /// Build the index from `records` keyed by `column`
    pub fn build(records: &'a [Record], column: &str) -> Self {
        let mut buckets: HashMap<ValueKey, Vec<&'a Record>> = HashMap::new();
        for record in records {
            buckets
                .entry(ValueKey::from(record.resolve(column)))
                .or_default()
                .push(record);
        }
        JoinIndex { buckets }
    }

    /// Foreign records whose key equals `value`
    pub fn matches(&self, value: &DataValue) -> &[&'a Record] {
        self.buckets
            .get(&ValueKey::from(value))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct keys
    pub fn key_count(&self) -> usize {
        self.buckets.len()
    }
}

/// Hash Join operator implementation
pub struct HashJoin<'a> {
    /// Foreign input (build side)
    foreign: &'a [Record],
    /// Column of the current dataset to match on
    local_key: String,
    /// Column of the foreign dataset to match on
    foreign_key: String,
    join_type: JoinType,
    /// Prefix for foreign column names, joined with a dot
    alias: Option<String>,
}

impl<'a> HashJoin<'a> {
    /// Create a new hash join operator
    pub fn new(foreign: &'a [Record], local_key: &str, foreign_key: &str, join_type: JoinType) -> Self {
        HashJoin {
            foreign,
            local_key: local_key.to_string(),
            foreign_key: foreign_key.to_string(),
            join_type,
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: Option<&str>) -> Self {
        self.alias = alias.filter(|a| !a.is_empty()).map(str::to_string);
        self
    }

    /// Name a foreign column carries in the output
    fn qualify(&self, column: &str) -> String {
        match &self.alias {
            Some(alias) => format!("{}.{}", alias, column),
            None => column.to_string(),
        }
    }

    /// Copy of `local` with every column of `foreign` merged in. Foreign
    /// columns overwrite same-named local columns in place.
    fn merge(&self, local: &Record, foreign: &Record) -> Record {
        let mut joined = local.clone();
        for (column, value) in foreign.iter() {
            joined.set(self.qualify(column), value.clone());
        }
        joined
    }

    /// `local` padded with a null for every column of the first foreign
    /// record, which serves as the schema template
    fn pad_with_nulls(&self, mut local: Record) -> Record {
        if let Some(template) = self.foreign.first() {
            for column in template.columns() {
                local.set(self.qualify(column), DataValue::Null);
            }
        }
        local
    }
}

impl Operator for HashJoin<'_> {
    fn name(&self) -> &'static str {
        "hash_join"
    }

    fn execute(&self, input: Dataset) -> Dataset {
        let index = JoinIndex::build(self.foreign, &self.foreign_key);
        let local_rows = input.len();
        let mut joined = Vec::with_capacity(local_rows);

        for record in input {
            let matches = index.matches(record.resolve(&self.local_key));
            if !matches.is_empty() {
                joined.extend(matches.iter().map(|foreign| self.merge(&record, foreign)));
            } else if self.join_type == JoinType::Left {
                joined.push(self.pad_with_nulls(record));
            }
        }

        debug!(
            "{:?} join {} = {}: {} local x {} foreign ({} keys) -> {} records",
            self.join_type,
            self.local_key,
            self.foreign_key,
            local_rows,
            self.foreign.len(),
            index.key_count(),
            joined.len()
        );
        joined
    }
}
