// Query Engine Implementation
//
// The engine is a pipeline value: every chainable call consumes the engine
// and returns it with the next dataset, and terminal calls read the current
// dataset without changing it. The dataset the engine was built from is kept
// behind an `Arc` and never modified, which is what `reset` restores.

use std::path::Path;
use std::sync::Arc;

use linked_hash_map::LinkedHashMap;
use log::{debug, warn};

use crate::common::config::ExportConfig;
use crate::io::csv::{ExportOutcome, export_csv};
use crate::io::json::to_json_string;
use crate::query::executor::operators::agg::{Grouping, aggregate, group_by};
use crate::query::executor::operators::{
    self, HashJoin, JoinType, Operator, Projection, SortDirection, paginate,
};
use crate::query::executor::result::{DataValue, Dataset, Page, QueryResult, Record};
use crate::query::parser::ast::{ComparisonOp, Condition};
use crate::query::parser::parse_condition;

/// In-memory query pipeline over a dataset of records
#[derive(Debug, Clone)]
pub struct QueryEngine {
    original: Arc<[Record]>,
    current: Dataset,
    config: ExportConfig,
}

impl QueryEngine {
    /// Build an engine whose current and original dataset are `records`
    pub fn new(records: Vec<Record>) -> Self {
        let original: Arc<[Record]> = records.clone().into();
        QueryEngine {
            original,
            current: records,
            config: ExportConfig::default(),
        }
    }

    /// Build an engine over a shared, read-only snapshot. Each engine built
    /// this way works on its own copy of the current dataset.
    pub fn from_shared(snapshot: Arc<[Record]>) -> Self {
        QueryEngine {
            current: snapshot.to_vec(),
            original: snapshot,
            config: ExportConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Run any operator over the current dataset
    pub fn apply(mut self, operator: &dyn Operator) -> Self {
        let input = std::mem::take(&mut self.current);
        debug!("Applying {} to {} records", operator.name(), input.len());
        self.current = operator.execute(input);
        self
    }

    /// Rewind to the dataset the engine was built from
    pub fn reset(mut self) -> Self {
        self.current = self.original.to_vec();
        self
    }

    /// Restrict every record to `columns`; `["*"]` keeps everything
    pub fn select<S: AsRef<str>>(self, columns: &[S]) -> Self {
        let op = operators::create_projection(Projection::from_columns(columns));
        self.apply(op.as_ref())
    }

    /// WHERE: keep records matching `condition` after binding `params` to
    /// its `?` placeholders
    pub fn filter(self, condition: &str, params: &[DataValue]) -> Self {
        self.filter_condition(parse_condition(condition, params))
    }

    /// WHERE with an already parsed condition
    pub fn filter_condition(self, condition: Condition) -> Self {
        let op = operators::create_filter(condition);
        self.apply(op.as_ref())
    }

    pub fn order_by(self, column: &str, direction: SortDirection) -> Self {
        let op = operators::create_sort(column, direction);
        self.apply(op.as_ref())
    }

    /// Keep at most `count` records starting at `offset`
    pub fn limit(self, count: usize, offset: usize) -> Self {
        let op = operators::create_limit(count, offset);
        self.apply(op.as_ref())
    }

    /// Equality join against `other` on `local_key = foreign_key`.
    ///
    /// Only `=` is meaningful as `operator`; any other operator is logged and
    /// the join still matches on equality. With an alias, foreign columns are
    /// named `alias.column`.
    pub fn join(
        self,
        other: &[Record],
        local_key: &str,
        operator: &str,
        foreign_key: &str,
        join_type: JoinType,
        alias: Option<&str>,
    ) -> Self {
        if ComparisonOp::from_symbol(operator.trim()) != Some(ComparisonOp::Equals) {
            warn!("Join operator {:?} is not supported; joining on equality", operator);
        }
        let op = HashJoin::new(other, local_key, foreign_key, join_type).with_alias(alias);
        self.apply(&op)
    }

    /// Partition the current dataset by `column`
    pub fn group_by(&self, column: &str) -> Grouping {
        group_by(&self.current, column)
    }

    /// Compute `(column, function)` aggregates over the current dataset
    pub fn aggregate<C, F>(&self, fields: &[(C, F)]) -> LinkedHashMap<String, DataValue>
    where
        C: AsRef<str>,
        F: AsRef<str>,
    {
        aggregate(&self.current, fields)
    }

    /// Read one page of the current dataset
    pub fn paginate(&self, page: usize, per_page: usize) -> Page {
        paginate(&self.current, page, per_page)
    }

    /// The current dataset
    pub fn get(&self) -> &[Record] {
        &self.current
    }

    /// The dataset the engine was built from
    pub fn original(&self) -> &[Record] {
        &self.original
    }

    pub fn into_records(self) -> Dataset {
        self.current
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Serialize the current dataset as a JSON array
    pub fn to_json(&self) -> QueryResult<String> {
        to_json_string(&self.current, self.config.pretty_json)
    }

    /// Export the current dataset as CSV, reporting what happened
    pub fn try_export_csv(&self, path: impl AsRef<Path>) -> QueryResult<ExportOutcome> {
        export_csv(&self.current, path, &self.config)
    }

    /// Export the current dataset as CSV. Empty datasets and unwritable
    /// destinations are silently skipped.
    pub fn to_csv(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if let Err(e) = self.try_export_csv(path) {
            warn!("CSV export to {} failed: {}", path.display(), e);
        }
    }
}

impl From<Vec<Record>> for QueryEngine {
    fn from(records: Vec<Record>) -> Self {
        QueryEngine::new(records)
    }
}
