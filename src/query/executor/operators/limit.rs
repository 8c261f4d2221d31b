// Limit and Pagination
//
// Slicing helpers. `LimitOperator` is a pipeline step; `paginate` only reads.

use log::debug;

use crate::query::executor::operators::Operator;
use crate::query::executor::result::{Dataset, Page, Record};

/// Keeps at most `count` records starting at `offset`
pub struct LimitOperator {
    count: usize,
    offset: usize,
}

impl LimitOperator {
    pub fn new(count: usize, offset: usize) -> Self {
        LimitOperator { count, offset }
    }
}

impl Operator for LimitOperator {
    fn name(&self) -> &'static str {
        "limit"
    }

    fn execute(&self, input: Dataset) -> Dataset {
        debug!(
            "Limiting {} records to {} from offset {}",
            input.len(),
            self.count,
            self.offset
        );
        input.into_iter().skip(self.offset).take(self.count).collect()
    }
}

/// Slice one page out of `records`.
///
/// Pages are numbered from 1; page 0 is read as page 1. A page size of zero
/// yields no pages and no data.
pub fn paginate(records: &[Record], page: usize, per_page: usize) -> Page {
    let total = records.len();
    if per_page == 0 {
        return Page {
            data: Vec::new(),
            total,
            pages: 0,
        };
    }

    let pages = total.div_ceil(per_page);
    let offset = page.max(1).saturating_sub(1).saturating_mul(per_page);
    let data = records.iter().skip(offset).take(per_page).cloned().collect();

    Page { data, total, pages }
}
