// CSV Export
//
// The header is the column order of the first record. Every row is written
// against that header: missing columns become `null_text` and columns not in
// the header are left out. The file is rendered in memory first, so an
// export either writes the complete file or leaves the destination alone.

use std::fs;
use std::path::Path;

use ::csv::WriterBuilder;
use log::debug;

use crate::common::config::ExportConfig;
use crate::query::executor::result::{DataValue, QueryError, QueryResult, Record};

/// What an export did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// A header and this many data rows were written
    Written { rows: usize },
    /// The dataset was empty; nothing was created
    SkippedEmpty,
}

fn field_text(value: &DataValue, config: &ExportConfig) -> String {
    match value {
        DataValue::Null => config.null_text.clone(),
        other => other.to_string(),
    }
}

/// Render `records` as CSV bytes, or `None` for an empty dataset
pub fn render_csv(records: &[Record], config: &ExportConfig) -> QueryResult<Option<Vec<u8>>> {
    let Some(first) = records.first() else {
        return Ok(None);
    };
    let header: Vec<&str> = first.columns().collect();

    let mut writer = WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_writer(Vec::new());

    writer.write_record(&header)?;
    for record in records {
        writer.write_record(
            header
                .iter()
                .map(|column| field_text(record.resolve(column), config)),
        )?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| QueryError::Io(e.into_error()))?;
    Ok(Some(bytes))
}

/// Write `records` to `path` as CSV
pub fn export_csv(
    records: &[Record],
    path: impl AsRef<Path>,
    config: &ExportConfig,
) -> QueryResult<ExportOutcome> {
    let path = path.as_ref();
    match render_csv(records, config)? {
        None => {
            debug!("Skipping CSV export to {}: empty dataset", path.display());
            Ok(ExportOutcome::SkippedEmpty)
        }
        Some(bytes) => {
            fs::write(path, bytes)?;
            debug!("Exported {} records to {}", records.len(), path.display());
            Ok(ExportOutcome::Written {
                rows: records.len(),
            })
        }
    }
}
