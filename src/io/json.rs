use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::query::executor::result::{DataValue, Dataset, QueryError, QueryResult, Record};

/// Convert a JSON scalar. Arrays and objects are kept as their JSON text.
pub fn value_from_json(value: JsonValue) -> DataValue {
    match value {
        JsonValue::Null => DataValue::Null,
        JsonValue::Bool(b) => DataValue::Boolean(b),
        JsonValue::Number(n) => n.as_f64().map_or(DataValue::Null, DataValue::Number),
        JsonValue::String(s) => DataValue::Text(s),
        nested @ (JsonValue::Array(_) | JsonValue::Object(_)) => DataValue::Text(nested.to_string()),
    }
}

/// Convert a JSON object into a record, keeping its key order
pub fn record_from_json(value: JsonValue) -> QueryResult<Record> {
    match value {
        JsonValue::Object(map) => Ok(map
            .into_iter()
            .map(|(column, value)| (column, value_from_json(value)))
            .collect()),
        other => Err(QueryError::InvalidInput(format!(
            "Expected a JSON object for a record, found {}",
            other
        ))),
    }
}

fn records_from_value(value: JsonValue) -> QueryResult<Dataset> {
    match value {
        JsonValue::Array(items) => items.into_iter().map(record_from_json).collect(),
        _ => Err(QueryError::InvalidInput(
            "Expected a JSON array of objects".to_string(),
        )),
    }
}

/// Parse a dataset from JSON text: an array of flat objects
pub fn records_from_json_str(text: &str) -> QueryResult<Dataset> {
    records_from_value(serde_json::from_str(text)?)
}

pub fn records_from_reader<R: Read>(reader: R) -> QueryResult<Dataset> {
    records_from_value(serde_json::from_reader(reader)?)
}

pub fn records_from_path(path: impl AsRef<Path>) -> QueryResult<Dataset> {
    let path = path.as_ref();
    let records = records_from_reader(BufReader::new(File::open(path)?))?;
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

pub fn to_json_string<T: Serialize + ?Sized>(value: &T, pretty: bool) -> QueryResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
