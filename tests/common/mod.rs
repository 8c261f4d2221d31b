#![allow(dead_code)]

use anyhow::Result;
use memquery::{DataValue, Record};
use tempfile::TempDir;

// Four people with a city column; Dave has no city at all
pub fn people() -> Vec<Record> {
    vec![
        Record::new().with("id", 1).with("name", "Alice").with("age", 25).with("city", "Oslo"),
        Record::new().with("id", 2).with("name", "Bob").with("age", 30).with("city", "Bergen"),
        Record::new().with("id", 3).with("name", "Charlie").with("age", 35).with("city", "Oslo"),
        Record::new().with("id", 4).with("name", "Dave").with("age", 40),
    ]
}

// Orders referencing people by user_id
pub fn orders() -> Vec<Record> {
    vec![
        Record::new().with("user_id", 1).with("order_id", 100).with("amount", 10),
        Record::new().with("user_id", 1).with("order_id", 101).with("amount", 20),
        Record::new().with("user_id", 3).with("order_id", 102).with("amount", 30),
    ]
}

// `count` records with ids 1..=count
pub fn numbered(count: usize) -> Vec<Record> {
    (1..=count as i64).map(|i| Record::new().with("id", i)).collect()
}

// Pull one column out of every record
pub fn column(records: &[Record], name: &str) -> Vec<DataValue> {
    records.iter().map(|r| r.resolve(name).clone()).collect()
}

// Create a temporary directory for export tests
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(tempfile::tempdir()?)
}
