use std::fs;

use anyhow::Result;
use memquery::{DataValue, ExportConfig, ExportOutcome, QueryEngine, Record};

#[path = "../common/mod.rs"]
mod common;

use common::{create_temp_dir, people};

#[test]
fn test_export_writes_header_and_rows() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = dir.path().join("people.csv");

    let engine = QueryEngine::new(people()).select(&["id", "city"]);
    assert_eq!(engine.try_export_csv(&path)?, ExportOutcome::Written { rows: 4 });

    let text = fs::read_to_string(&path)?;
    assert_eq!(text, "id,city\n1,Oslo\n2,Bergen\n3,Oslo\n4,\n");
    Ok(())
}

#[test]
fn test_export_with_config() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = dir.path().join("out.csv");

    let records = vec![
        Record::new().with("a", "x;y").with("b", DataValue::Null),
        Record::new().with("b", 2).with("c", 3),
    ];
    let config = ExportConfig::default().with_delimiter(b';').with_null_text("NULL");
    QueryEngine::new(records).with_config(config).to_csv(&path);

    // Header from the first record; extra columns are dropped
    let text = fs::read_to_string(&path)?;
    assert_eq!(text, "a;b\n\"x;y\";NULL\nNULL;2\n");
    Ok(())
}

#[test]
fn test_empty_dataset_creates_no_file() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = dir.path().join("empty.csv");

    let engine = QueryEngine::new(people()).filter("age > 1000", &[]);
    assert_eq!(engine.try_export_csv(&path)?, ExportOutcome::SkippedEmpty);
    engine.to_csv(&path);
    assert!(!path.exists());
    Ok(())
}

#[test]
fn test_unwritable_destination_is_silent() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = dir.path().join("missing").join("out.csv");

    let engine = QueryEngine::new(people());
    assert!(engine.try_export_csv(&path).is_err());

    // The silent variant swallows the failure
    engine.to_csv(&path);
    assert!(!path.exists());
    Ok(())
}
