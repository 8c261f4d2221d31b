use std::sync::Arc;

use anyhow::Result;
use memquery::io::json::records_from_json_str;
use memquery::{DataValue, ExportConfig, QueryEngine, Record, SortDirection};

#[path = "../common/mod.rs"]
mod common;

use common::{column, numbered, people};

#[test]
fn test_full_pipeline() -> Result<()> {
    let engine = QueryEngine::new(people())
        .filter("city = ?", &["Oslo".into()])
        .order_by("age", SortDirection::Desc)
        .select(&["name", "age"]);

    assert_eq!(
        engine.get(),
        &[
            Record::new().with("name", "Charlie").with("age", 35),
            Record::new().with("name", "Alice").with("age", 25),
        ]
    );
    Ok(())
}

#[test]
fn test_wildcard_select_is_identity() -> Result<()> {
    let engine = QueryEngine::new(people()).select(&["*"]);
    assert_eq!(engine.get(), people().as_slice());
    Ok(())
}

#[test]
fn test_select_skips_missing_columns() -> Result<()> {
    let engine = QueryEngine::new(people()).select(&["city", "nope"]);
    assert_eq!(engine.get()[0], Record::new().with("city", "Oslo"));
    assert!(engine.get()[3].is_empty());
    Ok(())
}

#[test]
fn test_reset_restores_input() -> Result<()> {
    let engine = QueryEngine::new(people())
        .filter("age > 100", &[])
        .reset()
        .limit(1, 3)
        .reset()
        .reset();
    assert_eq!(engine.get(), people().as_slice());
    assert_eq!(engine.original(), people().as_slice());
    Ok(())
}

#[test]
fn test_order_by_places_absent_first() -> Result<()> {
    let engine = QueryEngine::new(people()).order_by("city", SortDirection::Asc);
    assert_eq!(
        column(engine.get(), "name"),
        vec![
            DataValue::from("Dave"),
            DataValue::from("Bob"),
            DataValue::from("Alice"),
            DataValue::from("Charlie"),
        ]
    );

    let engine = engine.order_by("city", "DESC".parse()?);
    assert_eq!(engine.get()[3].resolve("name"), &DataValue::from("Dave"));
    Ok(())
}

#[test]
fn test_limit_clamps() -> Result<()> {
    let engine = QueryEngine::new(numbered(5)).limit(10, 3);
    assert_eq!(column(engine.get(), "id"), vec![DataValue::from(4), DataValue::from(5)]);

    let engine = QueryEngine::new(numbered(5)).limit(2, 99);
    assert!(engine.is_empty());
    Ok(())
}

#[test]
fn test_pagination_arithmetic() -> Result<()> {
    let engine = QueryEngine::new(numbered(25));

    let page = engine.paginate(1, 10);
    assert_eq!((page.total, page.pages), (25, 3));

    let page = engine.paginate(2, 10);
    assert_eq!(page.data.len(), 10);
    assert_eq!(page.data[0].resolve("id"), &DataValue::from(11));

    let page = engine.paginate(3, 10);
    assert_eq!(page.data.len(), 5);

    assert!(engine.paginate(4, 10).data.is_empty());
    assert_eq!(engine.paginate(0, 10).data, engine.paginate(1, 10).data);

    let page = engine.paginate(1, 0);
    assert_eq!((page.total, page.pages, page.data.len()), (25, 0, 0));
    Ok(())
}

#[test]
fn test_page_serializes() -> Result<()> {
    let page = QueryEngine::new(numbered(3)).paginate(2, 2);
    assert_eq!(serde_json::to_string(&page)?, r#"{"data":[{"id":3}],"total":3,"pages":2}"#);
    Ok(())
}

#[test]
fn test_load_and_export_json() -> Result<()> {
    let records = records_from_json_str(
        r#"[{"id": 1, "name": "Ann", "tags": ["a", "b"], "ok": true, "score": 1.5},
            {"id": 2, "name": null}]"#,
    )?;
    assert_eq!(records[0].columns().collect::<Vec<_>>(), vec!["id", "name", "tags", "ok", "score"]);
    assert_eq!(records[0].resolve("tags"), &DataValue::from(r#"["a","b"]"#));
    assert!(records[1].contains("name"));

    let engine = QueryEngine::new(records).filter("ok = true", &[]).select(&["id", "score"]);
    assert_eq!(engine.to_json()?, r#"[{"id":1,"score":1.5}]"#);

    let pretty = engine.with_config(ExportConfig::default().with_pretty_json(true));
    assert!(pretty.to_json()?.contains("\n  {"));
    Ok(())
}

#[test]
fn test_invalid_json_input() -> Result<()> {
    assert!(records_from_json_str("{\"id\": 1}").is_err());
    assert!(records_from_json_str("[1, 2]").is_err());
    assert!(records_from_json_str("not json").is_err());
    Ok(())
}

#[test]
fn test_shared_snapshot_per_query() -> Result<()> {
    let snapshot: Arc<[Record]> = people().into();

    let handles: Vec<_> = (1..=4i64)
        .map(|id| {
            let snapshot = Arc::clone(&snapshot);
            std::thread::spawn(move || {
                QueryEngine::from_shared(snapshot)
                    .filter("id = ?", &[DataValue::from(id)])
                    .into_records()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let records = handle.join().expect("query thread");
        assert_eq!(records, vec![people()[i].clone()]);
    }
    assert_eq!(snapshot.len(), 4);
    Ok(())
}
