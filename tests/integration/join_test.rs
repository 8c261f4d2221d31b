use anyhow::Result;
use memquery::{DataValue, JoinType, QueryEngine, Record};

#[path = "../common/mod.rs"]
mod common;

use common::{column, orders, people};

fn local() -> Vec<Record> {
    vec![Record::new().with("id", 1), Record::new().with("id", 2)]
}

fn foreign() -> Vec<Record> {
    vec![
        Record::new().with("uid", 1).with("x", "a"),
        Record::new().with("uid", 1).with("x", "b"),
    ]
}

#[test]
fn test_inner_join_cardinality() -> Result<()> {
    let engine = QueryEngine::new(local()).join(&foreign(), "id", "=", "uid", JoinType::Inner, None);

    assert_eq!(
        engine.get(),
        &[
            Record::new().with("id", 1).with("uid", 1).with("x", "a"),
            Record::new().with("id", 1).with("uid", 1).with("x", "b"),
        ]
    );
    Ok(())
}

#[test]
fn test_left_join_cardinality() -> Result<()> {
    let engine = QueryEngine::new(local()).join(&foreign(), "id", "=", "uid", JoinType::Left, None);

    assert_eq!(engine.len(), 3);
    assert_eq!(
        engine.get()[2],
        Record::new()
            .with("id", 2)
            .with("uid", DataValue::Null)
            .with("x", DataValue::Null)
    );
    Ok(())
}

#[test]
fn test_join_with_alias_prefixes_foreign_columns() -> Result<()> {
    let engine = QueryEngine::new(people())
        .join(&orders(), "id", "=", "user_id", JoinType::Inner, Some("o"))
        .filter("o.amount >= 20", &[])
        .select(&["name", "o.order_id"]);

    assert_eq!(
        engine.get(),
        &[
            Record::new().with("name", "Alice").with("o.order_id", 101),
            Record::new().with("name", "Charlie").with("o.order_id", 102),
        ]
    );
    Ok(())
}

#[test]
fn test_join_preserves_local_order() -> Result<()> {
    let engine = QueryEngine::new(people())
        .join(&orders(), "id", "=", "user_id", JoinType::Left, None);

    assert_eq!(
        column(engine.get(), "name"),
        vec![
            DataValue::from("Alice"),
            DataValue::from("Alice"),
            DataValue::from("Bob"),
            DataValue::from("Charlie"),
            DataValue::from("Dave"),
        ]
    );
    assert_eq!(engine.get()[2].resolve("order_id"), &DataValue::Null);
    Ok(())
}

#[test]
fn test_join_keys_match_loosely() -> Result<()> {
    let local = vec![Record::new().with("id", "1")];
    let engine = QueryEngine::new(local).join(&foreign(), "id", "=", "uid", JoinType::Inner, None);
    assert_eq!(engine.len(), 2);
    Ok(())
}

#[test]
fn test_join_against_empty_dataset() -> Result<()> {
    let inner = QueryEngine::new(local()).join(&[], "id", "=", "uid", JoinType::Inner, None);
    assert!(inner.is_empty());

    let left = QueryEngine::new(local()).join(&[], "id", "=", "uid", JoinType::Left, None);
    assert_eq!(left.get(), local().as_slice());
    Ok(())
}

#[test]
fn test_join_type_parsing() -> Result<()> {
    assert_eq!(JoinType::parse("LEFT"), JoinType::Left);
    assert_eq!(JoinType::parse("inner"), JoinType::Inner);
    assert_eq!(JoinType::parse("outer"), JoinType::Inner);
    Ok(())
}

#[test]
fn test_join_and_filter_agree_on_non_finite_keys() -> Result<()> {
    let local = vec![Record::new().with("k", f64::INFINITY)];
    let foreign = vec![Record::new().with("fk", "inf").with("x", 1)];

    let filtered = QueryEngine::new(local.clone()).filter("k = 'inf'", &[]);
    assert_eq!(filtered.len(), 1);

    let joined = QueryEngine::new(local).join(&foreign, "k", "=", "fk", JoinType::Inner, None);
    assert_eq!(joined.len(), 1);
    assert_eq!(joined.get()[0].resolve("x"), &DataValue::from(1));
    Ok(())
}
