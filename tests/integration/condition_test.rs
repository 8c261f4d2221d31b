use anyhow::Result;
use memquery::query::parser::{ComparisonOp, ConditionToken, Connective, parse_comparison};
use memquery::{DataValue, QueryEngine, Record, parse_condition};

#[path = "../common/mod.rs"]
mod common;

use common::{column, people};

fn names(engine: &QueryEngine) -> Vec<DataValue> {
    column(engine.get(), "name")
}

#[test]
fn test_parameter_binding() -> Result<()> {
    let engine = QueryEngine::new(people()).filter("age > ? AND city = ?", &[26.into(), "Oslo".into()]);
    assert_eq!(names(&engine), vec![DataValue::from("Charlie")]);
    Ok(())
}

#[test]
fn test_left_to_right_connective_law() -> Result<()> {
    // (a=1 AND b=2) OR c=3, with no precedence for AND
    let record = Record::new().with("a", 1).with("b", 9).with("c", 3);
    let engine = QueryEngine::new(vec![record]).filter("a=1 AND b=2 OR c=3", &[]);
    assert_eq!(engine.len(), 1);

    // a=1 OR (b=2 AND c=3) would pass; the left fold does not
    let record = Record::new().with("a", 1).with("b", 9).with("c", 9);
    let engine = QueryEngine::new(vec![record]).filter("a=1 OR b=2 AND c=3", &[]);
    assert!(engine.is_empty());
    Ok(())
}

#[test]
fn test_lowercase_connectives() -> Result<()> {
    let engine = QueryEngine::new(people()).filter("age < 30 or age >= 40", &[]);
    assert_eq!(names(&engine), vec![DataValue::from("Alice"), DataValue::from("Dave")]);
    Ok(())
}

#[test]
fn test_parameter_text_is_never_split() -> Result<()> {
    let records = vec![
        Record::new().with("title", "Salt and Pepper"),
        Record::new().with("title", "It's OR never"),
        Record::new().with("title", "plain"),
    ];

    let engine = QueryEngine::new(records.clone()).filter("title = ?", &["Salt and Pepper".into()]);
    assert_eq!(engine.len(), 1);

    let engine = QueryEngine::new(records).filter("title = ?", &["It's OR never".into()]);
    assert_eq!(column(engine.get(), "title"), vec![DataValue::from("It's OR never")]);
    Ok(())
}

#[test]
fn test_absent_column_semantics() -> Result<()> {
    // Dave has no city: it equals nothing and sorts below everything
    let engine = QueryEngine::new(people()).filter("city = ''", &[]);
    assert!(engine.is_empty());

    let engine = QueryEngine::new(people()).filter("city < 'A'", &[]);
    assert_eq!(names(&engine), vec![DataValue::from("Dave")]);

    let engine = QueryEngine::new(people()).filter("city != 'Oslo'", &[]);
    assert_eq!(names(&engine), vec![DataValue::from("Bob"), DataValue::from("Dave")]);
    Ok(())
}

#[test]
fn test_numeric_text_compares_numerically() -> Result<()> {
    let records = vec![
        Record::new().with("n", "9"),
        Record::new().with("n", "10"),
        Record::new().with("n", "100"),
    ];
    let engine = QueryEngine::new(records).filter("n > 9", &[]);
    assert_eq!(column(engine.get(), "n"), vec![DataValue::from("10"), DataValue::from("100")]);
    Ok(())
}

#[test]
fn test_malformed_conditions_never_fail() -> Result<()> {
    // Nothing parses: no comparison, nothing matches
    for text in ["", "garbage", "age >", "AND", "age ~ 3", "'unterminated = 1"] {
        let engine = QueryEngine::new(people()).filter(text, &[]);
        assert!(engine.is_empty(), "{:?} should match nothing", text);
    }

    // An invalid segment is dropped and the rest still applies
    let engine = QueryEngine::new(people()).filter("age >= 35 AND nonsense here", &[]);
    assert_eq!(names(&engine), vec![DataValue::from("Charlie"), DataValue::from("Dave")]);
    Ok(())
}

#[test]
fn test_parsed_token_stream() -> Result<()> {
    let condition = parse_condition("age >= ? OR x y z AND name = ?", &[18.into(), "Ann".into()]);

    let comparisons: Vec<_> = condition.comparisons().collect();
    assert_eq!(comparisons.len(), 2);
    assert_eq!(comparisons[0].op, ComparisonOp::GreaterEqual);
    assert_eq!(comparisons[1].value, DataValue::from("Ann"));

    let connectives: Vec<_> = condition.connectives().collect();
    assert_eq!(connectives, vec![Connective::Or, Connective::And]);

    assert!(matches!(condition.tokens[2], ConditionToken::Invalid(ref s) if s.trim() == "x y z"));
    Ok(())
}

#[test]
fn test_parse_comparison_shapes() -> Result<()> {
    let cmp = parse_comparison("r.name != 'x'").expect("comparison");
    assert_eq!(cmp.column, "r.name");
    assert_eq!(cmp.op, ComparisonOp::NotEquals);
    assert!(parse_comparison("name LIKE 'x'").is_none());
    Ok(())
}
