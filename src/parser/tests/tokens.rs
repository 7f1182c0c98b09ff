use crate::ast::Value;
use crate::parser::tokens::{parse_identifier, parse_value, ws_or_comment};

#[test]
fn test_identifier() {
    let (rest, id) = parse_identifier("createTable(tableName").unwrap();
    assert_eq!(id, "createTable");
    assert_eq!(rest, "(tableName");

    let (_, id) = parse_identifier("drop_all_fk rest").unwrap();
    assert_eq!(id, "drop_all_fk");
}

#[test]
fn test_string_literals() {
    let (_, v) = parse_value("\"person\"").unwrap();
    assert_eq!(v, Value::String("person".to_string()));

    // Single quotes carry double quotes through untouched
    let (_, v) = parse_value("'say \"hi\"'").unwrap();
    assert_eq!(v, Value::String("say \"hi\"".to_string()));

    // Double quotes carry single quotes through untouched
    let (_, v) = parse_value("\"name = 'Bob'\"").unwrap();
    assert_eq!(v, Value::String("name = 'Bob'".to_string()));
}

#[test]
fn test_numbers() {
    let (_, v) = parse_value("42").unwrap();
    assert_eq!(v, Value::Int(42));

    let (_, v) = parse_value("-7").unwrap();
    assert_eq!(v, Value::Int(-7));

    let (_, v) = parse_value("3.5").unwrap();
    assert_eq!(v, Value::Float(3.5));

    // Wide integers survive (sequence bounds)
    let (_, v) = parse_value("9223372036854775808").unwrap();
    assert_eq!(v, Value::Int(9_223_372_036_854_775_808_i128));
}

#[test]
fn test_keywords() {
    let (_, v) = parse_value("true").unwrap();
    assert_eq!(v, Value::Bool(true));

    let (_, v) = parse_value("null").unwrap();
    assert_eq!(v, Value::Null);

    // `true` must not swallow the head of an identifier
    assert!(parse_value("truncated").is_err());
    assert!(parse_value("nullable").is_err());
}

#[test]
fn test_ws_and_comments() {
    let (rest, _) = ws_or_comment("  // a comment\n-- another\n  next").unwrap();
    assert_eq!(rest, "next");
}
