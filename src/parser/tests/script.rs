use crate::ast::Value;
use crate::parser::script::BlockItem;
use crate::parser::parse;

#[test]
fn test_bare_invocation() {
    let block = parse("empty").unwrap();
    assert_eq!(block.items.len(), 1);
    let call = block.calls().next().unwrap();
    assert_eq!(call.name, "empty");
    assert!(call.args.is_empty());
    assert!(call.block.is_none());
}

#[test]
fn test_named_args() {
    let block = parse("createTable(tableName: \"person\", remarks: \"core\")").unwrap();
    let call = block.calls().next().unwrap();
    assert_eq!(call.name, "createTable");
    let args: Vec<_> = call.named_args().collect();
    assert_eq!(args[0], ("tableName", &Value::String("person".into())));
    assert_eq!(args[1], ("remarks", &Value::String("core".into())));
}

#[test]
fn test_positional_arg() {
    let block = parse("comment \"add person\"").unwrap();
    let call = block.calls().next().unwrap();
    assert_eq!(call.name, "comment");
    assert_eq!(call.positional(), Some(&Value::String("add person".into())));
}

#[test]
fn test_nested_blocks() {
    let script = r#"
        createTable(tableName: "person") {
            column(name: "id", type: "int") {
                constraints(primaryKey: true, nullable: false)
            }
            column(name: "name", type: "varchar(255)")
        }
    "#;
    let block = parse(script).unwrap();
    let table = block.calls().next().unwrap();
    let columns: Vec<_> = table.block.as_ref().unwrap().calls().collect();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0].name, "column");
    let constraints = columns[0].block.as_ref().unwrap().calls().next().unwrap();
    assert_eq!(constraints.name, "constraints");
    assert_eq!(
        constraints.named_args().next(),
        Some(("primaryKey", &Value::Bool(true)))
    );
}

#[test]
fn test_block_text_items() {
    let block = parse("sql { \"UPDATE person SET active = 1\" }").unwrap();
    let call = block.calls().next().unwrap();
    let body = call.block.as_ref().unwrap();
    assert_eq!(
        body.text().as_deref(),
        Some("UPDATE person SET active = 1")
    );
}

#[test]
fn test_multiple_invocations() {
    let script = r#"
        comment "two changes"  // trailing comment
        dropTable(tableName: "a")
        -- full-line comment
        dropTable(tableName: "b", cascadeConstraints: true)
    "#;
    let block = parse(script).unwrap();
    let names: Vec<_> = block.calls().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["comment", "dropTable", "dropTable"]);
}

#[test]
fn test_value_types_in_args() {
    let block =
        parse("alterSequence(sequenceName: \"seq\", incrementBy: 10, cycle: false)").unwrap();
    let call = block.calls().next().unwrap();
    let args: Vec<_> = call.named_args().collect();
    assert_eq!(args[1], ("incrementBy", &Value::Int(10)));
    assert_eq!(args[2], ("cycle", &Value::Bool(false)));
}

#[test]
fn test_block_after_bare_name() {
    let block = parse("rollback { dropTable(tableName: \"person\") }").unwrap();
    let call = block.calls().next().unwrap();
    assert_eq!(call.name, "rollback");
    assert!(call.args.is_empty());
    assert!(call.block.is_some());
}

#[test]
fn test_parse_error_reports_line() {
    let err = parse("empty\ncreateTable(tableName \"x\")").unwrap_err();
    assert_eq!(err.line, 2);
    assert!(err.snippet.starts_with("(tableName"));
}

#[test]
fn test_unclosed_block_is_an_error() {
    assert!(parse("rollback { dropTable(tableName: \"p\")").is_err());
}

#[test]
fn test_text_item_at_top_level() {
    // A raw string at the top level parses as a text item; the builder
    // decides whether it is meaningful there.
    let block = parse("\"stray\"").unwrap();
    assert_eq!(block.items, vec![BlockItem::Text("stray".into())]);
}
