use super::{build, build_with};
use crate::ast::{ChangeKind, ColumnValue, LoadType, Number};
use crate::changelog::Changelog;
use crate::error::BuildError;

#[test]
fn test_column_declaration_order() {
    let changeset = build(
        r#"
        createTable(tableName: "t") {
            column(name: "c1", type: "int")
            column(name: "c2", type: "text")
            column(name: "c3", type: "bool")
        }
        "#,
    )
    .unwrap();

    let names: Vec<_> = changeset.changes[0]
        .columns
        .iter()
        .map(|c| c.name.as_deref().unwrap())
        .collect();
    assert_eq!(names, vec!["c1", "c2", "c3"]);
}

#[test]
fn test_constraints_nested_under_column() {
    let changeset = build(
        r#"
        createTable(tableName: "person") {
            column(name: "id", type: "bigint", autoIncrement: true) {
                constraints(primaryKey: true, nullable: false, primaryKeyName: "pk_person")
            }
        }
        "#,
    )
    .unwrap();

    let column = &changeset.changes[0].columns[0];
    assert_eq!(column.auto_increment, Some(true));
    let constraints = column.constraints.as_ref().unwrap();
    assert_eq!(constraints.primary_key, Some(true));
    assert_eq!(constraints.nullable, Some(false));
    assert_eq!(constraints.primary_key_name.as_deref(), Some("pk_person"));
}

#[test]
fn test_typed_column_values() {
    let changeset = build(
        r#"
        insert(tableName: "person") {
            column(name: "id", valueNumeric: 7)
            column(name: "active", valueBoolean: true)
            column(name: "joined", valueDate: "2024-03-01 09:30:00")
            column(name: "token", valueComputed: "uuid()")
            column(name: "name", value: "Ada")
        }
        "#,
    )
    .unwrap();

    let columns = &changeset.changes[0].columns;
    assert_eq!(columns[0].value, Some(ColumnValue::Numeric(Number::Int(7))));
    assert_eq!(columns[1].value, Some(ColumnValue::Boolean(true)));
    assert!(matches!(columns[2].value, Some(ColumnValue::Date(_))));
    assert_eq!(
        columns[3].value,
        Some(ColumnValue::Computed("uuid()".to_string()))
    );
    assert_eq!(columns[4].value, Some(ColumnValue::Text("Ada".to_string())));
}

#[test]
fn test_default_value_forms() {
    let changeset = build(
        r#"
        addColumn(tableName: "person") {
            column(name: "score", type: "numeric", defaultValueNumeric: "3.5")
            column(name: "created", type: "timestamp", defaultValueComputed: "now()")
            column(name: "code", type: "bigint", defaultValueSequenceNext: "seq_code")
        }
        "#,
    )
    .unwrap();

    let columns = &changeset.changes[0].columns;
    assert_eq!(
        columns[0].default_value,
        Some(ColumnValue::Numeric(Number::Float(3.5)))
    );
    assert_eq!(
        columns[1].default_value,
        Some(ColumnValue::Computed("now()".to_string()))
    );
    assert_eq!(
        columns[2].default_value,
        Some(ColumnValue::SequenceNext("seq_code".to_string()))
    );
}

#[test]
fn test_bad_date_value_fails() {
    let err = build(
        r#"insert(tableName: "t") { column(name: "d", valueDate: "not-a-date") }"#,
    )
    .unwrap_err();
    match err {
        BuildError::TypeCoercion { expected, .. } => assert_eq!(expected, "date"),
        other => panic!("expected TypeCoercion, got {:?}", other),
    }
}

#[test]
fn test_invalid_column_property() {
    let err = build(
        r#"createTable(tableName: "t") { column(name: "c", typ: "int") }"#,
    )
    .unwrap_err();
    match err {
        BuildError::InvalidProperty {
            change,
            property,
            suggestion,
            ..
        } => {
            assert_eq!(change, "column");
            assert_eq!(property, "typ");
            assert!(suggestion.contains("type"));
        }
        other => panic!("expected InvalidProperty, got {:?}", other),
    }
}

#[test]
fn test_load_data_columns() {
    let changeset = build(
        r#"
        loadData(tableName: "person", file: "data/person.csv", separator: ";") {
            column(name: "id", index: 1, type: "NUMERIC")
            column(name: "name", header: "full_name", type: "string")
            column(name: "notes", type: "skip")
        }
        "#,
    )
    .unwrap();

    let change = &changeset.changes[0];
    assert_eq!(change.kind, ChangeKind::LoadData);
    assert!(change.columns.is_empty());
    let load = &change.load_columns;
    assert_eq!(load.len(), 3);
    assert_eq!(load[0].index, Some(1));
    assert_eq!(load[0].load_type, Some(LoadType::Numeric));
    assert_eq!(load[1].header.as_deref(), Some("full_name"));
    assert_eq!(load[1].load_type, Some(LoadType::String));
    assert_eq!(load[2].load_type, Some(LoadType::Skip));
}

#[test]
fn test_unknown_load_type_fails() {
    let err = build(
        r#"loadData(tableName: "t", file: "f.csv") { column(name: "c", type: "wibble") }"#,
    )
    .unwrap_err();
    match err {
        BuildError::TypeCoercion { expected, .. } => assert_eq!(expected, "load type"),
        other => panic!("expected TypeCoercion, got {:?}", other),
    }
}

#[test]
fn test_update_where_clause_expanded() {
    let mut changelog = Changelog::new("db/changelog.xml");
    changelog.parameters.set("admin.id", "17");

    let changeset = build_with(
        changelog,
        r#"
        update(tableName: "person") {
            column(name: "active", valueBoolean: false)
            where "id = ${admin.id}"
        }
        "#,
    )
    .unwrap();

    let change = &changeset.changes[0];
    assert_eq!(change.where_clause.as_deref(), Some("id = 17"));
    assert_eq!(change.columns.len(), 1);
}

#[test]
fn test_delete_takes_where_but_no_columns() {
    let changeset = build(r#"delete(tableName: "person") { where "id = 2" }"#).unwrap();
    assert_eq!(changeset.changes[0].where_clause.as_deref(), Some("id = 2"));

    let err = build(
        r#"delete(tableName: "person") { column(name: "id") }"#,
    )
    .unwrap_err();
    assert!(matches!(err, BuildError::Misplaced { .. }));
}

#[test]
fn test_where_rejected_on_create_table() {
    let err = build(r#"createTable(tableName: "t") { where "id = 1" }"#).unwrap_err();
    assert!(matches!(err, BuildError::Misplaced { .. }));
}
