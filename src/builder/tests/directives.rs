use super::{build, build_with};
use crate::ast::{ErrorHandling, Precondition, SqlVisitorKind};
use crate::changelog::Changelog;
use crate::error::BuildError;

#[test]
fn test_comment_is_expanded() {
    let mut changelog = Changelog::new("db/changelog.xml");
    changelog.parameters.set("release", "2024.2");

    let changeset = build_with(changelog, r#"comment "shipped in ${release}""#).unwrap();
    assert_eq!(changeset.comment.as_deref(), Some("shipped in 2024.2"));
}

#[test]
fn test_last_comment_wins() {
    let changeset = build("comment \"first\"\ncomment \"second\"").unwrap();
    assert_eq!(changeset.comment.as_deref(), Some("second"));
}

#[test]
fn test_valid_checksum_dedupes() {
    let changeset = build(
        r#"
        validCheckSum "8:aaaa"
        validCheckSum "8:bbbb"
        validCheckSum "8:aaaa"
        "#,
    )
    .unwrap();
    assert_eq!(changeset.valid_checksums, vec!["8:aaaa", "8:bbbb"]);
}

#[test]
fn test_preconditions_tree() {
    let changeset = build(
        r#"
        preConditions(onFail: "MARK_RAN", onFailMessage: "person is missing") {
            runningAs(username: "migrator")
            not { tableExists(tableName: "person") }
        }
        "#,
    )
    .unwrap();

    let pre = changeset.preconditions.as_ref().unwrap();
    assert_eq!(pre.on_fail, ErrorHandling::MarkRan);
    assert_eq!(pre.on_error, ErrorHandling::Halt);
    assert_eq!(pre.on_fail_message.as_deref(), Some("person is missing"));
    assert_eq!(pre.conditions.len(), 2);

    match &pre.conditions[0] {
        Precondition::RunningAs { username } => assert_eq!(username, "migrator"),
        other => panic!("expected RunningAs, got {:?}", other),
    }
    match &pre.conditions[1] {
        Precondition::Not(inner) => {
            assert!(matches!(&inner[0], Precondition::TableExists { table_name, .. }
                if table_name == "person"));
        }
        other => panic!("expected Not, got {:?}", other),
    }
}

#[test]
fn test_precondition_sql_check() {
    let changeset = build(
        r#"
        preConditions {
            sqlCheck(expectedResult: 0) { "SELECT count(*) FROM person WHERE id < 0" }
        }
        "#,
    )
    .unwrap();

    let pre = changeset.preconditions.as_ref().unwrap();
    match &pre.conditions[0] {
        Precondition::SqlCheck {
            expected_result,
            sql,
        } => {
            assert_eq!(expected_result, "0");
            assert!(sql.starts_with("SELECT count(*)"));
        }
        other => panic!("expected SqlCheck, got {:?}", other),
    }
}

#[test]
fn test_precondition_or_nesting() {
    let changeset = build(
        r#"
        preConditions {
            or {
                dbms(type: "postgresql")
                dbms(type: "h2")
            }
        }
        "#,
    )
    .unwrap();

    let pre = changeset.preconditions.as_ref().unwrap();
    match &pre.conditions[0] {
        Precondition::Or(inner) => assert_eq!(inner.len(), 2),
        other => panic!("expected Or, got {:?}", other),
    }
}

#[test]
fn test_unknown_precondition_leaf() {
    let err = build(r#"preConditions { tableExist(tableName: "p") }"#).unwrap_err();
    match err {
        BuildError::UnknownChange {
            name, suggestion, ..
        } => {
            assert_eq!(name, "tableExist");
            assert!(suggestion.contains("tableExists"));
        }
        other => panic!("expected UnknownChange, got {:?}", other),
    }
}

#[test]
fn test_bad_on_fail_value() {
    let err = build(r#"preConditions(onFail: "EXPLODE")"#).unwrap_err();
    assert!(matches!(err, BuildError::TypeCoercion { .. }));
}

#[test]
fn test_modify_sql_visitors() {
    let changeset = build(
        r#"
        createTable(tableName: "t")
        modifySql(dbms: "mysql, mariadb", applyToRollback: true) {
            append(value: " ENGINE=InnoDB")
            replace(replace: "TABLE", with: "TABLE IF NOT EXISTS")
        }
        "#,
    )
    .unwrap();

    assert_eq!(changeset.sql_visitors.len(), 2);
    let first = &changeset.sql_visitors[0];
    assert_eq!(first.dbms, vec!["mysql", "mariadb"]);
    assert!(first.apply_to_rollback);
    assert_eq!(
        first.kind,
        SqlVisitorKind::Append {
            value: " ENGINE=InnoDB".to_string()
        }
    );
    assert!(matches!(
        changeset.sql_visitors[1].kind,
        SqlVisitorKind::Replace { .. }
    ));
}

#[test]
fn test_modify_sql_unknown_entry() {
    let err = build(r#"modifySql { prepand(value: "x") }"#).unwrap_err();
    match err {
        BuildError::UnknownChange { suggestion, .. } => {
            assert!(suggestion.contains("prepend"));
        }
        other => panic!("expected UnknownChange, got {:?}", other),
    }
}
