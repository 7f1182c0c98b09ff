//! End-to-end tests: script in, populated changeset out.

use std::io::Write;

use changescript::{
    ChangeKind, ChangeSet, ChangeSetBuilder, Changelog, FileSystemAccessor, RollbackSource,
    SubstitutionTable,
};

fn build(changelog: &Changelog, resources: &FileSystemAccessor, script: &str) -> ChangeSet {
    let mut changeset = ChangeSet::new("1", "alice", changelog.physical_path.clone());
    ChangeSetBuilder::new(&mut changeset, changelog, resources)
        .run(script)
        .unwrap();
    changeset
}

#[test]
fn full_changeset_body() {
    let changelog = Changelog::new("db/changelog.xml");
    let resources = FileSystemAccessor::new(".");

    let changeset = build(
        &changelog,
        &resources,
        r#"
        comment "initial person schema"
        preConditions(onFail: "MARK_RAN") {
            not { tableExists(tableName: "person") }
        }
        createTable(tableName: "person", remarks: "core entity") {
            column(name: "id", type: "bigint", autoIncrement: true) {
                constraints(primaryKey: true, nullable: false)
            }
            column(name: "name", type: "varchar(255)") {
                constraints(nullable: false)
            }
            column(name: "email", type: "varchar(255)") {
                constraints(unique: true, uniqueConstraintName: "uq_person_email")
            }
        }
        createIndex(tableName: "person", indexName: "idx_person_name") {
            column(name: "name")
        }
        modifySql(dbms: "mysql") {
            append(value: " ENGINE=InnoDB")
        }
        rollback {
            dropIndex(tableName: "person", indexName: "idx_person_name")
            dropTable(tableName: "person")
        }
        "#,
    );

    assert_eq!(changeset.comment.as_deref(), Some("initial person schema"));
    assert!(changeset.preconditions.is_some());
    assert_eq!(changeset.changes.len(), 2);
    assert_eq!(changeset.changes[0].columns.len(), 3);
    assert_eq!(changeset.sql_visitors.len(), 1);
    assert_eq!(changeset.rollback_source, RollbackSource::Block);
    assert_eq!(changeset.rollback_changes.len(), 2);
}

#[test]
fn sql_file_content_is_resolved_at_build_time() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seed.sql");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "INSERT INTO person (name) VALUES ('${{seed.name}}');").unwrap();
    drop(file);

    let mut parameters = SubstitutionTable::new();
    parameters.set("seed.name", "Ada");
    let changelog = Changelog::new("db/changelog.xml").with_parameters(parameters);
    let resources = FileSystemAccessor::new(dir.path());

    let changeset = build(&changelog, &resources, r#"sqlFile(path: "seed.sql")"#);

    // Delete the file: the body must already be resolved, so a later
    // checksum pass never needs to re-read it.
    std::fs::remove_file(&path).unwrap();

    let change = &changeset.changes[0];
    assert_eq!(change.kind, ChangeKind::SqlFile);
    let body = change.body.as_deref().unwrap();
    assert!(body.contains("VALUES ('Ada')"), "got: {}", body);
}

#[test]
fn sql_file_relative_to_changelog_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("db/sql")).unwrap();
    std::fs::write(dir.path().join("db/sql/patch.sql"), "SELECT 1;").unwrap();

    let changelog = Changelog::new("db/changelog.xml");
    let resources = FileSystemAccessor::new(dir.path());

    let changeset = build(
        &changelog,
        &resources,
        r#"sqlFile(path: "sql/patch.sql", relativeToChangelogFile: true)"#,
    );
    assert_eq!(changeset.changes[0].body.as_deref(), Some("SELECT 1;"));
}

#[test]
fn missing_sql_file_is_a_resource_error() {
    let changelog = Changelog::new("db/changelog.xml");
    let resources = FileSystemAccessor::new(".");
    let mut changeset = ChangeSet::new("1", "alice", "db/changelog.xml");

    let err = ChangeSetBuilder::new(&mut changeset, &changelog, &resources)
        .run(r#"sqlFile(path: "does/not/exist.sql")"#)
        .unwrap_err();

    assert!(err.to_string().contains("does/not/exist.sql"));
    // Fail-fast: nothing was committed to the changeset.
    assert!(changeset.changes.is_empty());
}

#[test]
fn procedure_body_from_file_is_eager() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("proc.sql"),
        "CREATE PROCEDURE audit() BEGIN END",
    )
    .unwrap();

    let changelog = Changelog::new("db/changelog.xml");
    let resources = FileSystemAccessor::new(dir.path());

    let changeset = build(
        &changelog,
        &resources,
        r#"createProcedure(procedureName: "audit", path: "proc.sql")"#,
    );
    assert!(
        changeset.changes[0]
            .body
            .as_deref()
            .unwrap()
            .starts_with("CREATE PROCEDURE")
    );
}

#[test]
fn parameters_load_from_toml() {
    let parameters =
        SubstitutionTable::from_toml_str("schema = \"app\"\nowner = \"dba\"\n").unwrap();
    let changelog = Changelog::new("db/changelog.xml").with_parameters(parameters);
    let resources = FileSystemAccessor::new(".");

    let changeset = build(
        &changelog,
        &resources,
        r#"createTable(schemaName: "${schema}", tableName: "person", remarks: "owned by ${owner}")"#,
    );

    let change = &changeset.changes[0];
    assert_eq!(change.param_str("schemaName"), Some("app"));
    assert_eq!(change.param_str("remarks"), Some("owned by dba"));
}

#[test]
fn rollback_reference_across_changesets() {
    let mut changelog = Changelog::new("db/changelog.xml");
    let resources = FileSystemAccessor::new(".");

    let first = build(
        &changelog,
        &resources,
        r#"createTable(tableName: "person") { column(name: "id", type: "int") }"#,
    );
    changelog.add_changeset(first);

    let mut second = ChangeSet::new("2", "alice", "db/changelog.xml");
    ChangeSetBuilder::new(&mut second, &changelog, &resources)
        .run(
            r#"
            dropTable(tableName: "person")
            rollback(changeSetId: "1", changeSetAuthor: "alice")
            "#,
        )
        .unwrap();

    assert_eq!(second.rollback_changes.len(), 1);
    assert_eq!(second.rollback_changes[0].kind, ChangeKind::CreateTable);
}

#[test]
fn changeset_serializes_for_the_engine() {
    let changelog = Changelog::new("db/changelog.xml");
    let resources = FileSystemAccessor::new(".");

    let changeset = build(
        &changelog,
        &resources,
        r#"
        createTable(tableName: "person") {
            column(name: "id", type: "int") { constraints(primaryKey: true) }
        }
        "#,
    );

    let json = serde_json::to_string(&changeset).unwrap();
    assert!(json.contains("\"kind\":\"createTable\""), "got: {}", json);
    assert!(json.contains("\"primaryKey\":true"));
    assert!(json.contains("\"filePath\":\"db/changelog.xml\""));
}

#[test]
fn load_data_end_to_end() {
    let changelog = Changelog::new("db/changelog.xml");
    let resources = FileSystemAccessor::new(".");

    let changeset = build(
        &changelog,
        &resources,
        r#"
        loadUpdateData(tableName: "person", file: "data/person.csv", primaryKey: "id") {
            column(name: "id", index: 1, type: "NUMERIC")
            column(name: "name", index: 2, type: "STRING")
        }
        "#,
    );

    let change = &changeset.changes[0];
    assert_eq!(change.kind, ChangeKind::LoadUpdateData);
    assert_eq!(change.param_str("primaryKey"), Some("id"));
    assert_eq!(change.load_columns.len(), 2);
}
