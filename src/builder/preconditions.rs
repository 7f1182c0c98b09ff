//! Builds the precondition tree from a `preConditions` block.

use crate::ast::{ErrorHandling, Precondition, Preconditions};
use crate::builder::params::ArgReader;
use crate::changelog::Changelog;
use crate::error::{BuildError, suggestion_for};
use crate::parser::{Block, BlockItem, Invocation};

const CONTAINER_ATTRS: &[&str] = &["onFail", "onError", "onFailMessage", "onErrorMessage"];

const LEAF_NAMES: &[&str] = &[
    "and",
    "or",
    "not",
    "dbms",
    "runningAs",
    "changeSetExecuted",
    "tableExists",
    "columnExists",
    "viewExists",
    "indexExists",
    "sequenceExists",
    "foreignKeyConstraintExists",
    "primaryKeyExists",
    "sqlCheck",
];

/// Build the `preConditions` container from its invocation.
pub(crate) fn build_preconditions(
    inv: &Invocation,
    changelog: &Changelog,
    changeset: &str,
) -> Result<Preconditions, BuildError> {
    let args = ArgReader::new(inv, changelog, changeset, "preConditions");
    args.check(CONTAINER_ATTRS)?;

    let on_fail = handling(&args, "onFail", changeset)?;
    let on_error = handling(&args, "onError", changeset)?;

    let conditions = match inv.block.as_ref() {
        Some(block) => build_condition_list(block, changelog, changeset)?,
        None => Vec::new(),
    };

    Ok(Preconditions {
        on_fail,
        on_error,
        on_fail_message: args.str_opt("onFailMessage")?,
        on_error_message: args.str_opt("onErrorMessage")?,
        conditions,
    })
}

fn handling(
    args: &ArgReader<'_>,
    name: &str,
    changeset: &str,
) -> Result<ErrorHandling, BuildError> {
    match args.str_opt(name)? {
        None => Ok(ErrorHandling::default()),
        Some(text) => ErrorHandling::from_name(&text).ok_or_else(|| BuildError::TypeCoercion {
            changeset: changeset.to_string(),
            change: "preConditions".to_string(),
            property: name.to_string(),
            value: text,
            expected: "one of HALT, CONTINUE, MARK_RAN, WARN",
        }),
    }
}

fn build_condition_list(
    block: &Block,
    changelog: &Changelog,
    changeset: &str,
) -> Result<Vec<Precondition>, BuildError> {
    let mut conditions = Vec::new();
    for item in &block.items {
        match item {
            BlockItem::Call(call) => {
                conditions.push(build_condition(call, changelog, changeset)?);
            }
            BlockItem::Text(_) => {
                return Err(BuildError::Misplaced {
                    changeset: changeset.to_string(),
                    item: "raw text".to_string(),
                    context: "inside a precondition block".to_string(),
                });
            }
        }
    }
    Ok(conditions)
}

fn build_condition(
    call: &Invocation,
    changelog: &Changelog,
    changeset: &str,
) -> Result<Precondition, BuildError> {
    let nested = || match call.block.as_ref() {
        Some(block) => build_condition_list(block, changelog, changeset),
        None => Ok(Vec::new()),
    };

    match call.name.as_str() {
        "and" => Ok(Precondition::And(nested()?)),
        "or" => Ok(Precondition::Or(nested()?)),
        "not" => Ok(Precondition::Not(nested()?)),
        "dbms" => {
            let args = ArgReader::new(call, changelog, changeset, "dbms");
            args.check(&["type"])?;
            Ok(Precondition::Dbms {
                db_type: args.str_req("type")?,
            })
        }
        "runningAs" => {
            let args = ArgReader::new(call, changelog, changeset, "runningAs");
            args.check(&["username"])?;
            Ok(Precondition::RunningAs {
                username: args.str_req("username")?,
            })
        }
        "changeSetExecuted" => {
            let args = ArgReader::new(call, changelog, changeset, "changeSetExecuted");
            args.check(&["id", "author", "changeLogFile"])?;
            Ok(Precondition::ChangeSetExecuted {
                id: args.str_req("id")?,
                author: args.str_req("author")?,
                changelog_file: args.str_opt("changeLogFile")?,
            })
        }
        "tableExists" => {
            let args = ArgReader::new(call, changelog, changeset, "tableExists");
            args.check(&["catalogName", "schemaName", "tableName"])?;
            Ok(Precondition::TableExists {
                catalog_name: args.str_opt("catalogName")?,
                schema_name: args.str_opt("schemaName")?,
                table_name: args.str_req("tableName")?,
            })
        }
        "columnExists" => {
            let args = ArgReader::new(call, changelog, changeset, "columnExists");
            args.check(&["catalogName", "schemaName", "tableName", "columnName"])?;
            Ok(Precondition::ColumnExists {
                catalog_name: args.str_opt("catalogName")?,
                schema_name: args.str_opt("schemaName")?,
                table_name: args.str_req("tableName")?,
                column_name: args.str_req("columnName")?,
            })
        }
        "viewExists" => {
            let args = ArgReader::new(call, changelog, changeset, "viewExists");
            args.check(&["catalogName", "schemaName", "viewName"])?;
            Ok(Precondition::ViewExists {
                catalog_name: args.str_opt("catalogName")?,
                schema_name: args.str_opt("schemaName")?,
                view_name: args.str_req("viewName")?,
            })
        }
        "indexExists" => {
            let args = ArgReader::new(call, changelog, changeset, "indexExists");
            args.check(&[
                "catalogName",
                "schemaName",
                "tableName",
                "indexName",
                "columnNames",
            ])?;
            Ok(Precondition::IndexExists {
                catalog_name: args.str_opt("catalogName")?,
                schema_name: args.str_opt("schemaName")?,
                table_name: args.str_opt("tableName")?,
                index_name: args.str_opt("indexName")?,
                column_names: args.str_opt("columnNames")?,
            })
        }
        "sequenceExists" => {
            let args = ArgReader::new(call, changelog, changeset, "sequenceExists");
            args.check(&["catalogName", "schemaName", "sequenceName"])?;
            Ok(Precondition::SequenceExists {
                catalog_name: args.str_opt("catalogName")?,
                schema_name: args.str_opt("schemaName")?,
                sequence_name: args.str_req("sequenceName")?,
            })
        }
        "foreignKeyConstraintExists" => {
            let args = ArgReader::new(call, changelog, changeset, "foreignKeyConstraintExists");
            args.check(&["schemaName", "foreignKeyTableName", "foreignKeyName"])?;
            Ok(Precondition::ForeignKeyConstraintExists {
                schema_name: args.str_opt("schemaName")?,
                foreign_key_table_name: args.str_opt("foreignKeyTableName")?,
                foreign_key_name: args.str_req("foreignKeyName")?,
            })
        }
        "primaryKeyExists" => {
            let args = ArgReader::new(call, changelog, changeset, "primaryKeyExists");
            args.check(&["schemaName", "tableName", "primaryKeyName"])?;
            Ok(Precondition::PrimaryKeyExists {
                schema_name: args.str_opt("schemaName")?,
                table_name: args.str_opt("tableName")?,
                primary_key_name: args.str_opt("primaryKeyName")?,
            })
        }
        "sqlCheck" => {
            let args = ArgReader::new(call, changelog, changeset, "sqlCheck");
            args.check(&["expectedResult"])?;
            let sql = call
                .block
                .as_ref()
                .and_then(Block::text)
                .map(|text| changelog.expand(&text))
                .ok_or_else(|| BuildError::MissingProperty {
                    changeset: changeset.to_string(),
                    change: "sqlCheck".to_string(),
                    property: "sql body".to_string(),
                })?;
            Ok(Precondition::SqlCheck {
                expected_result: args.str_req("expectedResult")?,
                sql,
            })
        }
        other => Err(BuildError::UnknownChange {
            changeset: changeset.to_string(),
            name: other.to_string(),
            suggestion: suggestion_for(other, LEAF_NAMES.iter().copied()),
        }),
    }
}
