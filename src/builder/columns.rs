//! Column collection for table-shaped changes: `column` entries, their
//! nested `constraints`, the load-data column form, and `where` clauses.

use crate::ast::{
    Change, ColumnConfig, ColumnValue, ConstraintsConfig, LoadColumnConfig, LoadType,
};
use crate::builder::params::ArgReader;
use crate::builder::schema::{ColumnBlock, Shape};
use crate::changelog::Changelog;
use crate::error::BuildError;
use crate::parser::{Block, BlockItem, Invocation};

const COLUMN_ATTRS: &[&str] = &[
    "name",
    "type",
    "value",
    "valueNumeric",
    "valueBoolean",
    "valueDate",
    "valueComputed",
    "defaultValue",
    "defaultValueNumeric",
    "defaultValueBoolean",
    "defaultValueDate",
    "defaultValueComputed",
    "defaultValueSequenceNext",
    "autoIncrement",
    "startWith",
    "incrementBy",
    "remarks",
    "descending",
    "position",
    "afterColumn",
    "beforeColumn",
];

const CONSTRAINT_ATTRS: &[&str] = &[
    "nullable",
    "notNullConstraintName",
    "primaryKey",
    "primaryKeyName",
    "primaryKeyTablespace",
    "unique",
    "uniqueConstraintName",
    "references",
    "referencedTableName",
    "referencedColumnNames",
    "foreignKeyName",
    "deleteCascade",
    "deferrable",
    "initiallyDeferred",
    "checkConstraint",
    "validateNullable",
    "validateUnique",
    "validatePrimaryKey",
    "validateForeignKey",
];

const LOAD_COLUMN_ATTRS: &[&str] = &["name", "index", "header", "type", "defaultValue"];

/// Process a table-shaped change's block: ordered columns plus an
/// optional `where` clause, everything else rejected.
pub(crate) fn collect_column_block(
    change: &mut Change,
    block: &Block,
    shape: Shape,
    changelog: &Changelog,
    changeset: &str,
) -> Result<(), BuildError> {
    for item in &block.items {
        let call = match item {
            BlockItem::Call(call) => call,
            BlockItem::Text(_) => {
                return Err(BuildError::Misplaced {
                    changeset: changeset.to_string(),
                    item: "raw text".to_string(),
                    context: format!("inside a '{}' block", change.kind),
                });
            }
        };

        match call.name.as_str() {
            "column" if shape.columns == ColumnBlock::Standard => {
                change
                    .columns
                    .push(build_column(call, changelog, changeset)?);
            }
            "column" if shape.columns == ColumnBlock::Load => {
                change
                    .load_columns
                    .push(build_load_column(call, changelog, changeset)?);
            }
            "where" if shape.where_clause => {
                change.where_clause = where_text(call, changelog, changeset)?;
            }
            other => {
                return Err(BuildError::Misplaced {
                    changeset: changeset.to_string(),
                    item: format!("'{}'", other),
                    context: format!("inside a '{}' block", change.kind),
                });
            }
        }
    }

    Ok(())
}

fn where_text(
    call: &Invocation,
    changelog: &Changelog,
    changeset: &str,
) -> Result<Option<String>, BuildError> {
    match call.positional() {
        Some(value) if value.is_null() => Ok(None),
        Some(value) => Ok(Some(changelog.expand(&value.to_string()))),
        None => Err(BuildError::MissingProperty {
            changeset: changeset.to_string(),
            change: "where".to_string(),
            property: "clause".to_string(),
        }),
    }
}

/// Build one schema/data column definition.
pub(crate) fn build_column(
    call: &Invocation,
    changelog: &Changelog,
    changeset: &str,
) -> Result<ColumnConfig, BuildError> {
    let args = ArgReader::new(call, changelog, changeset, "column");
    args.check(COLUMN_ATTRS)?;

    let mut column = ColumnConfig {
        name: args.str_opt("name")?,
        column_type: args.str_opt("type")?,
        auto_increment: args.bool_opt("autoIncrement")?,
        start_with: args.int_opt("startWith")?,
        increment_by: args.int_opt("incrementBy")?,
        remarks: args.str_opt("remarks")?,
        descending: args.bool_opt("descending")?,
        position: args.int_opt("position")?,
        after_column: args.str_opt("afterColumn")?,
        before_column: args.str_opt("beforeColumn")?,
        ..ColumnConfig::default()
    };

    column.value = column_value(&args, ValueAttrs::VALUE)?;
    column.default_value = column_value(&args, ValueAttrs::DEFAULT)?;

    if let Some(constraints) = call.block.as_ref() {
        for nested in constraints.calls() {
            if nested.name != "constraints" {
                return Err(BuildError::Misplaced {
                    changeset: changeset.to_string(),
                    item: format!("'{}'", nested.name),
                    context: "inside a 'column' block".to_string(),
                });
            }
            column.constraints = Some(build_constraints(nested, changelog, changeset)?);
        }
    }

    Ok(column)
}

/// The attribute names for one typed-value family (value vs default).
struct ValueAttrs {
    text: &'static str,
    numeric: &'static str,
    boolean: &'static str,
    date: &'static str,
    computed: &'static str,
    sequence_next: Option<&'static str>,
}

impl ValueAttrs {
    const VALUE: ValueAttrs = ValueAttrs {
        text: "value",
        numeric: "valueNumeric",
        boolean: "valueBoolean",
        date: "valueDate",
        computed: "valueComputed",
        sequence_next: None,
    };

    const DEFAULT: ValueAttrs = ValueAttrs {
        text: "defaultValue",
        numeric: "defaultValueNumeric",
        boolean: "defaultValueBoolean",
        date: "defaultValueDate",
        computed: "defaultValueComputed",
        sequence_next: Some("defaultValueSequenceNext"),
    };
}

/// Resolve the typed value forms; when several are given the most
/// specific typed form wins over the plain text form.
fn column_value(args: &ArgReader<'_>, attrs: ValueAttrs) -> Result<Option<ColumnValue>, BuildError> {
    if let Some(n) = args.number_opt(attrs.numeric)? {
        return Ok(Some(ColumnValue::Numeric(n)));
    }
    if let Some(b) = args.bool_opt(attrs.boolean)? {
        return Ok(Some(ColumnValue::Boolean(b)));
    }
    if let Some(d) = args.date_opt(attrs.date)? {
        return Ok(Some(ColumnValue::Date(d)));
    }
    if let Some(expr) = args.str_opt(attrs.computed)? {
        return Ok(Some(ColumnValue::Computed(expr)));
    }
    if let Some(seq) = attrs.sequence_next {
        if let Some(name) = args.str_opt(seq)? {
            return Ok(Some(ColumnValue::SequenceNext(name)));
        }
    }
    if let Some(text) = args.str_opt(attrs.text)? {
        return Ok(Some(ColumnValue::Text(text)));
    }
    Ok(None)
}

/// Build the constraints clause nested under a column.
pub(crate) fn build_constraints(
    call: &Invocation,
    changelog: &Changelog,
    changeset: &str,
) -> Result<ConstraintsConfig, BuildError> {
    let args = ArgReader::new(call, changelog, changeset, "constraints");
    args.check(CONSTRAINT_ATTRS)?;

    Ok(ConstraintsConfig {
        nullable: args.bool_opt("nullable")?,
        not_null_constraint_name: args.str_opt("notNullConstraintName")?,
        primary_key: args.bool_opt("primaryKey")?,
        primary_key_name: args.str_opt("primaryKeyName")?,
        primary_key_tablespace: args.str_opt("primaryKeyTablespace")?,
        unique: args.bool_opt("unique")?,
        unique_constraint_name: args.str_opt("uniqueConstraintName")?,
        references: args.str_opt("references")?,
        referenced_table_name: args.str_opt("referencedTableName")?,
        referenced_column_names: args.str_opt("referencedColumnNames")?,
        foreign_key_name: args.str_opt("foreignKeyName")?,
        delete_cascade: args.bool_opt("deleteCascade")?,
        deferrable: args.bool_opt("deferrable")?,
        initially_deferred: args.bool_opt("initiallyDeferred")?,
        check_constraint: args.str_opt("checkConstraint")?,
        validate_nullable: args.bool_opt("validateNullable")?,
        validate_unique: args.bool_opt("validateUnique")?,
        validate_primary_key: args.bool_opt("validatePrimaryKey")?,
        validate_foreign_key: args.bool_opt("validateForeignKey")?,
    })
}

/// Build one load-data column mapping.
pub(crate) fn build_load_column(
    call: &Invocation,
    changelog: &Changelog,
    changeset: &str,
) -> Result<LoadColumnConfig, BuildError> {
    let args = ArgReader::new(call, changelog, changeset, "column");
    args.check(LOAD_COLUMN_ATTRS)?;

    let load_type = match args.str_opt("type")? {
        None => None,
        Some(name) => Some(LoadType::from_name(&name).ok_or_else(|| {
            BuildError::TypeCoercion {
                changeset: changeset.to_string(),
                change: "column".to_string(),
                property: "type".to_string(),
                value: name,
                expected: "load type",
            }
        })?),
    };

    Ok(LoadColumnConfig {
        name: args.str_opt("name")?,
        index: args.int_opt("index")?,
        header: args.str_opt("header")?,
        load_type,
        default_value: args.str_opt("defaultValue")?,
    })
}
