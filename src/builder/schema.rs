//! Per-kind attribute schemas.
//!
//! Every change kind carries a fixed whitelist of named attributes with a
//! semantic type, checked before a change is constructed. The tables below
//! are the single source of truth for what each DSL operation accepts.

use crate::ast::ChangeKind;

/// Semantic type of a whitelisted attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrType {
    Str,
    Bool,
    Int,
}

impl AttrType {
    pub fn describe(&self) -> &'static str {
        match self {
            AttrType::Str => "string",
            AttrType::Bool => "boolean",
            AttrType::Int => "integer",
        }
    }
}

/// One whitelisted attribute on a change kind.
#[derive(Debug, Clone, Copy)]
pub struct AttrSpec {
    pub name: &'static str,
    pub ty: AttrType,
}

const fn s(name: &'static str) -> AttrSpec {
    AttrSpec {
        name,
        ty: AttrType::Str,
    }
}

const fn b(name: &'static str) -> AttrSpec {
    AttrSpec {
        name,
        ty: AttrType::Bool,
    }
}

const fn i(name: &'static str) -> AttrSpec {
    AttrSpec {
        name,
        ty: AttrType::Int,
    }
}

const ADD_COLUMN: &[AttrSpec] = &[s("catalogName"), s("schemaName"), s("tableName")];

const RENAME_COLUMN: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("tableName"),
    s("oldColumnName"),
    s("newColumnName"),
    s("columnDataType"),
    s("remarks"),
];

const MODIFY_DATA_TYPE: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("tableName"),
    s("columnName"),
    s("newDataType"),
];

const DROP_COLUMN: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("tableName"),
    s("columnName"),
];

const MERGE_COLUMNS: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("tableName"),
    s("column1Name"),
    s("joinString"),
    s("column2Name"),
    s("finalColumnName"),
    s("finalColumnType"),
];

const CREATE_TABLE: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("tableName"),
    s("tablespace"),
    s("remarks"),
    b("ifNotExists"),
];

const RENAME_TABLE: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("oldTableName"),
    s("newTableName"),
];

const DROP_TABLE: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("tableName"),
    b("cascadeConstraints"),
];

const CREATE_VIEW: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("viewName"),
    b("replaceIfExists"),
    b("fullDefinition"),
    s("remarks"),
];

const RENAME_VIEW: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("oldViewName"),
    s("newViewName"),
];

const DROP_VIEW: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("viewName"),
    b("ifExists"),
];

const CREATE_PROCEDURE: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("procedureName"),
    s("comments"),
    s("dbms"),
    s("encoding"),
    s("path"),
    b("relativeToChangelogFile"),
    b("replaceIfExists"),
];

const ADD_LOOKUP_TABLE: &[AttrSpec] = &[
    s("existingTableCatalogName"),
    s("existingTableSchemaName"),
    s("existingTableName"),
    s("existingColumnName"),
    s("newTableCatalogName"),
    s("newTableSchemaName"),
    s("newTableName"),
    s("newColumnName"),
    s("newColumnDataType"),
    s("constraintName"),
];

const ADD_NOT_NULL_CONSTRAINT: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("tableName"),
    s("columnName"),
    s("defaultNullValue"),
    s("columnDataType"),
    s("constraintName"),
    b("validate"),
];

const DROP_NOT_NULL_CONSTRAINT: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("tableName"),
    s("columnName"),
    s("columnDataType"),
];

const ADD_FOREIGN_KEY_CONSTRAINT: &[AttrSpec] = &[
    s("constraintName"),
    s("baseTableCatalogName"),
    s("baseTableSchemaName"),
    s("baseTableName"),
    s("baseColumnNames"),
    s("referencedTableCatalogName"),
    s("referencedTableSchemaName"),
    s("referencedTableName"),
    s("referencedColumnNames"),
    b("deferrable"),
    b("initiallyDeferred"),
    s("onDelete"),
    s("onUpdate"),
    b("validate"),
];

const DROP_FOREIGN_KEY_CONSTRAINT: &[AttrSpec] = &[
    s("baseTableCatalogName"),
    s("baseTableSchemaName"),
    s("baseTableName"),
    s("constraintName"),
];

const DROP_ALL_FOREIGN_KEY_CONSTRAINTS: &[AttrSpec] = &[
    s("baseTableCatalogName"),
    s("baseTableSchemaName"),
    s("baseTableName"),
];

const ADD_PRIMARY_KEY: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("tableName"),
    s("columnNames"),
    s("constraintName"),
    s("tablespace"),
    b("clustered"),
    s("forIndexName"),
    b("validate"),
];

const DROP_PRIMARY_KEY: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("tableName"),
    s("constraintName"),
    b("dropIndex"),
];

const ADD_UNIQUE_CONSTRAINT: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("tableName"),
    s("columnNames"),
    s("constraintName"),
    s("tablespace"),
    b("deferrable"),
    b("initiallyDeferred"),
    b("disabled"),
    s("forIndexName"),
    b("validate"),
];

const DROP_UNIQUE_CONSTRAINT: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("tableName"),
    s("constraintName"),
    s("uniqueColumns"),
];

const CREATE_SEQUENCE: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("sequenceName"),
    s("dataType"),
    i("startValue"),
    i("incrementBy"),
    i("minValue"),
    i("maxValue"),
    b("ordered"),
    i("cacheSize"),
    b("cycle"),
];

const DROP_SEQUENCE: &[AttrSpec] = &[s("catalogName"), s("schemaName"), s("sequenceName")];

const ALTER_SEQUENCE: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("sequenceName"),
    i("incrementBy"),
    i("minValue"),
    i("maxValue"),
    b("ordered"),
    i("cacheSize"),
    b("cycle"),
];

const ADD_AUTO_INCREMENT: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("tableName"),
    s("columnName"),
    s("columnDataType"),
    i("startWith"),
    i("incrementBy"),
];

const ADD_DEFAULT_VALUE: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("tableName"),
    s("columnName"),
    s("columnDataType"),
    s("defaultValue"),
    s("defaultValueNumeric"),
    b("defaultValueBoolean"),
    s("defaultValueDate"),
    s("defaultValueComputed"),
    s("defaultValueSequenceNext"),
];

const DROP_DEFAULT_VALUE: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("tableName"),
    s("columnName"),
    s("columnDataType"),
];

const CREATE_INDEX: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("tableName"),
    s("indexName"),
    b("unique"),
    s("tablespace"),
    s("associatedWith"),
    b("clustered"),
];

const DROP_INDEX: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("tableName"),
    s("indexName"),
    s("associatedWith"),
];

const INSERT: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("tableName"),
    s("dbms"),
];

const LOAD_DATA: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("tableName"),
    s("file"),
    b("relativeToChangelogFile"),
    s("encoding"),
    s("separator"),
    s("quotchar"),
    s("commentLineStartsWith"),
    b("usePreparedStatements"),
];

const LOAD_UPDATE_DATA: &[AttrSpec] = &[
    s("catalogName"),
    s("schemaName"),
    s("tableName"),
    s("file"),
    b("relativeToChangelogFile"),
    s("encoding"),
    s("separator"),
    s("quotchar"),
    s("commentLineStartsWith"),
    b("usePreparedStatements"),
    s("primaryKey"),
    b("onlyUpdate"),
];

const UPDATE: &[AttrSpec] = &[s("catalogName"), s("schemaName"), s("tableName")];

const DELETE: &[AttrSpec] = &[s("catalogName"), s("schemaName"), s("tableName")];

const TAG_DATABASE: &[AttrSpec] = &[s("tag")];

const STOP: &[AttrSpec] = &[s("message")];

const OUTPUT: &[AttrSpec] = &[s("message"), s("target")];

const EXECUTE_COMMAND: &[AttrSpec] = &[s("executable"), s("os"), i("timeout")];

const RAW_SQL: &[AttrSpec] = &[
    b("stripComments"),
    b("splitStatements"),
    s("endDelimiter"),
    s("dbms"),
    s("comment"),
];

const SQL_FILE: &[AttrSpec] = &[
    s("path"),
    b("relativeToChangelogFile"),
    s("encoding"),
    b("stripComments"),
    b("splitStatements"),
    s("endDelimiter"),
    s("dbms"),
];

const CUSTOM_CHANGE: &[AttrSpec] = &[s("class")];

const EMPTY: &[AttrSpec] = &[];

/// The attribute whitelist for a change kind.
pub fn attributes(kind: ChangeKind) -> &'static [AttrSpec] {
    match kind {
        ChangeKind::AddColumn => ADD_COLUMN,
        ChangeKind::RenameColumn => RENAME_COLUMN,
        ChangeKind::ModifyDataType => MODIFY_DATA_TYPE,
        ChangeKind::DropColumn => DROP_COLUMN,
        ChangeKind::MergeColumns => MERGE_COLUMNS,
        ChangeKind::CreateTable => CREATE_TABLE,
        ChangeKind::RenameTable => RENAME_TABLE,
        ChangeKind::DropTable => DROP_TABLE,
        ChangeKind::CreateView => CREATE_VIEW,
        ChangeKind::RenameView => RENAME_VIEW,
        ChangeKind::DropView => DROP_VIEW,
        ChangeKind::CreateProcedure => CREATE_PROCEDURE,
        ChangeKind::AddLookupTable => ADD_LOOKUP_TABLE,
        ChangeKind::AddNotNullConstraint => ADD_NOT_NULL_CONSTRAINT,
        ChangeKind::DropNotNullConstraint => DROP_NOT_NULL_CONSTRAINT,
        ChangeKind::AddForeignKeyConstraint => ADD_FOREIGN_KEY_CONSTRAINT,
        ChangeKind::DropForeignKeyConstraint => DROP_FOREIGN_KEY_CONSTRAINT,
        ChangeKind::DropAllForeignKeyConstraints => DROP_ALL_FOREIGN_KEY_CONSTRAINTS,
        ChangeKind::AddPrimaryKey => ADD_PRIMARY_KEY,
        ChangeKind::DropPrimaryKey => DROP_PRIMARY_KEY,
        ChangeKind::AddUniqueConstraint => ADD_UNIQUE_CONSTRAINT,
        ChangeKind::DropUniqueConstraint => DROP_UNIQUE_CONSTRAINT,
        ChangeKind::CreateSequence => CREATE_SEQUENCE,
        ChangeKind::DropSequence => DROP_SEQUENCE,
        ChangeKind::AlterSequence => ALTER_SEQUENCE,
        ChangeKind::AddAutoIncrement => ADD_AUTO_INCREMENT,
        ChangeKind::AddDefaultValue => ADD_DEFAULT_VALUE,
        ChangeKind::DropDefaultValue => DROP_DEFAULT_VALUE,
        ChangeKind::CreateIndex => CREATE_INDEX,
        ChangeKind::DropIndex => DROP_INDEX,
        ChangeKind::Insert => INSERT,
        ChangeKind::LoadData => LOAD_DATA,
        ChangeKind::LoadUpdateData => LOAD_UPDATE_DATA,
        ChangeKind::Update => UPDATE,
        ChangeKind::Delete => DELETE,
        ChangeKind::TagDatabase => TAG_DATABASE,
        ChangeKind::Stop => STOP,
        ChangeKind::Output => OUTPUT,
        ChangeKind::ExecuteCommand => EXECUTE_COMMAND,
        ChangeKind::RawSql => RAW_SQL,
        ChangeKind::SqlFile => SQL_FILE,
        ChangeKind::CustomChange => CUSTOM_CHANGE,
        ChangeKind::Empty => EMPTY,
    }
}

/// Which nested column representation a kind's block collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnBlock {
    None,
    /// Schema/data column definitions (`column` entries)
    Standard,
    /// Load-data column mappings with load-type annotations
    Load,
}

/// Which nested payloads and shorthands a change kind accepts.
#[derive(Debug, Clone, Copy)]
pub struct Shape {
    pub columns: ColumnBlock,
    /// `where "..."` allowed inside the block
    pub where_clause: bool,
    /// Raw text items in the block form the change body
    pub body: bool,
    /// A bare positional string is the change body
    pub positional_body: bool,
    /// `arg` entries collected from the block
    pub args: bool,
    /// `param` entries collected into the custom parameter bag
    pub custom: bool,
    /// A bare positional value maps to this attribute
    pub positional_attr: Option<&'static str>,
}

const PLAIN: Shape = Shape {
    columns: ColumnBlock::None,
    where_clause: false,
    body: false,
    positional_body: false,
    args: false,
    custom: false,
    positional_attr: None,
};

/// The shape of a change kind.
pub fn shape(kind: ChangeKind) -> Shape {
    match kind {
        ChangeKind::CreateTable | ChangeKind::AddColumn | ChangeKind::CreateIndex
        | ChangeKind::Insert => Shape {
            columns: ColumnBlock::Standard,
            ..PLAIN
        },
        ChangeKind::Update => Shape {
            columns: ColumnBlock::Standard,
            where_clause: true,
            ..PLAIN
        },
        ChangeKind::Delete => Shape {
            where_clause: true,
            ..PLAIN
        },
        ChangeKind::LoadData | ChangeKind::LoadUpdateData => Shape {
            columns: ColumnBlock::Load,
            ..PLAIN
        },
        ChangeKind::RawSql => Shape {
            body: true,
            positional_body: true,
            ..PLAIN
        },
        ChangeKind::CreateView | ChangeKind::CreateProcedure => Shape {
            body: true,
            ..PLAIN
        },
        ChangeKind::ExecuteCommand => Shape {
            args: true,
            ..PLAIN
        },
        ChangeKind::CustomChange => Shape {
            custom: true,
            ..PLAIN
        },
        ChangeKind::TagDatabase => Shape {
            positional_attr: Some("tag"),
            ..PLAIN
        },
        ChangeKind::Stop => Shape {
            positional_attr: Some("message"),
            ..PLAIN
        },
        ChangeKind::Output => Shape {
            positional_attr: Some("message"),
            ..PLAIN
        },
        _ => PLAIN,
    }
}
