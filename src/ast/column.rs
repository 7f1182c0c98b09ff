use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::ast::Number;

/// A typed column value (insert/update values and default values).
///
/// The script distinguishes the forms by attribute name (`value`,
/// `valueNumeric`, `valueBoolean`, `valueDate`, `valueComputed`); the
/// external engine needs the distinction to quote literals correctly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnValue {
    /// Plain text, quoted by the engine
    Text(String),
    /// Numeric literal, emitted unquoted
    Numeric(Number),
    /// Boolean literal
    Boolean(bool),
    /// Date or timestamp literal
    Date(NaiveDateTime),
    /// A database expression emitted verbatim (e.g. `now()`)
    Computed(String),
    /// Next value of a named sequence (default values only)
    SequenceNext(String),
}

/// Constraint clauses nested under a column definition.
///
/// All fields optional; absent means "not specified" rather than false,
/// matching the standard SQL defaults the engine applies (a column with no
/// constraints block is nullable, non-unique, not a key).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_null_constraint_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key_tablespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_constraint_name: Option<String>,
    /// Shorthand foreign key target, `table(column)` form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced_table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced_column_names: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_key_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_cascade: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deferrable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initially_deferred: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_constraint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate_nullable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate_unique: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate_primary_key: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate_foreign_key: Option<bool>,
}

/// One column definition inside a table-shaped change.
///
/// Declaration order in the script is preserved in the owning change's
/// column list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ColumnValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<ColumnValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_increment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_with: Option<i128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub increment_by: Option<i128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descending: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<ConstraintsConfig>,
}

/// How a CSV cell is interpreted by the load-data changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoadType {
    String,
    Numeric,
    Date,
    Boolean,
    Blob,
    Clob,
    Computed,
    Sequence,
    Uuid,
    /// Column is present in the file but not loaded
    Skip,
}

impl LoadType {
    /// Case-insensitive lookup of a load-type annotation.
    pub fn from_name(name: &str) -> Option<LoadType> {
        match name.to_ascii_uppercase().as_str() {
            "STRING" => Some(LoadType::String),
            "NUMERIC" => Some(LoadType::Numeric),
            "DATE" => Some(LoadType::Date),
            "BOOLEAN" => Some(LoadType::Boolean),
            "BLOB" => Some(LoadType::Blob),
            "CLOB" => Some(LoadType::Clob),
            "COMPUTED" => Some(LoadType::Computed),
            "SEQUENCE" => Some(LoadType::Sequence),
            "UUID" => Some(LoadType::Uuid),
            "SKIP" => Some(LoadType::Skip),
            _ => None,
        }
    }
}

/// One column mapping inside a `loadData` / `loadUpdateData` block.
///
/// Distinct from [`ColumnConfig`]: load columns describe how file cells map
/// onto table columns, not a column's schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadColumnConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// 1-based position of the source cell in the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i128>,
    /// Header name of the source cell in the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub load_type: Option<LoadType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}
