use serde::{Deserialize, Serialize};

/// One SQL rewrite applied by the engine to generated statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SqlVisitorKind {
    /// Insert text before the statement
    Prepend { value: String },
    /// Insert text after the statement
    Append { value: String },
    /// Literal search-and-replace
    Replace { replace: String, with: String },
    /// Regular-expression search-and-replace
    RegExpReplace { replace: String, with: String },
}

/// A `modifySql` entry: one rewrite plus its scoping filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlVisitor {
    pub kind: SqlVisitorKind,
    /// Database types this rewrite applies to; empty = all
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dbms: Vec<String>,
    /// Whether the rewrite also applies to rollback statements
    #[serde(default)]
    pub apply_to_rollback: bool,
}
