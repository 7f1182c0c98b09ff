use serde::{Deserialize, Serialize};

/// What the engine does when a precondition fails (or errors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorHandling {
    /// Abort the migration run
    #[default]
    Halt,
    /// Skip the changeset and continue
    Continue,
    /// Mark the changeset as ran without executing it
    MarkRan,
    /// Log a warning and run anyway
    Warn,
}

impl ErrorHandling {
    /// Parse the script-level handling name (`HALT`, `CONTINUE`,
    /// `MARK_RAN`, `WARN`), case-insensitive.
    pub fn from_name(name: &str) -> Option<ErrorHandling> {
        match name.to_ascii_uppercase().as_str() {
            "HALT" => Some(ErrorHandling::Halt),
            "CONTINUE" => Some(ErrorHandling::Continue),
            "MARK_RAN" => Some(ErrorHandling::MarkRan),
            "WARN" => Some(ErrorHandling::Warn),
            _ => None,
        }
    }
}

/// A precondition node: boolean combinators over leaf checks.
///
/// Built from the `preConditions` block and attached to the changeset
/// opaquely; evaluation happens in the external engine against a live
/// connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Precondition {
    And(Vec<Precondition>),
    Or(Vec<Precondition>),
    Not(Vec<Precondition>),
    /// Database type matches (comma-separated list accepted)
    Dbms {
        #[serde(rename = "type")]
        db_type: String,
    },
    RunningAs {
        username: String,
    },
    ChangeSetExecuted {
        id: String,
        author: String,
        changelog_file: Option<String>,
    },
    TableExists {
        catalog_name: Option<String>,
        schema_name: Option<String>,
        table_name: String,
    },
    ColumnExists {
        catalog_name: Option<String>,
        schema_name: Option<String>,
        table_name: String,
        column_name: String,
    },
    ViewExists {
        catalog_name: Option<String>,
        schema_name: Option<String>,
        view_name: String,
    },
    IndexExists {
        catalog_name: Option<String>,
        schema_name: Option<String>,
        table_name: Option<String>,
        index_name: Option<String>,
        column_names: Option<String>,
    },
    SequenceExists {
        catalog_name: Option<String>,
        schema_name: Option<String>,
        sequence_name: String,
    },
    ForeignKeyConstraintExists {
        schema_name: Option<String>,
        foreign_key_table_name: Option<String>,
        foreign_key_name: String,
    },
    PrimaryKeyExists {
        schema_name: Option<String>,
        table_name: Option<String>,
        primary_key_name: Option<String>,
    },
    /// A scalar query whose result must equal `expected_result`
    SqlCheck {
        expected_result: String,
        sql: String,
    },
}

/// The `preConditions` container: failure handling plus the root
/// condition list (implicitly AND-ed, as in a bare `and` block).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preconditions {
    #[serde(default)]
    pub on_fail: ErrorHandling,
    #[serde(default)]
    pub on_error: ErrorHandling,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_fail_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Precondition>,
}
