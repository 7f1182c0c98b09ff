use serde::{Deserialize, Serialize};

use crate::ast::{Change, Preconditions, SqlVisitor};

/// Which rollback form a changeset declared. At most one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RollbackSource {
    /// No rollback declared yet
    #[default]
    None,
    /// Bare `rollback` — intentionally empty rollback
    Empty,
    /// Literal SQL rollback statement
    Sql,
    /// Nested block of rollback changes
    Block,
    /// Forward changes copied from a referenced changeset
    ChangeSetRef,
}

/// One atomic unit of migration: ordered forward changes, optional
/// rollback changes, and changeset-level metadata.
///
/// Created once per script block and populated incrementally by the
/// builder; the external migration engine owns everything after that
/// (execution, checksums, history).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    pub id: String,
    pub author: String,
    /// Logical path of the changelog that declared this changeset
    pub file_path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<Change>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rollback_changes: Vec<Change>,
    #[serde(default, skip_serializing_if = "is_default_source")]
    pub rollback_source: RollbackSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preconditions: Option<Preconditions>,
    /// Checksums accepted in addition to the computed one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub valid_checksums: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sql_visitors: Vec<SqlVisitor>,
}

fn is_default_source(source: &RollbackSource) -> bool {
    *source == RollbackSource::None
}

impl ChangeSet {
    /// Create an empty changeset owned by the changelog at `file_path`.
    pub fn new(
        id: impl Into<String>,
        author: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            file_path: file_path.into(),
            changes: Vec::new(),
            rollback_changes: Vec::new(),
            rollback_source: RollbackSource::None,
            comment: None,
            preconditions: None,
            valid_checksums: Vec::new(),
            sql_visitors: Vec::new(),
        }
    }

    /// `path::id::author` label used in error messages and logs.
    pub fn label(&self) -> String {
        format!("{}::{}::{}", self.file_path, self.id, self.author)
    }

    /// Record a checksum override, ignoring duplicates.
    pub fn add_valid_checksum(&mut self, checksum: impl Into<String>) {
        let checksum = checksum.into();
        if !self.valid_checksums.contains(&checksum) {
            self.valid_checksums.push(checksum);
        }
    }
}
