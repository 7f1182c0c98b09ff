//! Rollback recording: the four mutually exclusive rollback forms.

use tracing::debug;

use crate::ast::{Change, ChangeKind, RollbackSource, Value};
use crate::builder::params::ArgReader;
use crate::builder::{ChangeSetBuilder, Target};
use crate::error::BuildError;
use crate::parser::Invocation;

const ROLLBACK_ATTRS: &[&str] = &["changeSetId", "changeSetAuthor", "changeSetPath"];

impl ChangeSetBuilder<'_> {
    /// Handle a `rollback` directive. Exactly one rollback source may be
    /// declared per changeset; a second declaration of any form fails.
    pub(crate) fn apply_rollback(&mut self, call: &Invocation) -> Result<(), BuildError> {
        self.require_forward("rollback")?;

        if self.changeset.rollback_source != RollbackSource::None {
            return Err(BuildError::RollbackConflict {
                changeset: self.label.clone(),
            });
        }

        // Block form: re-enter the builder with the rollback target.
        if let Some(block) = call.block.as_ref() {
            self.changeset.rollback_source = RollbackSource::Block;
            self.target = Target::Rollback;
            let result = self.apply_block(block);
            self.target = Target::Forward;
            return result;
        }

        // Reference form: copy a prior changeset's forward changes.
        if call.args.iter().any(|arg| arg.name.is_some()) {
            return self.rollback_by_reference(call);
        }

        // Literal-SQL form.
        if let Some(value) = call.positional() {
            return self.rollback_sql(value);
        }

        // Bare `rollback`: an intentionally empty rollback, valid for
        // changes that are non-reversible by design.
        self.changeset.rollback_source = RollbackSource::Empty;
        debug!(changeset = %self.label, "explicit empty rollback");
        Ok(())
    }

    fn rollback_sql(&mut self, value: &Value) -> Result<(), BuildError> {
        let sql = match value {
            Value::String(s) => self.changelog.expand(s),
            other => {
                return Err(BuildError::TypeCoercion {
                    changeset: self.label.clone(),
                    change: "rollback".to_string(),
                    property: "sql".to_string(),
                    value: other.to_string(),
                    expected: "string",
                });
            }
        };

        let mut change = Change::new(ChangeKind::RawSql);
        change.body = Some(sql);
        self.changeset.rollback_source = RollbackSource::Sql;
        self.changeset.rollback_changes.push(change);
        Ok(())
    }

    fn rollback_by_reference(&mut self, call: &Invocation) -> Result<(), BuildError> {
        let args = ArgReader::new(call, self.changelog, &self.label, "rollback");
        args.check(ROLLBACK_ATTRS)?;
        let id = args.str_req("changeSetId")?;
        let author = args.str_req("changeSetAuthor")?;
        let path = args.str_opt("changeSetPath")?;

        // Lookup happens before anything is appended, so a failed
        // reference never partially populates the rollback list.
        let referenced = self
            .changelog
            .find_changeset(&author, &id, path.as_deref())
            .ok_or_else(|| BuildError::RollbackImpossible {
                changeset: self.label.clone(),
                path: path
                    .clone()
                    .unwrap_or_else(|| self.changelog.physical_path.clone()),
                author: author.clone(),
                id: id.clone(),
            })?;

        debug!(
            changeset = %self.label,
            referenced = %referenced.label(),
            count = referenced.changes.len(),
            "rollback by reference"
        );
        self.changeset.rollback_source = RollbackSource::ChangeSetRef;
        self.changeset
            .rollback_changes
            .extend(referenced.changes.iter().cloned());
        Ok(())
    }
}
