mod columns;
mod directives;

use crate::ast::ChangeSet;
use crate::builder::ChangeSetBuilder;
use crate::changelog::{Changelog, FileSystemAccessor};
use crate::error::BuildError;

/// Build a changeset body against an empty changelog.
pub(crate) fn build(script: &str) -> Result<ChangeSet, BuildError> {
    build_with(Changelog::new("db/changelog.xml"), script)
}

/// Build a changeset body against the given changelog.
pub(crate) fn build_with(changelog: Changelog, script: &str) -> Result<ChangeSet, BuildError> {
    let mut changeset = ChangeSet::new("1", "alice", "db/changelog.xml");
    let resources = FileSystemAccessor::new(".");
    ChangeSetBuilder::new(&mut changeset, &changelog, &resources).run(script)?;
    Ok(changeset)
}
