//! The changelog context threaded through every build: substitution
//! variables, the registry of already-built changesets, and resource
//! access for file-backed changes.

use std::io;
use std::path::{Path, PathBuf};

use crate::ast::ChangeSet;
use crate::substitution::SubstitutionTable;

/// Opens named resources for file-backed changes (`sqlFile`, procedure
/// bodies, load-data files). A trait seam so tests can fake resources.
pub trait ResourceAccessor {
    /// Read the full content of a named resource.
    fn read_to_string(&self, path: &str) -> io::Result<String>;

    /// Resolve a path to its canonical absolute form.
    fn canonical_path(&self, path: &str) -> io::Result<String>;
}

/// Filesystem-backed resource access rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileSystemAccessor {
    root: PathBuf,
}

impl FileSystemAccessor {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl ResourceAccessor for FileSystemAccessor {
    fn read_to_string(&self, path: &str) -> io::Result<String> {
        std::fs::read_to_string(self.resolve(path))
    }

    fn canonical_path(&self, path: &str) -> io::Result<String> {
        let canonical = std::fs::canonicalize(self.resolve(path))?;
        Ok(canonical.to_string_lossy().into_owned())
    }
}

/// One changelog document: the ordered changesets built so far, the
/// run-wide substitution table, and the document's physical path.
///
/// The builder holds this by shared reference only; nothing here mutates
/// during a changeset build.
#[derive(Debug, Clone, Default)]
pub struct Changelog {
    /// Physical path of the changelog document
    pub physical_path: String,
    /// Substitution variables for the whole run
    pub parameters: SubstitutionTable,
    changesets: Vec<ChangeSet>,
}

impl Changelog {
    pub fn new(physical_path: impl Into<String>) -> Self {
        Self {
            physical_path: physical_path.into(),
            parameters: SubstitutionTable::new(),
            changesets: Vec::new(),
        }
    }

    pub fn with_parameters(mut self, parameters: SubstitutionTable) -> Self {
        self.parameters = parameters;
        self
    }

    /// Register a fully built changeset so later changesets can reference
    /// it (rollback reference form).
    pub fn add_changeset(&mut self, changeset: ChangeSet) {
        self.changesets.push(changeset);
    }

    pub fn changesets(&self) -> &[ChangeSet] {
        &self.changesets
    }

    /// Look up a prior changeset by author and id. `path` defaults to
    /// this changelog's own path when not given.
    pub fn find_changeset(
        &self,
        author: &str,
        id: &str,
        path: Option<&str>,
    ) -> Option<&ChangeSet> {
        let path = path.unwrap_or(&self.physical_path);
        self.changesets
            .iter()
            .find(|cs| cs.id == id && cs.author == author && cs.file_path == path)
    }

    /// Expand substitution variables in `text`.
    pub fn expand(&self, text: &str) -> String {
        self.parameters.expand(text)
    }

    /// Directory of the changelog document, for
    /// `relativeToChangelogFile` resolution.
    pub fn directory(&self) -> &Path {
        Path::new(&self.physical_path)
            .parent()
            .unwrap_or_else(|| Path::new(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_changeset_matches_path() {
        let mut log = Changelog::new("db/changelog.xml");
        log.add_changeset(ChangeSet::new("1", "alice", "db/changelog.xml"));
        log.add_changeset(ChangeSet::new("1", "alice", "db/other.xml"));

        assert!(log.find_changeset("alice", "1", None).is_some());
        assert!(log.find_changeset("alice", "1", Some("db/other.xml")).is_some());
        assert!(log.find_changeset("alice", "2", None).is_none());
        assert!(log.find_changeset("bob", "1", None).is_none());
    }

    #[test]
    fn test_directory() {
        let log = Changelog::new("db/migrations/changelog.xml");
        assert_eq!(log.directory(), Path::new("db/migrations"));
    }
}
