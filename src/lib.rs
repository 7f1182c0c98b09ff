//! changescript — parse a block-structured migration DSL into changeset
//! descriptions for an external migration engine.
//!
//! The crate is a translation layer: it turns a script like
//!
//! ```text
//! comment "add the person table"
//! createTable(tableName: "person") {
//!     column(name: "id", type: "int", autoIncrement: true) {
//!         constraints(primaryKey: true, nullable: false)
//!     }
//!     column(name: "name", type: "varchar(255)")
//! }
//! rollback {
//!     dropTable(tableName: "person")
//! }
//! ```
//!
//! into an ordered list of typed change descriptions attached to a
//! [`ChangeSet`]. Execution, SQL generation, checksums, and history
//! tracking all belong to the engine consuming the changeset — this crate
//! never touches a database.
//!
//! ```
//! use changescript::{ChangeSet, ChangeSetBuilder, Changelog, FileSystemAccessor};
//!
//! let changelog = Changelog::new("db/changelog.xml");
//! let resources = FileSystemAccessor::new(".");
//! let mut changeset = ChangeSet::new("1", "alice", "db/changelog.xml");
//!
//! ChangeSetBuilder::new(&mut changeset, &changelog, &resources)
//!     .run(r#"createTable(tableName: "person") { column(name: "id", type: "int") }"#)
//!     .unwrap();
//!
//! assert_eq!(changeset.changes.len(), 1);
//! ```

pub mod ast;
pub mod builder;
pub mod changelog;
pub mod error;
pub mod parser;
pub mod substitution;

pub use ast::{
    Change, ChangeKind, ChangeSet, ColumnConfig, ColumnValue, ConstraintsConfig, ErrorHandling,
    LoadColumnConfig, LoadType, Number, Param, Precondition, Preconditions, RollbackSource,
    SqlVisitor, SqlVisitorKind, Value,
};
pub use builder::ChangeSetBuilder;
pub use changelog::{Changelog, FileSystemAccessor, ResourceAccessor};
pub use error::{BuildError, ParseError};
pub use parser::parse;
pub use substitution::SubstitutionTable;

/// Parse and apply one changeset body in a single call.
pub fn build_changeset(
    changeset: &mut ChangeSet,
    script: &str,
    changelog: &Changelog,
    resources: &dyn ResourceAccessor,
) -> Result<(), BuildError> {
    ChangeSetBuilder::new(changeset, changelog, resources).run(script)
}
