//! The change model: everything the builder produces and the external
//! migration engine consumes.

pub mod change;
pub mod changeset;
pub mod column;
pub mod kind;
pub mod precondition;
pub mod value;
pub mod visitor;

pub use self::change::{Change, Param};
pub use self::changeset::{ChangeSet, RollbackSource};
pub use self::column::{ColumnConfig, ColumnValue, ConstraintsConfig, LoadColumnConfig, LoadType};
pub use self::kind::ChangeKind;
pub use self::precondition::{ErrorHandling, Precondition, Preconditions};
pub use self::value::{Number, Value};
pub use self::visitor::{SqlVisitor, SqlVisitorKind};
