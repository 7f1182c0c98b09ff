use serde::{Deserialize, Serialize};

/// The change kind (one schema or data operation within a changeset).
///
/// Each kind maps to one operation name in the script DSL; the DSL name is
/// the camelCase form returned by [`ChangeKind::name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeKind {
    // Column-level structure
    AddColumn,
    RenameColumn,
    ModifyDataType,
    DropColumn,
    MergeColumns,
    // Table-level structure
    CreateTable,
    RenameTable,
    DropTable,
    // Views
    CreateView,
    RenameView,
    DropView,
    // Stored logic
    CreateProcedure,
    AddLookupTable,
    // Constraints
    AddNotNullConstraint,
    DropNotNullConstraint,
    AddForeignKeyConstraint,
    DropForeignKeyConstraint,
    DropAllForeignKeyConstraints,
    AddPrimaryKey,
    DropPrimaryKey,
    AddUniqueConstraint,
    DropUniqueConstraint,
    // Sequences
    CreateSequence,
    DropSequence,
    AlterSequence,
    // Column attributes
    AddAutoIncrement,
    AddDefaultValue,
    DropDefaultValue,
    // Indexes
    CreateIndex,
    DropIndex,
    // Data
    Insert,
    LoadData,
    LoadUpdateData,
    Update,
    Delete,
    // Control
    TagDatabase,
    Stop,
    Output,
    ExecuteCommand,
    // Raw SQL
    RawSql,
    SqlFile,
    // Escape hatches
    CustomChange,
    Empty,
}

/// Every kind paired with its DSL operation name, in declaration order.
const KIND_NAMES: &[(ChangeKind, &str)] = &[
    (ChangeKind::AddColumn, "addColumn"),
    (ChangeKind::RenameColumn, "renameColumn"),
    (ChangeKind::ModifyDataType, "modifyDataType"),
    (ChangeKind::DropColumn, "dropColumn"),
    (ChangeKind::MergeColumns, "mergeColumns"),
    (ChangeKind::CreateTable, "createTable"),
    (ChangeKind::RenameTable, "renameTable"),
    (ChangeKind::DropTable, "dropTable"),
    (ChangeKind::CreateView, "createView"),
    (ChangeKind::RenameView, "renameView"),
    (ChangeKind::DropView, "dropView"),
    (ChangeKind::CreateProcedure, "createProcedure"),
    (ChangeKind::AddLookupTable, "addLookupTable"),
    (ChangeKind::AddNotNullConstraint, "addNotNullConstraint"),
    (ChangeKind::DropNotNullConstraint, "dropNotNullConstraint"),
    (ChangeKind::AddForeignKeyConstraint, "addForeignKeyConstraint"),
    (ChangeKind::DropForeignKeyConstraint, "dropForeignKeyConstraint"),
    (
        ChangeKind::DropAllForeignKeyConstraints,
        "dropAllForeignKeyConstraints",
    ),
    (ChangeKind::AddPrimaryKey, "addPrimaryKey"),
    (ChangeKind::DropPrimaryKey, "dropPrimaryKey"),
    (ChangeKind::AddUniqueConstraint, "addUniqueConstraint"),
    (ChangeKind::DropUniqueConstraint, "dropUniqueConstraint"),
    (ChangeKind::CreateSequence, "createSequence"),
    (ChangeKind::DropSequence, "dropSequence"),
    (ChangeKind::AlterSequence, "alterSequence"),
    (ChangeKind::AddAutoIncrement, "addAutoIncrement"),
    (ChangeKind::AddDefaultValue, "addDefaultValue"),
    (ChangeKind::DropDefaultValue, "dropDefaultValue"),
    (ChangeKind::CreateIndex, "createIndex"),
    (ChangeKind::DropIndex, "dropIndex"),
    (ChangeKind::Insert, "insert"),
    (ChangeKind::LoadData, "loadData"),
    (ChangeKind::LoadUpdateData, "loadUpdateData"),
    (ChangeKind::Update, "update"),
    (ChangeKind::Delete, "delete"),
    (ChangeKind::TagDatabase, "tagDatabase"),
    (ChangeKind::Stop, "stop"),
    (ChangeKind::Output, "output"),
    (ChangeKind::ExecuteCommand, "executeCommand"),
    (ChangeKind::RawSql, "sql"),
    (ChangeKind::SqlFile, "sqlFile"),
    (ChangeKind::CustomChange, "customChange"),
    (ChangeKind::Empty, "empty"),
];

impl ChangeKind {
    /// The operation name used in the script DSL.
    pub fn name(&self) -> &'static str {
        KIND_NAMES
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, name)| *name)
            .unwrap_or("unknown")
    }

    /// Resolve a DSL operation name to its kind.
    pub fn from_name(name: &str) -> Option<ChangeKind> {
        KIND_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(kind, _)| *kind)
    }

    /// All DSL operation names, for suggestion lookups.
    pub fn names() -> impl Iterator<Item = &'static str> {
        KIND_NAMES.iter().map(|(_, name)| *name)
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
