use serde::{Deserialize, Serialize};

use crate::ast::{ChangeKind, ColumnConfig, LoadColumnConfig, Value};

/// One named attribute on a change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub value: Value,
}

impl Param {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One fully built change description within a changeset.
///
/// Only the payload fields matching the kind's shape are ever populated:
/// `columns` for table-shaped kinds, `load_columns` for the load-data
/// kinds, `body` for raw SQL / view / procedure text, `args` for
/// executeCommand, `custom_params` for customChange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    pub kind: ChangeKind,
    /// Whitelisted attributes in script order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<ColumnConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub load_columns: Vec<LoadColumnConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,
    /// Raw text payload: SQL statements, view definition, procedure body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Ordered command-line arguments (executeCommand)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Parameter bag handed to a dynamically instantiated change class
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_params: Vec<Param>,
}

impl Change {
    /// Create an empty change of the given kind.
    pub fn new(kind: ChangeKind) -> Self {
        Self {
            kind,
            params: Vec::new(),
            columns: Vec::new(),
            load_columns: Vec::new(),
            where_clause: None,
            body: None,
            args: Vec::new(),
            custom_params: Vec::new(),
        }
    }

    /// Look up an attribute by name.
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    /// Look up a string attribute by name.
    pub fn param_str(&self, name: &str) -> Option<&str> {
        self.param(name).and_then(Value::as_str)
    }

    /// Store an attribute, replacing any earlier value for the same name.
    pub fn push_param(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.params.iter_mut().find(|p| p.name == name) {
            Some(p) => p.value = value,
            None => self.params.push(Param { name, value }),
        }
    }
}
