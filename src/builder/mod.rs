//! The changeset builder: applies a parsed script body to a [`ChangeSet`].
//!
//! One operation per change kind, dispatched by name against the schema
//! tables in [`schema`]; changeset-level directives (`comment`,
//! `preConditions`, `validCheckSum`, `modifySql`, `rollback`) are handled
//! here as well. Processing is synchronous and fail-fast: the first error
//! aborts the changeset and the caller discards it.

pub mod schema;

pub(crate) mod columns;
pub(crate) mod params;
pub(crate) mod preconditions;
pub(crate) mod rollback;

#[cfg(test)]
mod tests;

use tracing::{debug, warn};

use crate::ast::{Change, ChangeKind, ChangeSet, SqlVisitor, SqlVisitorKind, Value};
use crate::changelog::{Changelog, ResourceAccessor};
use crate::error::{BuildError, suggestion_for};
use crate::parser::{Block, BlockItem, Invocation, parse};

use self::params::ArgReader;
use self::schema::ColumnBlock;

/// Changeset-level directives that are not change kinds.
const DIRECTIVES: &[&str] = &[
    "comment",
    "preConditions",
    "rollback",
    "validCheckSum",
    "modifySql",
];

const VISITOR_NAMES: &[&str] = &["prepend", "append", "replace", "regExpReplace"];

/// Which list built changes are appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Forward,
    Rollback,
}

/// Builds one changeset from its script body.
///
/// Holds the changeset mutably for the duration of the build and the
/// changelog context (substitution table, prior changesets) read-only.
pub struct ChangeSetBuilder<'a> {
    changeset: &'a mut ChangeSet,
    changelog: &'a Changelog,
    resources: &'a dyn ResourceAccessor,
    target: Target,
    label: String,
}

impl<'a> ChangeSetBuilder<'a> {
    pub fn new(
        changeset: &'a mut ChangeSet,
        changelog: &'a Changelog,
        resources: &'a dyn ResourceAccessor,
    ) -> Self {
        let label = changeset.label();
        Self {
            changeset,
            changelog,
            resources,
            target: Target::Forward,
            label,
        }
    }

    /// Parse and apply a complete changeset body.
    pub fn run(&mut self, script: &str) -> Result<(), BuildError> {
        let block = parse(script)?;
        self.apply_block(&block)
    }

    /// Apply an already parsed changeset body.
    pub fn apply_block(&mut self, block: &Block) -> Result<(), BuildError> {
        for item in &block.items {
            match item {
                BlockItem::Call(call) => self.apply(call)?,
                BlockItem::Text(_) => {
                    return Err(BuildError::Misplaced {
                        changeset: self.label.clone(),
                        item: "raw text".to_string(),
                        context: "outside a change body".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn apply(&mut self, call: &Invocation) -> Result<(), BuildError> {
        match call.name.as_str() {
            "comment" => self.apply_comment(call),
            "preConditions" => self.apply_preconditions(call),
            "validCheckSum" => self.apply_valid_checksum(call),
            "modifySql" => self.apply_modify_sql(call),
            "rollback" => self.apply_rollback(call),
            name => match ChangeKind::from_name(name) {
                Some(kind) => self.apply_change(kind, call),
                None => Err(BuildError::UnknownChange {
                    changeset: self.label.clone(),
                    name: name.to_string(),
                    suggestion: suggestion_for(
                        name,
                        ChangeKind::names().chain(DIRECTIVES.iter().copied()),
                    ),
                }),
            },
        }
    }

    /// Directives are only meaningful at the changeset level, never inside
    /// a rollback block.
    fn require_forward(&self, directive: &str) -> Result<(), BuildError> {
        if self.target == Target::Rollback {
            return Err(BuildError::Misplaced {
                changeset: self.label.clone(),
                item: format!("'{}'", directive),
                context: "inside a rollback block".to_string(),
            });
        }
        Ok(())
    }

    fn apply_comment(&mut self, call: &Invocation) -> Result<(), BuildError> {
        self.require_forward("comment")?;
        let text = self.positional_string(call, "comment", "text")?;
        self.changeset.comment = Some(self.changelog.expand(&text));
        Ok(())
    }

    fn apply_preconditions(&mut self, call: &Invocation) -> Result<(), BuildError> {
        self.require_forward("preConditions")?;
        let container = preconditions::build_preconditions(call, self.changelog, &self.label)?;
        self.changeset.preconditions = Some(container);
        Ok(())
    }

    fn apply_valid_checksum(&mut self, call: &Invocation) -> Result<(), BuildError> {
        self.require_forward("validCheckSum")?;
        // Checksums are opaque tokens; no expansion.
        let checksum = self.positional_string(call, "validCheckSum", "checksum")?;
        self.changeset.add_valid_checksum(checksum);
        Ok(())
    }

    fn apply_modify_sql(&mut self, call: &Invocation) -> Result<(), BuildError> {
        self.require_forward("modifySql")?;
        let args = ArgReader::new(call, self.changelog, &self.label, "modifySql");
        args.check(&["dbms", "applyToRollback"])?;

        let dbms: Vec<String> = args
            .str_opt("dbms")?
            .map(|list| {
                list.split(',')
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let apply_to_rollback = args.bool_opt("applyToRollback")?.unwrap_or(false);

        let Some(block) = call.block.as_ref() else {
            return Ok(());
        };

        for item in &block.items {
            let entry = match item {
                BlockItem::Call(entry) => entry,
                BlockItem::Text(_) => {
                    return Err(BuildError::Misplaced {
                        changeset: self.label.clone(),
                        item: "raw text".to_string(),
                        context: "inside a 'modifySql' block".to_string(),
                    });
                }
            };
            let reader = ArgReader::new(entry, self.changelog, &self.label, entry.name.as_str());
            let kind = match entry.name.as_str() {
                "prepend" => {
                    reader.check(&["value"])?;
                    SqlVisitorKind::Prepend {
                        value: reader.str_req("value")?,
                    }
                }
                "append" => {
                    reader.check(&["value"])?;
                    SqlVisitorKind::Append {
                        value: reader.str_req("value")?,
                    }
                }
                "replace" => {
                    reader.check(&["replace", "with"])?;
                    SqlVisitorKind::Replace {
                        replace: reader.str_req("replace")?,
                        with: reader.str_req("with")?,
                    }
                }
                "regExpReplace" => {
                    reader.check(&["replace", "with"])?;
                    SqlVisitorKind::RegExpReplace {
                        replace: reader.str_req("replace")?,
                        with: reader.str_req("with")?,
                    }
                }
                other => {
                    return Err(BuildError::UnknownChange {
                        changeset: self.label.clone(),
                        name: other.to_string(),
                        suggestion: suggestion_for(other, VISITOR_NAMES.iter().copied()),
                    });
                }
            };

            self.changeset.sql_visitors.push(SqlVisitor {
                kind,
                dbms: dbms.clone(),
                apply_to_rollback,
            });
        }

        Ok(())
    }

    fn apply_change(&mut self, kind: ChangeKind, call: &Invocation) -> Result<(), BuildError> {
        // The closure-only customChange form is accepted but not
        // implemented: there is no type name to hand to the engine, so
        // nothing useful can be recorded. Kept as a loud no-op rather
        // than a silent misparse.
        if kind == ChangeKind::CustomChange
            && call.block.is_some()
            && !call.named_args().any(|(name, _)| name == "class")
        {
            warn!(
                changeset = %self.label,
                "customChange without a class is not implemented; ignoring"
            );
            return Ok(());
        }

        let change = self.build_change(kind, call)?;
        self.append(change);
        Ok(())
    }

    fn build_change(&self, kind: ChangeKind, call: &Invocation) -> Result<Change, BuildError> {
        let shape = schema::shape(kind);
        let mut change = Change::new(kind);

        if let Some(value) = call.positional() {
            if shape.positional_body {
                change.body = Some(self.expanded_string(kind, "sql", value)?);
            } else if let Some(attr) = shape.positional_attr {
                change.push_param(attr, Value::String(self.expanded_string(kind, attr, value)?));
            } else {
                return Err(BuildError::Misplaced {
                    changeset: self.label.clone(),
                    item: "a positional argument".to_string(),
                    context: format!("on '{}'", kind),
                });
            }
        }

        params::apply_params(
            &mut change,
            call,
            schema::attributes(kind),
            self.changelog,
            &self.label,
        )?;

        if let Some(block) = call.block.as_ref() {
            if shape.columns != ColumnBlock::None || shape.where_clause {
                columns::collect_column_block(
                    &mut change,
                    block,
                    shape,
                    self.changelog,
                    &self.label,
                )?;
            } else if shape.body {
                self.collect_body(&mut change, block)?;
            } else if shape.args {
                self.collect_args(&mut change, block)?;
            } else if shape.custom {
                self.collect_custom_params(&mut change, block)?;
            } else {
                return Err(BuildError::Misplaced {
                    changeset: self.label.clone(),
                    item: "a nested block".to_string(),
                    context: format!("on '{}'", kind),
                });
            }
        }

        match kind {
            ChangeKind::SqlFile => {
                if change.param_str("path").is_none() {
                    return Err(BuildError::MissingProperty {
                        changeset: self.label.clone(),
                        change: kind.name().to_string(),
                        property: "path".to_string(),
                    });
                }
                self.read_file_body(&mut change)?;
            }
            // Procedure bodies loaded from a file resolve eagerly for the
            // same reason sqlFile does: checksums must not depend on
            // re-reading the file later.
            ChangeKind::CreateProcedure
                if change.param_str("path").is_some() && change.body.is_none() =>
            {
                self.read_file_body(&mut change)?;
            }
            ChangeKind::CustomChange if change.param_str("class").is_none() => {
                return Err(BuildError::MissingProperty {
                    changeset: self.label.clone(),
                    change: kind.name().to_string(),
                    property: "class".to_string(),
                });
            }
            _ => {}
        }

        Ok(change)
    }

    /// Raw text body plus, for `sql` changes, an embedded `comment` call.
    fn collect_body(&self, change: &mut Change, block: &Block) -> Result<(), BuildError> {
        let mut parts = Vec::new();
        for item in &block.items {
            match item {
                BlockItem::Text(text) => parts.push(self.changelog.expand(text)),
                BlockItem::Call(call)
                    if call.name == "comment" && change.kind == ChangeKind::RawSql =>
                {
                    let text = self.positional_string(call, "comment", "text")?;
                    change.push_param("comment", Value::String(self.changelog.expand(&text)));
                }
                BlockItem::Call(call) => {
                    return Err(BuildError::Misplaced {
                        changeset: self.label.clone(),
                        item: format!("'{}'", call.name),
                        context: format!("inside a '{}' body", change.kind),
                    });
                }
            }
        }
        if !parts.is_empty() {
            change.body = Some(parts.join("\n"));
        }
        Ok(())
    }

    /// Ordered command-line arguments for executeCommand.
    fn collect_args(&self, change: &mut Change, block: &Block) -> Result<(), BuildError> {
        for item in &block.items {
            let call = match item {
                BlockItem::Call(call) if call.name == "arg" => call,
                BlockItem::Call(call) => {
                    return Err(BuildError::Misplaced {
                        changeset: self.label.clone(),
                        item: format!("'{}'", call.name),
                        context: format!("inside an '{}' block", change.kind),
                    });
                }
                BlockItem::Text(_) => {
                    return Err(BuildError::Misplaced {
                        changeset: self.label.clone(),
                        item: "raw text".to_string(),
                        context: format!("inside an '{}' block", change.kind),
                    });
                }
            };

            // `arg "x"` or `arg(value: "x")`
            let value = match call.positional() {
                Some(value) => self.expanded_string(change.kind, "arg", value)?,
                None => {
                    let args = ArgReader::new(call, self.changelog, &self.label, "arg");
                    args.check(&["value"])?;
                    args.str_req("value")?
                }
            };
            change.args.push(value);
        }
        Ok(())
    }

    /// The key-value parameter bag for a customChange.
    fn collect_custom_params(&self, change: &mut Change, block: &Block) -> Result<(), BuildError> {
        for item in &block.items {
            let call = match item {
                BlockItem::Call(call) if call.name == "param" => call,
                BlockItem::Call(call) => {
                    return Err(BuildError::Misplaced {
                        changeset: self.label.clone(),
                        item: format!("'{}'", call.name),
                        context: format!("inside a '{}' block", change.kind),
                    });
                }
                BlockItem::Text(_) => {
                    return Err(BuildError::Misplaced {
                        changeset: self.label.clone(),
                        item: "raw text".to_string(),
                        context: format!("inside a '{}' block", change.kind),
                    });
                }
            };

            let args = ArgReader::new(call, self.changelog, &self.label, "param");
            args.check(&["name", "value"])?;
            let name = args.str_req("name")?;
            let value = args.str_req("value")?;
            change
                .custom_params
                .push(crate::ast::Param::new(name, Value::String(value)));
        }
        Ok(())
    }

    /// Eagerly read a file-backed body (sqlFile, createProcedure path)
    /// so later checksum computation never re-reads the file.
    fn read_file_body(&self, change: &mut Change) -> Result<(), BuildError> {
        let path = change.param_str("path").unwrap_or_default().to_string();
        let relative = matches!(
            change.param("relativeToChangelogFile"),
            Some(Value::Bool(true))
        );
        let resolved = if relative {
            self.changelog
                .directory()
                .join(&path)
                .to_string_lossy()
                .into_owned()
        } else {
            path
        };

        let content =
            self.resources
                .read_to_string(&resolved)
                .map_err(|source| BuildError::Resource {
                    changeset: self.label.clone(),
                    path: resolved.clone(),
                    source,
                })?;
        debug!(changeset = %self.label, path = %resolved, "resolved file body eagerly");
        change.body = Some(self.changelog.expand(&content));
        Ok(())
    }

    /// The single shared append: the target list is the only thing
    /// rollback mode changes.
    fn append(&mut self, change: Change) {
        debug!(
            changeset = %self.label,
            kind = %change.kind,
            rollback = self.target == Target::Rollback,
            "append change"
        );
        match self.target {
            Target::Forward => self.changeset.changes.push(change),
            Target::Rollback => self.changeset.rollback_changes.push(change),
        }
    }

    fn positional_string(
        &self,
        call: &Invocation,
        element: &str,
        property: &str,
    ) -> Result<String, BuildError> {
        match call.positional() {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(BuildError::TypeCoercion {
                changeset: self.label.clone(),
                change: element.to_string(),
                property: property.to_string(),
                value: other.to_string(),
                expected: "string",
            }),
            None => Err(BuildError::MissingProperty {
                changeset: self.label.clone(),
                change: element.to_string(),
                property: property.to_string(),
            }),
        }
    }

    fn expanded_string(
        &self,
        kind: ChangeKind,
        property: &str,
        value: &Value,
    ) -> Result<String, BuildError> {
        match value {
            Value::String(s) => Ok(self.changelog.expand(s)),
            other => Err(BuildError::TypeCoercion {
                changeset: self.label.clone(),
                change: kind.name().to_string(),
                property: property.to_string(),
                value: other.to_string(),
                expected: "string",
            }),
        }
    }
}
