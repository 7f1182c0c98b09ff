//! Parameter mapping: whitelist checks, expression expansion, and type
//! coercion of named arguments onto changes and nested configs.

use chrono::{NaiveDate, NaiveDateTime};

use crate::ast::{Change, Number, Value};
use crate::builder::schema::{AttrSpec, AttrType};
use crate::changelog::Changelog;
use crate::error::{BuildError, suggestion_for};
use crate::parser::Invocation;

/// Expand substitution variables in string values; everything else passes
/// through untouched.
pub(crate) fn expand_value(changelog: &Changelog, value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(changelog.expand(s)),
        other => other.clone(),
    }
}

/// Coerce an (already expanded) value to the attribute's semantic type.
///
/// Numeric strings fall back to a wide-integer parse; everything else that
/// does not fit is a coercion failure reported as (offending value,
/// expected type).
pub(crate) fn coerce(value: Value, ty: AttrType) -> Result<Value, (String, &'static str)> {
    match (ty, value) {
        (AttrType::Str, Value::String(s)) => Ok(Value::String(s)),
        (AttrType::Str, Value::Int(n)) => Ok(Value::String(n.to_string())),
        (AttrType::Str, Value::Float(n)) => Ok(Value::String(n.to_string())),
        (AttrType::Str, Value::Bool(b)) => Ok(Value::String(b.to_string())),
        (AttrType::Bool, Value::Bool(b)) => Ok(Value::Bool(b)),
        (AttrType::Bool, Value::String(s)) => {
            let parsed = match s.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            };
            match parsed {
                Some(b) => Ok(Value::Bool(b)),
                None => Err((s, "boolean")),
            }
        }
        (AttrType::Int, Value::Int(n)) => Ok(Value::Int(n)),
        (AttrType::Int, Value::String(s)) => match s.trim().parse::<i128>() {
            Ok(n) => Ok(Value::Int(n)),
            Err(_) => Err((s, "integer")),
        },
        (ty, other) => Err((other.to_string(), ty.describe())),
    }
}

/// Validate the invocation's named arguments against the whitelist and
/// copy them onto the change. Null values are skipped outright; string
/// values are expanded before coercion.
pub(crate) fn apply_params(
    change: &mut Change,
    inv: &Invocation,
    specs: &'static [AttrSpec],
    changelog: &Changelog,
    changeset: &str,
) -> Result<(), BuildError> {
    for (name, value) in inv.named_args() {
        let spec = specs.iter().find(|spec| spec.name == name).ok_or_else(|| {
            BuildError::InvalidProperty {
                changeset: changeset.to_string(),
                change: change.kind.name().to_string(),
                property: name.to_string(),
                suggestion: suggestion_for(name, specs.iter().map(|spec| spec.name)),
            }
        })?;

        if value.is_null() {
            continue;
        }

        let expanded = expand_value(changelog, value);
        let coerced = coerce(expanded, spec.ty).map_err(|(value, expected)| {
            BuildError::TypeCoercion {
                changeset: changeset.to_string(),
                change: change.kind.name().to_string(),
                property: name.to_string(),
                value,
                expected,
            }
        })?;

        change.push_param(name, coerced);
    }

    Ok(())
}

/// Typed access to one invocation's named arguments, with whitelist
/// checking and per-field coercion errors carrying full context.
///
/// Used for the nested configs (columns, constraints, load columns,
/// precondition leaves, visitor entries) whose targets are typed structs
/// rather than parameter lists.
pub(crate) struct ArgReader<'a> {
    inv: &'a Invocation,
    changelog: &'a Changelog,
    changeset: &'a str,
    /// Element name used in error messages (`column`, `constraints`, ...)
    element: &'a str,
}

impl<'a> ArgReader<'a> {
    pub fn new(
        inv: &'a Invocation,
        changelog: &'a Changelog,
        changeset: &'a str,
        element: &'a str,
    ) -> Self {
        Self {
            inv,
            changelog,
            changeset,
            element,
        }
    }

    /// Fail on any named argument outside `allowed`.
    pub fn check(&self, allowed: &[&'static str]) -> Result<(), BuildError> {
        for (name, _) in self.inv.named_args() {
            if !allowed.contains(&name) {
                return Err(BuildError::InvalidProperty {
                    changeset: self.changeset.to_string(),
                    change: self.element.to_string(),
                    property: name.to_string(),
                    suggestion: suggestion_for(name, allowed.iter().copied()),
                });
            }
        }
        Ok(())
    }

    fn raw(&self, name: &str) -> Option<&'a Value> {
        self.inv
            .named_args()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
            .filter(|v| !v.is_null())
    }

    fn coercion_error(&self, name: &str, value: String, expected: &'static str) -> BuildError {
        BuildError::TypeCoercion {
            changeset: self.changeset.to_string(),
            change: self.element.to_string(),
            property: name.to_string(),
            value,
            expected,
        }
    }

    pub fn str_opt(&self, name: &str) -> Result<Option<String>, BuildError> {
        match self.raw(name) {
            None => Ok(None),
            Some(value) => {
                let expanded = expand_value(self.changelog, value);
                match coerce(expanded, AttrType::Str) {
                    Ok(Value::String(s)) => Ok(Some(s)),
                    Ok(_) => Ok(None),
                    Err((value, expected)) => Err(self.coercion_error(name, value, expected)),
                }
            }
        }
    }

    pub fn str_req(&self, name: &str) -> Result<String, BuildError> {
        self.str_opt(name)?.ok_or_else(|| BuildError::MissingProperty {
            changeset: self.changeset.to_string(),
            change: self.element.to_string(),
            property: name.to_string(),
        })
    }

    pub fn bool_opt(&self, name: &str) -> Result<Option<bool>, BuildError> {
        match self.raw(name) {
            None => Ok(None),
            Some(value) => {
                let expanded = expand_value(self.changelog, value);
                match coerce(expanded, AttrType::Bool) {
                    Ok(Value::Bool(b)) => Ok(Some(b)),
                    Ok(_) => Ok(None),
                    Err((value, expected)) => Err(self.coercion_error(name, value, expected)),
                }
            }
        }
    }

    pub fn int_opt(&self, name: &str) -> Result<Option<i128>, BuildError> {
        match self.raw(name) {
            None => Ok(None),
            Some(value) => {
                let expanded = expand_value(self.changelog, value);
                match coerce(expanded, AttrType::Int) {
                    Ok(Value::Int(n)) => Ok(Some(n)),
                    Ok(_) => Ok(None),
                    Err((value, expected)) => Err(self.coercion_error(name, value, expected)),
                }
            }
        }
    }

    /// Numeric column values: integers stay integers, everything else
    /// must parse as an integer or a float.
    pub fn number_opt(&self, name: &str) -> Result<Option<Number>, BuildError> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::Int(n)) => Ok(Some(Number::Int(*n))),
            Some(Value::Float(n)) => Ok(Some(Number::Float(*n))),
            Some(Value::String(s)) => {
                let expanded = self.changelog.expand(s);
                let trimmed = expanded.trim();
                if let Ok(n) = trimmed.parse::<i128>() {
                    Ok(Some(Number::Int(n)))
                } else if let Ok(n) = trimmed.parse::<f64>() {
                    Ok(Some(Number::Float(n)))
                } else {
                    Err(self.coercion_error(name, expanded, "number"))
                }
            }
            Some(other) => Err(self.coercion_error(name, other.to_string(), "number")),
        }
    }

    /// Date column values: `YYYY-MM-DD` with an optional time part in
    /// either `T` or space separation.
    pub fn date_opt(&self, name: &str) -> Result<Option<NaiveDateTime>, BuildError> {
        match self.str_opt(name)? {
            None => Ok(None),
            Some(text) => parse_date(text.trim())
                .map(Some)
                .ok_or_else(|| self.coercion_error(name, text, "date")),
        }
    }
}

fn parse_date(text: &str) -> Option<NaiveDateTime> {
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
