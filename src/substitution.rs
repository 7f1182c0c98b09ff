//! Changelog-wide substitution variables.
//!
//! A table of `name -> replacement` consulted before any string value is
//! stored on a change. The table spans the whole changelog parse; the
//! builder only ever reads it.

use std::collections::HashMap;

/// Substitution variables for one migration run.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionTable {
    values: HashMap<String, String>,
}

impl SubstitutionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a variable. Later registrations win, matching
    /// property-file layering where run-specific values override defaults.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Load variables from a TOML table of string/number/boolean values.
    ///
    /// ```toml
    /// schema = "public"
    /// batch_size = 500
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let parsed: HashMap<String, toml::Value> = toml::from_str(text)?;
        let mut table = Self::new();
        for (name, value) in parsed {
            let rendered = match value {
                toml::Value::String(s) => s,
                other => other.to_string(),
            };
            table.set(name, rendered);
        }
        Ok(table)
    }

    /// Resolve every known `${name}` placeholder in `text`.
    ///
    /// Unknown placeholders are left untouched, so expansion is
    /// idempotent and pass-through on already-resolved text.
    pub fn expand(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find('}') {
                Some(end) => {
                    let name = &after[..end];
                    match self.get(name) {
                        Some(replacement) => out.push_str(replacement),
                        None => {
                            out.push_str("${");
                            out.push_str(name);
                            out.push('}');
                        }
                    }
                    rest = &after[end + 1..];
                }
                None => {
                    // Unterminated placeholder: emit verbatim
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }

        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SubstitutionTable {
        let mut t = SubstitutionTable::new();
        t.set("schema", "public");
        t.set("table", "person");
        t
    }

    #[test]
    fn test_expand_known() {
        assert_eq!(
            table().expand("${schema}.${table}_audit"),
            "public.person_audit"
        );
    }

    #[test]
    fn test_unknown_left_untouched() {
        assert_eq!(table().expand("${nope}.${table}"), "${nope}.person");
    }

    #[test]
    fn test_expand_is_pass_through_on_plain_text() {
        assert_eq!(table().expand("no placeholders here"), "no placeholders here");
    }

    #[test]
    fn test_unterminated_placeholder() {
        assert_eq!(table().expand("tail ${schema"), "tail ${schema");
    }

    #[test]
    fn test_from_toml() {
        let t = SubstitutionTable::from_toml_str("schema = \"app\"\nbatch = 500\n").unwrap();
        assert_eq!(t.get("schema"), Some("app"));
        assert_eq!(t.get("batch"), Some("500"));
    }
}
