use std::io;

use thiserror::Error;

/// Script syntax failure, with the offending line for context.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("script syntax error at line {line}: unexpected input near '{snippet}'")]
pub struct ParseError {
    /// 1-based line of the first unconsumed input
    pub line: usize,
    /// Leading fragment of the unconsumed input
    pub snippet: String,
}

/// Fatal changeset-build failure.
///
/// There is no local recovery: any of these aborts the current changeset
/// and propagates to the changelog-level caller, which discards the
/// partially populated object.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("changeset '{changeset}': invalid property '{property}' for '{change}'{suggestion}")]
    InvalidProperty {
        changeset: String,
        change: String,
        property: String,
        suggestion: String,
    },

    #[error(
        "changeset '{changeset}': cannot coerce '{value}' to {expected} \
         for property '{property}' of '{change}'"
    )]
    TypeCoercion {
        changeset: String,
        change: String,
        property: String,
        value: String,
        expected: &'static str,
    },

    #[error("changeset '{changeset}': '{change}' requires property '{property}'")]
    MissingProperty {
        changeset: String,
        change: String,
        property: String,
    },

    #[error("changeset '{changeset}': unknown operation '{name}'{suggestion}")]
    UnknownChange {
        changeset: String,
        name: String,
        suggestion: String,
    },

    #[error(
        "changeset '{changeset}': cannot roll back, referenced changeset \
         {path}::{id}::{author} was not found"
    )]
    RollbackImpossible {
        changeset: String,
        path: String,
        author: String,
        id: String,
    },

    #[error("changeset '{changeset}': more than one rollback source declared")]
    RollbackConflict { changeset: String },

    #[error("changeset '{changeset}': '{item}' is not allowed {context}")]
    Misplaced {
        changeset: String,
        item: String,
        context: String,
    },

    #[error("changeset '{changeset}': cannot read '{path}'")]
    Resource {
        changeset: String,
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Script(#[from] ParseError),
}

/// Pre-formatted " (did you mean '...'?)" hint, or empty when nothing in
/// `candidates` is close enough to be worth suggesting.
pub(crate) fn suggestion_for<'a, I>(input: &str, candidates: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let best = candidates
        .into_iter()
        .map(|candidate| (candidate, strsim::jaro_winkler(input, candidate)))
        .filter(|(_, score)| *score > 0.85)
        .max_by(|(_, a), (_, b)| a.total_cmp(b));

    match best {
        Some((candidate, _)) => format!(" (did you mean '{}'?)", candidate),
        None => String::new(),
    }
}
