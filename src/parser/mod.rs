//! nom parsers for the changeset script DSL.
//!
//! The surface is deliberately small: invocations with named or positional
//! arguments, nested `{ ... }` blocks, string/number/boolean/null literals,
//! and `//` or `--` comments. Everything the script *means* lives in
//! [`crate::builder`]; this module only produces the call tree.

pub mod script;
pub mod tokens;

#[cfg(test)]
mod tests;

pub use self::script::{Arg, Block, BlockItem, Invocation, parse};
