//! Configuration text: cursor primitives, diagnostics and the grammar.

pub(crate) mod cursor;
pub(crate) mod error;
pub(crate) mod parser;
