//! Per-instant evaluation: opacity windows, draw lists and the loop clock.

pub(crate) mod evaluator;
pub(crate) mod opacity;
pub(crate) mod timeline;
