//! typenorm-core: normalizer for short textual type annotations.
//!
//! Turns annotation text from structured documentation comments
//! (`"Array<String, Integer>"`, `"Hash{Symbol => String}"`,
//! `"(String, Integer)"`, `"#foo"`) into a canonical rendering usable as
//! a stable key in a downstream dataset. Pure text-to-text: no I/O, no
//! network, no shared mutable state beyond constant alias tables.
//!
//! # Public API
//!
//! Key items are re-exported at the crate root:
//!
//! - [`parse_one()`] -- one annotation string to its canonical form
//! - [`parse_alternatives()`] -- ordered alternatives joined with " or "
//! - [`parse_value()`] -- the loosely-typed string-or-array boundary
//! - [`TypeNode`] -- the parsed tree, rendered via `Display`
//! - [`TypeError`] -- all failure kinds

pub mod ast;
pub mod error;
pub mod lexer;
pub mod normalize;
pub mod parser;
pub mod render;

// ── Convenience re-exports ───────────────────────────────────────────

pub use ast::TypeNode;
pub use error::TypeError;
pub use normalize::{parse_alternatives, parse_one, parse_value};
pub use parser::{parse, MAX_DEPTH};
