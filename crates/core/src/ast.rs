//! Type-node model for parsed annotations.
//!
//! These types are produced by the parser and consumed by the renderer.
//! They live here so both can import them without depending on each other.

use serde::Serialize;

// ──────────────────────────────────────────────
// Alias tables
// ──────────────────────────────────────────────

/// Spellings that normalize to `Boolean`. Includes the multi-word forms
/// YARD authors write as a whole annotation ("true or false"); those can
/// only match against the full input, never against a single token.
pub const BOOLEAN_SYNONYMS: [&str; 10] = [
    "true or false",
    "bool",
    "Bool",
    "boolean",
    "Boolean",
    "true",
    "false",
    "TrueClass",
    "FalseClass",
    "TrueClass or FalseClass",
];

/// Spellings that normalize to `Integer`.
pub const INTEGER_SYNONYMS: [&str; 4] = ["Fixnum", "int", "Bignum", "Int"];

/// Container names whose type arguments are alternatives (a union), not
/// positional arguments. These render joined with " or ".
pub const SINGLE_ARG_GENERIC_TYPES: [&str; 5] =
    ["Array", "Set", "Enumerable", "Enumerator", "Range"];

/// Map a raw name through the alias tables and strip one leading `::`.
///
/// Alias lookup happens before the prefix strip, so `::Fixnum` stays
/// `Fixnum` rather than becoming `Integer`.
pub fn normalize_name(raw: &str) -> String {
    let name = if BOOLEAN_SYNONYMS.contains(&raw) {
        "Boolean"
    } else if INTEGER_SYNONYMS.contains(&raw) {
        "Integer"
    } else {
        raw
    };
    name.strip_prefix("::").unwrap_or(name).to_owned()
}

// ──────────────────────────────────────────────
// Type nodes
// ──────────────────────────────────────────────

/// A parsed type annotation. Immutable once built; one tree per parse
/// call, no sharing between siblings, depth bounded by input nesting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeNode {
    /// A leaf type name (already alias-normalized), e.g. `String`, `#read`.
    Simple { name: String },
    /// An angle-bracket construct, e.g. `Array<String>`. A bare `<...>`
    /// gets the name `Array`.
    Collection { name: String, elements: Vec<TypeNode> },
    /// A parenthesis construct, e.g. `(String, Integer)`. The name is
    /// kept for symmetry but the renderer ignores it.
    FixedCollection { name: String, elements: Vec<TypeNode> },
    /// A brace construct with a `=>` separator, e.g. `{Symbol => String}`.
    /// Always rendered as `Hash` regardless of the source name.
    HashCollection {
        key_elements: Vec<TypeNode>,
        value_elements: Vec<TypeNode>,
    },
}

impl TypeNode {
    /// Wrap an already-normalized name in a leaf node.
    pub fn simple(name: String) -> Self {
        TypeNode::Simple { name }
    }
}
