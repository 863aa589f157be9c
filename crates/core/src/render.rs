//! Canonical rendering of type-node trees.
//!
//! Depth-first: children are rendered before being joined into their
//! parent's string. Single-argument generics treat their arguments as
//! alternatives and join with " or "; everything else joins with ", ".

use crate::ast::{TypeNode, SINGLE_ARG_GENERIC_TYPES};
use std::fmt;

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Simple { name } => write!(f, "{}", name),
            TypeNode::Collection { name, elements } => {
                let sep = if SINGLE_ARG_GENERIC_TYPES.contains(&name.as_str()) {
                    " or "
                } else {
                    ", "
                };
                write!(f, "{}<{}>", name, join(elements, sep))
            }
            // The parsed name is deliberately ignored: a paren construct
            // is a fixed-arity tuple whatever it was called.
            TypeNode::FixedCollection { name: _, elements } => {
                write!(f, "[{}]", join(elements, ", "))
            }
            TypeNode::HashCollection {
                key_elements,
                value_elements,
            } => {
                write!(
                    f,
                    "Hash<{}, {}>",
                    join(key_elements, " or "),
                    join(value_elements, " or ")
                )
            }
        }
    }
}

fn join(nodes: &[TypeNode], sep: &str) -> String {
    nodes
        .iter()
        .map(TypeNode::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}
