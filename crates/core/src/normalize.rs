//! Entry points: annotation text in, canonical string out.
//!
//! Thin orchestration over the scanner/parser/renderer. No I/O and no
//! logging happens here; a failure aborts the one annotation being
//! normalized and the caller decides what to do with it.

use crate::ast::{BOOLEAN_SYNONYMS, INTEGER_SYNONYMS};
use crate::error::TypeError;
use crate::parser;
use serde_json::Value;

/// Normalize a single annotation to its canonical rendering.
///
/// A top-level `,`-list is not a legal single-type expression here and
/// fails with [`TypeError::MultipleResults`].
pub fn parse_one(text: &str) -> Result<String, TypeError> {
    // Multi-word synonyms like "true or false" never survive the scanner
    // as one token, so the whole input is checked against the alias
    // tables first.
    let trimmed = text.trim();
    if BOOLEAN_SYNONYMS.contains(&trimmed) {
        return Ok("Boolean".to_owned());
    }
    if INTEGER_SYNONYMS.contains(&trimmed) {
        return Ok("Integer".to_owned());
    }

    let types = parser::parse(text)?;
    match types.as_slice() {
        [only] => Ok(only.to_string()),
        many => Err(TypeError::MultipleResults {
            rendered: many
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            count: many.len(),
        }),
    }
}

/// Normalize an ordered sequence of alternative annotations and join the
/// canonical renderings with " or ". Order is preserved and duplicates
/// are kept; each element must parse to exactly one type on its own.
pub fn parse_alternatives<'a, I>(texts: I) -> Result<String, TypeError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parts = Vec::new();
    for text in texts {
        parts.push(parse_one(text)?);
    }
    Ok(parts.join(" or "))
}

/// Normalize the loosely-typed value a documentation tag hands over:
/// a single annotation string, or an array of alternative annotation
/// strings. Anything else fails with [`TypeError::InputType`].
pub fn parse_value(value: &Value) -> Result<String, TypeError> {
    match value {
        Value::String(text) => parse_one(text),
        Value::Array(items) => {
            let mut parts = Vec::new();
            for item in items {
                let text = item.as_str().ok_or(TypeError::InputType {
                    expected: "string",
                    got: json_type_name(item),
                })?;
                parts.push(parse_one(text)?);
            }
            Ok(parts.join(" or "))
        }
        other => Err(TypeError::InputType {
            expected: "string or array of strings",
            got: json_type_name(other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
