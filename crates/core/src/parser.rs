//! Recursive-descent parser for type annotations.
//!
//! One `parse_level` call per opened delimiter; a level returns exactly
//! when it consumes a closing/terminal token, so nesting is tracked by
//! the call stack rather than an explicit counter. Each opener checks
//! that its nested level was ended by the matching close token, which is
//! what rejects unterminated input like `<String`.

use crate::ast::{normalize_name, TypeNode};
use crate::error::TypeError;
use crate::lexer::{Scanner, Token};

/// Maximum bracket-nesting depth accepted before giving up. Far beyond
/// any annotation seen in real documentation; bounds the recursion stack
/// against pathological input.
pub const MAX_DEPTH: usize = 64;

/// The token that ended a `parse_level` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    CollectionEnd,
    FixedCollectionEnd,
    TupleEnd,
    HashCollectionEnd,
    HashCollectionNext,
    EndOfInput,
}

impl Terminator {
    fn describe(self) -> &'static str {
        match self {
            Terminator::CollectionEnd => "'>'",
            Terminator::FixedCollectionEnd => "')'",
            Terminator::TupleEnd => "']'",
            Terminator::HashCollectionEnd => "'}'",
            Terminator::HashCollectionNext => "'=>'",
            Terminator::EndOfInput => "end of input",
        }
    }
}

/// Parse a whole annotation into its top-level type nodes.
///
/// The returned vector is never empty; a bare `,`-list yields more than
/// one node and is the caller's problem to reject.
pub fn parse(text: &str) -> Result<Vec<TypeNode>, TypeError> {
    let mut scanner = Scanner::new(text);
    let (groups, terminator) = parse_level(&mut scanner, 0)?;
    expect_terminator(Terminator::EndOfInput, terminator, &scanner)?;
    Ok(flatten(groups))
}

/// One recursion level. Owns an accumulator of completed siblings, at
/// most one pending name, and at most one in-progress collection node.
///
/// Siblings come back grouped: `or` joins alternatives within a group,
/// `,`/`;` starts the next group. The distinction matters only to the
/// angle-form Hash rebuild in [`build_collection`]; every other consumer
/// flattens the groups.
fn parse_level(
    scanner: &mut Scanner,
    depth: usize,
) -> Result<(Vec<Vec<TypeNode>>, Terminator), TypeError> {
    if depth > MAX_DEPTH {
        return Err(TypeError::DepthExceeded { limit: MAX_DEPTH });
    }

    let mut groups: Vec<Vec<TypeNode>> = Vec::new();
    let mut group: Vec<TypeNode> = Vec::new();
    let mut pending: Option<String> = None;
    let mut current: Option<TypeNode> = None;

    loop {
        let pos = scanner.pos();
        match scanner.next_token()? {
            // A bare lowercase `or` is the union separator the renderer
            // emits between alternatives. It binds tighter than `,`: the
            // finalized node joins the current group rather than
            // starting a new one, so canonical renderings parse back to
            // the same canonical rendering.
            Token::TypeName(raw) if raw == "or" => {
                let node = finalize(&mut pending, &mut current, pos)?;
                group.push(node);
            }
            Token::TypeName(raw) => {
                // Two names in a row, or a name right after a completed
                // collection, both need a separator first.
                if pending.is_some() || current.is_some() {
                    return Err(TypeError::UnexpectedToken {
                        message: format!("expecting separator or close, got name '{}'", raw),
                        pos,
                    });
                }
                pending = Some(normalize_name(&raw));
            }
            Token::TypeNext => {
                let node = finalize(&mut pending, &mut current, pos)?;
                group.push(node);
                groups.push(std::mem::take(&mut group));
            }
            Token::CollectionStart => {
                let name = pending.take().unwrap_or_else(|| "Array".to_owned());
                let elements = parse_nested(scanner, depth, Terminator::CollectionEnd)?;
                current = Some(build_collection(name, elements));
            }
            Token::FixedCollectionStart => {
                let name = pending.take().unwrap_or_else(|| "Array".to_owned());
                let elements = parse_nested(scanner, depth, Terminator::FixedCollectionEnd)?;
                current = Some(TypeNode::FixedCollection {
                    name,
                    elements: flatten(elements),
                });
            }
            Token::TupleStart => {
                let name = pending.take().unwrap_or_else(|| "Array".to_owned());
                let elements = parse_nested(scanner, depth, Terminator::TupleEnd)?;
                current = Some(TypeNode::FixedCollection {
                    name,
                    elements: flatten(elements),
                });
            }
            Token::HashCollectionStart => {
                // The name before the brace never matters: brace hashes
                // always render as Hash.
                pending.take();
                let key_elements = parse_nested(scanner, depth, Terminator::HashCollectionNext)?;
                let value_elements = parse_nested(scanner, depth, Terminator::HashCollectionEnd)?;
                current = Some(TypeNode::HashCollection {
                    key_elements: flatten(key_elements),
                    value_elements: flatten(value_elements),
                });
            }
            Token::CollectionEnd => {
                return finish_level(groups, group, pending, current, pos, Terminator::CollectionEnd);
            }
            Token::FixedCollectionEnd => {
                return finish_level(
                    groups,
                    group,
                    pending,
                    current,
                    pos,
                    Terminator::FixedCollectionEnd,
                );
            }
            Token::TupleEnd => {
                return finish_level(groups, group, pending, current, pos, Terminator::TupleEnd);
            }
            Token::HashCollectionEnd => {
                return finish_level(
                    groups,
                    group,
                    pending,
                    current,
                    pos,
                    Terminator::HashCollectionEnd,
                );
            }
            Token::HashCollectionNext => {
                return finish_level(
                    groups,
                    group,
                    pending,
                    current,
                    pos,
                    Terminator::HashCollectionNext,
                );
            }
            Token::Eof => {
                return finish_level(groups, group, pending, current, pos, Terminator::EndOfInput);
            }
        }
    }
}

/// Recurse for an opened delimiter and insist the nested level was ended
/// by the matching close token.
fn parse_nested(
    scanner: &mut Scanner,
    depth: usize,
    expected: Terminator,
) -> Result<Vec<Vec<TypeNode>>, TypeError> {
    let (groups, terminator) = parse_level(scanner, depth + 1)?;
    expect_terminator(expected, terminator, scanner)?;
    Ok(groups)
}

/// Build the node for an angle-bracket construct.
///
/// `Hash<K, V>` is the canonical rendering of a brace hash, so a
/// Hash-named angle form with exactly two comma-separated groups
/// rebuilds the HashCollection, keeping or-joined alternatives on the
/// side of the comma they came from. Everything else is a plain
/// collection over the flattened members.
fn build_collection(name: String, mut groups: Vec<Vec<TypeNode>>) -> TypeNode {
    if name == "Hash" && groups.len() == 2 {
        let value_elements = groups.pop().unwrap_or_default();
        let key_elements = groups.pop().unwrap_or_default();
        TypeNode::HashCollection {
            key_elements,
            value_elements,
        }
    } else {
        TypeNode::Collection {
            name,
            elements: flatten(groups),
        }
    }
}

fn flatten(groups: Vec<Vec<TypeNode>>) -> Vec<TypeNode> {
    groups.into_iter().flatten().collect()
}

fn expect_terminator(
    expected: Terminator,
    found: Terminator,
    scanner: &Scanner,
) -> Result<(), TypeError> {
    if found == expected {
        Ok(())
    } else {
        Err(TypeError::UnexpectedToken {
            message: format!(
                "expecting {}, got {}",
                expected.describe(),
                found.describe()
            ),
            pos: scanner.pos(),
        })
    }
}

/// Wrap up whatever the level was holding when a close token arrived.
fn finish_level(
    mut groups: Vec<Vec<TypeNode>>,
    mut group: Vec<TypeNode>,
    mut pending: Option<String>,
    mut current: Option<TypeNode>,
    pos: usize,
    terminator: Terminator,
) -> Result<(Vec<Vec<TypeNode>>, Terminator), TypeError> {
    let node = finalize(&mut pending, &mut current, pos)?;
    group.push(node);
    groups.push(group);
    Ok((groups, terminator))
}

/// A separator or close token requires something to finalize: the
/// in-progress collection if there is one, otherwise the pending name
/// wrapped into a leaf.
fn finalize(
    pending: &mut Option<String>,
    current: &mut Option<TypeNode>,
    pos: usize,
) -> Result<TypeNode, TypeError> {
    match (current.take(), pending.take()) {
        (Some(node), _) => Ok(node),
        (None, Some(name)) => Ok(TypeNode::simple(name)),
        (None, None) => Err(TypeError::UnexpectedToken {
            message: "expecting name".to_owned(),
            pos,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple(name: &str) -> TypeNode {
        TypeNode::simple(name.to_owned())
    }

    #[test]
    fn single_name_parses_to_one_leaf() {
        assert_eq!(parse("String").unwrap(), vec![simple("String")]);
    }

    #[test]
    fn top_level_list_yields_multiple_nodes() {
        assert_eq!(parse("A, B").unwrap(), vec![simple("A"), simple("B")]);
    }

    #[test]
    fn collection_with_elements() {
        assert_eq!(
            parse("Array<String, Integer>").unwrap(),
            vec![TypeNode::Collection {
                name: "Array".to_owned(),
                elements: vec![simple("String"), simple("Integer")],
            }]
        );
    }

    #[test]
    fn bare_angle_brackets_default_to_array() {
        assert_eq!(
            parse("<String>").unwrap(),
            vec![TypeNode::Collection {
                name: "Array".to_owned(),
                elements: vec![simple("String")],
            }]
        );
    }

    #[test]
    fn parens_build_a_fixed_collection() {
        assert_eq!(
            parse("(String, Integer)").unwrap(),
            vec![TypeNode::FixedCollection {
                name: "Array".to_owned(),
                elements: vec![simple("String"), simple("Integer")],
            }]
        );
    }

    #[test]
    fn brace_hash_splits_keys_and_values() {
        assert_eq!(
            parse("Hash{Symbol => String, Integer}").unwrap(),
            vec![TypeNode::HashCollection {
                key_elements: vec![simple("Symbol")],
                value_elements: vec![simple("String"), simple("Integer")],
            }]
        );
    }

    #[test]
    fn nested_collections() {
        assert_eq!(
            parse("Array<Hash{A => B}>").unwrap(),
            vec![TypeNode::Collection {
                name: "Array".to_owned(),
                elements: vec![TypeNode::HashCollection {
                    key_elements: vec![simple("A")],
                    value_elements: vec![simple("B")],
                }],
            }]
        );
    }

    #[test]
    fn or_joins_alternatives_within_a_group() {
        assert_eq!(parse("A or B").unwrap(), vec![simple("A"), simple("B")]);
        assert_eq!(
            parse("Array<String or Integer>").unwrap(),
            parse("Array<String, Integer>").unwrap()
        );
    }

    #[test]
    fn or_binds_tighter_than_comma() {
        // One comma, three members: the or-joined pair stays together.
        assert_eq!(
            parse("Hash<String or Symbol, Integer>").unwrap(),
            vec![TypeNode::HashCollection {
                key_elements: vec![simple("String"), simple("Symbol")],
                value_elements: vec![simple("Integer")],
            }]
        );
    }

    #[test]
    fn angle_hash_with_two_groups_rebuilds_a_hash_collection() {
        assert_eq!(
            parse("Hash<Symbol, String>").unwrap(),
            parse("Hash{Symbol => String}").unwrap()
        );
    }

    #[test]
    fn angle_hash_with_other_arities_stays_a_collection() {
        assert_eq!(
            parse("Hash<A>").unwrap(),
            vec![TypeNode::Collection {
                name: "Hash".to_owned(),
                elements: vec![simple("A")],
            }]
        );
        assert_eq!(
            parse("Hash<A, B, C>").unwrap(),
            vec![TypeNode::Collection {
                name: "Hash".to_owned(),
                elements: vec![simple("A"), simple("B"), simple("C")],
            }]
        );
    }

    #[test]
    fn square_brackets_build_a_fixed_collection() {
        assert_eq!(
            parse("[String, Integer]").unwrap(),
            vec![TypeNode::FixedCollection {
                name: "Array".to_owned(),
                elements: vec![simple("String"), simple("Integer")],
            }]
        );
    }

    #[test]
    fn names_are_alias_normalized_at_parse_time() {
        assert_eq!(parse("Fixnum").unwrap(), vec![simple("Integer")]);
        assert_eq!(parse("::Foo").unwrap(), vec![simple("Foo")]);
        assert_eq!(
            parse("Array<bool>").unwrap(),
            vec![TypeNode::Collection {
                name: "Array".to_owned(),
                elements: vec![simple("Boolean")],
            }]
        );
    }

    #[test]
    fn two_names_in_a_row_fail() {
        let err = parse("Foo Bar").unwrap_err();
        assert!(matches!(err, TypeError::UnexpectedToken { .. }), "{err:?}");
    }

    #[test]
    fn name_after_completed_collection_fails() {
        let err = parse("Array<A> Foo").unwrap_err();
        assert!(matches!(err, TypeError::UnexpectedToken { .. }), "{err:?}");
    }

    #[test]
    fn separator_without_name_fails() {
        let err = parse(", B").unwrap_err();
        assert!(matches!(err, TypeError::UnexpectedToken { .. }), "{err:?}");
    }

    #[test]
    fn empty_input_fails() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, TypeError::UnexpectedToken { .. }), "{err:?}");
    }

    #[test]
    fn unterminated_collection_fails() {
        let err = parse("<String").unwrap_err();
        assert!(matches!(err, TypeError::UnexpectedToken { .. }), "{err:?}");
    }

    #[test]
    fn mismatched_close_fails() {
        let err = parse("Array<String)").unwrap_err();
        assert!(matches!(err, TypeError::UnexpectedToken { .. }), "{err:?}");
    }

    #[test]
    fn stray_close_at_top_level_fails() {
        let err = parse("String>").unwrap_err();
        assert!(matches!(err, TypeError::UnexpectedToken { .. }), "{err:?}");
    }

    #[test]
    fn hash_without_rocket_fails() {
        let err = parse("{Symbol}").unwrap_err();
        assert!(matches!(err, TypeError::UnexpectedToken { .. }), "{err:?}");
    }

    #[test]
    fn nesting_within_the_limit_is_fine() {
        let input = format!("{}String{}", "<".repeat(MAX_DEPTH), ">".repeat(MAX_DEPTH));
        assert!(parse(&input).is_ok());
    }

    #[test]
    fn nesting_beyond_the_limit_is_rejected() {
        let input = format!(
            "{}String{}",
            "<".repeat(MAX_DEPTH + 1),
            ">".repeat(MAX_DEPTH + 1)
        );
        assert_eq!(
            parse(&input).unwrap_err(),
            TypeError::DepthExceeded { limit: MAX_DEPTH }
        );
    }
}
