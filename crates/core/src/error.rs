/// All errors that can be returned while normalizing a type annotation.
///
/// Every failure aborts the current parse immediately; no partial result
/// is ever returned. The caller decides whether to skip the annotation or
/// abort its own pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// A structural rule was violated -- two names in a row, or a
    /// separator/close with nothing to finalize before it.
    #[error("unexpected token at {pos}: {message}")]
    UnexpectedToken { message: String, pos: usize },

    /// The scanner found no lexical category matching at the cursor.
    #[error("invalid character '{ch}' at {pos}")]
    InvalidCharacter { ch: char, pos: usize },

    /// A single-annotation parse produced more than one top-level type.
    #[error("got {count} types back from a single annotation: {rendered}")]
    MultipleResults { rendered: String, count: usize },

    /// The alternatives entry point received a non-textual element.
    #[error("expected {expected}, got {got}")]
    InputType {
        expected: &'static str,
        got: &'static str,
    },

    /// Bracket nesting exceeded the fixed recursion limit.
    #[error("nesting deeper than {limit} levels")]
    DepthExceeded { limit: usize },
}
