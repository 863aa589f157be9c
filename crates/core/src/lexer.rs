//! Scanner for type-annotation text.
//!
//! A positional cursor that tries a fixed, priority-ordered list of
//! lexical categories at the current position and returns the first
//! match, consuming its text. The parser pulls tokens one at a time, so
//! a structural error early in the text wins over a lexical error later
//! in it.

use crate::error::TypeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<`
    CollectionStart,
    /// `>`
    CollectionEnd,
    /// `(`
    FixedCollectionStart,
    /// `)`
    FixedCollectionEnd,
    /// `[` -- canonical tuple form, so renderings re-parse
    TupleStart,
    /// `]`
    TupleEnd,
    /// A duck-type reference (`#ident`) or a possibly-namespaced
    /// identifier (`Foo`, `Foo::Bar`, `::Foo`)
    TypeName(String),
    /// `,` or `;`
    TypeNext,
    /// `{`
    HashCollectionStart,
    /// `=>`
    HashCollectionNext,
    /// `}`
    HashCollectionEnd,
    /// Exactly at end of text, nothing consumed
    Eof,
}

pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    pub fn new(text: &str) -> Self {
        Scanner {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    /// Cursor position in characters, for error reporting.
    pub fn pos(&self) -> usize {
        self.pos
    }

    fn peek(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    /// Scan the next token at the cursor. Whitespace is consumed and
    /// never surfaces as a token.
    pub fn next_token(&mut self) -> Result<Token, TypeError> {
        while self.peek(0).is_some_and(char::is_whitespace) {
            self.pos += 1;
        }

        let Some(c) = self.peek(0) else {
            return Ok(Token::Eof);
        };

        let token = match c {
            '<' => {
                self.pos += 1;
                Token::CollectionStart
            }
            '>' => {
                self.pos += 1;
                Token::CollectionEnd
            }
            '(' => {
                self.pos += 1;
                Token::FixedCollectionStart
            }
            ')' => {
                self.pos += 1;
                Token::FixedCollectionEnd
            }
            '[' => {
                self.pos += 1;
                Token::TupleStart
            }
            ']' => {
                self.pos += 1;
                Token::TupleEnd
            }
            ',' | ';' => {
                self.pos += 1;
                Token::TypeNext
            }
            '{' => {
                self.pos += 1;
                Token::HashCollectionStart
            }
            '}' => {
                self.pos += 1;
                Token::HashCollectionEnd
            }
            '=' if self.peek(1) == Some('>') => {
                self.pos += 2;
                Token::HashCollectionNext
            }
            '#' if self.peek(1).is_some_and(is_word_char) => Token::TypeName(self.scan_duck_type()),
            _ if self.name_starts_here() => Token::TypeName(self.scan_name()),
            _ => {
                return Err(TypeError::InvalidCharacter { ch: c, pos: self.pos });
            }
        };

        Ok(token)
    }

    /// `#` followed by at least one word character (already checked).
    fn scan_duck_type(&mut self) -> String {
        let start = self.pos;
        self.pos += 1;
        while self.peek(0).is_some_and(is_word_char) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn name_starts_here(&self) -> bool {
        match self.peek(0) {
            Some(c) if is_word_char(c) => true,
            // Leading `::` counts only when a word character follows.
            Some(':') => self.peek(1) == Some(':') && self.peek(2).is_some_and(is_word_char),
            _ => false,
        }
    }

    /// A `::`-separated identifier with an optional leading `::`.
    /// A trailing or unpaired `:` is left for the next scan to reject.
    fn scan_name(&mut self) -> String {
        let start = self.pos;
        if self.peek(0) == Some(':') {
            self.pos += 2;
        }
        loop {
            while self.peek(0).is_some_and(is_word_char) {
                self.pos += 1;
            }
            if self.peek(0) == Some(':')
                && self.peek(1) == Some(':')
                && self.peek(2).is_some_and(is_word_char)
            {
                self.pos += 2;
            } else {
                break;
            }
        }
        self.chars[start..self.pos].iter().collect()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
