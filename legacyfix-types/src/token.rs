use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Lexical category of a token.
///
/// Operators, brackets, and whitespace are never tokenized; they live in the
/// gaps between tokens and are reproduced verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Comment,
    String,
    Keyword,
    Number,
    Identifier,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Comment => "comment",
            TokenKind::String => "string",
            TokenKind::Keyword => "keyword",
            TokenKind::Number => "number",
            TokenKind::Identifier => "identifier",
        }
    }
}

/// A lexical unit with its half-open byte span `[start, end)` in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "token span must not be inverted");
        Self { kind, start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Slice of `source` covered by this token.
    ///
    /// `source` must be the text the token was lexed from.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
