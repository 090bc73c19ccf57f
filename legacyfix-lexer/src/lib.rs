//! Single-pass lexer for Python source.
//!
//! The lexer recognises only what the fixers need: comments, string literals
//! (every prefix and quote style), numbers, and identifiers/keywords. All
//! other bytes (operators, brackets, whitespace) are consumed silently and
//! remain in the gaps between tokens, where the reconstruction engine copies
//! them verbatim.

mod cursor;
mod error;
mod keywords;
mod scan;

pub use error::{LexError, LexErrorKind, line_col};
pub use keywords::KeywordSet;
pub use scan::{Lexer, tokenize};

pub use legacyfix_types::token::{Token, TokenKind};
