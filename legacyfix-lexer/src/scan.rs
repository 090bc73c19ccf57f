use std::sync::LazyLock;

use legacyfix_types::token::{Token, TokenKind};
use tracing::debug;

use crate::cursor::Cursor;
use crate::error::{LexError, LexErrorKind};
use crate::keywords::KeywordSet;

static DEFAULT_KEYWORDS: LazyLock<KeywordSet> = LazyLock::new(KeywordSet::default);

/// Tokenize `source` with the default (union) keyword set.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source, &DEFAULT_KEYWORDS).tokenize()
}

pub struct Lexer<'a> {
    src: &'a str,
    keywords: &'a KeywordSet,
    cursor: Cursor<'a>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str, keywords: &'a KeywordSet) -> Self {
        Self {
            src,
            keywords,
            cursor: Cursor::new(src),
            tokens: Vec::new(),
        }
    }

    /// Produce the ordered, non-overlapping token list or the first lexical
    /// error. Never returns a partial list.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(c) = self.cursor.peek() {
            let start = self.cursor.pos();
            match c {
                '#' => self.comment(start),
                '\'' | '"' => self.string(start)?,
                '0'..='9' => self.number(start),
                '.' if self.cursor.peek_nth(1).is_some_and(|d| d.is_ascii_digit()) => {
                    self.number(start)
                }
                c if is_ident_start(c) => self.word(start)?,
                _ => {
                    self.cursor.bump();
                }
            }
        }
        debug!(
            tokens = self.tokens.len(),
            bytes = self.src.len(),
            "tokenized source"
        );
        Ok(self.tokens)
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, start, self.cursor.pos()));
    }

    fn comment(&mut self, start: usize) {
        self.cursor.eat_while(|c| c != '\n' && c != '\r');
        self.push(TokenKind::Comment, start);
    }

    /// Identifier, keyword, or a string literal behind a prefix such as `rb`.
    fn word(&mut self, start: usize) -> Result<(), LexError> {
        self.cursor.eat_while(is_ident_continue);
        let text = &self.src[start..self.cursor.pos()];
        if matches!(self.cursor.peek(), Some('\'' | '"')) && is_string_prefix(text) {
            return self.string(start);
        }
        let kind = if self.keywords.contains(text) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.push(kind, start);
        Ok(())
    }

    /// Cursor sits on the opening quote; `start` includes any prefix.
    fn string(&mut self, start: usize) -> Result<(), LexError> {
        let Some(quote) = self.cursor.peek() else {
            return Err(LexError::at(LexErrorKind::UnterminatedString, self.src, start));
        };
        let triple: &str = if quote == '"' { "\"\"\"" } else { "'''" };
        if self.cursor.starts_with(triple) {
            self.cursor.skip_bytes(3);
            self.triple_quoted_body(start, triple)?;
        } else {
            self.cursor.bump();
            self.single_quoted_body(start, quote)?;
        }
        self.push(TokenKind::String, start);
        Ok(())
    }

    fn triple_quoted_body(&mut self, start: usize, close: &str) -> Result<(), LexError> {
        loop {
            if self.cursor.starts_with(close) {
                self.cursor.skip_bytes(3);
                return Ok(());
            }
            match self.cursor.bump() {
                None => {
                    return Err(LexError::at(
                        LexErrorKind::UnterminatedTripleString,
                        self.src,
                        start,
                    ));
                }
                Some('\\') => {
                    self.cursor.bump();
                }
                Some(_) => {}
            }
        }
    }

    fn single_quoted_body(&mut self, start: usize, quote: char) -> Result<(), LexError> {
        loop {
            match self.cursor.bump() {
                None => {
                    return Err(LexError::at(LexErrorKind::UnterminatedString, self.src, start));
                }
                Some('\n' | '\r') => {
                    return Err(LexError::at(LexErrorKind::NewlineInString, self.src, start));
                }
                Some('\\') => {
                    // An escaped CRLF continues the literal on the next line.
                    if self.cursor.bump() == Some('\r') {
                        self.cursor.eat('\n');
                    }
                }
                Some(c) if c == quote => return Ok(()),
                Some(_) => {}
            }
        }
    }

    fn number(&mut self, start: usize) {
        let radix_prefix = self.cursor.peek() == Some('0')
            && matches!(
                self.cursor.peek_nth(1),
                Some('x' | 'X' | 'o' | 'O' | 'b' | 'B')
            );
        if radix_prefix {
            self.cursor.skip_bytes(2);
            self.cursor.eat_while(|c| c.is_ascii_hexdigit() || c == '_');
            if matches!(self.cursor.peek(), Some('l' | 'L')) {
                self.cursor.bump();
            }
            self.push(TokenKind::Number, start);
            return;
        }

        self.cursor.eat_while(is_digit_or_sep);
        if self.cursor.eat('.') {
            self.cursor.eat_while(is_digit_or_sep);
        }
        if matches!(self.cursor.peek(), Some('e' | 'E')) {
            let signed = matches!(self.cursor.peek_nth(1), Some('+' | '-'));
            let digit_at = if signed { 2 } else { 1 };
            if self
                .cursor
                .peek_nth(digit_at)
                .is_some_and(|d| d.is_ascii_digit())
            {
                self.cursor.bump();
                if signed {
                    self.cursor.bump();
                }
                self.cursor.eat_while(is_digit_or_sep);
            }
        }
        if matches!(self.cursor.peek(), Some('j' | 'J' | 'l' | 'L')) {
            self.cursor.bump();
        }
        self.push(TokenKind::Number, start);
    }
}

fn is_digit_or_sep(c: char) -> bool {
    c.is_ascii_digit() || c == '_'
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || (!c.is_ascii() && c.is_alphabetic())
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || (!c.is_ascii() && c.is_alphanumeric())
}

/// `r`, `u`, `b`, `f` and the two-letter combinations `br`, `rb`, `fr`, `rf`,
/// in any case.
fn is_string_prefix(text: &str) -> bool {
    if text.len() > 2 {
        return false;
    }
    let lower = text.to_ascii_lowercase();
    matches!(
        lower.as_str(),
        "r" | "u" | "b" | "f" | "br" | "rb" | "fr" | "rf"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(src: &str) -> Vec<(TokenKind, &str)> {
        tokenize(src)
            .expect("tokenize")
            .into_iter()
            .map(|t| (t.kind, t.text(src)))
            .collect()
    }

    fn all_of(src: &str, kind: TokenKind) -> usize {
        let toks = tokenize(src).expect("tokenize");
        assert!(toks.iter().all(|t| t.kind == kind), "{src:?}: {toks:?}");
        toks.len()
    }

    #[test]
    fn comments_hide_quotes() {
        let src = "# foo ''\n# ''' x '''\n# hi # hi\n";
        assert_eq!(all_of(src, TokenKind::Comment), 3);
        let toks = tokenize(src).expect("tokenize");
        assert_eq!(toks[0].text(src), "# foo ''");
    }

    #[test]
    fn strings_with_prefixes_and_triple_quotes() {
        let src = "\n''' foo\n'''\nb''' bar\n'''\n'spam'\nb'eggs'\n''\nb''\n";
        assert_eq!(all_of(src, TokenKind::String), 6);
    }

    #[test]
    fn empty_strings_of_every_style() {
        for s in ["\"\"", "''", "b\"\"", "\"\"\"\"\"\"", "''''''", "b\"\"\"\"\"\""] {
            let src = format!("{s} {s}");
            assert_eq!(all_of(&src, TokenKind::String), 2, "{src}");
        }
    }

    #[test]
    fn escaped_quotes_stay_inside() {
        let src = "\" \\\"  \\\" \"";
        assert_eq!(all_of(src, TokenKind::String), 1);
    }

    #[test]
    fn raw_string_backslash_still_escapes_quote() {
        let src = r#"x = r'a\'b' + y"#;
        assert_eq!(
            kinds(src),
            vec![
                (TokenKind::Identifier, "x"),
                (TokenKind::String, r"r'a\'b'"),
                (TokenKind::Identifier, "y"),
            ]
        );
    }

    #[test]
    fn all_prefix_combinations() {
        for p in ["r", "u", "b", "f", "br", "rb", "fr", "rf", "Rb", "BR", "F", "U"] {
            let src = format!("{p}'x' {p}\"\"\"y\"\"\"");
            assert_eq!(all_of(&src, TokenKind::String), 2, "{src}");
        }
    }

    #[test]
    fn invalid_prefix_is_identifier() {
        assert_eq!(
            kinds("ub'x'"),
            vec![(TokenKind::Identifier, "ub"), (TokenKind::String, "'x'")]
        );
    }

    #[test]
    fn numbers() {
        assert_eq!(all_of("", TokenKind::Number), 0);
        assert_eq!(all_of("3", TokenKind::Number), 1);
        assert_eq!(all_of("0x10, 100", TokenKind::Number), 2);
        for n in ["1_000", "0o17", "0b1010", "3.14", ".5", "1.", "1e10", "1.5E-3", "2j", "10L", "0xffL"] {
            assert_eq!(kinds(n), vec![(TokenKind::Number, n)], "{n}");
        }
    }

    #[test]
    fn exponent_needs_digits() {
        assert_eq!(
            kinds("1else"),
            vec![(TokenKind::Number, "1"), (TokenKind::Keyword, "else")]
        );
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(all_of("for", TokenKind::Keyword), 1);
        assert_eq!(all_of("yield, return", TokenKind::Keyword), 2);
        assert_eq!(all_of("foo", TokenKind::Identifier), 1);
        assert_eq!(all_of("foo + bar1", TokenKind::Identifier), 2);
        assert_eq!(all_of("foo, bar.spam2", TokenKind::Identifier), 3);
    }

    #[test]
    fn non_ascii_identifiers() {
        assert_eq!(
            kinds("naïve = größe"),
            vec![(TokenKind::Identifier, "naïve"), (TokenKind::Identifier, "größe")]
        );
    }

    #[test]
    fn print_classification_follows_keyword_set() {
        let src = "print(x)";
        assert_eq!(kinds(src)[0], (TokenKind::Keyword, "print"));
        let modern = KeywordSet::modern();
        let toks = Lexer::new(src, &modern).tokenize().expect("tokenize");
        assert_eq!(toks[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn backslash_newline_continues_single_quoted() {
        let src = "s = 'a\\\nb'";
        assert_eq!(kinds(src)[1], (TokenKind::String, "'a\\\nb'"));
        let src = "s = 'a\\\r\nb'";
        assert_eq!(kinds(src)[1], (TokenKind::String, "'a\\\r\nb'"));
    }

    #[test]
    fn unterminated_single_quoted() {
        let err = tokenize("x = 'abc").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
        assert_eq!((err.offset, err.line, err.column), (4, 1, 5));
    }

    #[test]
    fn newline_in_single_quoted() {
        let err = tokenize("a\nx = \"abc\ny\"").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::NewlineInString);
        assert_eq!((err.line, err.column), (2, 5));
    }

    #[test]
    fn unterminated_triple_quoted() {
        let err = tokenize("'''doc\n\nmore").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedTripleString);
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn operators_are_not_tokens() {
        assert_eq!(
            kinds("a[1] @= (b ** -2) // c"),
            vec![
                (TokenKind::Identifier, "a"),
                (TokenKind::Number, "1"),
                (TokenKind::Identifier, "b"),
                (TokenKind::Number, "2"),
                (TokenKind::Identifier, "c"),
            ]
        );
    }
}
