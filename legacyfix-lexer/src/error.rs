use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// End of input before the closing quote of a single-quoted string.
    UnterminatedString,
    /// End of input before the closing quotes of a triple-quoted string.
    UnterminatedTripleString,
    /// Unescaped line break inside a single-quoted string.
    NewlineInString,
}

impl LexErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LexErrorKind::UnterminatedString => "unterminated string literal",
            LexErrorKind::UnterminatedTripleString => "unterminated triple-quoted string literal",
            LexErrorKind::NewlineInString => "line break inside single-quoted string literal",
        }
    }
}

/// Fatal lexical error. `offset` is the byte offset of the literal's first
/// byte (including any prefix); `line` and `column` are 1-based, with the
/// column counted in characters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} at line {line}, column {column}", kind.as_str())]
pub struct LexError {
    pub kind: LexErrorKind,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl LexError {
    pub(crate) fn at(kind: LexErrorKind, source: &str, offset: usize) -> Self {
        let (line, column) = line_col(source, offset);
        Self {
            kind,
            offset,
            line,
            column,
        }
    }
}

/// 1-based line and character column of a byte offset.
///
/// Offsets past the end clamp to the end of `source`.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    let before = &source[..end];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
