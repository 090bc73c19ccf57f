//! Character cursor over a `&str`.
//!
//! The cursor position is always a byte offset on a `char` boundary, so any
//! span built from two cursor positions can be sliced out of the source.

#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[cfg(test)]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    #[inline]
    pub(crate) fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Character `n` positions ahead of the current one (`peek_nth(0) == peek()`).
    pub(crate) fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Advance past `n` bytes. `n` must land on a `char` boundary.
    pub(crate) fn skip_bytes(&mut self, n: usize) {
        debug_assert!(self.src.is_char_boundary(self.pos + n));
        self.pos += n;
    }
}
