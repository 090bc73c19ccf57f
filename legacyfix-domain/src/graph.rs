//! Read-only navigation over a token list and the text it was lexed from.
//!
//! Every query is pure. The graph is built once per translation and shared by
//! all fixers; a [`TokenRef`] is a cheap `Copy` handle (graph + index).

use legacyfix_types::token::{Token, TokenKind};

#[derive(Debug)]
pub struct TokenGraph<'a> {
    text: &'a str,
    tokens: &'a [Token],
    /// Byte offset of the first byte of every line.
    line_starts: Vec<usize>,
}

impl<'a> TokenGraph<'a> {
    pub fn new(text: &'a str, tokens: &'a [Token]) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            text,
            tokens,
            line_starts,
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn tokens(&self) -> &'a [Token] {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<TokenRef<'_>> {
        (index < self.tokens.len()).then_some(TokenRef { graph: self, index })
    }

    pub fn iter(&self) -> impl Iterator<Item = TokenRef<'_>> {
        (0..self.tokens.len()).map(move |index| TokenRef { graph: self, index })
    }

    /// 0-based line index of `offset`.
    pub fn line_index(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&s| s <= offset).saturating_sub(1)
    }

    /// 1-based line number of `offset`.
    pub fn line_number(&self, offset: usize) -> usize {
        self.line_index(offset) + 1
    }

    pub fn line_start(&self, offset: usize) -> usize {
        self.line_starts[self.line_index(offset)]
    }

    /// Offset of the `\n` ending the line of `offset`, or the text length.
    pub fn line_end(&self, offset: usize) -> usize {
        self.line_starts
            .get(self.line_index(offset) + 1)
            .map_or(self.text.len(), |next| next - 1)
    }

    /// Index of the first token starting at or after `offset`.
    pub fn first_at_or_after(&self, offset: usize) -> usize {
        self.tokens.partition_point(|t| t.start < offset)
    }

    /// Index of the token whose span contains `offset`.
    pub fn token_at(&self, offset: usize) -> Option<usize> {
        let i = self.tokens.partition_point(|t| t.end <= offset);
        self.tokens
            .get(i)
            .filter(|t| t.start <= offset && offset < t.end)
            .map(|_| i)
    }

    /// First occurrence of `needle` at or after `offset`.
    pub fn find_forward(&self, offset: usize, needle: &str) -> Option<usize> {
        let from = offset.min(self.text.len());
        self.text.get(from..)?.find(needle).map(|i| from + i)
    }

    /// Last occurrence of `needle` starting before `offset`.
    pub fn find_backward(&self, offset: usize, needle: &str) -> Option<usize> {
        self.text.get(..offset.min(self.text.len()))?.rfind(needle)
    }

    /// Untokenized text between token `index` and its successor (or the end of text).
    pub fn gap_after(&self, index: usize) -> &'a str {
        let start = self.tokens.get(index).map_or(0, |t| t.end);
        let end = self
            .tokens
            .get(index + 1)
            .map_or(self.text.len(), |t| t.start);
        &self.text[start..end]
    }

    /// Untokenized text before the first token.
    pub fn leading_gap(&self) -> &'a str {
        let end = self.tokens.first().map_or(self.text.len(), |t| t.start);
        &self.text[..end]
    }

    /// Offset of the bracket closing the one at `open`.
    ///
    /// Brackets of all three kinds share one depth counter. Brackets inside
    /// string and comment tokens are ignored.
    pub fn matching_close(&self, open: usize) -> Option<usize> {
        if !matches!(self.text.as_bytes().get(open), Some(b'(' | b'[' | b'{')) {
            return None;
        }
        let mut depth = 0usize;
        let mut pos = open;
        let mut next_tok = self.first_at_or_after(open);
        while pos < self.text.len() {
            if let Some(tok) = self.tokens.get(next_tok)
                && tok.start == pos
            {
                pos = tok.end;
                next_tok += 1;
                continue;
            }
            match self.text.as_bytes()[pos] {
                b'(' | b'[' | b'{' => depth += 1,
                b')' | b']' | b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(pos);
                    }
                }
                _ => {}
            }
            pos += 1;
        }
        None
    }

    /// Number of brackets still open at `offset`, counted from the start of
    /// the text. Brackets inside string and comment tokens are ignored.
    pub fn bracket_depth(&self, offset: usize) -> usize {
        let end = offset.min(self.text.len());
        let bytes = self.text.as_bytes();
        let mut depth = 0usize;
        let mut count = |from: usize, to: usize| {
            for b in &bytes[from..to] {
                match *b {
                    b'(' | b'[' | b'{' => depth += 1,
                    b')' | b']' | b'}' => depth = depth.saturating_sub(1),
                    _ => {}
                }
            }
        };
        let mut pos = 0;
        for tok in &self.tokens[..self.first_at_or_after(end)] {
            count(pos, tok.start);
            pos = tok.end;
        }
        if pos < end {
            count(pos, end);
        }
        depth
    }

    /// True if the line holding `offset` is joined to the previous one by a
    /// trailing backslash.
    pub fn is_continuation_line(&self, offset: usize) -> bool {
        let line_start = self.line_start(offset);
        let Some(prev) = self.text[..line_start].strip_suffix('\n') else {
            return false;
        };
        let prev = prev.strip_suffix('\r').unwrap_or(prev);
        prev.ends_with('\\') && self.token_at(prev.len() - 1).is_none()
    }

    /// True if `[start, end)` contains a line break outside string and comment tokens.
    pub fn spans_lines(&self, start: usize, end: usize) -> bool {
        let mut pos = start;
        for tok in &self.tokens[self.first_at_or_after(start)..] {
            if tok.start >= end {
                break;
            }
            if self.text[pos..tok.start].contains('\n') {
                return true;
            }
            if tok.kind == TokenKind::Comment {
                // A comment always runs to a line break before `end`.
                return true;
            }
            pos = tok.end.min(end);
        }
        self.text[pos..end].contains('\n')
    }
}

/// A token plus the graph it lives in.
#[derive(Clone, Copy)]
pub struct TokenRef<'g> {
    graph: &'g TokenGraph<'g>,
    index: usize,
}

impl std::fmt::Debug for TokenRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRef")
            .field("index", &self.index)
            .field("kind", &self.kind())
            .field("text", &self.text())
            .finish()
    }
}

impl<'g> TokenRef<'g> {
    pub fn graph(&self) -> &'g TokenGraph<'g> {
        self.graph
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn token(&self) -> Token {
        self.graph.tokens[self.index]
    }

    pub fn kind(&self) -> TokenKind {
        self.token().kind
    }

    pub fn start(&self) -> usize {
        self.token().start
    }

    pub fn end(&self) -> usize {
        self.token().end
    }

    pub fn text(&self) -> &'g str {
        self.token().text(self.graph.text)
    }

    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    /// Keyword or identifier spelled `word`. Words reserved in only one
    /// dialect (`print`, `exec`) match regardless of classification.
    pub fn is_name(&self, word: &str) -> bool {
        matches!(self.kind(), TokenKind::Identifier | TokenKind::Keyword) && self.text() == word
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind() == TokenKind::Keyword && self.text() == word
    }

    pub fn prev(&self) -> Option<TokenRef<'g>> {
        let index = self.index.checked_sub(1)?;
        self.graph.get(index)
    }

    pub fn next(&self) -> Option<TokenRef<'g>> {
        self.graph.get(self.index + 1)
    }

    /// Previous token that is not a comment.
    pub fn prev_code(&self) -> Option<TokenRef<'g>> {
        let mut t = self.prev()?;
        while t.is_kind(TokenKind::Comment) {
            t = t.prev()?;
        }
        Some(t)
    }

    /// Next token that is not a comment.
    pub fn next_code(&self) -> Option<TokenRef<'g>> {
        let mut t = self.next()?;
        while t.is_kind(TokenKind::Comment) {
            t = t.next()?;
        }
        Some(t)
    }

    /// Nearest non-whitespace character before the token on its first line.
    pub fn prev_char(&self) -> Option<char> {
        let start = self.start();
        let line_start = self.graph.line_start(start);
        self.graph.text[line_start..start]
            .chars()
            .rev()
            .find(|c| !c.is_whitespace())
    }

    /// Nearest non-whitespace character after the token on its last line.
    pub fn next_char(&self) -> Option<char> {
        let end = self.end();
        let line_end = self.graph.line_end(end);
        self.graph.text[end..line_end]
            .chars()
            .find(|c| !c.is_whitespace())
    }

    /// Offset of the nearest non-whitespace character after the token on its
    /// last line.
    pub fn next_char_offset(&self) -> Option<usize> {
        let end = self.end();
        let line_end = self.graph.line_end(end);
        self.graph.text[end..line_end]
            .char_indices()
            .find(|(_, c)| !c.is_whitespace())
            .map(|(i, _)| end + i)
    }

    /// Width of the leading whitespace of the token's line.
    pub fn indentation(&self) -> usize {
        let line_start = self.graph.line_start(self.start());
        self.graph.text[line_start..]
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .count()
    }

    /// Non-comment tokens lying entirely on the line(s) this token spans.
    pub fn line_tokens(&self) -> Vec<TokenRef<'g>> {
        let from = self.graph.line_start(self.start());
        let to = self.graph.line_end(self.end());
        let first = self.graph.first_at_or_after(from);
        self.graph.tokens[first..]
            .iter()
            .enumerate()
            .take_while(|(_, t)| t.end <= to)
            .filter(|(_, t)| t.kind != TokenKind::Comment)
            .map(|(i, _)| TokenRef {
                graph: self.graph,
                index: first + i,
            })
            .collect()
    }

    /// First non-comment token on this token's line.
    pub fn line_head(&self) -> Option<TokenRef<'g>> {
        self.line_tokens().into_iter().next()
    }

    pub fn line_number(&self) -> usize {
        self.graph.line_number(self.start())
    }

    pub fn gap_after(&self) -> &'g str {
        self.graph.gap_after(self.index)
    }

    pub fn gap_before(&self) -> &'g str {
        match self.index.checked_sub(1) {
            Some(prev) => self.graph.gap_after(prev),
            None => self.graph.leading_gap(),
        }
    }

    /// Offset of the `(` directly following the token (whitespace allowed),
    /// and of its matching `)`.
    pub fn call_parens(&self) -> Option<(usize, usize)> {
        let open = self.next_char_offset()?;
        if self.graph.text.as_bytes()[open] != b'(' {
            return None;
        }
        let close = self.graph.matching_close(open)?;
        Some((open, close))
    }

    pub fn find_forward(&self, needle: &str) -> Option<usize> {
        self.graph.find_forward(self.end(), needle)
    }

    pub fn find_backward(&self, needle: &str) -> Option<usize> {
        self.graph.find_backward(self.start(), needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use legacyfix_lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn with_graph<R>(src: &str, f: impl FnOnce(&TokenGraph<'_>) -> R) -> R {
        let tokens = tokenize(src).expect("tokenize");
        let graph = TokenGraph::new(src, &tokens);
        f(&graph)
    }

    fn texts(refs: &[TokenRef<'_>]) -> Vec<String> {
        refs.iter().map(|t| t.text().to_string()).collect()
    }

    #[test]
    fn neighbors_and_chars() {
        with_graph("aa bb\ncc dd", |g| {
            let t: Vec<_> = g.iter().collect();
            assert_eq!(t.len(), 4);
            assert_eq!(
                t.iter().map(|t| t.prev_char()).collect::<Vec<_>>(),
                vec![None, Some('a'), None, Some('c')]
            );
            assert_eq!(
                t.iter().map(|t| t.next_char()).collect::<Vec<_>>(),
                vec![Some('b'), None, Some('d'), None]
            );
            assert!(t[0].prev().is_none());
            assert!(t[3].next().is_none());
            assert_eq!(t[1].next().map(|n| n.text()), Some("cc"));
        });
    }

    #[test]
    fn indentation_of_lines() {
        with_graph("foo\n  foo\n    foo", |g| {
            let ind: Vec<_> = g.iter().map(|t| t.indentation()).collect();
            assert_eq!(ind, vec![0, 2, 4]);
        });
    }

    #[test]
    fn line_tokens_skip_comments() {
        with_graph("x\nfoo, bar, spam\nx, x # y", |g| {
            let t: Vec<_> = g.iter().collect();
            assert_eq!(texts(&t[0].line_tokens()), vec!["x"]);
            for i in 1..=3 {
                assert_eq!(texts(&t[i].line_tokens()), vec!["foo", "bar", "spam"]);
            }
            assert_eq!(texts(&t[4].line_tokens()), vec!["x", "x"]);
        });
    }

    #[test]
    fn multiline_token_uses_start_and_end_lines() {
        with_graph("a = '''x\ny''' + b", |g| {
            let s = g.get(1).unwrap();
            assert_eq!(s.prev_char(), Some('='));
            assert_eq!(s.next_char(), Some('+'));
            assert_eq!(texts(&s.line_tokens()), vec!["a", "'''x\ny'''", "b"]);
        });
    }

    #[test]
    fn find_and_gaps() {
        with_graph("f(a, b) # c", |g| {
            let f = g.get(0).unwrap();
            assert_eq!(f.find_forward(")"), Some(6));
            assert_eq!(g.get(2).unwrap().find_backward("("), Some(1));
            assert_eq!(f.gap_after(), "(");
            assert_eq!(g.get(1).unwrap().gap_after(), ", ");
            assert_eq!(g.get(2).unwrap().gap_after(), ") ");
            assert_eq!(g.leading_gap(), "");
        });
    }

    #[test]
    fn matching_close_ignores_strings_and_comments() {
        let src = "print(')', (1, [2]), \"(\")  # )";
        with_graph(src, |g| {
            let close = g.matching_close(5).unwrap();
            assert_eq!(&src[close..close + 1], ")");
            assert_eq!(close, src.find("\")").unwrap() + 1);
            assert_eq!(g.matching_close(0), None);
        });
        with_graph("f(a", |g| assert_eq!(g.matching_close(1), None));
    }

    #[test]
    fn call_parens_allow_whitespace() {
        with_graph("print (x)", |g| {
            assert_eq!(g.get(0).unwrap().call_parens(), Some((6, 8)));
        });
        with_graph("print x", |g| assert_eq!(g.get(0).unwrap().call_parens(), None));
    }

    #[test]
    fn spans_lines_ignores_newlines_in_strings() {
        let src = "f('''a\nb''', c)\ng(a,\n  b)";
        with_graph(src, |g| {
            let first = src.find('(').unwrap();
            let close = g.matching_close(first).unwrap();
            assert!(!g.spans_lines(first, close));
            let second = src.rfind('(').unwrap();
            let close = g.matching_close(second).unwrap();
            assert!(g.spans_lines(second, close));
        });
    }

    #[test]
    fn bracket_depth_skips_strings_and_comments() {
        let src = "x = [f('(', {\n  # )\n  a\n]\nb";
        with_graph(src, |g| {
            assert_eq!(g.bracket_depth(0), 0);
            assert_eq!(g.bracket_depth(src.find('a').unwrap()), 3);
            assert_eq!(g.bracket_depth(src.rfind('b').unwrap()), 2);
            assert_eq!(g.bracket_depth(src.len() + 10), 2);
        });
        with_graph("f(a)\nb", |g| assert_eq!(g.bracket_depth(5), 0));
    }

    #[test]
    fn continuation_lines() {
        let src = "x = \\\n  a\ny = 1 # \\\nb\r\nc \\\r\n d";
        with_graph(src, |g| {
            assert!(!g.is_continuation_line(0));
            assert!(g.is_continuation_line(src.find("  a").unwrap()));
            assert!(!g.is_continuation_line(src.find("y =").unwrap()));
            assert!(!g.is_continuation_line(src.find("b\r").unwrap()));
            assert!(!g.is_continuation_line(src.find("c \\").unwrap()));
            assert!(g.is_continuation_line(src.find(" d").unwrap()));
        });
    }

    #[test]
    fn token_at_and_lines() {
        with_graph("ab cd\nef", |g| {
            assert_eq!(g.token_at(1), Some(0));
            assert_eq!(g.token_at(2), None);
            assert_eq!(g.token_at(6), Some(2));
            assert_eq!(g.line_number(7), 2);
            assert_eq!(g.line_start(7), 6);
            assert_eq!(g.line_end(0), 5);
            assert_eq!(g.line_end(7), 8);
        });
    }
}
