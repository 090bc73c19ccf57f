use legacyfix_types::token::TokenKind;

use crate::engine::{EditSink, Fixer};
use crate::graph::TokenRef;

/// Maps text-type builtins onto their legacy unicode counterparts.
///
/// Local heuristic: a rebound `str` or a value that is really bytes will be
/// rewritten all the same.
#[derive(Debug, Default)]
pub struct UnicodeFixer;

impl Fixer for UnicodeFixer {
    fn visit(&mut self, token: TokenRef<'_>, sink: &mut EditSink<'_>) {
        if !token.is_kind(TokenKind::Identifier) || !is_builtin_use(token) {
            return;
        }
        match token.text() {
            "str" if token.next_char() == Some('(') => sink.replace(token, "unicode"),
            "chr" if token.next_char() == Some('(') => sink.replace(token, "unichr"),
            "isinstance" => {
                if let Some((_, close)) = token.call_parens() {
                    rewrite_type_checks(token, close, sink);
                }
            }
            _ => {}
        }
    }
}

/// Not an attribute and not the name being defined.
fn is_builtin_use(token: TokenRef<'_>) -> bool {
    token.prev_char() != Some('.')
        && !token
            .prev_code()
            .is_some_and(|p| p.is_keyword("def") || p.is_keyword("class"))
}

/// Bare `str` inside an `isinstance(...)` call checks for any text type.
fn rewrite_type_checks(call: TokenRef<'_>, close: usize, sink: &mut EditSink<'_>) {
    let mut next = call.next();
    while let Some(tok) = next
        && tok.start() < close
    {
        if tok.is_kind(TokenKind::Identifier)
            && tok.text() == "str"
            && tok.prev_char() != Some('.')
            && tok.next_char() != Some('(')
        {
            sink.replace(tok, "basestring");
        }
        next = tok.next();
    }
}
