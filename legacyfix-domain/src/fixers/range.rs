use legacyfix_types::token::TokenKind;

use crate::engine::{EditSink, Fixer};
use crate::graph::TokenRef;

#[derive(Debug, Default)]
pub struct RangeFixer;

impl Fixer for RangeFixer {
    fn visit(&mut self, token: TokenRef<'_>, sink: &mut EditSink<'_>) {
        if !token.is_kind(TokenKind::Identifier) || token.text() != "range" {
            return;
        }
        if token.next_char() != Some('(') || token.prev_char() == Some('.') {
            return;
        }
        if token
            .prev_code()
            .is_some_and(|p| p.is_keyword("def") || p.is_keyword("class"))
        {
            return;
        }
        sink.replace(token, "xrange");
    }
}
