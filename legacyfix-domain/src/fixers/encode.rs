use legacyfix_types::token::TokenKind;

use crate::engine::{EditSink, Fixer};
use crate::graph::TokenRef;

/// `.encode()` / `.decode()` without arguments get an explicit `"utf-8"`.
#[derive(Debug, Default)]
pub struct EncodeFixer;

impl Fixer for EncodeFixer {
    fn visit(&mut self, token: TokenRef<'_>, sink: &mut EditSink<'_>) {
        if !token.is_kind(TokenKind::Identifier)
            || !matches!(token.text(), "encode" | "decode")
            || token.prev_char() != Some('.')
        {
            return;
        }
        let Some((open, close)) = token.call_parens() else {
            return;
        };
        if token.graph().text()[open + 1..close].trim().is_empty() {
            sink.replace_span(open + 1, close, "\"utf-8\"");
        }
    }
}
