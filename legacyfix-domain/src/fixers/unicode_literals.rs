use legacyfix_types::token::TokenKind;

use crate::engine::{EditSink, Fixer};
use crate::graph::TokenRef;

/// String literals without a `u`, `b` or `f` prefix become unicode literals.
#[derive(Debug, Default)]
pub struct UnicodeLiteralsFixer;

impl Fixer for UnicodeLiteralsFixer {
    fn visit(&mut self, token: TokenRef<'_>, sink: &mut EditSink<'_>) {
        if !token.is_kind(TokenKind::String) {
            return;
        }
        let text = token.text();
        let prefix = &text[..text.find(['\'', '"']).unwrap_or(0)];
        if !prefix.chars().any(|c| matches!(c, 'u' | 'U' | 'b' | 'B' | 'f' | 'F')) {
            sink.insert(token.start(), "u");
        }
    }
}
