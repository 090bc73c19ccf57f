use legacyfix_types::token::TokenKind;

use crate::engine::{EditSink, Fixer};
use crate::graph::TokenRef;

/// `getcwd(` returns text in the modern dialect, `getcwdb(` returns bytes.
#[derive(Debug, Default)]
pub struct GetcwdFixer;

impl Fixer for GetcwdFixer {
    fn visit(&mut self, token: TokenRef<'_>, sink: &mut EditSink<'_>) {
        if !token.is_kind(TokenKind::Identifier) || token.next_char() != Some('(') {
            return;
        }
        match token.text() {
            "getcwd" => sink.replace(token, "getcwdu"),
            "getcwdb" => sink.replace(token, "getcwd"),
            _ => {}
        }
    }
}
