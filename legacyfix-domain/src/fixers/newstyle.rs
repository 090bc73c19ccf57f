use crate::engine::{EditSink, Fixer};
use crate::graph::TokenRef;

/// Classes without bases inherit from `object`.
#[derive(Debug, Default)]
pub struct NewstyleFixer;

impl Fixer for NewstyleFixer {
    fn visit(&mut self, token: TokenRef<'_>, sink: &mut EditSink<'_>) {
        if !token.is_keyword("class") {
            return;
        }
        let Some(name) = token.next() else {
            return;
        };
        match name.next_char() {
            Some(':') => sink.insert(name.end(), "(object)"),
            Some('(') => {
                if let Some((open, close)) = name.call_parens()
                    && name.graph().text()[open + 1..close].trim().is_empty()
                {
                    sink.replace_span(open + 1, close, "object");
                }
            }
            _ => {}
        }
    }
}
