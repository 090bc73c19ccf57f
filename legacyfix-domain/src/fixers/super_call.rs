use crate::engine::{EditSink, Fixer};
use crate::graph::TokenRef;
use crate::syntax::squeeze;

use legacyfix_types::token::TokenKind;

/// `super()` inside a method becomes `super(Class, first_param)`.
///
/// Scopes are tracked by indentation of `class` and `def` lines only.
#[derive(Debug, Default)]
pub struct SuperFixer {
    classes: Vec<(usize, String)>,
    defs: Vec<(usize, Option<String>)>,
}

impl SuperFixer {
    fn close_scopes(&mut self, indent: usize) {
        self.classes.retain(|(i, _)| *i < indent);
        self.defs.retain(|(i, _)| *i < indent);
    }

    /// Class and first parameter of the method enclosing a line indented by `indent`.
    ///
    /// `None` when the method has no plain first parameter to pass along.
    fn enclosing_method(&self, indent: usize) -> Option<(&str, &str)> {
        let (class_indent, class) = self.classes.last()?;
        let (def_indent, param) = self.defs.last()?;
        if !(class_indent < def_indent && *def_indent < indent) {
            return None;
        }
        Some((class.as_str(), param.as_deref()?))
    }
}

impl Fixer for SuperFixer {
    fn visit(&mut self, token: TokenRef<'_>, sink: &mut EditSink<'_>) {
        if token.is_keyword("class") {
            self.close_scopes(token.indentation());
            if let Some(name) = token.next() {
                self.classes
                    .push((token.indentation(), name.text().to_string()));
            }
            return;
        }
        if token.is_keyword("def") {
            self.close_scopes(token.indentation());
            let param = token
                .next()
                .filter(|name| squeeze(name.gap_after()) == "(")
                .and_then(|name| name.next())
                .filter(|p| p.is_kind(TokenKind::Identifier))
                .map(|p| p.text().to_string());
            self.defs.push((token.indentation(), param));
            return;
        }

        if !token.is_kind(TokenKind::Identifier)
            || token.text() != "super"
            || token.prev_char() == Some('.')
        {
            return;
        }
        let Some((open, close)) = token.call_parens() else {
            return;
        };
        if !token.graph().text()[open + 1..close].trim().is_empty() {
            return;
        }
        if let Some((class, param)) = self.enclosing_method(token.indentation()) {
            sink.replace_span(open + 1, close, format!("{class}, {param}"));
        }
    }
}
