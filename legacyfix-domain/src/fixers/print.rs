use crate::engine::{EditSink, Fixer};
use crate::graph::{TokenGraph, TokenRef};
use crate::syntax::at_statement_start;

/// Rewrites `print(...)` calls in statement position to the print statement.
///
/// Calls whose arguments have no statement equivalent are left alone and
/// reported as notes.
#[derive(Debug, Default)]
pub struct PrintFixer;

/// What the keyword arguments of one call translate to.
#[derive(Debug, Default)]
struct Keywords<'a> {
    file: Option<&'a str>,
    soft_space: bool,
}

impl Fixer for PrintFixer {
    fn visit(&mut self, token: TokenRef<'_>, sink: &mut EditSink<'_>) {
        if !token.is_name("print") || !at_statement_start(token) {
            return;
        }
        let Some((open, close)) = token.call_parens() else {
            return;
        };
        let graph = token.graph();
        let text = graph.text();

        let tail = text[close + 1..graph.line_end(close)].trim_start();
        if !(tail.is_empty() || tail.starts_with(';') || tail.starts_with('#')) {
            return;
        }
        if graph.spans_lines(open, close) {
            sink.note(token.start(), "print call spanning several lines left unchanged");
            return;
        }

        let mut positional = Vec::new();
        let mut keywords = Keywords::default();
        for (start, end) in split_args(graph, open, close) {
            let arg = &text[start..end];
            if arg.starts_with('*') {
                sink.note(start, "print call with star arguments left unchanged");
                return;
            }
            match split_keyword(arg) {
                Some((name, value)) => {
                    if let Err(message) = keywords.accept(name, value) {
                        sink.note(start, message);
                        return;
                    }
                }
                None => positional.push((start, end)),
            }
        }

        match (positional.first(), positional.last()) {
            (Some(&(first, _)), Some(&(_, last))) => {
                // A lone generator argument keeps its parentheses.
                let (lparen, rparen) = match positional.as_slice() {
                    [arg] if is_bare_generator(graph, open, *arg) => ("(", ")"),
                    _ => ("", ""),
                };
                let head = match keywords.file {
                    Some(file) => format!(" >>{file}, {lparen}"),
                    None => format!(" {lparen}"),
                };
                let trail = if keywords.soft_space { "," } else { "" };
                sink.replace_span(token.end(), first, head);
                sink.replace_span(last, close + 1, format!("{rparen}{trail}"));
            }
            _ => {
                if keywords.soft_space {
                    sink.note(token.start(), "print call with only end=' ' left unchanged");
                    return;
                }
                let text = keywords
                    .file
                    .map(|file| format!(" >>{file}"))
                    .unwrap_or_default();
                sink.replace_span(token.end(), close + 1, text);
            }
        }
    }
}

impl<'a> Keywords<'a> {
    fn accept(&mut self, name: &str, value: &'a str) -> Result<(), String> {
        let supported = match name {
            "sep" => is_string_literal(value, " "),
            "end" if is_string_literal(value, "\\n") => true,
            "end" if is_string_literal(value, " ") => {
                self.soft_space = true;
                true
            }
            "flush" => value == "False",
            "file" => {
                self.file = Some(value);
                true
            }
            _ => false,
        };
        if supported {
            Ok(())
        } else {
            Err(format!("print call with keyword argument {name}={value} left unchanged"))
        }
    }
}

fn is_string_literal(value: &str, body: &str) -> bool {
    ['\'', '"'].iter().any(|q| {
        value
            .strip_prefix(*q)
            .and_then(|v| v.strip_suffix(*q))
            .is_some_and(|v| v == body)
    })
}

/// `name=value` with `name` a plain identifier.
fn split_keyword(arg: &str) -> Option<(&str, &str)> {
    let (name, value) = arg.split_once('=')?;
    let name = name.trim_end();
    let ident = name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_alphanumeric() || c == '_');
    if !ident || value.starts_with('=') {
        return None;
    }
    Some((name, value.trim_start()))
}

/// True if the argument `[start, end)` of the call opened at `open` holds a
/// `for` directly at the call's bracket level.
fn is_bare_generator(graph: &TokenGraph<'_>, open: usize, (start, end): (usize, usize)) -> bool {
    let depth = graph.bracket_depth(open) + 1;
    (graph.first_at_or_after(start)..graph.len())
        .filter_map(|i| graph.get(i))
        .take_while(|t| t.end() <= end)
        .any(|t| t.is_name("for") && graph.bracket_depth(t.start()) == depth)
}

/// Trimmed spans of the top-level arguments between `open` and `close`.
/// Empty arguments (a trailing comma, an empty call) are dropped.
fn split_args(graph: &TokenGraph<'_>, open: usize, close: usize) -> Vec<(usize, usize)> {
    let bytes = graph.text().as_bytes();
    let mut raw = Vec::new();
    let mut depth = 0usize;
    let mut arg_start = open + 1;
    let mut pos = open + 1;
    let mut next_tok = graph.first_at_or_after(pos);
    while pos < close {
        if let Some(tok) = graph.get(next_tok)
            && tok.start() == pos
        {
            pos = tok.end();
            next_tok += 1;
            continue;
        }
        match bytes[pos] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                raw.push((arg_start, pos));
                arg_start = pos + 1;
            }
            _ => {}
        }
        pos += 1;
    }
    raw.push((arg_start, close));

    raw.into_iter()
        .filter_map(|(start, end)| {
            let arg = &graph.text()[start..end];
            let trimmed = arg.trim_start();
            let start = start + (arg.len() - trimmed.len());
            let end = start + trimmed.trim_end().len();
            (start < end).then_some((start, end))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixers::test_support::{fix, notes};
    use pretty_assertions::assert_eq;

    #[test]
    fn positional_arguments() {
        assert_eq!(fix("print", "print(x, y)\n"), "print x, y\n");
        assert_eq!(fix("print", "print()\n"), "print\n");
        assert_eq!(fix("print", "print((a, b))\n"), "print (a, b)\n");
        assert_eq!(fix("print", "print(a,)\n"), "print a\n");
        assert_eq!(fix("print", "print (\"x\")  # c\n"), "print \"x\"  # c\n");
    }

    #[test]
    fn statement_positions() {
        assert_eq!(fix("print", "print(x); print(y)\n"), "print x; print y\n");
        assert_eq!(fix("print", "if x: print(y)\n"), "if x: print y\n");
        for src in ["x = print\n", "f(print(x))\n", "obj.print(x)\n", "print(x) or y\n", "print x\n"] {
            assert_eq!(fix("print", src), src);
        }
    }

    #[test]
    fn lines_inside_brackets_or_continued_untouched() {
        for src in [
            "x = [\n    print(a)\n]\n",
            "f(\n    print(a)\n)\n",
            "x = \\\n    print(a)\n",
        ] {
            assert_eq!(fix("print", src), src);
        }
        assert_eq!(
            fix("print", "x = [\n    1,\n]\nprint(a)\n"),
            "x = [\n    1,\n]\nprint a\n"
        );
    }

    #[test]
    fn generator_argument_keeps_parentheses() {
        assert_eq!(
            fix("print", "print(x for x in y)\n"),
            "print (x for x in y)\n"
        );
        assert_eq!(
            fix("print", "print([x for x in y])\n"),
            "print [x for x in y]\n"
        );
        assert_eq!(
            fix("print", "print((x for x in y))\n"),
            "print (x for x in y)\n"
        );
    }

    #[test]
    fn translated_keywords() {
        assert_eq!(
            fix("print", "print(x, file=sys.stderr)\n"),
            "print >>sys.stderr, x\n"
        );
        assert_eq!(fix("print", "print(file=f)\n"), "print >>f\n");
        assert_eq!(fix("print", "print(a, end=' ')\n"), "print a,\n");
        assert_eq!(
            fix("print", "print(a, b, sep=\" \", end='\\n', flush=False)\n"),
            "print a, b\n"
        );
    }

    #[test]
    fn untranslatable_calls_are_noted() {
        for src in [
            "print(x, sep='-')\n",
            "print(*args)\n",
            "print(a,\n      b)\n",
            "print(end=' ')\n",
            "print(x, flush=True)\n",
        ] {
            assert_eq!(fix("print", src), src);
            let found = notes("print", src);
            assert_eq!(found.len(), 1, "{src:?}");
            assert_eq!(found[0].fixer, "print");
            assert_eq!(found[0].line, 1);
        }
    }

    #[test]
    fn comparison_is_not_a_keyword() {
        assert_eq!(split_keyword("a == b"), None);
        assert_eq!(split_keyword("f(a=1)"), None);
        assert_eq!(split_keyword("sep = '-'"), Some(("sep", "'-'")));
    }
}
