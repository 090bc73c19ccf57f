use crate::engine::{EditSink, Fixer};
use crate::graph::{TokenGraph, TokenRef};
use crate::syntax::{header_offset, imports_symbol};

const IMPORT_LINE: &str = "from __future__ import division\n";

/// Adds the division future import to modules that use `/` or `/=`.
#[derive(Debug, Default)]
pub struct DivisionFixer;

impl Fixer for DivisionFixer {
    fn visit(&mut self, _token: TokenRef<'_>, _sink: &mut EditSink<'_>) {}

    fn finish(&mut self, graph: &TokenGraph<'_>, sink: &mut EditSink<'_>) {
        let divides = has_true_division(graph.leading_gap())
            || (0..graph.len()).any(|i| has_true_division(graph.gap_after(i)));
        if !divides || imports_symbol(graph, "__future__", "division") {
            return;
        }
        if let Some(at) = header_offset(graph) {
            sink.insert(at, IMPORT_LINE);
        }
    }
}

/// A `/` that is not half of `//`. Gaps never contain strings or comments.
fn has_true_division(gap: &str) -> bool {
    let b = gap.as_bytes();
    (0..b.len()).any(|i| {
        b[i] == b'/' && (i == 0 || b[i - 1] != b'/') && b.get(i + 1) != Some(&b'/')
    })
}
