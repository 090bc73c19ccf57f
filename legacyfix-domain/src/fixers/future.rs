use std::sync::Arc;

use crate::engine::{EditSink, Fixer};
use crate::graph::TokenRef;
use crate::syntax::{header_offset, imports_symbol};

/// Inserts one `from __future__ import ...` line after the module docstring.
#[derive(Debug)]
pub struct FutureFixer {
    imports: Arc<[String]>,
    done: bool,
}

impl FutureFixer {
    pub fn new(imports: Arc<[String]>) -> Self {
        Self {
            imports,
            done: false,
        }
    }
}

impl Fixer for FutureFixer {
    fn visit(&mut self, token: TokenRef<'_>, sink: &mut EditSink<'_>) {
        if self.done {
            return;
        }
        self.done = true;

        let graph = token.graph();
        let missing: Vec<&str> = self
            .imports
            .iter()
            .map(String::as_str)
            .filter(|name| !imports_symbol(graph, "__future__", name))
            .collect();
        if missing.is_empty() {
            return;
        }
        if let Some(at) = header_offset(graph) {
            sink.insert(at, format!("from __future__ import {}\n", missing.join(", ")));
        }
    }
}
