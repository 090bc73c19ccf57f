use std::sync::Arc;

use crate::engine::{EditSink, Fixer};
use crate::graph::TokenRef;
use crate::import_map::ImportMappingTable;
use crate::syntax::{ImportForm, ImportStatement, parse_import};

/// Rewrites import statements through an [`ImportMappingTable`].
#[derive(Debug)]
pub struct ImportsFixer {
    table: Arc<ImportMappingTable>,
}

impl ImportsFixer {
    pub fn new(table: Arc<ImportMappingTable>) -> Self {
        Self { table }
    }

    /// `import K` with a statement entry for `K` is replaced wholesale.
    fn rewrite_statement(&self, stmt: &ImportStatement<'_>, sink: &mut EditSink<'_>) -> bool {
        let [only] = stmt.modules.as_slice() else {
            return false;
        };
        if stmt.form != ImportForm::Import || only.alias.is_some() {
            return false;
        }
        match self.table.lookup_statement(&only.dotted()) {
            Some(text) => {
                sink.replace_span(stmt.start(), stmt.end, text);
                true
            }
            None => false,
        }
    }
}

impl Fixer for ImportsFixer {
    fn visit(&mut self, token: TokenRef<'_>, sink: &mut EditSink<'_>) {
        let Some(stmt) = parse_import(token) else {
            return;
        };
        if stmt.relative || self.rewrite_statement(&stmt, sink) {
            return;
        }
        for path in &stmt.modules {
            let parts = path.part_texts();
            let Some((matched, new)) = self.table.lookup_module(&parts) else {
                continue;
            };
            let mut text = new.to_string();
            // Keep the name bound by `import queue` usable.
            if stmt.form == ImportForm::Import && path.alias.is_none() && parts.len() == 1 {
                text.push_str(" as ");
                text.push_str(parts[0]);
            }
            sink.replace_span(path.start(), path.parts[matched - 1].end(), text);
        }
    }
}
