//! Per-token rule dispatch.
//!
//! Every fixer in a profile sees every token, in document order; at each token
//! the fixers run in name order. Fixers never touch text: they record edits
//! and notes into an [`EditSink`].

use legacyfix_types::edit::{Edit, Note};
use tracing::{debug, warn};

use crate::graph::{TokenGraph, TokenRef};
use crate::profile::Profile;

pub trait Fixer {
    /// Called once per token, in document order.
    fn visit(&mut self, token: TokenRef<'_>, sink: &mut EditSink<'_>);

    /// Called once after the last token.
    fn finish(&mut self, _graph: &TokenGraph<'_>, _sink: &mut EditSink<'_>) {}
}

/// Collects the edits and notes of one fixer invocation.
pub struct EditSink<'s> {
    fixer: &'s str,
    graph: &'s TokenGraph<'s>,
    edits: &'s mut Vec<Edit>,
    notes: &'s mut Vec<Note>,
}

impl<'s> EditSink<'s> {
    pub fn new(
        fixer: &'s str,
        graph: &'s TokenGraph<'s>,
        edits: &'s mut Vec<Edit>,
        notes: &'s mut Vec<Note>,
    ) -> Self {
        Self {
            fixer,
            graph,
            edits,
            notes,
        }
    }

    pub fn fixer(&self) -> &str {
        self.fixer
    }

    /// Replace the whole token.
    pub fn replace(&mut self, token: TokenRef<'_>, text: impl Into<String>) {
        self.replace_span(token.start(), token.end(), text);
    }

    /// Replace `[start, end)`, which may cover several tokens or raw gap text.
    pub fn replace_span(&mut self, start: usize, end: usize, text: impl Into<String>) {
        self.edits
            .push(Edit::replace(start, end, text, self.fixer.to_string()));
    }

    /// Zero-width insertion at `at`.
    pub fn insert(&mut self, at: usize, text: impl Into<String>) {
        self.edits.push(Edit::insert(at, text, self.fixer.to_string()));
    }

    /// Report a construct that was recognised but left untouched.
    pub fn note(&mut self, offset: usize, message: impl Into<String>) {
        let message = message.into();
        let line = self.graph.line_number(offset);
        warn!(fixer = self.fixer, line, "{}", message);
        self.notes.push(Note {
            offset,
            line,
            fixer: self.fixer.to_string(),
            message,
        });
    }
}

/// Everything the fixers of one profile produced for one text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixerRun {
    pub edits: Vec<Edit>,
    pub notes: Vec<Note>,
}

/// Instantiate the profile's fixers and run them over `graph`.
pub fn run_fixers(graph: &TokenGraph<'_>, profile: &Profile) -> FixerRun {
    let mut fixers = profile.instantiate();
    for (name, _) in &fixers {
        debug!(fixer = %name, profile = profile.name(), "instantiated fixer");
    }

    let mut run = FixerRun::default();
    for token in graph.iter() {
        for (name, fixer) in fixers.iter_mut() {
            let mut sink = EditSink::new(name, graph, &mut run.edits, &mut run.notes);
            fixer.visit(token, &mut sink);
        }
    }
    for (name, fixer) in fixers.iter_mut() {
        let mut sink = EditSink::new(name, graph, &mut run.edits, &mut run.notes);
        fixer.finish(graph, &mut sink);
    }

    debug!(
        tokens = graph.len(),
        edits = run.edits.len(),
        notes = run.notes.len(),
        "fixers finished"
    );
    run
}
