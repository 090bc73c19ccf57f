//! Reconstruction engine: splices recorded edits into the original text.
//!
//! The original text is never mutated. Edits are validated, overlaps are
//! resolved, and the output is assembled in one left-to-right pass that copies
//! every untouched byte verbatim.
//!
//! Resolution, in production order:
//! - identical spans: the later edit wins
//! - an accepted edit encloses the new one: the enclosing edit wins
//! - the new edit encloses or partially overlaps accepted edits: the new edit wins
//!
//! Insertions keep production order at equal offsets and are emitted before
//! a replacement starting at the same offset. An insertion strictly inside a
//! surviving replacement is dropped.

pub mod error;

use std::collections::BTreeMap;

use diffy::PatchFormatter;
use legacyfix_types::edit::{Edit, EditKind};
use sha2::{Digest, Sha256};
use tracing::debug;

pub use error::{EditError, EditResult};

/// Outcome of overlap resolution over a list of edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Surviving replacements, sorted by start, pairwise disjoint.
    pub replacements: Vec<Edit>,
    /// Surviving insertions, sorted by offset; equal offsets keep production order.
    pub inserts: Vec<Edit>,
    /// Edits discarded by the overlap policy, in production order.
    pub dropped: Vec<Edit>,
}

impl Resolution {
    pub fn applied(&self) -> usize {
        self.replacements.len() + self.inserts.len()
    }
}

/// Check that every span is in bounds and on char boundaries of `text`.
pub fn validate_edits(text: &str, edits: &[Edit]) -> EditResult<()> {
    for e in edits {
        if e.start > e.end {
            return Err(EditError::InvertedSpan {
                fixer: e.fixer.clone(),
                start: e.start,
                end: e.end,
            });
        }
        if e.end > text.len() {
            return Err(EditError::OutOfBounds {
                fixer: e.fixer.clone(),
                start: e.start,
                end: e.end,
                len: text.len(),
            });
        }
        for offset in [e.start, e.end] {
            if !text.is_char_boundary(offset) {
                return Err(EditError::NotCharBoundary {
                    fixer: e.fixer.clone(),
                    offset,
                });
            }
        }
    }
    Ok(())
}

/// Resolve overlapping edits. Spans must already be valid.
pub fn resolve_edits(edits: &[Edit]) -> Resolution {
    // Keyed by start; accepted replacements never overlap, so starts are unique.
    let mut accepted: BTreeMap<usize, (usize, &Edit)> = BTreeMap::new();
    let mut inserts: Vec<(usize, &Edit)> = Vec::new();
    let mut dropped: Vec<(usize, &Edit)> = Vec::new();

    for (seq, e) in edits.iter().enumerate() {
        if e.kind == EditKind::Insert || e.start == e.end {
            inserts.push((seq, e));
            continue;
        }

        let enclosed = accepted
            .range(..=e.start)
            .next_back()
            .is_some_and(|(_, (_, a))| a.strictly_encloses(e));
        if enclosed {
            dropped.push((seq, e));
            continue;
        }

        let evicted: Vec<usize> = accepted
            .range(..e.end)
            .rev()
            .take_while(|(_, (_, a))| a.end > e.start)
            .map(|(start, _)| *start)
            .collect();
        for start in evicted {
            if let Some(old) = accepted.remove(&start) {
                dropped.push(old);
            }
        }
        accepted.insert(e.start, (seq, e));
    }

    let (kept_inserts, inside): (Vec<_>, Vec<_>) = inserts.into_iter().partition(|(_, ins)| {
        !accepted
            .range(..ins.start)
            .next_back()
            .is_some_and(|(_, (_, a))| a.start < ins.start && ins.start < a.end)
    });
    dropped.extend(inside);
    dropped.sort_by_key(|(seq, _)| *seq);

    let mut inserts: Vec<Edit> = kept_inserts
        .into_iter()
        .map(|(_, e)| Edit::insert(e.start, e.text.clone(), e.fixer.clone()))
        .collect();
    // Stable: equal offsets keep production order.
    inserts.sort_by_key(|e| e.start);

    Resolution {
        replacements: accepted.into_values().map(|(_, e)| e.clone()).collect(),
        inserts,
        dropped: dropped.into_iter().map(|(_, e)| e.clone()).collect(),
    }
}

/// Validate, resolve, and splice `edits` into `text`.
pub fn apply_edits(text: &str, edits: &[Edit]) -> EditResult<String> {
    validate_edits(text, edits)?;
    let resolution = resolve_edits(edits);
    if !resolution.dropped.is_empty() {
        debug!(
            dropped = resolution.dropped.len(),
            "discarded overlapping edits"
        );
    }
    Ok(splice(text, &resolution))
}

/// Assemble output from an already-resolved edit set.
pub fn splice(text: &str, resolution: &Resolution) -> String {
    let growth: usize = resolution
        .inserts
        .iter()
        .chain(&resolution.replacements)
        .map(|e| e.text.len())
        .sum();
    let mut out = String::with_capacity(text.len() + growth);
    let mut cursor = 0;
    let mut inserts = resolution.inserts.iter().peekable();

    for rep in &resolution.replacements {
        while let Some(ins) = inserts.next_if(|ins| ins.start <= rep.start) {
            out.push_str(&text[cursor..ins.start]);
            out.push_str(&ins.text);
            cursor = ins.start;
        }
        out.push_str(&text[cursor..rep.start]);
        out.push_str(&rep.text);
        cursor = rep.end;
    }
    for ins in inserts {
        out.push_str(&text[cursor..ins.start]);
        out.push_str(&ins.text);
        cursor = ins.start;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Unified diff of one file in `diff --git` framing. Empty when unchanged.
pub fn render_patch(path: &str, before: &str, after: &str) -> String {
    if before == after {
        return String::new();
    }
    let mut out = String::new();
    out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", path));

    let patch = diffy::create_patch(before, after);
    let formatter = PatchFormatter::new();
    let body = formatter.fmt_patch(&patch).to_string();
    // diffy emits its own `--- original` / `+++ modified` header; keep the hunks only.
    let hunks = body.find("\n@@").map_or(body.as_str(), |i| &body[i + 1..]);
    out.push_str(hunks);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Concatenated patches for `(path, before, after)` triples, skipping unchanged files.
pub fn render_patches<'a>(files: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>) -> String {
    files
        .into_iter()
        .map(|(path, before, after)| render_patch(path, before, after))
        .collect()
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
