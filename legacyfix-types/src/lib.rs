//! Shared DTOs for the legacyfix workspace.
//!
//! # Design constraints
//! - Tokens and edits are plain values; nothing here owns source text.
//! - Offsets are byte offsets into UTF-8 text and always fall on `char` boundaries.
//! - Report types are serialized to disk; prefer adding optional fields over
//!   changing semantics.

pub mod edit;
pub mod report;
pub mod token;

/// Schema identifiers.
pub mod schema {
    pub const LEGACYFIX_REPORT_V1: &str = "legacyfix.report.v1";
}
