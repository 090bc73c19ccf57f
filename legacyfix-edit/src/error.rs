//! Error types for legacyfix-edit.
//!
//! Every variant describes an edit whose span cannot be applied to the text it
//! was recorded against. Overlapping edits are not errors; they are resolved.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The span ends past the end of the text.
    #[error("edit from `{fixer}` spans {start}..{end}, past end of text ({len} bytes)")]
    OutOfBounds {
        fixer: String,
        start: usize,
        end: usize,
        len: usize,
    },

    /// `start > end`.
    #[error("edit from `{fixer}` has inverted span {start}..{end}")]
    InvertedSpan {
        fixer: String,
        start: usize,
        end: usize,
    },

    /// A span endpoint splits a multi-byte character.
    #[error("edit from `{fixer}` cuts inside a character at byte {offset}")]
    NotCharBoundary { fixer: String, offset: usize },
}

impl EditError {
    /// Name of the fixer that produced the offending edit.
    pub fn fixer(&self) -> &str {
        match self {
            EditError::OutOfBounds { fixer, .. }
            | EditError::InvertedSpan { fixer, .. }
            | EditError::NotCharBoundary { fixer, .. } => fixer,
        }
    }
}

/// Result type alias using EditError.
pub type EditResult<T> = Result<T, EditError>;
