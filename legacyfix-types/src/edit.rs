use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    /// Substitute `text` for the original bytes `[start, end)`.
    Replace,
    /// Splice `text` in at `start` without consuming original bytes.
    Insert,
}

/// A rewrite recorded by a fixer.
///
/// Edits never mutate the original text. They are resolved and applied in one
/// pass by the reconstruction engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub kind: EditKind,
    pub start: usize,
    pub end: usize,
    pub text: String,
    /// Name of the fixer that produced the edit.
    pub fixer: String,
}

impl Edit {
    pub fn replace(
        start: usize,
        end: usize,
        text: impl Into<String>,
        fixer: impl Into<String>,
    ) -> Self {
        Self {
            kind: EditKind::Replace,
            start,
            end,
            text: text.into(),
            fixer: fixer.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>, fixer: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Insert,
            start: at,
            end: at,
            text: text.into(),
            fixer: fixer.into(),
        }
    }

    pub fn is_insert(&self) -> bool {
        self.kind == EditKind::Insert
    }

    /// Number of original bytes consumed.
    pub fn width(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True if `self` spans every byte of `other` and is not the same span.
    pub fn strictly_encloses(&self, other: &Edit) -> bool {
        self.start <= other.start
            && other.end <= self.end
            && (self.start, self.end) != (other.start, other.end)
    }

    pub fn overlaps(&self, other: &Edit) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A construct a fixer recognised but deliberately left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub offset: usize,
    /// 1-based line of `offset`.
    pub line: usize,
    pub fixer: String,
    pub message: String,
}
