//! Reserved-word sets.
//!
//! Which words count as keywords is data, not code: the default set is the
//! union of both dialects so that `print` and `exec` classify as keywords
//! whether a file uses them as statements or as calls. Fixers match on token
//! text and accept either kind where the two dialects disagree.

use std::collections::BTreeSet;

/// Reserved words of the modern dialect.
pub const MODERN_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Words reserved only by the legacy dialect.
pub const LEGACY_ONLY_KEYWORDS: &[&str] = &["exec", "print"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    words: BTreeSet<String>,
}

impl KeywordSet {
    pub fn empty() -> Self {
        Self {
            words: BTreeSet::new(),
        }
    }

    pub fn modern() -> Self {
        Self::from_words(MODERN_KEYWORDS.iter().copied())
    }

    /// Legacy reserved words: the modern set without `nonlocal`, `async`,
    /// `await`, plus `print` and `exec`.
    pub fn legacy() -> Self {
        let mut set = Self::modern();
        for w in ["nonlocal", "async", "await"] {
            set.words.remove(w);
        }
        set.extend(LEGACY_ONLY_KEYWORDS.iter().copied());
        set
    }

    /// Union of both dialects.
    pub fn union() -> Self {
        let mut set = Self::modern();
        set.extend(LEGACY_ONLY_KEYWORDS.iter().copied());
        set
    }

    pub fn from_words<'w>(words: impl IntoIterator<Item = &'w str>) -> Self {
        let mut set = Self::empty();
        set.extend(words);
        set
    }

    pub fn extend<'w>(&mut self, words: impl IntoIterator<Item = &'w str>) {
        self.words.extend(words.into_iter().map(str::to_string));
    }

    pub fn remove(&mut self, word: &str) -> bool {
        self.words.remove(word)
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        // Every reserved word starts with an ASCII letter.
        word.as_bytes().first().is_some_and(u8::is_ascii_alphabetic) && self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::union()
    }
}
