//! Clap-free settings for the directory driver.

use camino::{Utf8Path, Utf8PathBuf};

pub const DEFAULT_EXTENSIONS: &[&str] = &["py"];

/// An import whose presence marks a file as already compatible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatMarker {
    pub module: String,
    pub symbol: String,
}

impl Default for CompatMarker {
    fn default() -> Self {
        Self {
            module: "__future__".to_string(),
            symbol: "print_function".to_string(),
        }
    }
}

/// Paths excluded from translation.
///
/// An entry is matched three ways: as an absolute path, as a path relative to
/// the run root, or as a bare name equal to any path component. Paths match
/// their descendants too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipSet {
    entries: Vec<String>,
}

impl SkipSet {
    pub fn new<S: Into<String>>(entries: impl IntoIterator<Item = S>) -> Self {
        let entries = entries
            .into_iter()
            .map(|e| normalize(&e.into()))
            .filter(|e| !e.is_empty())
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if `path` (absolute or root-joined) is excluded. `rel` is `path`
    /// relative to the run root.
    pub fn matches(&self, path: &Utf8Path, rel: &Utf8Path) -> bool {
        self.entries.iter().any(|entry| {
            let entry_path = Utf8Path::new(entry);
            if entry_path.is_absolute() {
                return path.starts_with(entry_path);
            }
            if entry.contains('/') {
                return rel.starts_with(entry_path);
            }
            rel.components().any(|c| c.as_str() == entry)
        })
    }
}

fn normalize(entry: &str) -> String {
    let entry = entry.replace('\\', "/");
    let entry = entry.strip_prefix("./").unwrap_or(&entry);
    entry.trim_end_matches('/').to_string()
}

/// Settings for one directory run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub root: Utf8PathBuf,
    pub skip: SkipSet,
    /// File extensions to translate, without the dot.
    pub extensions: Vec<String>,
    /// `None` translates every file regardless of its imports.
    pub marker: Option<CompatMarker>,
    pub dry_run: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            root: Utf8PathBuf::from("."),
            skip: SkipSet::default(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            marker: Some(CompatMarker::default()),
            dry_run: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(skip: &SkipSet, path: &str, rel: &str) -> bool {
        skip.matches(Utf8Path::new(path), Utf8Path::new(rel))
    }

    #[test]
    fn bare_names_match_any_component() {
        let skip = SkipSet::new(["vendor", "setup.py"]);
        assert!(hit(&skip, "/repo/vendor/x.py", "vendor/x.py"));
        assert!(hit(&skip, "/repo/a/vendor/x.py", "a/vendor/x.py"));
        assert!(hit(&skip, "/repo/setup.py", "setup.py"));
        assert!(!hit(&skip, "/repo/vendored/x.py", "vendored/x.py"));
    }

    #[test]
    fn relative_paths_match_prefixes() {
        let skip = SkipSet::new(["./pkg/gen/", "pkg/legacy.py"]);
        assert!(hit(&skip, "/repo/pkg/gen/a.py", "pkg/gen/a.py"));
        assert!(hit(&skip, "/repo/pkg/legacy.py", "pkg/legacy.py"));
        assert!(!hit(&skip, "/repo/other/pkg/gen/a.py", "other/pkg/gen/a.py"));
    }

    #[test]
    fn absolute_paths_match_prefixes() {
        let skip = SkipSet::new(["/repo/build"]);
        assert!(hit(&skip, "/repo/build/x.py", "build/x.py"));
        assert!(!hit(&skip, "/repo/src/build.py", "src/build.py"));
    }

    #[test]
    fn defaults() {
        let s = RunSettings::default();
        assert_eq!(s.extensions, vec!["py".to_string()]);
        assert_eq!(s.marker, Some(CompatMarker::default()));
        assert!(s.skip.is_empty());
        assert!(SkipSet::new(["", "./"]).is_empty());
    }
}
