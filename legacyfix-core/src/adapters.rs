//! Default filesystem-backed port implementations, plus an in-memory tree.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::ports::{SourceTree, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::{MatchOptions, Pattern, glob_with};
use tracing::debug;

/// Source files on disk. Hidden files and directories are never discovered.
#[derive(Debug, Clone, Default)]
pub struct FsSourceTree;

impl SourceTree for FsSourceTree {
    fn discover(&self, root: &Utf8Path, extensions: &[String]) -> anyhow::Result<Vec<Utf8PathBuf>> {
        if root.is_file() {
            return Ok(vec![root.to_path_buf()]);
        }
        if !root.is_dir() {
            anyhow::bail!("source root {} does not exist", root);
        }

        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: true,
        };
        let base = Pattern::escape(root.as_str());
        let mut out = Vec::new();
        for ext in extensions {
            let pattern = format!("{}/**/*.{}", base, Pattern::escape(ext));
            debug!(pattern = %pattern, "scanning for sources");
            for entry in glob_with(&pattern, options).with_context(|| format!("glob {pattern}"))? {
                let path = entry.map_err(|e| anyhow::anyhow!("glob error: {e}"))?;
                match Utf8PathBuf::from_path_buf(path) {
                    Ok(path) if path.is_file() => out.push(path),
                    Ok(_) => {}
                    Err(path) => debug!(path = %path.display(), "skipping non-UTF-8 path"),
                }
            }
        }
        out.sort();
        out.dedup();
        Ok(out)
    }

    fn read(&self, path: &Utf8Path) -> anyhow::Result<String> {
        fs::read_to_string(path).with_context(|| format!("read {}", path))
    }

    fn write(&self, path: &Utf8Path, contents: &str) -> anyhow::Result<()> {
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }
}

/// In-memory source tree for embedding and testing.
///
/// Writes replace the stored text, so callers can inspect the result with
/// [`InMemorySourceTree::get`].
#[derive(Debug, Default)]
pub struct InMemorySourceTree {
    files: RefCell<BTreeMap<Utf8PathBuf, String>>,
}

impl InMemorySourceTree {
    pub fn new<P, S>(files: impl IntoIterator<Item = (P, S)>) -> Self
    where
        P: Into<Utf8PathBuf>,
        S: Into<String>,
    {
        Self {
            files: RefCell::new(
                files
                    .into_iter()
                    .map(|(p, s)| (p.into(), s.into()))
                    .collect(),
            ),
        }
    }

    pub fn get(&self, path: impl AsRef<Utf8Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    pub fn snapshot(&self) -> BTreeMap<Utf8PathBuf, String> {
        self.files.borrow().clone()
    }
}

impl SourceTree for InMemorySourceTree {
    fn discover(&self, root: &Utf8Path, extensions: &[String]) -> anyhow::Result<Vec<Utf8PathBuf>> {
        let files = self.files.borrow();
        if files.contains_key(root) {
            return Ok(vec![root.to_path_buf()]);
        }
        let found = files
            .keys()
            .filter(|path| {
                let rel = if root.as_str() == "." {
                    Some(path.as_path())
                } else {
                    path.strip_prefix(root).ok()
                };
                rel.is_some_and(|rel| {
                    !rel.components().any(|c| c.as_str().starts_with('.'))
                        && rel
                            .extension()
                            .is_some_and(|ext| extensions.iter().any(|e| e == ext))
                })
            })
            .cloned()
            .collect();
        Ok(found)
    }

    fn read(&self, path: &Utf8Path) -> anyhow::Result<String> {
        self.get(path)
            .with_context(|| format!("read {}: no such file", path))
    }

    fn write(&self, path: &Utf8Path, contents: &str) -> anyhow::Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}
