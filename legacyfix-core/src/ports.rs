//! Port traits abstracting all I/O away from the pipeline.

use camino::{Utf8Path, Utf8PathBuf};

/// A tree of source files.
pub trait SourceTree {
    /// Files under `root` whose extension is one of `extensions`, sorted.
    /// A `root` that is itself a file yields just that file.
    fn discover(&self, root: &Utf8Path, extensions: &[String]) -> anyhow::Result<Vec<Utf8PathBuf>>;
    fn read(&self, path: &Utf8Path) -> anyhow::Result<String>;
    fn write(&self, path: &Utf8Path, contents: &str) -> anyhow::Result<()>;
}

/// File-system write operations for run artifacts.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
