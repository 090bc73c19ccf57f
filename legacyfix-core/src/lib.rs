//! Embeddable directory driver for legacyfix.
//!
//! Provides a clap-free, I/O-abstracted entry point for translating a whole
//! source tree.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`SourceTree`](ports::SourceTree): discover, read and write source files
//! - [`WritePort`](ports::WritePort): write run artifacts
//!
//! The [`adapters`] module provides filesystem and in-memory implementations.
//!
//! # Entry points
//!
//! - [`run_dir`](pipeline::run_dir): translate every file under a root
//! - [`write_run_artifacts`](pipeline::write_run_artifacts): persist the report and patch

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

pub use pipeline::{RunOutcome, run_dir, write_run_artifacts};
pub use settings::{CompatMarker, RunSettings, SkipSet};

// Re-export the translation API so callers don't need legacyfix-domain directly.
pub use legacyfix_domain::{FixerOptions, ImportMappingTable, Profile, TranslateError, Translator};
