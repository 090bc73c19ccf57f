//! Translation logic: token graph, fixer engine, the built-in fixers and the
//! per-text translator.
//!
//! This crate decides *what* to rewrite. Lexing lives in `legacyfix-lexer`,
//! and splicing edits back into text lives in `legacyfix-edit`.

mod engine;
mod fixers;
mod graph;
mod import_map;
mod profile;
mod syntax;
mod translator;

pub use engine::{EditSink, Fixer, FixerRun, run_fixers};
pub use fixers::{
    DEFAULT_FUTURE_IMPORTS, DivisionFixer, EncodeFixer, FixerOptions, FutureFixer, GetcwdFixer,
    ImportsFixer, NewstyleFixer, PrintFixer, RangeFixer, SuperFixer, UnicodeFixer,
    UnicodeLiteralsFixer,
};
pub use graph::{TokenGraph, TokenRef};
pub use import_map::{ImportMappingTable, ImportRewrite, STANDARD_RENAMES};
pub use profile::{FixerFactory, LEGACY, LEGACY_PRINT_FUNCTION, PROFILE_NAMES, Profile};
pub use syntax::{
    ImportForm, ImportStatement, ModulePath, at_statement_start, header_offset, imports_symbol,
    parse_import,
};
pub use translator::{TranslateError, Translator, translate_source};

pub use legacyfix_lexer::KeywordSet;
