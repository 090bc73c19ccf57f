//! One source text through the whole pipeline: lex, run fixers, reconstruct.

use legacyfix_edit::{EditError, apply_edits};
use legacyfix_lexer::{KeywordSet, LexError, Lexer};
use legacyfix_types::edit::{Edit, Note};
use legacyfix_types::token::Token;
use thiserror::Error;
use tracing::debug;

use crate::engine::{FixerRun, run_fixers};
use crate::graph::TokenGraph;
use crate::profile::Profile;
use crate::syntax;

const UNNAMED: &str = "<memory>";

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("{file}: {source}")]
    Lex {
        file: String,
        #[source]
        source: LexError,
    },

    #[error("{file}: {source}")]
    Edit {
        file: String,
        #[source]
        source: EditError,
    },
}

/// Owns one text and the artifacts of each stage.
///
/// Stages run in order (parse, translate, dump) and each runs at most once;
/// asking for a later stage runs the earlier ones first. The original text is
/// never modified.
#[derive(Debug)]
pub struct Translator {
    name: String,
    text: String,
    profile: Profile,
    keywords: KeywordSet,
    tokens: Option<Vec<Token>>,
    run: Option<FixerRun>,
    output: Option<String>,
}

impl Translator {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            name: UNNAMED.to_string(),
            text: text.into(),
            profile: Profile::default(),
            keywords: KeywordSet::default(),
            tokens: None,
            run: None,
            output: None,
        }
    }

    /// Name used in errors and logs, usually the file path.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self.run = None;
        self.output = None;
        self
    }

    pub fn with_keywords(mut self, keywords: KeywordSet) -> Self {
        self.keywords = keywords;
        self.tokens = None;
        self.run = None;
        self.output = None;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn parse(&mut self) -> Result<&[Token], TranslateError> {
        if self.tokens.is_none() {
            let tokens = Lexer::new(&self.text, &self.keywords)
                .tokenize()
                .map_err(|source| TranslateError::Lex {
                    file: self.name.clone(),
                    source,
                })?;
            debug!(file = %self.name, tokens = tokens.len(), "parsed");
            self.tokens = Some(tokens);
        }
        Ok(self.tokens.as_deref().unwrap_or_default())
    }

    /// Run every fixer of the profile and return the recorded edits.
    pub fn translate(&mut self) -> Result<&[Edit], TranslateError> {
        if self.run.is_none() {
            self.parse()?;
            let tokens = self.tokens.as_deref().unwrap_or_default();
            let graph = TokenGraph::new(&self.text, tokens);
            let run = run_fixers(&graph, &self.profile);
            debug!(
                file = %self.name,
                edits = run.edits.len(),
                notes = run.notes.len(),
                "translated"
            );
            self.run = Some(run);
        }
        Ok(self.edits().unwrap_or_default())
    }

    /// Reconstruct the output text from the original text and the edits.
    pub fn dump(&mut self) -> Result<&str, TranslateError> {
        if self.output.is_none() {
            self.translate()?;
            let edits = self.edits().unwrap_or_default();
            let output = apply_edits(&self.text, edits).map_err(|source| TranslateError::Edit {
                file: self.name.clone(),
                source,
            })?;
            self.output = Some(output);
        }
        Ok(self.output.as_deref().unwrap_or_default())
    }

    pub fn into_output(mut self) -> Result<String, TranslateError> {
        self.dump()?;
        Ok(self.output.unwrap_or_default())
    }

    /// Tokens, once parsed.
    pub fn tokens(&self) -> Option<&[Token]> {
        self.tokens.as_deref()
    }

    /// Edits, once translated.
    pub fn edits(&self) -> Option<&[Edit]> {
        self.run.as_ref().map(|run| run.edits.as_slice())
    }

    /// Notes, once translated; empty before.
    pub fn notes(&self) -> &[Note] {
        self.run
            .as_ref()
            .map(|run| run.notes.as_slice())
            .unwrap_or_default()
    }

    /// True if the text has `from <module> import <symbol>`. Parses if needed.
    pub fn imports_symbol(&mut self, module: &str, symbol: &str) -> Result<bool, TranslateError> {
        self.parse()?;
        let tokens = self.tokens.as_deref().unwrap_or_default();
        let graph = TokenGraph::new(&self.text, tokens);
        Ok(syntax::imports_symbol(&graph, module, symbol))
    }
}

/// Translate `text` with the default profile.
pub fn translate_source(text: &str) -> Result<String, TranslateError> {
    Translator::new(text).into_output()
}
