//! Named, ordered sets of fixers.
//!
//! A profile maps fixer names to factories. Iteration order is name order, so
//! evaluation order is fixed by the names alone.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::engine::Fixer;
use crate::fixers::{self, FixerOptions};

/// Builds a fresh, stateful fixer for one translation.
pub type FixerFactory = Arc<dyn Fn() -> Box<dyn Fixer> + Send + Sync>;

pub const LEGACY: &str = "legacy";
pub const LEGACY_PRINT_FUNCTION: &str = "legacy-print-function";

/// Built-in profile names.
pub const PROFILE_NAMES: &[&str] = &[LEGACY, LEGACY_PRINT_FUNCTION];

#[derive(Clone)]
pub struct Profile {
    name: String,
    fixers: BTreeMap<String, FixerFactory>,
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("name", &self.name)
            .field("fixers", &self.fixers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Profile {
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixers: BTreeMap::new(),
        }
    }

    /// Every built-in fixer with default options.
    pub fn legacy() -> Self {
        Self::legacy_with(&FixerOptions::default())
    }

    pub fn legacy_with(opts: &FixerOptions) -> Self {
        Self {
            name: LEGACY.to_string(),
            fixers: fixers::builtin_factories(opts),
        }
    }

    /// For code that keeps `print` as a function: `print` calls are left
    /// alone and `print_function` joins the future imports.
    pub fn legacy_print_function_with(opts: &FixerOptions) -> Self {
        let mut opts = opts.clone();
        if !opts.future_imports.iter().any(|f| f == "print_function") {
            opts.future_imports.insert(0, "print_function".to_string());
        }
        let mut profile = Self::legacy_with(&opts).without("print");
        profile.name = LEGACY_PRINT_FUNCTION.to_string();
        profile
    }

    pub fn by_name(name: &str, opts: &FixerOptions) -> Option<Self> {
        match name {
            LEGACY => Some(Self::legacy_with(opts)),
            LEGACY_PRINT_FUNCTION => Some(Self::legacy_print_function_with(opts)),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register `factory` under `name`, replacing any fixer of that name.
    pub fn with_fixer<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Fixer> + Send + Sync + 'static,
    {
        self.fixers.insert(name.into(), Arc::new(factory));
        self
    }

    pub fn without(mut self, name: &str) -> Self {
        self.fixers.remove(name);
        self
    }

    /// Keep fixers matching any `allow` pattern (all when `allow` is empty),
    /// then drop those matching any `deny` pattern. Patterns support `*` and `?`.
    pub fn retain(mut self, allow: &[String], deny: &[String]) -> Self {
        self.fixers.retain(|name, _| {
            let allowed = allow.is_empty() || allow.iter().any(|p| glob_match(p, name));
            allowed && !deny.iter().any(|p| glob_match(p, name))
        });
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fixers.contains_key(name)
    }

    pub fn fixer_names(&self) -> impl Iterator<Item = &str> {
        self.fixers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fixers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixers.is_empty()
    }

    /// Fresh fixer instances in evaluation order.
    pub(crate) fn instantiate(&self) -> Vec<(String, Box<dyn Fixer>)> {
        self.fixers
            .iter()
            .map(|(name, factory)| (name.clone(), factory()))
            .collect()
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::legacy()
    }
}

fn glob_match(pat: &str, text: &str) -> bool {
    let p = pat.as_bytes();
    let t = text.as_bytes();
    let mut dp = vec![vec![false; t.len() + 1]; p.len() + 1];
    dp[0][0] = true;

    for i in 1..=p.len() {
        if p[i - 1] == b'*' {
            dp[i][0] = dp[i - 1][0];
        }
    }

    for i in 1..=p.len() {
        for j in 1..=t.len() {
            dp[i][j] = match p[i - 1] {
                b'*' => dp[i - 1][j] || dp[i][j - 1],
                b'?' => dp[i - 1][j - 1],
                c => dp[i - 1][j - 1] && c == t[j - 1],
            };
        }
    }

    dp[p.len()][t.len()]
}
