//! Configuration file loading for legacyfix.
//!
//! Discovers and loads `legacyfix.toml` from the run root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use legacyfix_core::settings::DEFAULT_EXTENSIONS;
use legacyfix_core::{CompatMarker, FixerOptions, ImportMappingTable, Profile, SkipSet};
use legacyfix_domain::{LEGACY, PROFILE_NAMES};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "legacyfix.toml";

/// Top-level configuration from legacyfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LegacyfixConfig {
    /// Built-in profile name (default: `legacy`).
    pub profile: Option<String>,

    /// Fixer allow/deny patterns.
    pub fixers: FixersConfig,

    pub skip: SkipConfig,

    pub driver: DriverConfig,

    /// Additions to the import mapping table.
    pub imports: ImportsConfig,

    pub future: FutureConfig,
}

/// Fixers section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FixersConfig {
    /// Only fixers matching one of these patterns run. Empty means all.
    pub enable: Vec<String>,

    /// Fixers matching one of these patterns never run.
    pub disable: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SkipConfig {
    /// Names, root-relative paths or absolute paths to leave untouched.
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Extensions to translate, without the dot (default: `py`).
    pub extensions: Vec<String>,

    /// `module.symbol` import that marks a file as already compatible.
    /// An empty string translates every file.
    pub marker: Option<String>,
}

/// Imports section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportsConfig {
    /// Start from the standard library rename table.
    pub standard: bool,

    /// Dotted module renames, e.g. `"urllib.request" = "urllib2"`.
    pub modules: BTreeMap<String, String>,

    /// Whole-statement replacements for `import <key>`.
    pub statements: BTreeMap<String, String>,
}

impl Default for ImportsConfig {
    fn default() -> Self {
        Self {
            standard: true,
            modules: BTreeMap::new(),
            statements: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FutureConfig {
    /// Names the `future` fixer inserts. Unset keeps the built-in list.
    pub imports: Option<Vec<String>>,
}

/// Discover the legacyfix.toml config file.
///
/// Searches `root` itself, or the parent directory when `root` is a file.
pub fn discover_config(root: &Utf8Path) -> Option<Utf8PathBuf> {
    let dir = if root.is_file() {
        root.parent().unwrap_or(Utf8Path::new("."))
    } else {
        root
    };
    let dir = if dir.as_str().is_empty() {
        Utf8Path::new(".")
    } else {
        dir
    };
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a legacyfix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<LegacyfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<LegacyfixConfig> {
    let config: LegacyfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config for `root`, or return default if not found.
pub fn load_or_default(root: &Utf8Path) -> anyhow::Result<LegacyfixConfig> {
    match discover_config(root) {
        Some(path) => load_config(&path),
        None => Ok(LegacyfixConfig::default()),
    }
}

/// Parse `module.symbol`. The symbol is everything after the last dot.
pub fn parse_marker(value: &str) -> anyhow::Result<Option<CompatMarker>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let (module, symbol) = value
        .rsplit_once('.')
        .filter(|(m, s)| !m.is_empty() && !s.is_empty())
        .ok_or_else(|| anyhow::anyhow!("invalid marker '{}': expected module.symbol", value))?;
    Ok(Some(CompatMarker {
        module: module.to_string(),
        symbol: symbol.to_string(),
    }))
}

/// CLI arguments that override or extend the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub profile: Option<String>,
    pub enable: Vec<String>,
    pub disable: Vec<String>,
    pub skip: Vec<String>,
    pub extensions: Vec<String>,
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub profile: String,
    pub enable: Vec<String>,
    pub disable: Vec<String>,
    pub skip: Vec<String>,
    pub extensions: Vec<String>,
    pub marker: Option<CompatMarker>,
    pub options: FixerOptions,
}

impl MergedConfig {
    /// Build the named profile with the merged options and fixer filters.
    pub fn build_profile(&self) -> anyhow::Result<Profile> {
        let profile = Profile::by_name(&self.profile, &self.options).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown profile: '{}'\n\nAvailable profiles: {}",
                self.profile,
                PROFILE_NAMES.join(", ")
            )
        })?;
        Ok(profile.retain(&self.enable, &self.disable))
    }

    pub fn skip_set(&self) -> SkipSet {
        SkipSet::new(self.skip.iter().cloned())
    }
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: LegacyfixConfig,
}

impl ConfigMerger {
    pub fn new(config: LegacyfixConfig) -> Self {
        Self { config }
    }

    /// CLI lists extend the config file lists; the CLI profile replaces the
    /// configured one.
    pub fn merge(self, cli: &CliOverrides) -> anyhow::Result<MergedConfig> {
        let config = self.config;

        let profile = cli
            .profile
            .clone()
            .or(config.profile)
            .unwrap_or_else(|| LEGACY.to_string());

        let mut extensions: Vec<String> = Vec::new();
        for ext in config.driver.extensions.iter().chain(&cli.extensions) {
            let ext = ext.trim().trim_start_matches('.').to_string();
            if !ext.is_empty() && !extensions.contains(&ext) {
                extensions.push(ext);
            }
        }
        if extensions.is_empty() {
            extensions = DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect();
        }

        let marker = match config.driver.marker.as_deref() {
            Some(value) => parse_marker(value)?,
            None => Some(CompatMarker::default()),
        };

        let mut imports = if config.imports.standard {
            ImportMappingTable::standard()
        } else {
            ImportMappingTable::empty()
        };
        for (old, new) in config.imports.modules {
            imports.insert_module(old, new);
        }
        for (old, statement) in config.imports.statements {
            imports.insert_statement(old, statement);
        }
        let mut options = FixerOptions {
            imports,
            ..FixerOptions::default()
        };
        if let Some(future) = config.future.imports {
            options.future_imports = future;
        }

        Ok(MergedConfig {
            profile,
            enable: extend(config.fixers.enable, &cli.enable),
            disable: extend(config.fixers.disable, &cli.disable),
            skip: extend(config.skip.paths, &cli.skip),
            extensions,
            marker,
            options,
        })
    }
}

fn extend(mut base: Vec<String>, extra: &[String]) -> Vec<String> {
    for item in extra {
        if !base.contains(item) {
            base.push(item.clone());
        }
    }
    base
}
