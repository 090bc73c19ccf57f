use std::collections::BTreeMap;
use std::sync::Arc;

use crate::engine::Fixer;
use crate::import_map::ImportMappingTable;
use crate::profile::FixerFactory;

mod division;
mod encode;
mod future;
mod getcwd;
mod imports;
mod newstyle;
mod print;
mod range;
mod super_call;
mod unicode;
mod unicode_literals;

pub use division::DivisionFixer;
pub use encode::EncodeFixer;
pub use future::FutureFixer;
pub use getcwd::GetcwdFixer;
pub use imports::ImportsFixer;
pub use newstyle::NewstyleFixer;
pub use print::PrintFixer;
pub use range::RangeFixer;
pub use super_call::SuperFixer;
pub use unicode::UnicodeFixer;
pub use unicode_literals::UnicodeLiteralsFixer;

pub const DEFAULT_FUTURE_IMPORTS: &[&str] = &["absolute_import", "with_statement"];

/// Configuration shared by the built-in fixers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixerOptions {
    pub imports: ImportMappingTable,
    /// Names inserted by the `future` fixer; empty disables it.
    pub future_imports: Vec<String>,
}

impl Default for FixerOptions {
    fn default() -> Self {
        Self {
            imports: ImportMappingTable::standard(),
            future_imports: DEFAULT_FUTURE_IMPORTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn factory<F, M>(make: M) -> FixerFactory
where
    F: Fixer + 'static,
    M: Fn() -> F + Send + Sync + 'static,
{
    Arc::new(move || Box::new(make()) as Box<dyn Fixer>)
}

pub(crate) fn builtin_factories(opts: &FixerOptions) -> BTreeMap<String, FixerFactory> {
    let table = Arc::new(opts.imports.clone());
    let future: Arc<[String]> = opts.future_imports.clone().into();

    let mut map = BTreeMap::new();
    map.insert("division".to_string(), factory(DivisionFixer::default));
    map.insert("encode".to_string(), factory(EncodeFixer::default));
    map.insert(
        "future".to_string(),
        factory(move || FutureFixer::new(Arc::clone(&future))),
    );
    map.insert("getcwd".to_string(), factory(GetcwdFixer::default));
    map.insert(
        "imports".to_string(),
        factory(move || ImportsFixer::new(Arc::clone(&table))),
    );
    map.insert("newstyle".to_string(), factory(NewstyleFixer::default));
    map.insert("print".to_string(), factory(PrintFixer::default));
    map.insert("range".to_string(), factory(RangeFixer::default));
    map.insert("super".to_string(), factory(SuperFixer::default));
    map.insert("unicode".to_string(), factory(UnicodeFixer::default));
    map.insert(
        "unicode_literals".to_string(),
        factory(UnicodeLiteralsFixer::default),
    );
    map
}

#[cfg(test)]
pub(crate) mod test_support {
    use legacyfix_types::edit::Note;

    use crate::profile::Profile;
    use crate::translator::Translator;

    /// Translate `src` with the single built-in fixer `name`.
    pub(crate) fn fix(name: &str, src: &str) -> String {
        let profile = Profile::legacy().retain(&[name.to_string()], &[]);
        assert_eq!(profile.len(), 1, "unknown fixer {name}");
        Translator::new(src)
            .with_profile(profile)
            .into_output()
            .expect("translate")
    }

    pub(crate) fn notes(name: &str, src: &str) -> Vec<Note> {
        let profile = Profile::legacy().retain(&[name.to_string()], &[]);
        let mut t = Translator::new(src).with_profile(profile);
        t.translate().expect("translate");
        t.notes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use legacyfix_fixer_catalog::fixer_keys;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_builtin_fixer_has_catalog_metadata() {
        let builtin: Vec<_> = builtin_factories(&FixerOptions::default())
            .into_keys()
            .collect();
        let catalog: Vec<_> = fixer_keys().into_iter().map(str::to_string).collect();
        assert_eq!(builtin, catalog);
    }
}
