//! Declarative table of import rewrites.

use std::collections::BTreeMap;

/// Standard library modules renamed between dialects.
pub const STANDARD_RENAMES: &[(&str, &str)] = &[
    ("_markupbase", "markupbase"),
    ("builtins", "__builtin__"),
    ("configparser", "ConfigParser"),
    ("copyreg", "copy_reg"),
    ("dbm.bsd", "dbhash"),
    ("dbm.dumb", "dumbdbm"),
    ("dbm.gnu", "gdbm"),
    ("dbm.ndbm", "dbm"),
    ("html.entities", "htmlentitydefs"),
    ("html.parser", "HTMLParser"),
    ("http.client", "httplib"),
    ("http.cookiejar", "cookielib"),
    ("http.cookies", "Cookie"),
    ("queue", "Queue"),
    ("reprlib", "repr"),
    ("socketserver", "SocketServer"),
    ("test.support", "test.test_support"),
    ("urllib.error", "urllib2"),
    ("urllib.parse", "urlparse"),
    ("urllib.request", "urllib2"),
    ("urllib.robotparser", "robotparser"),
    ("winreg", "_winreg"),
    ("xmlrpc.client", "xmlrpclib"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportRewrite {
    /// Replace the matched dotted module path.
    Module(String),
    /// Replace the whole `import <key>` statement.
    Statement(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportMappingTable {
    entries: BTreeMap<String, ImportRewrite>,
}

impl ImportMappingTable {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn standard() -> Self {
        let mut table = Self::empty();
        for (old, new) in STANDARD_RENAMES {
            table.insert_module(*old, *new);
        }
        table
    }

    pub fn with_module(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.insert_module(old, new);
        self
    }

    pub fn with_statement(mut self, old: impl Into<String>, statement: impl Into<String>) -> Self {
        self.insert_statement(old, statement);
        self
    }

    pub fn insert_module(&mut self, old: impl Into<String>, new: impl Into<String>) {
        self.entries
            .insert(old.into(), ImportRewrite::Module(new.into()));
    }

    pub fn insert_statement(&mut self, old: impl Into<String>, statement: impl Into<String>) {
        self.entries
            .insert(old.into(), ImportRewrite::Statement(statement.into()));
    }

    pub fn remove(&mut self, old: &str) -> Option<ImportRewrite> {
        self.entries.remove(old)
    }

    pub fn get(&self, old: &str) -> Option<&ImportRewrite> {
        self.entries.get(old)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ImportRewrite)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Longest module entry whose key equals a leading run of `parts`.
    ///
    /// Returns the number of parts matched and the replacement path.
    pub fn lookup_module(&self, parts: &[&str]) -> Option<(usize, &str)> {
        (1..=parts.len()).rev().find_map(|n| {
            match self.entries.get(&parts[..n].join(".")) {
                Some(ImportRewrite::Module(new)) => Some((n, new.as_str())),
                _ => None,
            }
        })
    }

    /// Statement entry keyed exactly by `path`.
    pub fn lookup_statement(&self, path: &str) -> Option<&str> {
        match self.entries.get(path) {
            Some(ImportRewrite::Statement(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl Default for ImportMappingTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_prefix_wins_on_component_boundaries() {
        let table = ImportMappingTable::standard().with_module("urllib", "urllib_legacy");
        assert_eq!(
            table.lookup_module(&["urllib", "request", "urlopen"]),
            Some((2, "urllib2"))
        );
        assert_eq!(table.lookup_module(&["urllib", "quote"]), Some((1, "urllib_legacy")));
        assert_eq!(table.lookup_module(&["urllibx"]), None);
        assert_eq!(table.lookup_module(&["xx", "yy"]), None);
    }

    #[test]
    fn statement_entries_are_exact() {
        let table = ImportMappingTable::empty().with_statement("queue", "import Queue as queue");
        assert_eq!(table.lookup_statement("queue"), Some("import Queue as queue"));
        assert_eq!(table.lookup_statement("queue.x"), None);
        assert_eq!(table.lookup_module(&["queue"]), None);
    }

    #[test]
    fn later_insert_overrides() {
        let mut table = ImportMappingTable::standard();
        table.insert_statement("queue", "import Queue as queue");
        assert_eq!(
            table.get("queue"),
            Some(&ImportRewrite::Statement("import Queue as queue".to_string()))
        );
        assert_eq!(table.len(), STANDARD_RENAMES.len());
        assert!(table.remove("queue").is_some());
        assert!(table.get("queue").is_none());
    }
}
