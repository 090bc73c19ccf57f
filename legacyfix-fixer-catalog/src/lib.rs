//! Built-in fixer metadata for `legacyfix list-fixers` and `legacyfix explain`.
//!
//! The registry is static data. Rule implementations live in
//! `legacyfix-domain`; every key here names one of them.

use serde::Serialize;

/// How far a rule's output can be trusted without review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reliability {
    /// The rewrite preserves meaning whenever the pattern matches.
    Exact,
    /// The rewrite guesses from names alone and can be wrong under polymorphism
    /// or shadowing.
    Heuristic,
}

#[derive(Debug, Clone, Serialize)]
pub struct FixerMeta {
    /// Registry name, also the sort key that fixes evaluation order.
    pub key: &'static str,
    pub title: &'static str,
    pub reliability: Reliability,
    pub description: &'static str,
    pub rationale: &'static str,
    pub before: &'static str,
    pub after: &'static str,
}

/// Registry of all built-in fixers, in evaluation (name) order.
pub static FIXER_CATALOG: &[FixerMeta] = &[
    FixerMeta {
        key: "division",
        title: "True division",
        reliability: Reliability::Exact,
        description: r#"Adds `from __future__ import division` to any file that uses the `/` or
`/=` operator, so integer operands keep producing a float quotient on the
legacy interpreter. Floor division (`//`) does not trigger the import."#,
        rationale: r#"The future import switches the legacy interpreter to modern division
semantics for the whole module. The file is left alone when it already
imports `division` from `__future__`."#,
        before: "ratio = hits / total\n",
        after: "from __future__ import division\nratio = hits / total\n",
    },
    FixerMeta {
        key: "encode",
        title: "Explicit codec for encode/decode",
        reliability: Reliability::Heuristic,
        description: r#"Adds an explicit `"utf-8"` argument to `.encode()` and `.decode()` calls
that have no arguments."#,
        rationale: r#"The modern default codec is UTF-8; the legacy default is ASCII. Any
method named `encode` or `decode` is rewritten, whatever its receiver."#,
        before: "data = text.encode()\n",
        after: "data = text.encode(\"utf-8\")\n",
    },
    FixerMeta {
        key: "future",
        title: "Future imports",
        reliability: Reliability::Exact,
        description: r#"Inserts `from __future__ import absolute_import, with_statement` after the
leading comments and module docstring. The import list is configurable; an
empty list disables the rule."#,
        rationale: r#"Future imports must precede all other statements, so the line is placed
before the first code token that is not the docstring."#,
        before: "\"\"\"Module doc.\"\"\"\nimport os\n",
        after: "\"\"\"Module doc.\"\"\"\nfrom __future__ import absolute_import, with_statement\nimport os\n",
    },
    FixerMeta {
        key: "getcwd",
        title: "Text working directory",
        reliability: Reliability::Heuristic,
        description: r#"Rewrites `getcwd(` to `getcwdu(` and `getcwdb(` to `getcwd(`, keeping the
text/bytes return type of each call."#,
        rationale: r#"Matches on the function name alone, so a user-defined `getcwd` is also
renamed."#,
        before: "here = os.getcwd()\n",
        after: "here = os.getcwdu()\n",
    },
    FixerMeta {
        key: "imports",
        title: "Renamed standard library modules",
        reliability: Reliability::Exact,
        description: r#"Rewrites `import` and `from ... import` statements whose module moved
between dialects, using the import mapping table. Module entries rename the
dotted path; statement entries replace the whole statement."#,
        rationale: r#"Only absolute imports whose dotted path matches a table key on component
boundaries are touched. A plain `import x` keeps its binding through an
`as` alias."#,
        before: "from urllib.request import urlopen\nimport queue\n",
        after: "from urllib2 import urlopen\nimport Queue as queue\n",
    },
    FixerMeta {
        key: "newstyle",
        title: "New-style classes",
        reliability: Reliability::Exact,
        description: r#"Makes classes declared without bases inherit from `object`."#,
        rationale: r#"Every modern class is new-style; on the legacy interpreter that requires
an explicit `object` base."#,
        before: "class Point:\n    pass\n",
        after: "class Point(object):\n    pass\n",
    },
    FixerMeta {
        key: "print",
        title: "Print statement",
        reliability: Reliability::Heuristic,
        description: r#"Turns single-line `print(...)` calls in statement position into the
legacy print statement. `file=` becomes `>>stream`, `end=' '` becomes a
trailing comma, and the default `sep`, `end` and `flush` values are dropped."#,
        rationale: r#"Calls with other keyword arguments, star-arguments, or arguments spanning
several lines are left untouched and reported as notes. A single
parenthesised argument containing a top-level comma would print as a tuple."#,
        before: "print(\"total:\", n, file=sys.stderr)\n",
        after: "print >>sys.stderr, \"total:\", n\n",
    },
    FixerMeta {
        key: "range",
        title: "Lazy range",
        reliability: Reliability::Exact,
        description: r#"Rewrites calls to `range(` as `xrange(`. Attribute access such as
`obj.range(` and definitions named `range` are left alone."#,
        rationale: r#"`xrange` matches the lazy modern `range` for iteration. Code that relies
on list methods of the result needs a manual `list(...)`."#,
        before: "for i in range(10): pass\n",
        after: "for i in xrange(10): pass\n",
    },
    FixerMeta {
        key: "super",
        title: "Explicit super arguments",
        reliability: Reliability::Heuristic,
        description: r#"Fills in zero-argument `super()` calls inside methods as
`super(Class, first_param)`, using the enclosing class name and the first
parameter of the enclosing function."#,
        rationale: r#"The enclosing class is tracked by indentation. Calls outside any class
body are left untouched."#,
        before: "class A(B):\n    def f(self):\n        super().f()\n",
        after: "class A(B):\n    def f(self):\n        super(A, self).f()\n",
    },
    FixerMeta {
        key: "unicode",
        title: "Text type names",
        reliability: Reliability::Heuristic,
        description: r#"Rewrites `str(` to `unicode(`, `chr(` to `unichr(`, and `str` inside an
`isinstance(...)` call to `basestring`."#,
        rationale: r#"Matches on names alone; a shadowed `str` is rewritten too. Bare uses of
`str` outside calls are left untouched."#,
        before: "label = str(n)\nok = isinstance(x, str)\n",
        after: "label = unicode(n)\nok = isinstance(x, basestring)\n",
    },
    FixerMeta {
        key: "unicode_literals",
        title: "Unicode string literals",
        reliability: Reliability::Heuristic,
        description: r#"Adds a `u` prefix to string literals that carry no `u`, `b` or `f` prefix,
including raw strings (`r'x'` becomes `ur'x'`)."#,
        rationale: r#"Every unprefixed modern literal is text. Literals meant as native
legacy `str` values become unicode too."#,
        before: "name = 'spam'\n",
        after: "name = u'spam'\n",
    },
];

/// Find a fixer by key. Case-insensitive; `-` and `_` are interchangeable.
pub fn lookup_fixer(query: &str) -> Option<&'static FixerMeta> {
    let normalized = query.trim().to_lowercase().replace('-', "_");
    FIXER_CATALOG.iter().find(|f| f.key == normalized)
}

pub fn fixer_keys() -> Vec<&'static str> {
    FIXER_CATALOG.iter().map(|f| f.key).collect()
}

pub fn format_reliability(reliability: Reliability) -> &'static str {
    match reliability {
        Reliability::Exact => "Exact",
        Reliability::Heuristic => "Heuristic",
    }
}

pub fn reliability_meaning(reliability: Reliability) -> &'static str {
    match reliability {
        Reliability::Exact => {
            "EXACT rules rewrite syntax whose meaning is fixed by the language.\n\
             Their output needs no review."
        }
        Reliability::Heuristic => {
            "HEURISTIC rules decide from names and local context only.\n\
             Review their output where the rewritten names may be shadowed or polymorphic."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn catalog_is_sorted_and_unique() {
        let keys = fixer_keys();
        let mut sorted = keys.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn lookup_normalizes_case_and_dashes() {
        assert_eq!(lookup_fixer("unicode-literals").map(|f| f.key), Some("unicode_literals"));
        assert_eq!(lookup_fixer("RANGE").map(|f| f.key), Some("range"));
        assert!(lookup_fixer("nonexistent").is_none());
    }

    #[test]
    fn every_entry_is_filled_in() {
        for f in FIXER_CATALOG {
            assert!(!f.title.is_empty(), "{}", f.key);
            assert!(!f.description.is_empty(), "{}", f.key);
            assert!(!f.rationale.is_empty(), "{}", f.key);
            assert_ne!(f.before, f.after, "{}", f.key);
        }
    }

    #[test]
    fn reliability_labels() {
        assert_eq!(format_reliability(Reliability::Exact), "Exact");
        assert!(reliability_meaning(Reliability::Heuristic).contains("HEURISTIC"));
    }
}
