//! Small token-level recognisers shared by several fixers: statement
//! position, import statements, and the module header insertion point.

use legacyfix_types::token::TokenKind;

use crate::graph::{TokenGraph, TokenRef};

/// Keywords that open a compound statement whose body may follow `:` on the
/// same line.
const COMPOUND_HEADS: &[&str] = &[
    "async", "class", "def", "elif", "else", "except", "finally", "for", "if", "try", "while",
    "with",
];

/// True if `token` begins a simple statement: first on its line, after `;`,
/// or after the `:` of a compound statement header.
///
/// Lines inside open brackets or after a backslash continuation never start
/// a statement.
pub fn at_statement_start(token: TokenRef<'_>) -> bool {
    let graph = token.graph();
    if graph.bracket_depth(token.start()) > 0 {
        return false;
    }
    match token.prev_char() {
        None => !graph.is_continuation_line(token.start()),
        Some(';') => true,
        Some(':') => token
            .line_tokens()
            .iter()
            .take_while(|t| t.index() < token.index())
            .enumerate()
            .all(|(i, t)| {
                if i == 0 {
                    COMPOUND_HEADS.contains(&t.text()) && t.is_kind(TokenKind::Keyword)
                } else {
                    !t.is_keyword("lambda")
                }
            }),
        Some(_) => false,
    }
}

/// Gap text without whitespace or backslash continuations.
pub(crate) fn squeeze(gap: &str) -> String {
    gap.chars()
        .filter(|c| !c.is_whitespace() && *c != '\\')
        .collect()
}

fn is_word(token: TokenRef<'_>) -> bool {
    matches!(token.kind(), TokenKind::Identifier | TokenKind::Keyword)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportForm {
    /// `import a.b [as c], d`
    Import,
    /// `from a.b import c [as d], e`
    From,
}

/// A dotted module path inside an import statement.
#[derive(Debug, Clone)]
pub struct ModulePath<'g> {
    pub parts: Vec<TokenRef<'g>>,
    pub alias: Option<TokenRef<'g>>,
}

impl<'g> ModulePath<'g> {
    pub fn start(&self) -> usize {
        self.parts.first().map_or(0, |t| t.start())
    }

    /// End of the last part of the path.
    pub fn end(&self) -> usize {
        self.parts.last().map_or(0, |t| t.end())
    }

    pub fn part_texts(&self) -> Vec<&'g str> {
        self.parts.iter().map(|t| t.text()).collect()
    }

    pub fn dotted(&self) -> String {
        self.part_texts().join(".")
    }
}

#[derive(Debug, Clone)]
pub struct ImportStatement<'g> {
    pub form: ImportForm,
    pub keyword: TokenRef<'g>,
    /// `import`: one entry per item. `from`: the source module, unless relative.
    pub modules: Vec<ModulePath<'g>>,
    /// `from` form only: the imported names (`*` is not listed).
    pub names: Vec<TokenRef<'g>>,
    pub relative: bool,
    /// End offset of the statement's last significant character.
    pub end: usize,
}

impl<'g> ImportStatement<'g> {
    pub fn start(&self) -> usize {
        self.keyword.start()
    }

    pub fn imports_name(&self, name: &str) -> bool {
        self.names.iter().any(|t| t.text() == name)
    }
}

/// Parse a dotted name starting at `token`, with an optional `as` alias.
fn dotted_path(token: TokenRef<'_>) -> Option<ModulePath<'_>> {
    if !is_word(token) {
        return None;
    }
    let mut parts = vec![token];
    let mut last = token;
    while squeeze(last.gap_after()) == "."
        && let Some(next) = last.next()
        && is_word(next)
    {
        parts.push(next);
        last = next;
    }
    let alias = last
        .next()
        .filter(|t| t.is_keyword("as") && squeeze(last.gap_after()).is_empty())
        .and_then(|as_kw| as_kw.next())
        .filter(|t| is_word(*t));
    Some(ModulePath { parts, alias })
}

fn path_last<'g>(path: &ModulePath<'g>) -> Option<TokenRef<'g>> {
    path.alias.or_else(|| path.parts.last().copied())
}

/// Recognise an import statement whose leading keyword is `token`.
pub fn parse_import(token: TokenRef<'_>) -> Option<ImportStatement<'_>> {
    let form = if token.is_keyword("import") {
        ImportForm::Import
    } else if token.is_keyword("from") {
        ImportForm::From
    } else {
        return None;
    };
    if !at_statement_start(token) {
        return None;
    }
    match form {
        ImportForm::Import => parse_plain_import(token),
        ImportForm::From => parse_from_import(token),
    }
}

fn parse_plain_import(keyword: TokenRef<'_>) -> Option<ImportStatement<'_>> {
    if !squeeze(keyword.gap_after()).is_empty() {
        return None;
    }
    let mut modules = Vec::new();
    let mut cursor = keyword.next()?;
    loop {
        let path = dotted_path(cursor)?;
        let last = path_last(&path)?;
        modules.push(path);
        if squeeze(last.gap_after()) == ","
            && let Some(next) = last.next()
        {
            cursor = next;
            continue;
        }
        return Some(ImportStatement {
            form: ImportForm::Import,
            keyword,
            modules,
            names: Vec::new(),
            relative: false,
            end: last.end(),
        });
    }
}

fn parse_from_import(keyword: TokenRef<'_>) -> Option<ImportStatement<'_>> {
    let lead = squeeze(keyword.gap_after());
    let relative = lead.starts_with('.');
    if !relative && !lead.is_empty() {
        return None;
    }

    let mut cursor = keyword.next()?;
    let mut modules = Vec::new();
    if !cursor.is_keyword("import") {
        let path = dotted_path(cursor)?;
        let last = path.parts.last().copied()?;
        if path.alias.is_some() || !squeeze(last.gap_after()).is_empty() {
            return None;
        }
        cursor = last.next()?;
        if !relative {
            modules.push(path);
        }
    }
    let import_kw = cursor;
    if !import_kw.is_keyword("import") {
        return None;
    }

    let graph = keyword.graph();
    let after = squeeze(import_kw.gap_after());
    let mut names = Vec::new();
    let end;
    if after.starts_with('*') {
        let star = graph.find_forward(import_kw.end(), "*")?;
        end = star + 1;
    } else if after.starts_with('(') {
        let open = graph.find_forward(import_kw.end(), "(")?;
        let close = graph.matching_close(open)?;
        let mut t = import_kw.next();
        while let Some(tok) = t
            && tok.start() < close
        {
            let prev_is_as = tok.prev().is_some_and(|p| p.is_keyword("as"));
            if is_word(tok) && !tok.is_keyword("as") && !prev_is_as {
                names.push(tok);
            }
            t = tok.next();
        }
        end = close + 1;
    } else {
        let mut cursor = import_kw.next()?;
        loop {
            if !is_word(cursor) {
                return None;
            }
            names.push(cursor);
            let mut last = cursor;
            if let Some(as_kw) = cursor.next().filter(|t| t.is_keyword("as"))
                && squeeze(cursor.gap_after()).is_empty()
                && let Some(alias) = as_kw.next()
            {
                last = alias;
            }
            if squeeze(last.gap_after()) == ","
                && let Some(next) = last.next()
            {
                cursor = next;
                continue;
            }
            end = last.end();
            break;
        }
    }

    Some(ImportStatement {
        form: ImportForm::From,
        keyword,
        modules,
        names,
        relative,
        end,
    })
}

/// True if some `from <module> import ...` statement imports `symbol`.
pub fn imports_symbol(graph: &TokenGraph<'_>, module: &str, symbol: &str) -> bool {
    graph
        .iter()
        .filter(|t| t.is_keyword("from"))
        .filter_map(parse_import)
        .any(|stmt| {
            !stmt.relative
                && stmt.modules.first().is_some_and(|m| m.dotted() == module)
                && stmt.imports_name(symbol)
        })
}

/// Offset where module-level header lines (future imports) belong: the start
/// of the line holding the first code token after leading comments and the
/// module docstring. `None` when the module has no code.
pub fn header_offset(graph: &TokenGraph<'_>) -> Option<usize> {
    let mut code = graph.iter().filter(|t| !t.is_kind(TokenKind::Comment));
    let first = code.next()?;
    let target = if first.is_kind(TokenKind::String) {
        code.next()?
    } else {
        first
    };
    Some(graph.line_start(target.start()))
}
