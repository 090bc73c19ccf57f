//! Property-based tests for the lexer.
//!
//! These tests verify that:
//! - Tokens are ordered, in bounds, and never overlap
//! - Token spans land on char boundaries
//! - Arbitrary input never panics (it either tokenizes or reports an error)

use legacyfix_lexer::{TokenKind, tokenize};
use proptest::prelude::*;

/// Strategy producing lexically valid snippets: words, numbers, operators,
/// comments, and well-formed string literals of assorted styles.
fn arb_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex(r"[a-zA-Z_][a-zA-Z0-9_]{0,8}").unwrap(),
        prop::string::string_regex(r"[0-9]{1,4}(\.[0-9]{1,3})?([eE][+-]?[0-9]{1,2})?[jJ]?").unwrap(),
        prop::string::string_regex(r"0[xX][0-9a-f]{1,4}").unwrap(),
        prop::string::string_regex(r"[ \t]{1,3}|\n|\r\n").unwrap(),
        prop::string::string_regex(r"[-+*/%=<>()\[\]{}:;,.@!&|^~]{1,2}").unwrap(),
        prop::string::string_regex(r"# [^\n\r]{0,12}\n").unwrap(),
        prop::string::string_regex(r#"(r|b|u|rb|f)?'[a-z #"é]{0,8}'"#).unwrap(),
        prop::string::string_regex(r#"(r|b|u|rb|f)?"[a-z #'é]{0,8}""#).unwrap(),
        prop::string::string_regex(r##"'''[a-z \n"#]{0,12}'''"##).unwrap(),
        prop::string::string_regex(r"naïve|größe|日本").unwrap(),
    ]
}

fn arb_source() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_fragment(), 0..40).prop_map(|parts| parts.join(" "))
}

proptest! {
    /// Every token lies within the source, in order, without overlap.
    #[test]
    fn tokens_are_ordered_and_disjoint(src in arb_source()) {
        let tokens = tokenize(&src).expect("generated source is lexically valid");
        for t in &tokens {
            prop_assert!(t.start < t.end, "empty token {t:?}");
            prop_assert!(t.end <= src.len());
            prop_assert!(src.is_char_boundary(t.start));
            prop_assert!(src.is_char_boundary(t.end));
        }
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start, "{:?} overlaps {:?}", pair[0], pair[1]);
        }
    }

    /// Token text matches its kind on the first character.
    #[test]
    fn kinds_match_leading_character(src in arb_source()) {
        let tokens = tokenize(&src).expect("generated source is lexically valid");
        for t in &tokens {
            let text = t.text(&src);
            let first = text.chars().next().unwrap();
            match t.kind {
                TokenKind::Comment => prop_assert_eq!(first, '#'),
                TokenKind::Number => prop_assert!(first.is_ascii_digit() || first == '.'),
                TokenKind::String => prop_assert!(text.ends_with('\'') || text.ends_with('"')),
                TokenKind::Keyword | TokenKind::Identifier => {
                    prop_assert!(first.is_alphabetic() || first == '_')
                }
            }
        }
    }

    /// Arbitrary text never panics.
    #[test]
    fn arbitrary_input_does_not_panic(src in ".{0,64}") {
        if let Ok(tokens) = tokenize(&src) {
            for pair in tokens.windows(2) {
                prop_assert!(pair[0].end <= pair[1].start);
            }
        }
    }
}
