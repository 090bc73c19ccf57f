//! Property tests: translation (output, edits and notes) is deterministic
//! and an empty profile is the identity.

use legacyfix_domain::{Profile, Translator};
use proptest::prelude::*;

fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("print(x, y)\n".to_string()),
        Just("for i in range(3): pass\n".to_string()),
        Just("import queue\n".to_string()),
        Just("a = b / c\n".to_string()),
        Just("s = 'text'\n".to_string()),
        Just("class K:\n    def m(self):\n        return super().m()\n".to_string()),
        Just("# note\n".to_string()),
        Just("\n".to_string()),
        "[a-z]{1,6}".prop_map(|name| format!("{name} = str({name})\n")),
    ]
}

fn source() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment(), 0..12).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn translation_is_deterministic(src in source()) {
        let first = Translator::new(src.as_str()).into_output().unwrap();
        let second = Translator::new(src.as_str()).into_output().unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn edits_and_notes_are_deterministic(src in source()) {
        let mut first = Translator::new(src.as_str());
        let mut second = Translator::new(src.as_str());
        let first_edits = first.translate().unwrap().to_vec();
        let second_edits = second.translate().unwrap().to_vec();
        prop_assert_eq!(first_edits, second_edits);
        prop_assert_eq!(first.notes(), second.notes());
    }

    #[test]
    fn empty_profile_is_identity(src in source()) {
        let out = Translator::new(src.as_str())
            .with_profile(Profile::empty("none"))
            .into_output()
            .unwrap();
        prop_assert_eq!(out, src);
    }
}
