//! End-to-end translation scenarios through the public API.

use legacyfix_domain::{
    EditSink, Fixer, FixerOptions, ImportMappingTable, Profile, TokenGraph, TokenRef, Translator,
};
use pretty_assertions::assert_eq;

fn only(names: &[&str]) -> Profile {
    let allow: Vec<String> = names.iter().map(|s| s.to_string()).collect();
    Profile::legacy().retain(&allow, &[])
}

fn translate(profile: Profile, src: &str) -> String {
    Translator::new(src)
        .with_profile(profile)
        .into_output()
        .expect("translate")
}

/// Inserts a division import at the very start of the text.
struct PrependDivision;

impl Fixer for PrependDivision {
    fn visit(&mut self, _token: TokenRef<'_>, _sink: &mut EditSink<'_>) {}

    fn finish(&mut self, _graph: &TokenGraph<'_>, sink: &mut EditSink<'_>) {
        sink.insert(0, "from __future__ import division\n");
    }
}

#[test]
fn print_call_becomes_statement() {
    assert_eq!(translate(only(&["print"]), "print(x, y)"), "print x, y");
}

#[test]
fn range_in_loop_header() {
    assert_eq!(
        translate(Profile::legacy(), "for i in range(10): pass"),
        "from __future__ import absolute_import, with_statement\nfor i in xrange(10): pass"
    );
}

#[test]
fn attribute_range_is_untouched() {
    assert_eq!(translate(only(&["range"]), "obj.range(5)"), "obj.range(5)");
}

#[test]
fn statement_entry_rewrites_import() {
    let opts = FixerOptions {
        imports: ImportMappingTable::empty().with_statement("queue", "import Queue as queue"),
        ..FixerOptions::default()
    };
    let profile = Profile::legacy_with(&opts).retain(&["imports".to_string()], &[]);
    assert_eq!(translate(profile, "import queue"), "import Queue as queue");
}

#[test]
fn insertion_at_offset_zero_prepends() {
    let profile = Profile::empty("custom").with_fixer("prepend", || Box::new(PrependDivision));
    let src = "x = 1\n";
    assert_eq!(
        translate(profile, src),
        "from __future__ import division\nx = 1\n"
    );
}

#[test]
fn untouched_text_round_trips() {
    let src = "# comment only\n\n\tx = {'a': [1, 2]}   \r\n";
    assert_eq!(translate(Profile::empty("none"), src), src);
    let plain = "x = 1\n";
    assert_eq!(translate(only(&["range", "print", "unicode"]), plain), plain);
}

#[test]
fn same_input_same_output() {
    let src = "class A:\n    def f(self):\n        print(super().f(), 1 / 2)\n";
    let first = translate(Profile::legacy(), src);
    let second = translate(Profile::legacy(), src);
    assert_eq!(first, second);
}

#[test]
fn print_function_profile_keeps_calls() {
    let src = "print('a')\n";
    let profile = Profile::legacy_print_function_with(&FixerOptions::default());
    assert_eq!(
        translate(profile, src),
        "from __future__ import print_function, absolute_import, with_statement\nprint(u'a')\n"
    );
}

#[test]
fn notes_survive_translation() {
    let mut t = Translator::new("print(a, sep='')\n").with_profile(only(&["print"]));
    assert_eq!(t.dump().expect("dump"), "print(a, sep='')\n");
    let notes = t.notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].fixer, "print");
}
