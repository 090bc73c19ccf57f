//! Golden fixture tests for legacyfix.
//!
//! Each fixture under `tests/fixtures/<name>/` at the workspace root holds:
//!
//! - `input.py` - modern source
//! - `expected.py` - the translation with the default profile
//!
//! Set `LEGACYFIX_BLESS=1` to overwrite `expected.py` with the current output.

use fs_err as fs;
use legacyfix_domain::Translator;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

fn fixture_dir(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir.parent().expect("workspace root");
    workspace_root.join("tests").join("fixtures").join(name)
}

fn run_fixture_test(fixture_name: &str) {
    let fixture_path = fixture_dir(fixture_name);
    assert!(
        fixture_path.exists(),
        "Fixture directory does not exist: {}",
        fixture_path.display()
    );

    let input = fs::read_to_string(fixture_path.join("input.py")).expect("read input");
    let output = Translator::new(input.as_str())
        .with_name(format!("{fixture_name}/input.py"))
        .into_output()
        .expect("translate fixture");

    let expected_path = fixture_path.join("expected.py");
    let bless = std::env::var_os("LEGACYFIX_BLESS").is_some();
    if bless || !expected_path.exists() {
        fs::write(&expected_path, &output).expect("write expected output");
        println!(
            "Wrote expected output for '{}' at {}",
            fixture_name,
            expected_path.display()
        );
        return;
    }

    let expected = fs::read_to_string(&expected_path).expect("read expected output");
    assert_eq!(output, expected, "Output mismatch for fixture '{fixture_name}'");
}

#[test]
fn golden_print_and_range() {
    run_fixture_test("print_and_range");
}

#[test]
fn golden_classes_and_super() {
    run_fixture_test("classes_and_super");
}

#[test]
fn golden_heuristic_rewrites() {
    run_fixture_test("heuristic_rewrites");
}
