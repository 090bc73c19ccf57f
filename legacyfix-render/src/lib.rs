//! Rendering helpers (markdown and terminal lines) for run reports.

use legacyfix_types::report::{FileReport, FileStatus, RunReport, RunSummary, SkipReason};

pub fn render_run_md(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str("# legacyfix run\n\n");
    out.push_str(&format!("- Root: `{}`\n", report.root));
    out.push_str(&format!("- Profile: `{}`\n", report.profile));
    out.push_str(&format!("- Dry run: `{}`\n", report.dry_run));
    let s = &report.summary;
    out.push_str(&format!(
        "- Files: {} (translated {}, unchanged {}, skipped {}, failed {})\n",
        s.files_total, s.translated, s.unchanged, s.skipped, s.failed
    ));
    out.push_str(&format!(
        "- Edits: {}\n- Notes: {}\n\n",
        s.edits_total, s.notes_total
    ));

    out.push_str("## Files\n\n");
    if report.files.is_empty() {
        out.push_str("_No source files found._\n");
        return out;
    }

    for f in &report.files {
        out.push_str(&format!("- `{}` {}", f.path, file_label(f)));
        if f.edits > 0 {
            out.push_str(&format!(", {} edits", f.edits));
        }
        out.push('\n');
        if let Some(err) = &f.error {
            out.push_str(&format!("  - Error: {}\n", err));
        }
        for n in &f.notes {
            out.push_str(&format!(
                "  - Note (`{}`, line {}): {}\n",
                n.fixer, n.line, n.message
            ));
        }
    }

    let failures: Vec<_> = report.failures().collect();
    if !failures.is_empty() {
        out.push_str("\n## Failures\n\n");
        for f in failures {
            out.push_str(&format!(
                "- `{}`: {}\n",
                f.path,
                f.error.as_deref().unwrap_or("unknown error")
            ));
        }
    }

    out
}

/// One terminal line summarising a run.
pub fn render_summary_line(summary: &RunSummary) -> String {
    format!(
        "{} files: {} translated, {} unchanged, {} skipped, {} failed ({} edits, {} notes)",
        summary.files_total,
        summary.translated,
        summary.unchanged,
        summary.skipped,
        summary.failed,
        summary.edits_total,
        summary.notes_total
    )
}

pub fn status_label(s: FileStatus) -> &'static str {
    match s {
        FileStatus::Translated => "translated",
        FileStatus::Unchanged => "unchanged",
        FileStatus::Skipped => "skipped",
        FileStatus::Failed => "failed",
    }
}

pub fn skip_reason_label(r: SkipReason) -> &'static str {
    match r {
        SkipReason::SkipSet => "skip set",
        SkipReason::CompatMarker => "compat marker",
    }
}

/// `skipped (compat marker)`, `translated`, ...
pub fn file_label(f: &FileReport) -> String {
    match f.skip_reason {
        Some(reason) => format!("{} ({})", status_label(f.status), skip_reason_label(reason)),
        None => status_label(f.status).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use legacyfix_types::edit::Note;
    use pretty_assertions::assert_eq;

    fn report() -> RunReport {
        let mut translated = FileReport::new("pkg/a.py", FileStatus::Translated);
        translated.edits = 3;
        translated.notes.push(Note {
            offset: 10,
            line: 2,
            fixer: "print".to_string(),
            message: "print call with star arguments left unchanged".to_string(),
        });
        RunReport::new(
            "src",
            "legacy",
            true,
            vec![
                translated,
                FileReport::skipped("pkg/b.py", SkipReason::CompatMarker),
                FileReport::failed("pkg/c.py", "pkg/c.py: unterminated string at line 1, column 5"),
            ],
        )
    }

    #[test]
    fn run_md_lists_files_notes_and_failures() {
        let md = render_run_md(&report());
        assert!(md.starts_with("# legacyfix run\n\n"));
        assert!(md.contains("- Files: 3 (translated 1, unchanged 0, skipped 1, failed 1)\n"));
        assert!(md.contains("- `pkg/a.py` translated, 3 edits\n"));
        assert!(md.contains("  - Note (`print`, line 2): print call with star arguments"));
        assert!(md.contains("- `pkg/b.py` skipped (compat marker)\n"));
        assert!(md.contains("## Failures\n\n- `pkg/c.py`: pkg/c.py: unterminated string"));
    }

    #[test]
    fn empty_run() {
        let md = render_run_md(&RunReport::new(".", "legacy", false, vec![]));
        assert!(md.ends_with("_No source files found._\n"));
        assert!(!md.contains("## Failures"));
    }

    #[test]
    fn summary_line() {
        assert_eq!(
            render_summary_line(&report().summary),
            "3 files: 1 translated, 0 unchanged, 1 skipped, 1 failed (3 edits, 1 notes)"
        );
    }
}
