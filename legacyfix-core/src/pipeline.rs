//! The directory driver, extracted from the CLI.
//!
//! Every discovered file is translated independently. A file that cannot be
//! read, lexed or written is reported as failed and the run moves on.

use crate::ports::{SourceTree, WritePort};
use crate::settings::RunSettings;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use legacyfix_domain::{Profile, Translator};
use legacyfix_edit::{render_patches, sha256_hex};
use legacyfix_render::render_run_md;
use legacyfix_types::report::{FileReport, FileStatus, RunReport, SkipReason};
use tracing::{debug, warn};

/// Outcome of `run_dir`.
pub struct RunOutcome {
    pub report: RunReport,
    /// Unified diff of every translated file, in discovery order.
    pub patch: String,
}

struct ChangedFile {
    path: String,
    before: String,
    after: String,
}

/// Translate every source file under `settings.root`.
///
/// Only discovery errors abort the run; per-file failures are recorded in
/// the report.
pub fn run_dir(
    settings: &RunSettings,
    profile: &Profile,
    tree: &dyn SourceTree,
) -> anyhow::Result<RunOutcome> {
    let files = tree
        .discover(&settings.root, &settings.extensions)
        .with_context(|| format!("discover sources under {}", settings.root))?;
    debug!(
        root = %settings.root,
        files = files.len(),
        profile = profile.name(),
        "discovered sources"
    );

    let mut reports = Vec::with_capacity(files.len());
    let mut changed = Vec::new();
    for path in &files {
        let rel = relative_path(&settings.root, path);
        let report = translate_file(settings, profile, tree, path, &rel, &mut changed);
        if let Some(err) = &report.error {
            warn!(path = %rel, error = %err, "file failed");
        }
        reports.push(report);
    }

    let patch = render_patches(
        changed
            .iter()
            .map(|c| (c.path.as_str(), c.before.as_str(), c.after.as_str())),
    );
    let report = RunReport::new(
        settings.root.as_str(),
        profile.name(),
        settings.dry_run,
        reports,
    );
    debug!(
        translated = report.summary.translated,
        failed = report.summary.failed,
        "run finished"
    );
    Ok(RunOutcome { report, patch })
}

fn translate_file(
    settings: &RunSettings,
    profile: &Profile,
    tree: &dyn SourceTree,
    path: &Utf8Path,
    rel: &str,
    changed: &mut Vec<ChangedFile>,
) -> FileReport {
    if settings.skip.matches(&absolute(path), Utf8Path::new(rel)) {
        debug!(path = %rel, "skipped by skip set");
        return FileReport::skipped(rel, SkipReason::SkipSet);
    }

    let before = match tree.read(path) {
        Ok(text) => text,
        Err(e) => return FileReport::failed(rel, format!("{e:#}")),
    };
    let sha_before = sha256_hex(before.as_bytes());
    let failed = |error: String| {
        let mut r = FileReport::failed(rel, error);
        r.sha256_before = Some(sha_before.clone());
        r
    };

    let mut translator = Translator::new(before)
        .with_name(rel)
        .with_profile(profile.clone());

    if let Some(marker) = &settings.marker {
        match translator.imports_symbol(&marker.module, &marker.symbol) {
            Ok(true) => {
                debug!(path = %rel, module = %marker.module, symbol = %marker.symbol, "compat marker found");
                let mut r = FileReport::skipped(rel, SkipReason::CompatMarker);
                r.sha256_before = Some(sha_before.clone());
                r.sha256_after = Some(sha_before.clone());
                return r;
            }
            Ok(false) => {}
            Err(e) => return failed(e.to_string()),
        }
    }

    let after = match translator.dump() {
        Ok(out) => out.to_string(),
        Err(e) => return failed(e.to_string()),
    };

    let mut report = FileReport::new(rel, FileStatus::Unchanged);
    report.edits = translator.edits().map_or(0, <[_]>::len);
    report.notes = translator.notes().to_vec();
    report.sha256_before = Some(sha_before);
    report.sha256_after = Some(sha256_hex(after.as_bytes()));
    if after == translator.text() {
        return report;
    }

    report.status = FileStatus::Translated;
    if !settings.dry_run
        && let Err(e) = tree.write(path, &after)
    {
        report.status = FileStatus::Failed;
        report.error = Some(format!("{e:#}"));
        return report;
    }
    changed.push(ChangedFile {
        path: rel.to_string(),
        before: translator.text().to_string(),
        after,
    });
    report
}

/// `path` joined onto the working directory when relative, so absolute skip
/// entries match files discovered under a relative root.
fn absolute(path: &Utf8Path) -> Utf8PathBuf {
    std::path::absolute(path)
        .ok()
        .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
        .unwrap_or_else(|| path.to_path_buf())
}

/// `path` relative to `root`, `/`-separated. A file root reports its own name.
fn relative_path(root: &Utf8Path, path: &Utf8Path) -> String {
    let rel = match path.strip_prefix(root) {
        Ok(rel) if !rel.as_str().is_empty() => rel.as_str(),
        _ if root.as_str() == "." => path.as_str().trim_start_matches("./"),
        _ => path.file_name().unwrap_or(path.as_str()),
    };
    rel.replace('\\', "/")
}

/// Write `report.json`, `report.md` and `patch.diff` into `out_dir`.
pub fn write_run_artifacts(
    outcome: &RunOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let report_json =
        serde_json::to_string_pretty(&outcome.report).context("serialize report")?;
    writer.write_file(&out_dir.join("report.json"), report_json.as_bytes())?;

    let report_md = render_run_md(&outcome.report);
    writer.write_file(&out_dir.join("report.md"), report_md.as_bytes())?;

    writer.write_file(&out_dir.join("patch.diff"), outcome.patch.as_bytes())?;
    Ok(())
}
