use crate::edit::Note;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

impl Default for ToolInfo {
    fn default() -> Self {
        Self {
            name: "legacyfix".to_string(),
            version: "0.1.0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Output differed from input (written unless dry-run).
    Translated,
    /// Translation produced identical text.
    Unchanged,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    SkipSet,
    CompatMarker,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    /// Path relative to the run root, `/`-separated.
    pub path: String,
    pub status: FileStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<SkipReason>,

    #[serde(default)]
    pub edits: usize,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_before: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_after: Option<String>,
}

impl FileReport {
    pub fn new(path: impl Into<String>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
            skip_reason: None,
            edits: 0,
            notes: vec![],
            error: None,
            sha256_before: None,
            sha256_after: None,
        }
    }

    pub fn skipped(path: impl Into<String>, reason: SkipReason) -> Self {
        let mut r = Self::new(path, FileStatus::Skipped);
        r.skip_reason = Some(reason);
        r
    }

    pub fn failed(path: impl Into<String>, error: impl Into<String>) -> Self {
        let mut r = Self::new(path, FileStatus::Failed);
        r.error = Some(error.into());
        r
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub files_total: u64,
    pub translated: u64,
    pub unchanged: u64,
    pub skipped: u64,
    pub failed: u64,
    pub edits_total: u64,
    pub notes_total: u64,
}

impl RunSummary {
    pub fn from_files(files: &[FileReport]) -> Self {
        let mut s = Self::default();
        for f in files {
            s.files_total += 1;
            s.edits_total += f.edits as u64;
            s.notes_total += f.notes.len() as u64;
            match f.status {
                FileStatus::Translated => s.translated += 1,
                FileStatus::Unchanged => s.unchanged += 1,
                FileStatus::Skipped => s.skipped += 1,
                FileStatus::Failed => s.failed += 1,
            }
        }
        s
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub root: String,
    pub profile: String,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub files: Vec<FileReport>,
    pub summary: RunSummary,
}

impl RunReport {
    pub fn new(
        root: impl Into<String>,
        profile: impl Into<String>,
        dry_run: bool,
        files: Vec<FileReport>,
    ) -> Self {
        let summary = RunSummary::from_files(&files);
        Self {
            schema: crate::schema::LEGACYFIX_REPORT_V1.to_string(),
            tool: ToolInfo::default(),
            root: root.into(),
            profile: profile.into(),
            dry_run,
            files,
            summary,
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.files
            .iter()
            .filter(|f| f.status == FileStatus::Failed)
    }

    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }
}
