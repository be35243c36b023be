use serde::Serialize;
use std::path::PathBuf;

use crate::merge::MergeStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Updated,
    Unchanged,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub locale: String,
    pub status: FileStatus,
    pub stats: MergeStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateResult {
    pub files: Vec<FileReport>,
    /// Locales named in the patch with no matching file
    pub unmatched_locales: Vec<String>,
    pub dry_run: bool,
}

impl UpdateResult {
    pub fn count(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }
}
