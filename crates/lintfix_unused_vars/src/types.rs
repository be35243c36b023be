use serde::Serialize;
use std::path::PathBuf;

/// One unused-variable finding reported by the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: PathBuf,
    /// 1-based line number as reported
    pub line: usize,
    pub column: usize,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Removed,
    Prefixed,
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub file: PathBuf,
    /// Line number as reported by the linter, before any edits in this run
    pub line: usize,
    pub name: String,
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanupResult {
    pub removed: usize,
    pub prefixed: usize,
    pub skipped: usize,
    pub dry_run: bool,
    pub outcomes: Vec<Outcome>,
}

impl CleanupResult {
    pub fn total(&self) -> usize {
        self.removed + self.prefixed + self.skipped
    }

    pub(crate) fn record(&mut self, outcome: Outcome) {
        match outcome.action {
            Action::Removed => self.removed += 1,
            Action::Prefixed => self.prefixed += 1,
            Action::Skipped => self.skipped += 1,
        }
        self.outcomes.push(outcome);
    }
}
