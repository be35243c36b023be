use anyhow::{Context, Result};
use log::{debug, info, trace, warn};
use std::{
    collections::{HashMap, HashSet, hash_map::Entry},
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use lintfix_core::{SourceFile, ToolCommand, run_tool};

use crate::{
    classifier::{Safety, classify},
    config::Config,
    mutator::{Removal, prefix_identifier, remove_declaration},
    parser::parse_diagnostics,
    types::{Action, CleanupResult, Diagnostic, Outcome},
};

pub fn run_unused_vars_cleanup(mut cfg: Config) -> Result<CleanupResult> {
    info!("Starting unused variable cleanup");

    cfg.initialize()?;
    let root = cfg.root()?.clone();

    let output = collect_lint_output(&cfg)?;
    let diagnostics = parse_diagnostics(&root, &output);
    info!("Found {} unused-variable warnings", diagnostics.len());

    let result = clean_diagnostics(&diagnostics, cfg.dry_run);
    info!(
        "Cleanup complete: {} removed, {} prefixed, {} skipped",
        result.removed, result.prefixed, result.skipped
    );
    Ok(result)
}

/// Lint output to work from: the captured `--input`, or a fresh run of the lint command.
pub fn collect_lint_output(cfg: &Config) -> Result<String> {
    if let Some(input) = &cfg.input {
        if input.as_os_str() == "-" {
            debug!("Reading lint output from stdin");
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read lint output from stdin")?;
            return Ok(text);
        }
        debug!("Reading lint output from {}", input.display());
        return fs::read_to_string(input)
            .with_context(|| format!("Failed to read lint output from {}", input.display()));
    }

    let root = cfg.root()?;
    let command = ToolCommand::parse(&cfg.lint_command)?;
    let output = run_tool(&command, root, cfg.timeout())
        .with_context(|| format!("Could not collect warnings with `{}`", command))?;
    Ok(output.text)
}

/// Run-scoped bookkeeping threaded through the driver loop.
#[derive(Default)]
struct RunState {
    seen: HashSet<(PathBuf, usize, String)>,
    /// Original line numbers deleted so far, per file
    deleted: HashMap<PathBuf, Vec<usize>>,
    /// Every file touched so far, including edits a dry run never writes
    buffers: HashMap<PathBuf, SourceFile>,
    result: CleanupResult,
}

impl RunState {
    /// Where an originally reported line sits now, or `None` if it was deleted.
    fn current_line(&self, file: &Path, line: usize) -> Option<usize> {
        let Some(deleted) = self.deleted.get(file) else {
            return Some(line);
        };
        if deleted.contains(&line) {
            return None;
        }
        Some(line - deleted.iter().filter(|&&d| d < line).count())
    }

    /// Write the buffered edits of `path` unless this is a dry run.
    fn persist(&mut self, path: &Path, dry_run: bool) -> Result<()> {
        if dry_run {
            return Ok(());
        }
        let Some(file) = self.buffers.get(path) else {
            return Ok(());
        };
        if let Err(e) = file.write() {
            // Reload from disk next time so the buffer never runs ahead of the file
            self.buffers.remove(path);
            return Err(e);
        }
        Ok(())
    }
}

/// Apply the two-phase cleanup to every diagnostic, in order.
///
/// Nothing here is fatal: a diagnostic that cannot be handled is tallied as skipped and
/// the loop moves on. Edits already written are never rolled back.
pub fn clean_diagnostics(diagnostics: &[Diagnostic], dry_run: bool) -> CleanupResult {
    let mut state = RunState::default();
    state.result.dry_run = dry_run;

    for diag in diagnostics {
        if diag.name.starts_with('_') {
            trace!("'{}' is already prefixed, ignoring", diag.name);
            continue;
        }
        if !state.seen.insert((diag.file.clone(), diag.line, diag.name.clone())) {
            trace!(
                "Duplicate warning for '{}' at {}:{}",
                diag.name,
                diag.file.display(),
                diag.line
            );
            continue;
        }

        let (action, detail) = match process(diag, &mut state, dry_run) {
            Ok(done) => done,
            Err(e) => {
                warn!("Skipping '{}' in {}: {:#}", diag.name, diag.file.display(), e);
                (Action::Skipped, Some(format!("{:#}", e)))
            }
        };

        match action {
            Action::Removed => {
                info!("Removed '{}' at {}:{}", diag.name, diag.file.display(), diag.line)
            }
            Action::Prefixed => {
                info!("Prefixed '{}' at {}:{}", diag.name, diag.file.display(), diag.line)
            }
            Action::Skipped => debug!(
                "Skipped '{}' at {}:{} ({})",
                diag.name,
                diag.file.display(),
                diag.line,
                detail.as_deref().unwrap_or("no change")
            ),
        }

        state.result.record(Outcome {
            file: diag.file.clone(),
            line: diag.line,
            name: diag.name.clone(),
            action,
            detail,
        });
    }

    state.result
}

fn process(
    diag: &Diagnostic,
    state: &mut RunState,
    dry_run: bool,
) -> Result<(Action, Option<String>)> {
    if !diag.file.is_file() {
        return Ok((Action::Skipped, Some("file not found".to_string())));
    }
    let Some(line) = state.current_line(&diag.file, diag.line) else {
        return Ok((Action::Skipped, Some("line was already removed".to_string())));
    };

    let file = match state.buffers.entry(diag.file.clone()) {
        Entry::Occupied(entry) => entry.into_mut(),
        Entry::Vacant(entry) => entry.insert(SourceFile::read(&diag.file)?),
    };
    let Some(target) = file.line(line) else {
        return Ok((Action::Skipped, Some(format!("line {} is past the end of the file", line))));
    };
    trace!(
        "Warning at {}:{} column {}: `{}`",
        diag.file.display(),
        line,
        diag.column,
        target.trim()
    );

    // Phase 1: removal, only for the safest shapes
    if classify(target, &diag.name) == Safety::SafeToRemove {
        match remove_declaration(file, line, &diag.name) {
            Some(removal) => {
                state.persist(&diag.file, dry_run)?;
                if removal == Removal::DeletedLine {
                    state.deleted.entry(diag.file.clone()).or_default().push(diag.line);
                }
                let detail = match removal {
                    Removal::DeletedLine => "deleted declaration",
                    Removal::RemovedElement => "removed from destructuring",
                };
                return Ok((Action::Removed, Some(detail.to_string())));
            }
            None => debug!("Removal of '{}' did not apply, falling back to prefix", diag.name),
        }
    }

    // Phase 2: underscore prefix
    if prefix_identifier(file, line, &diag.name) {
        state.persist(&diag.file, dry_run)?;
        return Ok((Action::Prefixed, None));
    }

    Ok((Action::Skipped, Some("identifier not found on line".to_string())))
}
