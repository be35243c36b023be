use anyhow::{Context, Result, anyhow};
use log::{debug, info, trace};
use std::{
    env,
    path::{Path, PathBuf},
};

pub fn find_git_root() -> Result<PathBuf> {
    debug!("Searching for git root");
    let current_dir = env::current_dir()?;
    find_git_root_from(&current_dir)
}

pub fn find_git_root_from(start: &Path) -> Result<PathBuf> {
    let mut current_dir = start.to_path_buf();
    trace!("Starting search from: {:?}", current_dir);

    loop {
        let git_dir = current_dir.join(".git");
        trace!("Checking for .git at: {:?}", git_dir);
        if git_dir.exists() {
            debug!("Found git root at: {:?}", current_dir);
            return Ok(current_dir);
        }

        // Try to move up to parent directory
        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => {
                debug!("Could not find .git directory in any parent folder");
                return Err(anyhow!("Could not find .git directory in any parent folder"));
            }
        }
    }
}

/// Resolve the project root: a provided directory is canonicalized, otherwise the git root
/// of the current directory is used.
pub fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    let root = match root {
        Some(r) => {
            debug!("Using provided root directory: {:?}", r);
            let canonical = r
                .canonicalize()
                .with_context(|| format!("Root directory {} does not exist", r.display()))?;
            if !canonical.is_dir() {
                return Err(anyhow!("Root {} is not a directory", canonical.display()));
            }
            canonical
        }
        None => {
            debug!("No root provided, searching for git root");
            find_git_root()?
        }
    };
    info!("Using root directory: {}", root.display());
    Ok(root)
}
