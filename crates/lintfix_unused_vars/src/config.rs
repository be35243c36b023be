use anyhow::{Result, anyhow};
use clap::Parser;
use std::{path::PathBuf, time::Duration};

#[derive(Debug, Clone, Parser)]
#[command(name = "unused-vars")]
#[command(about = "Remove or underscore-prefix unused variables reported by the linter")]
pub struct Config {
    /// Root directory of the project (defaults to git root)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Lint command to run in the root directory
    #[arg(long, default_value = "npm run lint")]
    pub lint_command: String,

    /// Read lint output from this file instead of running the linter ("-" for stdin)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Abort the lint run after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Report what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Print the results as JSON
    #[arg(long)]
    pub json: bool,
}

impl Config {
    /// Resolve the root directory (given path or git root)
    pub fn initialize(&mut self) -> Result<()> {
        self.root = Some(lintfix_core::resolve_root(self.root.take())?);
        Ok(())
    }

    /// Get the root directory, returning an error if not initialized
    pub fn root(&self) -> Result<&PathBuf> {
        self.root
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
