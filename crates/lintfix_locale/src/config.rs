use anyhow::{Result, anyhow};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "locale")]
#[command(about = "Merge new translation keys into JSON locale files")]
pub struct Config {
    /// Root directory of the project (defaults to git root)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Directory holding the locale files, relative to the root
    #[arg(long, default_value = "i18n/locales")]
    pub dir: PathBuf,

    /// JSON file mapping locale names (or "*" for all) to the keys to merge
    #[arg(long)]
    pub patch: PathBuf,

    /// Replace existing values that differ from the patch
    #[arg(long)]
    pub overwrite: bool,

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

    pub fn locales_dir(&self) -> Result<PathBuf> {
        if self.dir.is_absolute() { Ok(self.dir.clone()) } else { Ok(self.root()?.join(&self.dir)) }
    }
}
