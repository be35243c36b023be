//! Merge new translation keys into JSON locale files.
//!
//! A patch file maps locale names (locale file stems such as `en` or `es`) to
//! objects of keys; the special name `"*"` applies to every locale. Existing keys,
//! their order, and their values are preserved; only missing keys are added unless
//! overwriting is requested.
//!
//! # Examples
//!
//! ```no_run
//! use lintfix_locale::{Config, run_locale_update};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config {
//!     root: Some(std::path::PathBuf::from("/path/to/project")),
//!     dir: std::path::PathBuf::from("i18n/locales"),
//!     patch: std::path::PathBuf::from("new-keys.json"),
//!     overwrite: false,
//!     dry_run: false,
//!     json: false,
//! };
//!
//! let result = run_locale_update(cfg)?;
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! lintfix_locale::print_file_reports(&mut stdout, &result)?;
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod config;
mod merge;
mod patch;
mod reporter;
mod types;
mod updater;

// Re-export public API
pub use config::Config;
pub use merge::{MergeStats, merge_into};
pub use patch::{LocalePatch, SHARED_SECTION};
pub use reporter::{print_file_reports, print_json, print_summary};
pub use types::{FileReport, FileStatus, UpdateResult};
pub use updater::{run_locale_update, update_locale_file};
