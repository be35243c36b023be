//! Two-phase cleanup of unused variables reported by a JavaScript/TypeScript linter.
//!
//! The linter's textual warnings are parsed into diagnostics. For each one the
//! declaration line is classified with regex heuristics: the safest shapes
//! (standalone declarations, simple destructuring) are removed, everything else
//! is renamed with a leading underscore so the linter stops reporting it.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use lintfix_unused_vars::{Config, run_unused_vars_cleanup};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config {
//!     root: Some(std::path::PathBuf::from("/path/to/project")),
//!     lint_command: "npm run lint".to_string(),
//!     input: None,
//!     timeout_secs: Some(300),
//!     dry_run: true,
//!     json: false,
//! };
//!
//! let result = run_unused_vars_cleanup(cfg)?;
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! lintfix_unused_vars::print_outcomes(&mut stdout, &result)?;
//! lintfix_unused_vars::print_summary(&mut stdout, &result)?;
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod classifier;
mod cleaner;
mod config;
mod mutator;
mod parser;
mod reporter;
mod types;

// Re-export public API
pub use classifier::{Safety, UnsafeReason, classify, is_safe_to_remove};
pub use cleaner::{clean_diagnostics, collect_lint_output, run_unused_vars_cleanup};
pub use config::Config;
pub use mutator::{
    Removal, prefix_identifier, prefix_in_line, remove_declaration, strip_destructured,
};
pub use parser::{DiagnosticParser, parse_diagnostics};
pub use reporter::{print_json, print_outcomes, print_summary};
pub use types::{Action, CleanupResult, Diagnostic, Outcome};
