//! Core utilities for lintfix tools.
//!
//! This crate provides the plumbing shared by the individual codemods:
//! - Locating the project root
//! - Running an external lint tool and capturing its output
//! - Collecting candidate files from a project tree
//! - Reading a file as physical lines and writing it back atomically
//! - Path helpers for normalizing and displaying file paths

mod collector;
mod config;
mod constants;
mod error;
mod paths;
mod runner;
mod source;

// Re-export public API
pub use collector::{CollectorConfig, collect_files};
pub use config::{find_git_root, find_git_root_from, resolve_root};
pub use constants::{EXCLUDED_PATH_MARKERS, SOURCE_EXTENSIONS};
pub use error::ToolError;
pub use paths::{display_path, make_relative, normalize_path};
pub use runner::{ToolCommand, ToolOutput, run_tool};
pub use source::{SourceFile, write_atomic};
