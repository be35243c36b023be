use std::io::{self, Write};

use colored::Colorize;
use log::debug;

use lintfix_core::display_path;

use crate::types::{FileStatus, UpdateResult};

/// One line per locale file, in path order.
pub fn print_file_reports<W: Write>(writer: &mut W, result: &UpdateResult) -> io::Result<()> {
    debug!("Printing {} file reports", result.files.len());
    for report in &result.files {
        let path = display_path(&report.path);
        match report.status {
            FileStatus::Updated => writeln!(
                writer,
                "  {} {} ({}) - {} added, {} overwritten",
                "✓".green(),
                path.blue(),
                report.locale,
                report.stats.added.to_string().green(),
                report.stats.overwritten.to_string().yellow()
            )?,
            FileStatus::Unchanged => writeln!(
                writer,
                "  {} {} ({}) - unchanged",
                "·".dimmed(),
                path.dimmed(),
                report.locale
            )?,
            FileStatus::Failed => writeln!(
                writer,
                "  {} {} ({}) - {}",
                "✗".red(),
                path.red(),
                report.locale,
                report.error.as_deref().unwrap_or("unknown error")
            )?,
        }
    }
    for locale in &result.unmatched_locales {
        writeln!(writer, "  {} No locale file for '{}'", "⚠".yellow(), locale)?;
    }
    Ok(())
}

pub fn print_summary<W: Write>(writer: &mut W, result: &UpdateResult) -> io::Result<()> {
    let updated = result.count(FileStatus::Updated);
    let failed = result.count(FileStatus::Failed);
    let added: usize = result.files.iter().map(|f| f.stats.added).sum();

    writeln!(writer)?;
    writeln!(writer, "{}", "─".repeat(60).dimmed())?;
    if result.dry_run {
        writeln!(writer, "{} (dry run, no files written)", "Results".bold())?;
    } else {
        writeln!(writer, "{}", "Results".bold())?;
    }
    writeln!(writer, "  Updated:   {}", updated.to_string().green().bold())?;
    writeln!(
        writer,
        "  Unchanged: {}",
        result.count(FileStatus::Unchanged).to_string().dimmed()
    )?;
    writeln!(writer, "  Failed:    {}", failed.to_string().red())?;
    writeln!(writer, "  Keys added: {}", added.to_string().cyan())?;

    if failed > 0 {
        writeln!(
            writer,
            "\n{} {} locale files could not be updated",
            "✗".red().bold(),
            failed
        )?;
    } else if updated > 0 {
        writeln!(writer, "\n{} Updated {} locale files", "✓".green().bold(), updated)?;
    } else {
        writeln!(writer, "\n{} Locale files already up to date", "✓".green().bold())?;
    }

    writer.flush()?;
    Ok(())
}

pub fn print_json<W: Write>(writer: &mut W, result: &UpdateResult) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    writer.flush()
}
