use std::io::{self, Write};

use colored::Colorize;
use log::debug;

use lintfix_core::display_path;

use crate::types::{Action, CleanupResult, Outcome};

fn location(outcome: &Outcome) -> String {
    format!("{}:{}", display_path(&outcome.file), outcome.line)
}

/// One progress line per handled warning, in processing order.
pub fn print_outcomes<W: Write>(writer: &mut W, result: &CleanupResult) -> io::Result<()> {
    debug!("Printing {} outcomes", result.outcomes.len());
    for outcome in &result.outcomes {
        match outcome.action {
            Action::Removed => writeln!(
                writer,
                "  {} Removed: {} - '{}'",
                "✓".green(),
                location(outcome).blue(),
                outcome.name
            )?,
            Action::Prefixed => writeln!(
                writer,
                "  {} Prefixed: {} - '{}' → '_{}'",
                "→".yellow(),
                location(outcome).blue(),
                outcome.name,
                outcome.name
            )?,
            Action::Skipped => writeln!(
                writer,
                "  {} Skipped: {} - '{}' ({})",
                "·".dimmed(),
                location(outcome).dimmed(),
                outcome.name,
                outcome.detail.as_deref().unwrap_or("no change").dimmed()
            )?,
        }
    }
    Ok(())
}

pub fn print_summary<W: Write>(writer: &mut W, result: &CleanupResult) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "─".repeat(60).dimmed())?;
    if result.dry_run {
        writeln!(writer, "{} (dry run, no files written)", "Results".bold())?;
    } else {
        writeln!(writer, "{}", "Results".bold())?;
    }
    writeln!(
        writer,
        "  Removed:  {} (safe standalone declarations)",
        result.removed.to_string().green().bold()
    )?;
    writeln!(
        writer,
        "  Prefixed: {} (complex cases requiring underscore)",
        result.prefixed.to_string().yellow().bold()
    )?;
    writeln!(writer, "  Skipped:  {} (couldn't process)", result.skipped.to_string().dimmed())?;
    writeln!(writer, "  Total:    {}", result.total().to_string().cyan())?;

    let changed = result.removed + result.prefixed;
    if changed > 0 {
        writeln!(writer, "\n{} Cleaned up {} unused variables", "✓".green().bold(), changed)?;
        writeln!(writer, "   Run the linter again to verify results")?;
        if result.prefixed > 0 {
            writeln!(
                writer,
                "\n{} {} variables prefixed with _ (safer than removal)",
                "⚠".yellow().bold(),
                result.prefixed
            )?;
            writeln!(writer, "   These can be reviewed and removed manually if needed")?;
        }
    } else {
        writeln!(writer, "\n{} No changes needed", "✓".green().bold())?;
    }

    writer.flush()?;
    Ok(())
}

pub fn print_json<W: Write>(writer: &mut W, result: &CleanupResult) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample() -> CleanupResult {
        let mut result = CleanupResult::default();
        result.record(Outcome {
            file: PathBuf::from("/project/a.ts"),
            line: 12,
            name: "x".to_string(),
            action: Action::Removed,
            detail: Some("deleted declaration".to_string()),
        });
        result.record(Outcome {
            file: PathBuf::from("/project/b.ts"),
            line: 3,
            name: "event".to_string(),
            action: Action::Prefixed,
            detail: None,
        });
        result
    }

    fn render(f: impl Fn(&mut Vec<u8>) -> io::Result<()>) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_outcome_lines() {
        let result = sample();
        let text = render(|w| print_outcomes(w, &result));
        assert!(text.contains("✓ Removed: "));
        assert!(text.contains("a.ts:12 - 'x'"));
        assert!(text.contains("→ Prefixed: "));
        assert!(text.contains("'event' → '_event'"));
    }

    #[test]
    fn test_summary_counts() {
        let result = sample();
        let text = render(|w| print_summary(w, &result));
        assert!(text.contains("Removed:  1"));
        assert!(text.contains("Prefixed: 1"));
        assert!(text.contains("Skipped:  0"));
        assert!(text.contains("Total:    2"));
        assert!(text.contains("Cleaned up 2 unused variables"));
    }

    #[test]
    fn test_summary_without_changes() {
        let result = CleanupResult::default();
        let text = render(|w| print_summary(w, &result));
        assert!(text.contains("No changes needed"));
    }

    #[test]
    fn test_json_output() {
        let result = sample();
        let text = render(|w| print_json(w, &result));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["removed"], 1);
        assert_eq!(value["outcomes"][0]["action"], "removed");
        assert_eq!(value["outcomes"][1]["name"], "event");
        assert!(value["outcomes"][1].get("detail").is_none());
    }
}
