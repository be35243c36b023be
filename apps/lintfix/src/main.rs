use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "lintfix")]
#[command(about = "Fix lint warnings in JavaScript/TypeScript projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Remove or underscore-prefix variables the linter reports as unused
    UnusedVars(lintfix_unused_vars::Config),
    /// Merge new translation keys into JSON locale files
    Locale(lintfix_locale::Config),
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::UnusedVars(cfg) => {
            info!("Running unused variable cleanup with command: {}", cfg.lint_command);
            debug!("Config: root={:?}, input={:?}", cfg.root, cfg.input);
            let json = cfg.json;

            if !json {
                writeln!(stdout, "{} Fixing unused variables...", "●".bright_blue())?;
                stdout.flush()?;
            }

            let result = lintfix_unused_vars::run_unused_vars_cleanup(cfg)?;
            debug!("Handled {} warnings", result.total());

            if json {
                lintfix_unused_vars::print_json(&mut stdout, &result)?;
                return Ok(());
            }

            lintfix_unused_vars::print_outcomes(&mut stdout, &result)?;
            lintfix_unused_vars::print_summary(&mut stdout, &result)?;

            let elapsed_ms = start.elapsed().as_millis();
            writeln!(
                stdout,
                "\n{} Finished in {}ms.",
                "●".bright_blue(),
                elapsed_ms.to_string().cyan()
            )?;
            stdout.flush()?;
            Ok(())
        }
        Commands::Locale(cfg) => {
            let num_threads = rayon::current_num_threads();
            info!(
                "Running locale update with patch: {} (using {} threads)",
                cfg.patch.display(),
                num_threads
            );
            debug!("Config: root={:?}, dir={:?}", cfg.root, cfg.dir);
            let json = cfg.json;

            let result = lintfix_locale::run_locale_update(cfg)?;
            debug!(
                "{} of {} locale files failed",
                result.count(lintfix_locale::FileStatus::Failed),
                result.files.len()
            );

            if json {
                lintfix_locale::print_json(&mut stdout, &result)?;
            } else {
                lintfix_locale::print_file_reports(&mut stdout, &result)?;
                lintfix_locale::print_summary(&mut stdout, &result)?;

                let elapsed_ms = start.elapsed().as_millis();
                writeln!(
                    stdout,
                    "\n{} Finished in {}ms on {} files (using {} threads).",
                    "●".bright_blue(),
                    elapsed_ms.to_string().cyan(),
                    result.files.len().to_string().cyan(),
                    num_threads.to_string().cyan()
                )?;
                stdout.flush()?;
            }

            Ok(())
        }
    }
}
