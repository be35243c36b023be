use log::{debug, info, trace, warn};
use std::{
    fmt,
    io::Read,
    path::Path,
    process::{Command, ExitStatus, Stdio},
    thread,
    time::{Duration, Instant},
};

use crate::error::ToolError;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// An external command line, split into program and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { program: program.into(), args: args.into_iter().map(Into::into).collect() }
    }

    /// Split a command line on whitespace. No shell quoting is interpreted.
    pub fn parse(command_line: &str) -> Result<Self, ToolError> {
        let mut parts = command_line.split_whitespace();
        let program = parts.next().ok_or(ToolError::EmptyCommand)?;
        Ok(Self::new(program, parts))
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct ToolOutput {
    pub status: ExitStatus,
    /// Standard output followed by standard error
    pub text: String,
}

/// Run `cmd` in `cwd` and capture its combined output.
///
/// A non-zero exit status is not an error: linters exit non-zero whenever they report
/// problems. Only failing to launch, failing to wait, or exceeding `timeout` are errors.
pub fn run_tool(
    cmd: &ToolCommand,
    cwd: &Path,
    timeout: Option<Duration>,
) -> Result<ToolOutput, ToolError> {
    let command = cmd.to_string();
    info!("Running `{}` in {}", command, cwd.display());

    let mut child = Command::new(&cmd.program)
        .args(&cmd.args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ToolError::Launch { command: command.clone(), source })?;

    // Drain both pipes on their own threads so a chatty tool never blocks on a full pipe
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = match timeout {
        None => {
            child.wait().map_err(|source| ToolError::Wait { command: command.clone(), source })?
        }
        Some(limit) => {
            let deadline = Instant::now() + limit;
            loop {
                match child.try_wait() {
                    Ok(Some(status)) => break status,
                    Ok(None) if Instant::now() >= deadline => {
                        warn!("`{}` exceeded {}s, killing it", command, limit.as_secs());
                        if let Err(e) = child.kill() {
                            debug!("Failed to kill `{}`: {}", command, e);
                        }
                        let _ = child.wait();
                        return Err(ToolError::TimedOut { command, timeout: limit });
                    }
                    Ok(None) => thread::sleep(POLL_INTERVAL),
                    Err(source) => return Err(ToolError::Wait { command, source }),
                }
            }
        }
    };

    let mut text = String::from_utf8_lossy(&stdout.join().unwrap_or_default()).into_owned();
    text.push_str(&String::from_utf8_lossy(&stderr.join().unwrap_or_default()));

    if !status.success() {
        debug!("`{}` exited with {}", command, status);
    }
    trace!("Captured {} bytes of output from `{}`", text.len(), command);

    Ok(ToolOutput { status, text })
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut p) = pipe
            && let Err(e) = p.read_to_end(&mut buf)
        {
            debug!("Failed to read tool output: {}", e);
        }
        buf
    })
}
