use std::{io, time::Duration};

use thiserror::Error;

/// Failures of the external lint tool itself, as opposed to the warnings it reports.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("lint command is empty")]
    EmptyCommand,

    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` did not finish within {secs}s", secs = .timeout.as_secs())]
    TimedOut { command: String, timeout: Duration },

    #[error("failed while waiting for `{command}`: {source}")]
    Wait {
        command: String,
        #[source]
        source: io::Error,
    },
}
