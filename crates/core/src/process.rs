//! Bounded subprocess invocation with captured output.
//!
//! Completions and acceptance checks both shell out to the just-installed
//! binary, which is not yet trusted to behave. Every invocation therefore
//! runs with an enforced deadline and fully captured stdio; a hung or chatty
//! subprocess can never stall the installer or write through to its
//! terminal.

use crate::{Error, Result};
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Captured result of a finished subprocess.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    /// Exit code, when the process exited normally (None on signal death).
    pub status: Option<i32>,
    /// Captured standard output, lossily decoded.
    pub stdout: String,
    /// Captured standard error, lossily decoded.
    pub stderr: String,
}

impl CapturedOutput {
    /// Whether the process exited with status 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Stdout and stderr joined, for substring assertions against either
    /// stream.
    #[must_use]
    pub fn combined(&self) -> String {
        let mut combined = self.stdout.clone();
        combined.push_str(&self.stderr);
        combined
    }
}

/// Run a program with arguments, a deadline, and captured stdio.
///
/// # Errors
///
/// Returns [`Error::SubprocessTimeout`] when the deadline passes before the
/// process finishes, and [`Error::Subprocess`] when it cannot be spawned.
/// A non-zero exit is not an error here; callers inspect
/// [`CapturedOutput::status`].
pub async fn run_captured(
    program: &Path,
    args: &[&str],
    deadline: Duration,
) -> Result<CapturedOutput> {
    debug!(program = %program.display(), ?args, timeout_s = deadline.as_secs(), "running subprocess");
    let mut cmd = Command::new(program);
    // kill_on_drop so a timed-out process does not outlive the deadline
    cmd.args(args).kill_on_drop(true);
    let output = timeout(deadline, cmd.output())
        .await
        .map_err(|_| Error::subprocess_timeout(program.display().to_string(), deadline.as_secs()))?
        .map_err(|e| Error::subprocess(program.display().to_string(), e))?;

    Ok(CapturedOutput {
        status: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
