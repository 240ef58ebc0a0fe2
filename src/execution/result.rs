//! Execution result types.

use std::borrow::Cow;
use std::time::Duration;

/// Result of one command invocation.
///
/// Every invocation ends in exactly one of three terminal states: the
/// process exited on its own, the wall-clock budget expired and the process
/// was killed (`timed_out`), or the process never started (`start_error`).
/// All three are ordinary data; only infrastructure failures surface as
/// errors from the runner.
#[derive(Debug, Clone, Default)]
pub struct ExecutionResult {
    /// Bytes the child wrote to standard output before it ended.
    pub stdout: Vec<u8>,
    /// Bytes the child wrote to standard error before it ended.
    pub stderr: Vec<u8>,
    /// Exit status code, if the process started and reported one.
    ///
    /// `None` when the process never started, was killed by a signal, or
    /// was terminated at the timeout boundary.
    pub exit_code: Option<i32>,
    /// Whether the invocation hit its budget and was forcibly killed.
    ///
    /// When set, authoritative over whatever `exit_code` holds.
    pub timed_out: bool,
    /// Diagnostic for a process that could not be started at all.
    ///
    /// Kept apart from `stderr`, which only ever holds bytes the child
    /// itself wrote.
    pub start_error: Option<String>,
    /// Wall-clock duration of the invocation.
    pub duration: Duration,
}

impl ExecutionResult {
    /// Result for a process that ran to completion on its own.
    pub fn completed(
        stdout: Vec<u8>,
        stderr: Vec<u8>,
        exit_code: Option<i32>,
        duration: Duration,
    ) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
            timed_out: false,
            start_error: None,
            duration,
        }
    }

    /// Result for a process killed at the timeout boundary.
    ///
    /// Bytes captured up to the kill are preserved.
    pub fn timeout(
        stdout: Vec<u8>,
        stderr: Vec<u8>,
        exit_code: Option<i32>,
        duration: Duration,
    ) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
            timed_out: true,
            start_error: None,
            duration,
        }
    }

    /// Result for a process that could not be started.
    pub fn start_failure(error: impl Into<String>, duration: Duration) -> Self {
        Self {
            stdout: Vec::new(),
            stderr: Vec::new(),
            exit_code: None,
            timed_out: false,
            start_error: Some(error.into()),
            duration,
        }
    }

    /// Check if the command ran to completion with exit code 0.
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }

    /// Check if the command failed (start failure, timeout, or non-zero
    /// exit).
    pub fn failed(&self) -> bool {
        self.timed_out || self.start_error.is_some() || !matches!(self.exit_code, Some(0))
    }

    /// Check if the process never started.
    pub fn start_failed(&self) -> bool {
        self.start_error.is_some()
    }

    /// Standard output decoded as UTF-8, invalid sequences replaced.
    pub fn stdout_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// Standard error decoded as UTF-8, invalid sequences replaced.
    pub fn stderr_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }
}
