//! Bounded-time process runner.
//!
//! Spawns external commands with piped output, drains stdout and stderr
//! concurrently so neither pipe can fill and stall the child, and enforces
//! a hard wall-clock budget with a forced kill of the whole process group.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

use super::invocation::Invocation;
use super::result::ExecutionResult;
use crate::error::ClusterPulseError;
use crate::Result;

/// Default wall-clock budget per invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default interval for exit and deadline checks while draining.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Buffer size for reading child output pipes.
const READ_BUFFER_SIZE: usize = 4096;

/// Budget for sweeping trailing pipe data after the child is gone.
const DRAIN_GRACE: Duration = Duration::from_millis(100);

/// Executes external commands under a hard wall-clock budget.
///
/// Each [`execute`](ProcessRunner::execute) call owns its subprocess and
/// pipe handles exclusively and tears everything down before returning, so
/// a runner can be shared freely and reused across invocations.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Duration,
    poll_interval: Duration,
}

impl ProcessRunner {
    /// Create a runner with the given budget and poll interval.
    ///
    /// `poll_interval` must be non-zero; configuration loading enforces a
    /// 1..=1000 ms range.
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// The default budget applied when an invocation carries no override.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The exit and deadline poll interval.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Run one command to a terminal state.
    ///
    /// Always returns a result when the outcome concerns the command
    /// itself: a process that cannot be started, exceeds its budget, or
    /// exits non-zero is reported through [`ExecutionResult`], not as an
    /// error. `Err` is reserved for infrastructure failures such as pipe
    /// I/O errors.
    pub async fn execute(&self, invocation: &Invocation) -> Result<ExecutionResult> {
        let budget = invocation.timeout_override().unwrap_or(self.timeout);
        let started = Instant::now();

        let mut command = Command::new(invocation.program());
        command
            .args(invocation.arguments())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        // Own process group, so a timeout kill reaches grandchildren too.
        #[cfg(unix)]
        command.process_group(0);

        debug!(command = %invocation, timeout_secs = budget.as_secs_f64(), "spawning");

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(err) => {
                warn!(command = %invocation, error = %err, "failed to start command");
                return Ok(ExecutionResult::start_failure(
                    format!("failed to start '{}': {}", invocation.program(), err),
                    started.elapsed(),
                ));
            }
        };

        let mut stdout_pipe = child
            .stdout
            .take()
            .ok_or(ClusterPulseError::StreamUnavailable("stdout"))?;
        let mut stderr_pipe = child
            .stderr
            .take()
            .ok_or(ClusterPulseError::StreamUnavailable("stderr"))?;

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let mut stdout_open = true;
        let mut stderr_open = true;
        let mut stdout_chunk = [0u8; READ_BUFFER_SIZE];
        let mut stderr_chunk = [0u8; READ_BUFFER_SIZE];

        let deadline = started + budget;
        let mut liveness = tokio::time::interval(self.poll_interval);
        liveness.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Drain both pipes and watch for exit or deadline in one loop. Reads
        // go through the reactor, so a busy stream never blocks the other;
        // the tick bounds how far exit and deadline detection can lag.
        let exit_status = loop {
            tokio::select! {
                read = stdout_pipe.read(&mut stdout_chunk), if stdout_open => match read? {
                    0 => stdout_open = false,
                    n => stdout.extend_from_slice(&stdout_chunk[..n]),
                },
                read = stderr_pipe.read(&mut stderr_chunk), if stderr_open => match read? {
                    0 => stderr_open = false,
                    n => stderr.extend_from_slice(&stderr_chunk[..n]),
                },
                _ = liveness.tick() => {
                    if let Some(status) = child.try_wait()? {
                        break Some(status);
                    }
                    if Instant::now() >= deadline {
                        break None;
                    }
                }
            }

            // Both pipes at EOF: the child dropped its stream ends. Wait for
            // the exit directly, still bounded by the deadline in case the
            // process closed its streams but keeps running.
            if !stdout_open && !stderr_open {
                let remaining = deadline.saturating_duration_since(Instant::now());
                match tokio::time::timeout(remaining, child.wait()).await {
                    Ok(status) => break Some(status?),
                    Err(_) => break None,
                }
            }
        };

        let (status, timed_out) = match exit_status {
            Some(status) => (Some(status), false),
            None => {
                warn!(
                    command = %invocation,
                    elapsed_secs = started.elapsed().as_secs_f64(),
                    "timeout exceeded, killing process"
                );
                (self.kill(&mut child).await, true)
            }
        };

        // The child may have exited with bytes still buffered in the pipes.
        // Sweep them up, bounded so a surviving orphan that inherited the
        // write end cannot hold the runner open.
        if stdout_open {
            drain_remaining(&mut stdout_pipe, &mut stdout).await;
        }
        if stderr_open {
            drain_remaining(&mut stderr_pipe, &mut stderr).await;
        }

        let exit_code = status.and_then(|s| s.code());
        let duration = started.elapsed();

        let result = if timed_out {
            ExecutionResult::timeout(stdout, stderr, exit_code, duration)
        } else {
            ExecutionResult::completed(stdout, stderr, exit_code, duration)
        };

        debug!(
            command = %invocation,
            exit_code = ?result.exit_code,
            timed_out = result.timed_out,
            stdout_bytes = result.stdout.len(),
            stderr_bytes = result.stderr.len(),
            duration_ms = duration.as_millis() as u64,
            "command finished"
        );

        Ok(result)
    }

    /// Forcefully terminate the child and reap it.
    ///
    /// On Unix the kill targets the child's process group, taking down any
    /// grandchildren it spawned. Returns the exit status when the reap
    /// observed one.
    async fn kill(&self, child: &mut Child) -> Option<std::process::ExitStatus> {
        #[cfg(unix)]
        if let Some(pid) = child.id() {
            use nix::sys::signal::{killpg, Signal};
            use nix::unistd::Pid;

            // The child is its own group leader, so its pid is the group id.
            if let Err(err) = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
                debug!(pid, error = %err, "process group kill failed");
            }
        }

        // Portable kill; also reaps the child so no zombie remains.
        let _ = child.kill().await;
        child.try_wait().ok().flatten()
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL)
    }
}

/// Collect whatever is still buffered in `pipe` without waiting longer than
/// the grace window overall.
async fn drain_remaining<R>(pipe: &mut R, sink: &mut Vec<u8>)
where
    R: AsyncRead + Unpin,
{
    let mut chunk = [0u8; READ_BUFFER_SIZE];
    let drain_deadline = Instant::now() + DRAIN_GRACE;

    loop {
        let remaining = drain_deadline.saturating_duration_since(Instant::now());
        match tokio::time::timeout(remaining, pipe.read(&mut chunk)).await {
            Ok(Ok(0)) | Ok(Err(_)) | Err(_) => break,
            Ok(Ok(n)) => sink.extend_from_slice(&chunk[..n]),
        }
    }
}

/// Run a command with the default budget.
pub async fn execute_simple(program: &str, args: &[&str]) -> Result<ExecutionResult> {
    let invocation = Invocation::new(program).args(args.iter().copied());
    ProcessRunner::default().execute(&invocation).await
}

/// Run a command with an explicit budget.
pub async fn execute_with_timeout(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<ExecutionResult> {
    let invocation = Invocation::new(program)
        .args(args.iter().copied())
        .timeout(timeout);
    ProcessRunner::default().execute(&invocation).await
}
