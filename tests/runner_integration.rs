//! Process runner integration tests.
//!
//! These tests run real subprocesses and verify the hard guarantees of the
//! execution engine: bounded completion, deadlock-free stream draining,
//! byte-exact capture, and clean teardown of timed-out process trees.

use std::time::{Duration, Instant};

use cluster_pulse::{Invocation, ProcessRunner, DEFAULT_POLL_INTERVAL};

#[cfg(unix)]
fn sh(script: &str) -> Invocation {
    Invocation::new("/bin/sh").arg("-c").arg(script)
}

/// State letter from `/proc/<pid>/stat`, or `None` once the entry is gone.
#[cfg(target_os = "linux")]
fn proc_state(pid: u32) -> Option<char> {
    let stat = std::fs::read_to_string(format!("/proc/{pid}/stat")).ok()?;
    // Field two is `(comm)` and may contain spaces; the state letter is
    // the first field after the closing paren.
    let after = &stat[stat.rfind(')')? + 1..];
    after.split_whitespace().next()?.chars().next()
}

// ============================================================================
// Captured Output
// ============================================================================

#[cfg(unix)]
#[tokio::test]
async fn test_stdout_is_captured_byte_exact() {
    let runner = ProcessRunner::default();
    let result = runner.execute(&sh(r"printf 'alpha\nbeta\n'")).await.unwrap();

    assert_eq!(result.exit_code, Some(0));
    assert!(!result.timed_out);
    assert!(result.start_error.is_none());
    assert_eq!(result.stdout, b"alpha\nbeta\n");
    assert!(result.stderr.is_empty());
    assert!(result.success());
}

#[cfg(unix)]
#[tokio::test]
async fn test_streams_are_kept_separate() {
    let runner = ProcessRunner::default();
    let result = runner
        .execute(&sh(r"printf out; printf err >&2"))
        .await
        .unwrap();

    assert_eq!(result.stdout, b"out");
    assert_eq!(result.stderr, b"err");
}

#[cfg(unix)]
#[tokio::test]
async fn test_nonzero_exit_preserves_stderr() {
    let runner = ProcessRunner::default();
    let result = runner
        .execute(&sh(r"printf 'error: boom\n' >&2; exit 3"))
        .await
        .unwrap();

    assert_eq!(result.exit_code, Some(3));
    assert!(!result.timed_out);
    assert!(result.failed());
    assert_eq!(result.stderr_text(), "error: boom\n");
}

#[cfg(unix)]
#[tokio::test]
async fn test_empty_output_stays_empty() {
    let runner = ProcessRunner::default();
    let result = runner.execute(&sh("true")).await.unwrap();

    assert_eq!(result.exit_code, Some(0));
    assert!(result.stdout.is_empty());
    assert!(result.stderr.is_empty());
}

// ============================================================================
// Deadlock Freedom
// ============================================================================

// Both streams get 512 KiB, far past any OS pipe buffer. A runner that
// drains one stream to EOF before touching the other deadlocks here: the
// child blocks writing the unread pipe while the runner waits on the other.
#[cfg(unix)]
#[tokio::test]
async fn test_heavy_interleaved_writers_do_not_deadlock() {
    let script = r"
        i=0
        while [ $i -lt 64 ]; do
            printf '%08192d' 0
            printf '%08192d' 0 >&2
            i=$((i+1))
        done
    ";
    let runner = ProcessRunner::default();
    let result = runner.execute(&sh(script)).await.unwrap();

    assert_eq!(result.exit_code, Some(0));
    assert!(!result.timed_out);
    assert_eq!(result.stdout.len(), 64 * 8192);
    assert_eq!(result.stderr.len(), 64 * 8192);
}

#[cfg(unix)]
#[tokio::test]
async fn test_large_single_stream_is_byte_exact() {
    // 1 MiB of 'x' on stdout alone.
    let script = r"
        i=0
        while [ $i -lt 128 ]; do
            printf '%8192s' ' ' | tr ' ' 'x'
            i=$((i+1))
        done
    ";
    let runner = ProcessRunner::default();
    let result = runner.execute(&sh(script)).await.unwrap();

    assert_eq!(result.exit_code, Some(0));
    assert_eq!(result.stdout.len(), 128 * 8192);
    assert!(result.stdout.iter().all(|&b| b == b'x'));
}

// ============================================================================
// Timeout Enforcement
// ============================================================================

#[cfg(unix)]
#[tokio::test]
async fn test_sleeping_child_is_killed_at_the_deadline() {
    let started = Instant::now();
    let runner = ProcessRunner::new(Duration::from_millis(500), DEFAULT_POLL_INTERVAL);
    let result = runner.execute(&sh("sleep 30")).await.unwrap();

    assert!(result.timed_out);
    assert!(result.failed());
    assert!(!result.success());
    // Well under the child's own 30s runtime.
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[cfg(unix)]
#[tokio::test]
async fn test_timeout_preserves_partial_output() {
    let runner = ProcessRunner::default();
    let invocation = sh(r"printf early; sleep 30").timeout(Duration::from_millis(500));
    let result = runner.execute(&invocation).await.unwrap();

    assert!(result.timed_out);
    assert_eq!(result.stdout, b"early");
}

#[cfg(unix)]
#[tokio::test]
async fn test_per_invocation_timeout_overrides_runner_default() {
    let started = Instant::now();
    // Generous runner default, tight override.
    let runner = ProcessRunner::new(Duration::from_secs(60), DEFAULT_POLL_INTERVAL);
    let invocation = sh("sleep 30").timeout(Duration::from_millis(300));
    let result = runner.execute(&invocation).await.unwrap();

    assert!(result.timed_out);
    assert!(started.elapsed() < Duration::from_secs(5));
}

// The kill targets the whole process group, so the backgrounded sleep
// must die with the shell. It may linger as a zombie until something
// reaps it, but after execute returns it must never be schedulable again.
// The state letter lives in /proc, so this check is Linux-only.
#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_timeout_kills_the_whole_process_group() {
    let started = Instant::now();
    let runner = ProcessRunner::new(Duration::from_millis(500), DEFAULT_POLL_INTERVAL);
    // The shell prints its background child's pid, then blocks on it.
    let result = runner
        .execute(&sh("sleep 30 & echo $!; wait"))
        .await
        .unwrap();

    assert!(result.timed_out);
    assert!(started.elapsed() < Duration::from_secs(5));

    let grandchild: u32 = result
        .stdout_text()
        .trim()
        .parse()
        .expect("the shell echoes the pid before the deadline");

    // Gone or zombie means dead. Alive in R/S/D means the kill missed it.
    for _ in 0..40 {
        match proc_state(grandchild) {
            None => return,
            Some(state) if !matches!(state, 'R' | 'S' | 'D') => return,
            Some(_) => tokio::time::sleep(Duration::from_millis(50)).await,
        }
    }
    panic!("backgrounded sleep survived the group kill");
}

// ============================================================================
// Teardown and Liveness
// ============================================================================

// The shell exits immediately but its orphan keeps the pipe write ends
// open, so the streams never reach EOF. Exit detection has to come from
// polling the child, and the trailing drain has to give up on its own.
#[cfg(unix)]
#[tokio::test]
async fn test_exiting_child_with_orphan_writer_returns_promptly() {
    let started = Instant::now();
    let runner = ProcessRunner::default();
    let result = runner.execute(&sh("sleep 30 &")).await.unwrap();

    assert_eq!(result.exit_code, Some(0));
    assert!(!result.timed_out);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[cfg(unix)]
#[tokio::test]
async fn test_stdin_reader_sees_eof_immediately() {
    let started = Instant::now();
    let runner = ProcessRunner::default();
    // cat would block forever on an inherited terminal stdin.
    let result = runner.execute(&Invocation::new("cat")).await.unwrap();

    assert_eq!(result.exit_code, Some(0));
    assert!(!result.timed_out);
    assert!(result.stdout.is_empty());
    assert!(started.elapsed() < Duration::from_secs(5));
}

// ============================================================================
// Start Failures
// ============================================================================

#[tokio::test]
async fn test_missing_program_reports_start_failure() {
    let runner = ProcessRunner::default();
    let invocation = Invocation::new("cluster-pulse-no-such-binary").arg("--version");
    let result = runner.execute(&invocation).await.unwrap();

    assert!(result.start_failed());
    assert!(result.failed());
    assert!(result.exit_code.is_none());
    assert!(!result.timed_out);
    // The diagnostic travels its own channel; the streams stay untouched.
    assert!(result.stdout.is_empty());
    assert!(result.stderr.is_empty());
    let diagnostic = result.start_error.unwrap();
    assert!(diagnostic.contains("cluster-pulse-no-such-binary"));
}

// ============================================================================
// Runner Reuse
// ============================================================================

#[cfg(unix)]
#[tokio::test]
async fn test_sequential_invocations_are_independent() {
    let runner = ProcessRunner::default();

    let first = runner.execute(&sh("printf first")).await.unwrap();
    let second = runner.execute(&sh("printf second")).await.unwrap();

    assert_eq!(first.stdout, b"first");
    assert_eq!(second.stdout, b"second");
    assert_eq!(first.exit_code, Some(0));
    assert_eq!(second.exit_code, Some(0));
}

#[cfg(unix)]
#[tokio::test]
async fn test_runner_recovers_after_a_timeout() {
    let runner = ProcessRunner::new(Duration::from_millis(500), DEFAULT_POLL_INTERVAL);

    let stuck = runner.execute(&sh("sleep 30")).await.unwrap();
    assert!(stuck.timed_out);

    // The next invocation starts from a clean slate.
    let fine = runner.execute(&sh("printf recovered")).await.unwrap();
    assert!(!fine.timed_out);
    assert_eq!(fine.stdout, b"recovered");
    assert_eq!(fine.exit_code, Some(0));
}
