//! Command execution engine.
//!
//! This module runs external commands under a hard wall-clock budget:
//! - Shell-free spawning from discrete argv tokens
//! - Concurrent stdout/stderr draining (no pipe can stall the other)
//! - Forced process-group kill when the budget expires
//! - Structured results that keep partial output
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use cluster_pulse::execution::{execute_with_timeout, Invocation, ProcessRunner};
//!
//! # async fn run() -> cluster_pulse::Result<()> {
//! // One-shot execution
//! let result = execute_with_timeout("oc", &["get", "nodes"], Duration::from_secs(10)).await?;
//! println!("{}", result.stdout_text());
//!
//! // Reusable runner with a per-invocation override
//! let runner = ProcessRunner::default();
//! let invocation = Invocation::new("oc")
//!     .args(["adm", "top", "nodes"])
//!     .timeout(Duration::from_secs(5));
//! let result = runner.execute(&invocation).await?;
//! # Ok(())
//! # }
//! ```

mod invocation;
mod result;
mod runner;

pub use invocation::Invocation;
pub use result::ExecutionResult;
pub use runner::{
    execute_simple, execute_with_timeout, ProcessRunner, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT,
};
