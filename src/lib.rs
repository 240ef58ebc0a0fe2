//! # cluster-pulse
//!
//! Bounded-time diagnostics runner and plain-text health reports for
//! OpenShift clusters.
//!
//! The crate runs a catalog of cluster diagnostics (`oc ...`) as
//! subprocesses, each under a hard wall-clock budget, and renders the
//! captured output as a sectioned text report. A diagnostic that hangs is
//! killed, process group and all, instead of stalling the report.
//!
//! ## Features
//!
//! - **Bounded execution**: every command gets a wall-clock budget, and
//!   overruns are forcibly killed with partial output preserved
//! - **Deadlock-free capture**: stdout and stderr drain concurrently, so
//!   neither pipe can fill up and stall the child
//! - **No shell**: commands are discrete argv tokens, never interpolated
//!   into a shell string
//! - **Three-way outcomes**: timed out, failed, and empty-output sections
//!   render distinctly instead of collapsing into one error
//!
//! ## Quick Start
//!
//! ```no_run
//! use cluster_pulse::{ProcessRunner, ReportAssembler};
//!
//! #[tokio::main]
//! async fn main() -> cluster_pulse::Result<()> {
//!     // Initialize logging
//!     cluster_pulse::logging::try_init("info").ok();
//!
//!     // Run the built-in diagnostic catalog
//!     let assembler = ReportAssembler::new(ProcessRunner::default());
//!     let report = assembler.assemble().await?;
//!
//!     print!("{}", report.render());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod execution;
pub mod logging;
pub mod report;

// Re-export commonly used types
pub use error::{ClusterPulseError, Result};
pub use execution::{
    execute_simple, execute_with_timeout, ExecutionResult, Invocation, ProcessRunner,
    DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT,
};
pub use report::{builtin_sections, Fragment, Report, ReportAssembler, Section, SectionStatus};
