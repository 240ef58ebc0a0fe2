//! Error types for cluster-pulse.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for cluster-pulse operations.
///
/// Command outcomes (start failure, timeout, non-zero exit) are data in
/// [`ExecutionResult`](crate::execution::ExecutionResult), not errors; the
/// variants here cover the genuinely exceptional conditions.
#[derive(Error, Debug)]
pub enum ClusterPulseError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A child output pipe was not available after spawning.
    #[error("{0} stream unavailable after spawn")]
    StreamUnavailable(&'static str),

    /// No section with the given title exists.
    #[error("unknown report section: {0}")]
    UnknownSection(String),

    /// Configuration loading or validation failed.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The rendered report could not be written.
    #[error("failed to write report to {}: {source}", path.display())]
    ReportWrite {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Convenience Result type for cluster-pulse operations.
pub type Result<T> = std::result::Result<T, ClusterPulseError>;
