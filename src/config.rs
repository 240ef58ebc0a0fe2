//! Configuration management for cluster-pulse.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::execution::{Invocation, ProcessRunner, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT};
use crate::report::{builtin_sections, Section};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Process runner configuration.
    pub runner: RunnerSection,
    /// Report content configuration.
    pub report: ReportSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Process runner configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerSection {
    /// Wall-clock budget per command, in seconds. Must be positive.
    pub timeout_secs: u64,
    /// Exit and deadline poll interval, in milliseconds (1..=1000).
    pub poll_interval_ms: u64,
}

impl Default for RunnerSection {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
        }
    }
}

/// Report content configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// Custom sections replacing the built-in catalog. An empty list keeps
    /// the built-ins.
    pub sections: Vec<SectionSpec>,
}

/// One configured report section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Section heading in the rendered report.
    pub title: String,
    /// Command argv: the program followed by literal argument tokens.
    ///
    /// Tokens are passed to the OS as-is. There is no shell, so pipes,
    /// redirections, and variable expansion do not work here.
    pub command: Vec<String>,
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(timeout) = std::env::var("CLUSTER_PULSE_TIMEOUT") {
            if let Ok(timeout) = timeout.parse() {
                self.runner.timeout_secs = timeout;
            }
        }

        if let Ok(level) = std::env::var("CLUSTER_PULSE_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(timeout) = args.timeout_secs {
            self.runner.timeout_secs = timeout;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut config = Config::default();

        // Load from config file if specified
        if let Some(ref path) = args.config {
            config = Config::from_file(path)?;
        }

        // Apply environment variable overrides
        config.apply_env();

        // Apply CLI argument overrides (highest priority)
        config.apply_args(args);

        Ok(config)
    }

    /// Build the process runner, validating the runner section.
    pub fn to_runner(&self) -> Result<ProcessRunner, ConfigError> {
        if self.runner.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        if self.runner.poll_interval_ms == 0 || self.runner.poll_interval_ms > 1000 {
            return Err(ConfigError::InvalidPollInterval(self.runner.poll_interval_ms));
        }

        Ok(ProcessRunner::new(
            Duration::from_secs(self.runner.timeout_secs),
            Duration::from_millis(self.runner.poll_interval_ms),
        ))
    }

    /// Resolve the section list, validating any custom entries.
    pub fn to_sections(&self) -> Result<Vec<Section>, ConfigError> {
        if self.report.sections.is_empty() {
            return Ok(builtin_sections());
        }

        let mut sections = Vec::with_capacity(self.report.sections.len());
        for spec in &self.report.sections {
            if spec.title.trim().is_empty() {
                return Err(ConfigError::BlankSectionTitle);
            }
            let invocation = Invocation::from_argv(spec.command.iter().cloned())
                .ok_or_else(|| ConfigError::EmptySectionCommand(spec.title.clone()))?;
            sections.push(Section::new(spec.title.clone(), invocation));
        }
        Ok(sections)
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// Timeout must be a positive number of seconds.
    InvalidTimeout,
    /// Poll interval out of range.
    InvalidPollInterval(u64),
    /// A custom section has a blank title.
    BlankSectionTitle,
    /// A custom section has an empty command argv.
    EmptySectionCommand(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
            Self::InvalidTimeout => write!(f, "timeout must be a positive number of seconds"),
            Self::InvalidPollInterval(ms) => {
                write!(f, "poll interval must be between 1 and 1000 ms, got {}", ms)
            }
            Self::BlankSectionTitle => write!(f, "section title must not be blank"),
            Self::EmptySectionCommand(title) => {
                write!(f, "section '{}' has an empty command", title)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
