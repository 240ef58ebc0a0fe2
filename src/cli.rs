//! Command-line interface for cluster-pulse.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Per-command timeout override, in seconds.
    pub timeout_secs: Option<u64>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Run only the named section.
    pub section: Option<String>,
    /// List section titles and exit.
    pub list: bool,
    /// Write the report to this file instead of stdout.
    pub output: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('t') | Long("timeout") => {
                let value: String = parser.value()?.parse()?;
                result.timeout_secs = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("timeout", value))?,
                );
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('s') | Long("section") => {
                result.section = Some(parser.value()?.parse()?);
            }
            Long("list") => {
                result.list = true;
            }
            Short('o') | Long("output") => {
                result.output = Some(parser.value()?.parse()?);
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Value(val) => {
                return Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()));
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"cluster-pulse {version}
Bounded-time diagnostics runner and plain-text health reports for OpenShift clusters

USAGE:
    cluster-pulse [OPTIONS]

OPTIONS:
    -t, --timeout <SECS>    Per-command timeout in seconds [default: 15]
    -c, --config <FILE>     Path to configuration file (JSON)
    -s, --section <TITLE>   Run a single section by title
    -o, --output <FILE>     Write the report to a file instead of stdout
    -l, --log-level <LVL>   Log level (error, warn, info, debug, trace)
        --list              List section titles and exit
    -h, --help              Print help
    -V, --version           Print version

ENVIRONMENT VARIABLES:
    CLUSTER_PULSE_TIMEOUT    Per-command timeout in seconds (overrides config)
    CLUSTER_PULSE_LOG_LEVEL  Log level (overrides config)
    RUST_LOG                 Alternative log level setting

EXAMPLES:
    # Full report with defaults (15s per command)
    cluster-pulse

    # Tight budget, report to a file
    cluster-pulse -t 5 -o /tmp/health.txt

    # One section only
    cluster-pulse -s "Node Status"

    # Custom section catalog from a config file
    cluster-pulse -c /etc/cluster-pulse/config.json
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("cluster-pulse {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// Unexpected positional argument.
    UnexpectedArgument(String),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for --{}: '{}'", name, value)
            }
            Self::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument: '{}'", arg)
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
