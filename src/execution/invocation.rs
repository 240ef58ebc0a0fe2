//! Command invocations.

use std::fmt;
use std::time::Duration;

/// A single external command: a program plus discrete argument tokens.
///
/// Tokens are handed to the operating system exactly as given; no shell is
/// involved, so metacharacters, quoting, and `$VAR` expansion never apply.
/// An invocation is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    // Invariant: never empty, argv[0] is the program.
    argv: Vec<String>,
    timeout: Option<Duration>,
}

impl Invocation {
    /// Create an invocation for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            argv: vec![program.into()],
            timeout: None,
        }
    }

    /// Append one argument token.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.argv.push(arg.into());
        self
    }

    /// Append multiple argument tokens.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.argv.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set a per-invocation timeout, overriding the runner default.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Build an invocation from a full argv vector, program first.
    ///
    /// Returns `None` for an empty vector.
    pub fn from_argv<I, S>(argv: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        if argv.is_empty() {
            return None;
        }
        Some(Self {
            argv,
            timeout: None,
        })
    }

    /// The program name or path.
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// The argument tokens following the program.
    pub fn arguments(&self) -> &[String] {
        &self.argv[1..]
    }

    /// The per-invocation timeout, if one was set.
    pub fn timeout_override(&self) -> Option<Duration> {
        self.timeout
    }
}

impl fmt::Display for Invocation {
    /// Space-joined argv for logs and report headings. Display form only;
    /// execution always uses the discrete tokens.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}
