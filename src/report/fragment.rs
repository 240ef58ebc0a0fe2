//! Displayable section outcomes.

use std::time::Duration;

use crate::execution::ExecutionResult;

/// Placeholder body for a successful command that printed nothing.
pub const NO_DATA: &str = "No data available";

/// Three-way display outcome of a section's diagnostic command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionStatus {
    /// The command completed with exit code 0.
    Ok,
    /// The command failed to start or exited non-zero.
    Failed,
    /// The command outlived its budget and was killed.
    TimedOut,
}

impl SectionStatus {
    /// Short lowercase label for report banners and logs.
    pub fn label(&self) -> &'static str {
        match self {
            SectionStatus::Ok => "ok",
            SectionStatus::Failed => "failed",
            SectionStatus::TimedOut => "timed out",
        }
    }
}

/// A classified section outcome: heading, status, and the text to display.
#[derive(Debug, Clone)]
pub struct Fragment {
    title: String,
    status: SectionStatus,
    body: String,
    duration: Duration,
}

impl Fragment {
    /// Classify an execution result into its displayable form.
    ///
    /// A timeout takes precedence over any exit status observed during
    /// teardown. Failures show captured stderr when there is any, then the
    /// start diagnostic, then a generic message. Successful commands show
    /// stdout, or [`NO_DATA`] when nothing was printed.
    pub fn from_result(title: impl Into<String>, result: &ExecutionResult) -> Self {
        let (status, body) = if result.timed_out {
            (
                SectionStatus::TimedOut,
                format!(
                    "Command timed out after {:.1}s",
                    result.duration.as_secs_f64()
                ),
            )
        } else if result.failed() {
            (SectionStatus::Failed, failure_body(result))
        } else {
            let stdout = result.stdout_text();
            let stdout = stdout.trim();
            let body = if stdout.is_empty() {
                NO_DATA.to_string()
            } else {
                stdout.to_string()
            };
            (SectionStatus::Ok, body)
        };

        Self {
            title: title.into(),
            status,
            body,
            duration: result.duration,
        }
    }

    /// The section heading.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The classified outcome.
    pub fn status(&self) -> SectionStatus {
        self.status
    }

    /// The text body to display under the heading.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Wall-clock duration of the underlying command.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

fn failure_body(result: &ExecutionResult) -> String {
    let stderr = result.stderr_text();
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    if let Some(start_error) = &result.start_error {
        return start_error.clone();
    }
    match result.exit_code {
        Some(code) => format!("Command failed with exit code {code}"),
        None => "Command failed".to_string(),
    }
}
