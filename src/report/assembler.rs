//! Report assembly: run every section and render the outcomes.

use std::fmt::Write as _;

use chrono::{DateTime, Local};
use tracing::info;

use super::fragment::{Fragment, SectionStatus};
use super::section::{builtin_sections, Section};
use crate::error::ClusterPulseError;
use crate::execution::ProcessRunner;
use crate::Result;

const RULE_WIDTH: usize = 70;

/// Assembles health reports by running section diagnostics through a
/// [`ProcessRunner`].
///
/// Sections run strictly one after another; each subprocess is fully torn
/// down before the next starts, so at most one diagnostic touches the
/// cluster at a time.
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    runner: ProcessRunner,
    sections: Vec<Section>,
}

impl ReportAssembler {
    /// Assembler over the built-in section catalog.
    pub fn new(runner: ProcessRunner) -> Self {
        Self::with_sections(runner, builtin_sections())
    }

    /// Assembler over a custom section list.
    pub fn with_sections(runner: ProcessRunner, sections: Vec<Section>) -> Self {
        Self { runner, sections }
    }

    /// Section titles in report order.
    pub fn titles(&self) -> Vec<&str> {
        self.sections.iter().map(Section::title).collect()
    }

    /// Run every section and collect the full report.
    ///
    /// A section whose command fails or times out still produces its
    /// fragment; assembly itself only fails on infrastructure errors.
    pub async fn assemble(&self) -> Result<Report> {
        let mut fragments = Vec::with_capacity(self.sections.len());
        for section in &self.sections {
            fragments.push(self.run_section(section).await?);
        }
        Ok(Report::new(fragments))
    }

    /// Run a single section by title (case-insensitive).
    pub async fn assemble_section(&self, title: &str) -> Result<Fragment> {
        let section = self
            .sections
            .iter()
            .find(|s| s.title().eq_ignore_ascii_case(title))
            .ok_or_else(|| ClusterPulseError::UnknownSection(title.to_string()))?;
        self.run_section(section).await
    }

    async fn run_section(&self, section: &Section) -> Result<Fragment> {
        info!(section = section.title(), command = %section.invocation(), "collecting section");

        let result = self.runner.execute(section.invocation()).await?;
        let fragment = Fragment::from_result(section.title(), &result);

        info!(
            section = section.title(),
            status = fragment.status().label(),
            duration_ms = fragment.duration().as_millis() as u64,
            "section finished"
        );

        Ok(fragment)
    }
}

/// A fully assembled report: a generation timestamp plus one fragment per
/// section, in catalog order.
#[derive(Debug, Clone)]
pub struct Report {
    generated_at: DateTime<Local>,
    fragments: Vec<Fragment>,
}

impl Report {
    /// Build a report from already-classified fragments, stamped now.
    pub fn new(fragments: Vec<Fragment>) -> Self {
        Self {
            generated_at: Local::now(),
            fragments,
        }
    }

    /// When the report was generated.
    pub fn generated_at(&self) -> DateTime<Local> {
        self.generated_at
    }

    /// The section fragments in report order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Render the report as a plain-text document.
    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Cluster Health Report");
        let _ = writeln!(
            out,
            "Generated on: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        );
        let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));

        for fragment in &self.fragments {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "== {} ({}, {:.1}s) ==",
                fragment.title(),
                fragment.status().label(),
                fragment.duration().as_secs_f64()
            );
            let _ = writeln!(out, "{}", fragment.body());
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        let _ = writeln!(out, "{}", self.summary());

        out
    }

    /// One-line outcome counts.
    pub fn summary(&self) -> String {
        let mut ok = 0;
        let mut failed = 0;
        let mut timed_out = 0;
        for fragment in &self.fragments {
            match fragment.status() {
                SectionStatus::Ok => ok += 1,
                SectionStatus::Failed => failed += 1,
                SectionStatus::TimedOut => timed_out += 1,
            }
        }
        format!(
            "{} sections: {} ok, {} failed, {} timed out",
            self.fragments.len(),
            ok,
            failed,
            timed_out
        )
    }
}
