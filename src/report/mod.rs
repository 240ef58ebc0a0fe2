//! Report assembly and rendering.
//!
//! A report is an ordered list of sections, each backed by one diagnostic
//! command. Assembly runs the commands sequentially through the execution
//! engine and classifies every outcome into a displayable fragment; a
//! hanging or failing diagnostic degrades its own section and nothing
//! else.
//!
//! # Example
//!
//! ```no_run
//! use cluster_pulse::execution::ProcessRunner;
//! use cluster_pulse::report::ReportAssembler;
//!
//! # async fn run() -> cluster_pulse::Result<()> {
//! let assembler = ReportAssembler::new(ProcessRunner::default());
//! let report = assembler.assemble().await?;
//! print!("{}", report.render());
//! # Ok(())
//! # }
//! ```

mod assembler;
mod fragment;
mod section;

pub use assembler::{Report, ReportAssembler};
pub use fragment::{Fragment, SectionStatus, NO_DATA};
pub use section::{builtin_sections, Section};
