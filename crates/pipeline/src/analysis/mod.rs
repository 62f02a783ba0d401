//! Build requirement analysis: which tool, which tool release and which JDK
//! range a discovered module builds with.

pub mod advisory;
pub mod requirement;

pub use advisory::Advisory;
pub use requirement::{analyze, analyze_project, Analysis, RequirementAnalyzer, ToolRequirement};
