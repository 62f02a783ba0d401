//! Java language levels, build tool releases and their compatibility

mod gradle_compat;
mod java_version;
mod tool_version;

pub use gradle_compat::{GradleCompatibility, JdkThreshold};
pub use java_version::{JavaRange, JavaVersion};
pub use tool_version::ToolVersion;
