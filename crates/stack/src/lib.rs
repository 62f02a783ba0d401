//! JVM build tool knowledge: descriptors, Java levels, tool releases.
//!
//! Every supported tool is a [`BuildSystem`] registered in the
//! [`StackRegistry`] under its [`BuildSystemId`]. Callers dispatch on the id
//! rather than on concrete types.

#[macro_use]
pub mod id_enum_macro;

pub mod build_system_id;
pub mod buildsystem;
pub mod interpolate;
pub mod jvm;
pub mod registry;

pub use build_system_id::BuildSystemId;
pub use buildsystem::{BuildSystem, ManifestPattern, ParentRef, RawModule};
pub use interpolate::{Interpolated, Interpolator};
pub use jvm::{GradleCompatibility, JavaRange, JavaVersion, ToolVersion};
pub use registry::{DescriptorMatch, StackRegistry};
