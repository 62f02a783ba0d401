//! Project layout discovery
//!
//! A checkout is scanned once for build descriptors, every descriptor is
//! parsed, and only then are parents linked and coordinates resolved. A
//! module may be found before its parent in the walk, so nothing is resolved
//! during the scan.

pub mod graph;
pub mod layout;

pub use graph::{Module, ProjectGraph};
pub use layout::{discover, DiscoveryOptions, LayoutDiscoverer};
