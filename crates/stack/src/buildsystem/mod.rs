//! Build tool capabilities
//!
//! Each JVM build tool knows which files are its descriptors, how to read a
//! descriptor into a [`RawModule`], where a project declares its Java level,
//! where the tool's own release is pinned and how the tool is invoked.

use crate::jvm::{GradleCompatibility, JavaRange, JavaVersion, ToolVersion};
use crate::BuildSystemId;
use recipekit_core::fs::FileSystem;
use recipekit_core::{AnalysisError, DiscoveryError};
use std::collections::BTreeMap;
use std::path::Path;

/// Descriptor file recognised by a build tool. Within one directory the
/// highest priority descriptor represents the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestPattern {
    pub filename: &'static str,
    pub priority: u8,
}

/// Parent a descriptor declares
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParentRef {
    #[default]
    None,
    /// Coordinate-based parent (Maven `<parent>`). `relative_path` is `None`
    /// when the descriptor explicitly disables filesystem lookup.
    Declared {
        group: Option<String>,
        artifact: String,
        version: Option<String>,
        relative_path: Option<String>,
    },
    /// The module in the nearest enclosing directory
    Enclosing,
}

/// A descriptor as written, before inheritance
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawModule {
    pub group: Option<String>,
    pub artifact: Option<String>,
    pub version: Option<String>,
    pub parent: ParentRef,
    pub properties: BTreeMap<String, String>,
    /// Child module paths relative to the descriptor's directory
    pub modules: Vec<String>,
    pub scm_connection: Option<String>,
    pub scm_url: Option<String>,
}

/// Build tool capability
pub trait BuildSystem: Send + Sync {
    fn id(&self) -> BuildSystemId;

    fn descriptor_patterns(&self) -> &[ManifestPattern];

    /// Files other than descriptors whose presence identifies the tool (wrappers).
    fn marker_files(&self) -> &[&'static str] {
        &[]
    }

    fn parse_descriptor(
        &self,
        fs: &dyn FileSystem,
        path: &Path,
    ) -> Result<RawModule, DiscoveryError>;

    /// Raw Java level declarations found in a descriptor, uninterpolated.
    /// `properties` is the module's resolved property map.
    fn extract_java_version(&self, content: &str, properties: &BTreeMap<String, String>)
        -> Vec<String>;

    /// Tool release pinned for the module, looked up in `module_dir` first
    /// and then at the checkout root.
    fn detect_tool_version(
        &self,
        _fs: &dyn FileSystem,
        _module_dir: &Path,
        _checkout_root: &Path,
    ) -> Result<Option<String>, AnalysisError> {
        Ok(None)
    }

    /// Release to build with when the checkout pins none.
    fn default_tool_version(&self, _declared: Option<JavaVersion>) -> Option<String> {
        None
    }

    /// JDK bounds imposed by a tool release, when the tool documents them.
    fn jdk_bounds(
        &self,
        _version: &ToolVersion,
        _compat: &GradleCompatibility,
    ) -> Result<Option<(JavaVersion, JavaVersion)>, AnalysisError> {
        Ok(None)
    }

    /// Range used when the tool release imposes no bounds.
    fn default_java_range(&self, configured: JavaRange) -> JavaRange {
        configured
    }

    /// Narrows `base` to the JDKs able to compile a declared language level.
    fn level_range(&self, level: JavaVersion, base: JavaRange) -> JavaRange {
        base.for_level(level)
    }

    /// Arguments of the tool's release build, without the executable.
    fn build_invocation(&self) -> Vec<String>;

    fn descriptor_priority(&self, filename: &str) -> Option<u8> {
        self.descriptor_patterns()
            .iter()
            .find(|p| p.filename == filename)
            .map(|p| p.priority)
    }
}

pub(crate) fn to_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}

pub(crate) fn read_descriptor(fs: &dyn FileSystem, path: &Path) -> Result<String, DiscoveryError> {
    fs.read_to_string(path).map_err(|e| DiscoveryError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Reads a `key=value` properties file if present. Unreadable files are
/// reported; a missing file is `None`.
pub(crate) fn read_properties_file(
    fs: &dyn FileSystem,
    path: &Path,
) -> Result<Option<BTreeMap<String, String>>, AnalysisError> {
    if !fs.is_file(path) {
        return Ok(None);
    }
    let content = fs.read_to_string(path).map_err(|e| AnalysisError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(Some(parse_properties(&content)))
}

/// Minimal `.properties` reader: `key=value` or `key: value`, `#`/`!`
/// comments, `\:` and `\=` escapes. Line continuations are not supported.
pub fn parse_properties(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .filter_map(|line| {
            let split = line.find(|c: char| c == '=' || c == ':')?;
            let key = line[..split].trim();
            let value = line[split + 1..].trim().replace("\\:", ":").replace("\\=", "=");
            (!key.is_empty()).then(|| (key.to_string(), value))
        })
        .collect()
}

pub mod ant;
pub mod gradle;
pub mod maven;
pub mod sbt;

pub use ant::AntBuildSystem;
pub use gradle::GradleBuildSystem;
pub use maven::MavenBuildSystem;
pub use sbt::SbtBuildSystem;
