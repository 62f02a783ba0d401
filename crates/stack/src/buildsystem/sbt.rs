//! sbt build system

use super::{
    read_descriptor, read_properties_file, to_args, BuildSystem, ManifestPattern, ParentRef,
    RawModule,
};
use crate::BuildSystemId;
use recipekit_core::fs::FileSystem;
use recipekit_core::{AnalysisError, DiscoveryError};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

pub struct SbtBuildSystem;

impl BuildSystem for SbtBuildSystem {
    fn id(&self) -> BuildSystemId {
        BuildSystemId::Sbt
    }

    fn descriptor_patterns(&self) -> &[ManifestPattern] {
        &[ManifestPattern {
            filename: "build.sbt",
            priority: 10,
        }]
    }

    fn parse_descriptor(
        &self,
        fs: &dyn FileSystem,
        path: &Path,
    ) -> Result<RawModule, DiscoveryError> {
        let content = read_descriptor(fs, path)?;
        let mut module = RawModule {
            group: setting(&content, "organization"),
            artifact: setting(&content, "name").or_else(|| {
                path.parent()
                    .and_then(|dir| dir.file_name())
                    .and_then(|name| name.to_str())
                    .map(str::to_string)
            }),
            version: setting(&content, "version"),
            parent: ParentRef::Enclosing,
            ..Default::default()
        };

        let version_sbt = path.parent().unwrap_or(Path::new("")).join("version.sbt");
        if fs.is_file(&version_sbt) {
            if let Some(version) = setting(&read_descriptor(fs, &version_sbt)?, "version") {
                module.version = Some(version);
            }
        }

        Ok(module)
    }

    fn extract_java_version(
        &self,
        content: &str,
        _properties: &BTreeMap<String, String>,
    ) -> Vec<String> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r#""(?:-source|-target|--release|-release)"\s*,\s*"([^"]+)""#)
                .expect("valid regex")
        });
        re.captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    fn detect_tool_version(
        &self,
        fs: &dyn FileSystem,
        module_dir: &Path,
        checkout_root: &Path,
    ) -> Result<Option<String>, AnalysisError> {
        for dir in [module_dir, checkout_root] {
            let path = dir.join("project/build.properties");
            if let Some(props) = read_properties_file(fs, &path)? {
                return Ok(props.get("sbt.version").cloned());
            }
        }
        Ok(None)
    }

    fn build_invocation(&self) -> Vec<String> {
        to_args(&["publish"])
    }
}

/// `key := "value"`, also scoped as `ThisBuild / key` or `key in ThisBuild`.
fn setting(content: &str, key: &str) -> Option<String> {
    let pattern = format!(
        r#"(?m)^\s*(?:ThisBuild\s*/\s*)?{}(?:\s+in\s+ThisBuild)?\s*:=\s*"([^"]+)""#,
        regex::escape(key)
    );
    let re = Regex::new(&pattern).ok()?;
    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}
