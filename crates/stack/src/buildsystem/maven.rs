//! Maven build system

use super::{
    read_descriptor, read_properties_file, to_args, BuildSystem, ManifestPattern, ParentRef,
    RawModule,
};
use crate::BuildSystemId;
use recipekit_core::fs::FileSystem;
use recipekit_core::{AnalysisError, DiscoveryError};
use regex::Regex;
use roxmltree::{Document, Node};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::trace;

const DEFAULT_RELATIVE_PATH: &str = "../pom.xml";
const WRAPPER_PROPERTIES: &str = ".mvn/wrapper/maven-wrapper.properties";
const COMPILER_PLUGIN: &str = "maven-compiler-plugin";
const BUILD_ARGS: &[&str] = &[
    "clean",
    "install",
    "-DskipTests",
    "-Denforcer.skip",
    "-Dcheckstyle.skip",
    "-Drat.skip=true",
    "-Dmaven.deploy.skip=false",
];

pub struct MavenBuildSystem;

impl BuildSystem for MavenBuildSystem {
    fn id(&self) -> BuildSystemId {
        BuildSystemId::Maven
    }

    fn descriptor_patterns(&self) -> &[ManifestPattern] {
        &[ManifestPattern {
            filename: "pom.xml",
            priority: 10,
        }]
    }

    fn parse_descriptor(
        &self,
        fs: &dyn FileSystem,
        path: &Path,
    ) -> Result<RawModule, DiscoveryError> {
        let content = read_descriptor(fs, path)?;
        parse_pom(&content).map_err(|message| DiscoveryError::DescriptorParse {
            path: path.to_path_buf(),
            message,
        })
    }

    fn extract_java_version(
        &self,
        content: &str,
        properties: &BTreeMap<String, String>,
    ) -> Vec<String> {
        if let Some(release) = properties.get("maven.compiler.release") {
            return vec![release.clone()];
        }

        let from_properties: Vec<String> = [
            "maven.compiler.source",
            "maven.compiler.target",
            "maven.compile.source",
            "maven.compile.target",
        ]
        .iter()
        .filter_map(|key| properties.get(*key).cloned())
        .collect();
        if !from_properties.is_empty() {
            return from_properties;
        }

        compiler_plugin_levels(content)
    }

    fn detect_tool_version(
        &self,
        fs: &dyn FileSystem,
        module_dir: &Path,
        checkout_root: &Path,
    ) -> Result<Option<String>, AnalysisError> {
        for dir in [module_dir, checkout_root] {
            let path = dir.join(WRAPPER_PROPERTIES);
            if let Some(props) = read_properties_file(fs, &path)? {
                let version = props
                    .get("distributionUrl")
                    .and_then(|url| wrapper_version(url));
                trace!(path = %path.display(), ?version, "Read Maven wrapper");
                return Ok(version);
            }
        }
        Ok(None)
    }

    fn build_invocation(&self) -> Vec<String> {
        to_args(BUILD_ARGS)
    }
}

fn wrapper_version(url: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"apache-maven-(?P<version>[^/]+)-bin\.zip$").expect("valid regex")
    });
    re.captures(url.trim())
        .and_then(|caps| caps.name("version"))
        .map(|m| m.as_str().to_string())
}

fn parse_pom(content: &str) -> Result<RawModule, String> {
    let doc = Document::parse(content).map_err(|e| e.to_string())?;
    let project = doc.root_element();
    if project.tag_name().name() != "project" {
        return Err(format!(
            "expected <project> root element, found <{}>",
            project.tag_name().name()
        ));
    }

    let mut module = RawModule {
        group: child_text(&project, "groupId"),
        artifact: child_text(&project, "artifactId"),
        version: child_text(&project, "version"),
        ..Default::default()
    };

    if let Some(parent) = child_element(&project, "parent") {
        let artifact = child_text(&parent, "artifactId")
            .ok_or_else(|| "<parent> is missing <artifactId>".to_string())?;
        let relative_path = match child_element(&parent, "relativePath") {
            Some(node) => node
                .text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            None => Some(DEFAULT_RELATIVE_PATH.to_string()),
        };
        module.parent = ParentRef::Declared {
            group: child_text(&parent, "groupId"),
            artifact,
            version: child_text(&parent, "version"),
            relative_path,
        };
    }

    if let Some(props) = child_element(&project, "properties") {
        for child in props.children().filter(|n| n.is_element()) {
            let value = child.text().map(str::trim).unwrap_or_default();
            module
                .properties
                .insert(child.tag_name().name().to_string(), value.to_string());
        }
    }

    if let Some(modules) = child_element(&project, "modules") {
        module.modules = modules
            .children()
            .filter(|n| n.is_element() && n.has_tag_name("module"))
            .filter_map(|n| n.text())
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
    }

    if let Some(scm) = child_element(&project, "scm") {
        module.scm_connection = child_text(&scm, "connection")
            .or_else(|| child_text(&scm, "developerConnection"));
        module.scm_url = child_text(&scm, "url");
    }

    Ok(module)
}

/// `<release>` or `<source>`/`<target>` of `maven-compiler-plugin`, searched
/// in `<build><plugins>` and `<build><pluginManagement><plugins>`.
fn compiler_plugin_levels(content: &str) -> Vec<String> {
    let Ok(doc) = Document::parse(content) else {
        return Vec::new();
    };
    let project = doc.root_element();
    let Some(build) = child_element(&project, "build") else {
        return Vec::new();
    };

    let plugin_lists = [
        child_element(&build, "plugins"),
        child_element(&build, "pluginManagement").and_then(|pm| child_element(&pm, "plugins")),
    ];

    for plugins in plugin_lists.into_iter().flatten() {
        let compiler = plugins.children().find(|p| {
            p.is_element()
                && p.has_tag_name("plugin")
                && child_text(p, "artifactId").as_deref() == Some(COMPILER_PLUGIN)
        });
        let Some(configuration) = compiler.and_then(|p| child_element(&p, "configuration")) else {
            continue;
        };

        if let Some(release) = child_text(&configuration, "release") {
            return vec![release];
        }
        let levels: Vec<String> = ["source", "target"]
            .iter()
            .filter_map(|name| child_text(&configuration, name))
            .collect();
        if !levels.is_empty() {
            return levels;
        }
    }

    Vec::new()
}

fn child_element<'a, 'input>(node: &Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

fn child_text(node: &Node<'_, '_>, name: &str) -> Option<String> {
    child_element(node, name)
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
