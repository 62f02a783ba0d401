//! Gradle build system (Groovy and Kotlin DSL)

use super::{
    parse_properties, read_descriptor, read_properties_file, to_args, BuildSystem,
    ManifestPattern, ParentRef, RawModule,
};
use crate::jvm::{GradleCompatibility, JavaVersion, ToolVersion};
use crate::BuildSystemId;
use recipekit_core::fs::FileSystem;
use recipekit_core::{AnalysisError, DiscoveryError};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::trace;

const WRAPPER_PROPERTIES: &str = "gradle/wrapper/gradle-wrapper.properties";
const SETTINGS_FILES: &[&str] = &["settings.gradle.kts", "settings.gradle"];
const BUILD_ARGS: &[&str] = &["build", "publish"];

pub struct GradleBuildSystem;

impl BuildSystem for GradleBuildSystem {
    fn id(&self) -> BuildSystemId {
        BuildSystemId::Gradle
    }

    fn descriptor_patterns(&self) -> &[ManifestPattern] {
        &[
            ManifestPattern {
                filename: "build.gradle.kts",
                priority: 20,
            },
            ManifestPattern {
                filename: "build.gradle",
                priority: 15,
            },
            ManifestPattern {
                filename: "settings.gradle.kts",
                priority: 10,
            },
            ManifestPattern {
                filename: "settings.gradle",
                priority: 10,
            },
        ]
    }

    fn marker_files(&self) -> &[&'static str] {
        &["gradlew", WRAPPER_PROPERTIES]
    }

    fn parse_descriptor(
        &self,
        fs: &dyn FileSystem,
        path: &Path,
    ) -> Result<RawModule, DiscoveryError> {
        let dir = path.parent().unwrap_or(Path::new(""));
        let mut module = RawModule {
            parent: ParentRef::Enclosing,
            ..Default::default()
        };

        let gradle_properties = dir.join("gradle.properties");
        if fs.is_file(&gradle_properties) {
            let content = read_descriptor(fs, &gradle_properties)?;
            module.properties = parse_properties(&content);
            module.group = module.properties.get("group").cloned();
            module.version = module.properties.get("version").cloned();
        }

        for settings in SETTINGS_FILES {
            let settings_path = dir.join(settings);
            if fs.is_file(&settings_path) {
                let content = read_descriptor(fs, &settings_path)?;
                module.artifact = root_project_name(&content);
                module.modules = included_projects(&content);
                break;
            }
        }

        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if filename.starts_with("build.gradle") {
            let script = read_descriptor(fs, path)?;
            if let Some(group) = script_assignment(&script, "group") {
                module.group = Some(group);
            }
            if let Some(version) = script_assignment(&script, "version") {
                module.version = Some(version);
            }
        }

        if module.artifact.is_none() {
            module.artifact = dir
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string);
        }

        Ok(module)
    }

    fn extract_java_version(
        &self,
        content: &str,
        _properties: &BTreeMap<String, String>,
    ) -> Vec<String> {
        let mut levels = Vec::new();
        for re in java_level_patterns() {
            for caps in re.captures_iter(content) {
                if let Some(m) = caps.get(1) {
                    levels.push(to_placeholder(m.as_str()));
                }
            }
        }
        levels
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
                trace!(path = %path.display(), ?version, "Read Gradle wrapper");
                return Ok(version);
            }
        }
        Ok(None)
    }

    fn jdk_bounds(
        &self,
        version: &ToolVersion,
        compat: &GradleCompatibility,
    ) -> Result<Option<(JavaVersion, JavaVersion)>, AnalysisError> {
        compat.jdk_bounds(version).map(Some)
    }

    fn build_invocation(&self) -> Vec<String> {
        to_args(BUILD_ARGS)
    }
}

/// Version from a wrapper `distributionUrl` such as
/// `https://services.gradle.org/distributions/gradle-8.5-bin.zip`.
pub fn wrapper_version(url: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^.*/gradle-(?P<version>.*)-(all|bin)\.zip$").expect("valid regex")
    });
    re.captures(url.trim())
        .and_then(|caps| caps.name("version"))
        .map(|m| m.as_str().to_string())
}

fn java_level_patterns() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r#"\b(?:source|target)Compatibility\s*=\s*JavaVersion\.toVersion\(\s*([^)]+?)\s*\)"#,
            r#"\b(?:source|target)Compatibility(?:\s*=\s*|\s+|\.set\(\s*)(JavaVersion\.VERSION_[0-9_]+|"[^"]*"|'[^']*'|[0-9][0-9.]*|[a-z_][A-Za-z0-9_]*\b)"#,
            r#"JavaLanguageVersion\.of\(\s*["']?([0-9][0-9.]*)["']?\s*\)"#,
            r#"\boptions\.release(?:\s*=\s*|\.set\(\s*)["']?([0-9]+)"#,
            r#"\bjvmToolchain\(\s*([0-9]+)\s*\)"#,
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect()
    })
}

/// Rewrites Groovy property references (`$javaVersion`, `"${javaVersion}"`,
/// a bare `javaVersion`) into `${javaVersion}` so they interpolate against
/// `gradle.properties`.
fn to_placeholder(raw: &str) -> String {
    static BARE: OnceLock<Regex> = OnceLock::new();
    let bare = BARE.get_or_init(|| Regex::new(r"^[a-z_][A-Za-z0-9_.]*$").expect("valid regex"));

    let trimmed = raw.trim();
    let quoted = trimmed.starts_with('"') || trimmed.starts_with('\'');
    let unquoted = trimmed.trim_matches(|c: char| c == '"' || c == '\'');
    if !quoted && bare.is_match(unquoted) {
        return format!("${{{}}}", unquoted);
    }
    groovy_interpolation(unquoted)
}

fn groovy_interpolation(value: &str) -> String {
    static DOLLAR: OnceLock<Regex> = OnceLock::new();
    let dollar = DOLLAR
        .get_or_init(|| Regex::new(r"\$([A-Za-z_][A-Za-z0-9_.]*)").expect("valid regex"));
    dollar.replace_all(value, "$${$1}").into_owned()
}

fn script_assignment(script: &str, key: &str) -> Option<String> {
    let pattern = format!(
        r#"(?m)^\s*(?:project\.)?{}\s*(?:=\s*)?["']([^"']+)["']"#,
        regex::escape(key)
    );
    let re = Regex::new(&pattern).ok()?;
    re.captures(script)
        .and_then(|caps| caps.get(1))
        .map(|m| groovy_interpolation(m.as_str()))
}

fn root_project_name(settings: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r#"rootProject\.name\s*=\s*["']([^"']+)["']"#).expect("valid regex")
    });
    re.captures(settings)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Directory paths of `include` entries (`:a:b` becomes `a/b`).
fn included_projects(settings: &str) -> Vec<String> {
    static QUOTED: OnceLock<Regex> = OnceLock::new();
    let quoted = QUOTED.get_or_init(|| Regex::new(r#"["']([^"']+)["']"#).expect("valid regex"));

    settings
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("include"))
        .flat_map(|line| {
            quoted
                .captures_iter(line)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().trim().trim_start_matches(':').replace(':', "/"))
                .collect::<Vec<_>>()
        })
        .filter(|p| !p.is_empty())
        .collect()
}
