//! Apache Ant build system, with optional Ivy module metadata

use super::{
    parse_properties, read_descriptor, to_args, BuildSystem, ManifestPattern, ParentRef,
    RawModule,
};
use crate::jvm::{JavaRange, JavaVersion};
use crate::BuildSystemId;
use recipekit_core::fs::FileSystem;
use recipekit_core::DiscoveryError;
use roxmltree::Document;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

const JAVAC_TARGET: &str = "ant.build.javac.target";
const JAVAC_SOURCE: &str = "ant.build.javac.source";

/// Last Ant line that still runs on Java 5
const ANT_LEGACY: &str = "1.9.16";
/// Ant release for Java 8 and later
const ANT_CURRENT: &str = "1.10.15";

pub struct AntBuildSystem;

impl BuildSystem for AntBuildSystem {
    fn id(&self) -> BuildSystemId {
        BuildSystemId::Ant
    }

    fn descriptor_patterns(&self) -> &[ManifestPattern] {
        &[ManifestPattern {
            filename: "build.xml",
            priority: 10,
        }]
    }

    fn parse_descriptor(
        &self,
        fs: &dyn FileSystem,
        path: &Path,
    ) -> Result<RawModule, DiscoveryError> {
        let parse_error = |message: String| DiscoveryError::DescriptorParse {
            path: path.to_path_buf(),
            message,
        };

        let content = read_descriptor(fs, path)?;
        let doc = Document::parse(&content).map_err(|e| parse_error(e.to_string()))?;
        let project = doc.root_element();
        if !project.has_tag_name("project") {
            return Err(parse_error(format!(
                "expected <project> root element, found <{}>",
                project.tag_name().name()
            )));
        }

        let dir = path.parent().unwrap_or(Path::new(""));
        let mut module = RawModule {
            artifact: project.attribute("name").map(str::to_string),
            parent: ParentRef::Enclosing,
            ..Default::default()
        };

        // Ant properties are immutable: the first definition wins.
        for property in project
            .children()
            .filter(|n| n.is_element() && n.has_tag_name("property"))
        {
            if let (Some(name), Some(value)) = (property.attribute("name"), property.attribute("value")) {
                module
                    .properties
                    .entry(name.to_string())
                    .or_insert_with(|| value.to_string());
            } else if let Some(file) = property.attribute("file") {
                let props_path = dir.join(file);
                if !fs.is_file(&props_path) {
                    debug!(path = %props_path.display(), "Skipping missing Ant property file");
                    continue;
                }
                for (key, value) in parse_properties(&read_descriptor(fs, &props_path)?) {
                    module.properties.entry(key).or_insert(value);
                }
            }
        }

        let ivy = dir.join("ivy.xml");
        if fs.is_file(&ivy) {
            let ivy_content = read_descriptor(fs, &ivy)?;
            let ivy_doc = Document::parse(&ivy_content).map_err(|e| DiscoveryError::DescriptorParse {
                path: ivy.clone(),
                message: e.to_string(),
            })?;
            if let Some(info) = ivy_doc
                .root_element()
                .children()
                .find(|n| n.is_element() && n.has_tag_name("info"))
            {
                module.group = info.attribute("organisation").map(str::to_string);
                if let Some(name) = info.attribute("module") {
                    module.artifact = Some(name.to_string());
                }
                module.version = info.attribute("revision").map(str::to_string);
            }
        }

        Ok(module)
    }

    /// `ant.build.javac.target`, falling back to `ant.build.javac.source`,
    /// plus any explicit `<javac>` levels.
    fn extract_java_version(
        &self,
        content: &str,
        properties: &BTreeMap<String, String>,
    ) -> Vec<String> {
        let mut levels: Vec<String> = properties
            .get(JAVAC_TARGET)
            .or_else(|| properties.get(JAVAC_SOURCE))
            .filter(|v| !v.trim().is_empty())
            .cloned()
            .into_iter()
            .collect();

        if let Ok(doc) = Document::parse(content) {
            for javac in doc.descendants().filter(|n| n.has_tag_name("javac")) {
                let level = javac
                    .attribute("release")
                    .or_else(|| javac.attribute("target"))
                    .or_else(|| javac.attribute("source"));
                if let Some(level) = level {
                    levels.push(level.to_string());
                }
            }
        }

        levels
    }

    fn default_tool_version(&self, declared: Option<JavaVersion>) -> Option<String> {
        let version = match declared {
            Some(level) if level < JavaVersion::new(8) => ANT_LEGACY,
            _ => ANT_CURRENT,
        };
        Some(version.to_string())
    }

    fn default_java_range(&self, _configured: JavaRange) -> JavaRange {
        JavaRange::new(7, 17, 8)
    }

    /// Levels 7 and later pin the JDK to exactly that level.
    fn level_range(&self, level: JavaVersion, base: JavaRange) -> JavaRange {
        if level >= JavaVersion::new(7) {
            return JavaRange {
                min: level,
                max: level,
                preferred: level,
            };
        }
        base.for_level(level)
    }

    fn build_invocation(&self) -> Vec<String> {
        to_args(&["-v"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipekit_core::MockFileSystem;
    use yare::parameterized;

    const BUILD_XML: &str = r#"<project name="legacy-lib" default="jar">
        <property file="build.properties"/>
        <property name="javac.level" value="1.6"/>
        <property name="ant.build.javac.source" value="1.5"/>
        <target name="compile">
            <javac srcdir="src" destdir="classes" target="${javac.level}"/>
        </target>
    </project>"#;

    #[test]
    fn test_parse_with_ivy() {
        let fs = MockFileSystem::new();
        fs.add_file("build.xml", BUILD_XML);
        fs.add_file("build.properties", "javac.level=1.7\n");
        fs.add_file(
            "ivy.xml",
            r#"<ivy-module version="2.0"><info organisation="org.legacy" module="lib" revision="2.3"/></ivy-module>"#,
        );

        let module = AntBuildSystem
            .parse_descriptor(&fs, Path::new("/mock/build.xml"))
            .unwrap();

        assert_eq!(module.group.as_deref(), Some("org.legacy"));
        assert_eq!(module.artifact.as_deref(), Some("lib"));
        assert_eq!(module.version.as_deref(), Some("2.3"));
        assert_eq!(module.parent, ParentRef::Enclosing);
        assert_eq!(
            module.properties.get("javac.level").map(String::as_str),
            Some("1.7")
        );
    }

    #[test]
    fn test_parse_without_ivy_uses_project_name() {
        let fs = MockFileSystem::new();
        fs.add_file("build.xml", BUILD_XML);

        let module = AntBuildSystem
            .parse_descriptor(&fs, Path::new("/mock/build.xml"))
            .unwrap();

        assert_eq!(module.artifact.as_deref(), Some("legacy-lib"));
        assert_eq!(module.group, None);
        assert_eq!(
            module.properties.get("javac.level").map(String::as_str),
            Some("1.6")
        );
    }

    #[test]
    fn test_rejects_non_project_root() {
        let fs = MockFileSystem::new();
        fs.add_file("build.xml", "<configuration/>");

        let err = AntBuildSystem
            .parse_descriptor(&fs, Path::new("/mock/build.xml"))
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::DescriptorParse { .. }));
    }

    #[test]
    fn test_extract_java_version() {
        let mut props = BTreeMap::new();
        props.insert(JAVAC_SOURCE.to_string(), "1.5".to_string());

        let levels = AntBuildSystem.extract_java_version(BUILD_XML, &props);
        assert_eq!(levels, vec!["1.5", "${javac.level}"]);

        props.insert(JAVAC_TARGET.to_string(), "1.8".to_string());
        let levels = AntBuildSystem.extract_java_version("<project/>", &props);
        assert_eq!(levels, vec!["1.8"]);
    }

    #[parameterized(
        undeclared = { None, "1.10.15" },
        java_5 = { Some(5), "1.9.16" },
        java_7 = { Some(7), "1.9.16" },
        java_8 = { Some(8), "1.10.15" },
        java_11 = { Some(11), "1.10.15" },
    )]
    fn test_default_tool_version(level: Option<u32>, expected: &str) {
        let declared = level.map(JavaVersion::new);
        assert_eq!(
            AntBuildSystem.default_tool_version(declared).as_deref(),
            Some(expected)
        );
    }

    #[parameterized(
        java_5 = { 5, (7, 8, 8) },
        java_6 = { 6, (7, 11, 8) },
        java_8 = { 8, (8, 8, 8) },
        java_11 = { 11, (11, 11, 11) },
    )]
    fn test_level_range(level: u32, expected: (u32, u32, u32)) {
        let base = AntBuildSystem.default_java_range(JavaRange::new(8, 17, 11));
        assert_eq!(base, JavaRange::new(7, 17, 8));
        assert_eq!(
            AntBuildSystem.level_range(JavaVersion::new(level), base),
            JavaRange::new(expected.0, expected.1, expected.2)
        );
    }
}
