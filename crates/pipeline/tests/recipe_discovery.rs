use recipekit_core::{
    AnalysisError, DiscoveryError, Gav, RealFileSystem, RecipeConfig, TagResolutionError,
};
use recipekit_pipeline::{
    discover, resolve_tag, DiscoveryOptions, RecipeEngine, RecipeError, RecipeRequest,
    RecipeStatus, TagCandidates, TagMapping,
};
use recipekit_stack::{BuildSystemId, JavaVersion};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use yare::parameterized;

struct Checkout {
    dir: TempDir,
}

impl Checkout {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn file(self, rel: &str, content: &str) -> Self {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn canonical(&self, rel: &str) -> PathBuf {
        self.dir.path().canonicalize().unwrap().join(rel)
    }
}

fn two_module_maven() -> Checkout {
    Checkout::new()
        .file(
            "pom.xml",
            r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <groupId>g</groupId>
    <artifactId>a</artifactId>
    <version>1.0</version>
    <packaging>pom</packaging>
    <modules>
        <module>child</module>
    </modules>
    <properties>
        <maven.compiler.release>11</maven.compiler.release>
    </properties>
    <scm>
        <connection>scm:git:https://github.com/example/a.git</connection>
        <tag>a-${project.version}</tag>
    </scm>
</project>"#,
        )
        .file(
            "child/pom.xml",
            r#"<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <parent>
        <groupId>g</groupId>
        <artifactId>a</artifactId>
        <version>1.0</version>
    </parent>
    <artifactId>child</artifactId>
</project>"#,
        )
}

fn engine() -> RecipeEngine {
    RecipeEngine::with_filesystem(Arc::new(RealFileSystem::new()), RecipeConfig::builtin()).unwrap()
}

#[test]
fn test_two_module_checkout() {
    let checkout = two_module_maven();
    let graph = discover(&RealFileSystem::new(), checkout.path(), &DiscoveryOptions::default()).unwrap();

    assert_eq!(graph.len(), 2);
    assert_eq!(graph.build_system(), BuildSystemId::Maven);
    assert_eq!(graph.root().to_string(), "g:a:1.0");
    assert_eq!(graph.root_module().descriptor, checkout.canonical("pom.xml"));

    let child = graph.find_artifact("g", "child").unwrap();
    assert_eq!(child.coordinate.group(), "g");
    assert_eq!(child.coordinate.version(), "1.0");
    assert_eq!(child.descriptor, checkout.canonical("child/pom.xml"));
    assert_eq!(child.parent.as_ref(), Some(graph.root()));
    assert_eq!(
        child.properties.get("maven.compiler.release").map(String::as_str),
        Some("11")
    );
}

#[test]
fn test_duplicate_modules_abort_discovery() {
    let child = r#"<project>
    <parent><groupId>g</groupId><artifactId>a</artifactId><version>1.0</version></parent>
    <artifactId>same</artifactId>
</project>"#;
    let checkout = Checkout::new()
        .file(
            "pom.xml",
            "<project><groupId>g</groupId><artifactId>a</artifactId><version>1.0</version></project>",
        )
        .file("one/pom.xml", child)
        .file("two/pom.xml", child);

    let err = discover(&RealFileSystem::new(), checkout.path(), &DiscoveryOptions::default()).unwrap_err();
    match err {
        DiscoveryError::DuplicateModule {
            coordinate,
            first,
            second,
        } => {
            assert_eq!(coordinate, Gav::parse("g:same:1.0").unwrap());
            assert_eq!(first, checkout.canonical("one/pom.xml"));
            assert_eq!(second, checkout.canonical("two/pom.xml"));
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let request = RecipeRequest::new(Gav::parse("g:a:1.0").unwrap(), checkout.path());
    let err = engine().discover_recipe(&request).unwrap_err();
    assert!(matches!(err, RecipeError::Discovery(DiscoveryError::DuplicateModule { .. })));
    assert_eq!(err.status(), RecipeStatus::Missing);
}

#[test]
fn test_discovery_is_idempotent() {
    let checkout = two_module_maven();
    let fs = RealFileSystem::new();
    let options = DiscoveryOptions::default();

    let first = discover(&fs, checkout.path(), &options).unwrap();
    let second = discover(&fs, checkout.path(), &options).unwrap();
    assert_eq!(first, second);

    let request = RecipeRequest::new(Gav::parse("g:child:1.0").unwrap(), checkout.path())
        .with_tags(["1.0", "v1.1", "a-1.0"].into_iter().collect());
    let engine = engine();
    let a = serde_json::to_string(&engine.discover_recipe(&request).unwrap()).unwrap();
    let b = serde_json::to_string(&engine.discover_recipe(&request).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[parameterized(
    exact = { "1.0", &["1.0", "1.0.Alpha1", "1.0.1"], Some("1.0") },
    v_prefixed = { "1.0", &["v1.0", "1.0.Alpha1", "1.0.1"], Some("v1.0") },
    prefixed_noise = { "4.9.3", &["antlr4-master-4.9.3", "4.9.3-rc1", "4.9.3"], Some("4.9.3") },
    final_qualifier = { "1.0.Final", &["1.0", "1.1"], Some("1.0") },
    final_qualifier_with_noise = { "1.0.Final", &["1.0", "1.0.a1"], Some("1.0") },
    prereleases_only = { "1.0", &["1.0.Beta1", "1.0.Alpha1"], None },
    qualified_tag = { "1.0", &["1.0.Final", "1.0.Alpha1"], None },
)]
fn test_tag_resolution(version: &str, tags: &[&str], expected: Option<&str>) {
    let candidates: TagCandidates = tags.iter().copied().collect();
    match expected {
        Some(tag) => assert_eq!(resolve_tag(version, &candidates).unwrap(), tag),
        None => assert_eq!(
            resolve_tag(version, &candidates).unwrap_err(),
            TagResolutionError::NoMatch {
                version: version.to_string()
            }
        ),
    }
    assert_eq!(
        resolve_tag(version, &candidates),
        resolve_tag(version, &candidates)
    );
}

fn gradle_checkout(gradle_version: &str) -> Checkout {
    Checkout::new()
        .file("settings.gradle", "rootProject.name = 'lib'\n")
        .file(
            "build.gradle",
            "plugins { id 'java-library' }\n\ngroup = 'org.example'\nversion = '3.0'\n",
        )
        .file(
            "gradle/wrapper/gradle-wrapper.properties",
            &format!(
                "distributionBase=GRADLE_USER_HOME\n\
                 distributionUrl=https\\://services.gradle.org/distributions/gradle-{}-all.zip\n",
                gradle_version
            ),
        )
}

#[parameterized(
    gradle_4_5 = { "4.5", 7 },
    gradle_6_0 = { "6.0", 11 },
    gradle_8_0 = { "8.0", 17 },
)]
fn test_gradle_minimum_jdk(gradle_version: &str, min: u32) {
    let checkout = gradle_checkout(gradle_version);
    let request = RecipeRequest::new(Gav::parse("org.example:lib:3.0").unwrap(), checkout.path());

    let recipe = engine().discover_recipe(&request).unwrap();
    assert_eq!(recipe.requirement.tool, BuildSystemId::Gradle);
    assert_eq!(recipe.requirement.tool_version.as_deref(), Some(gradle_version));
    assert_eq!(recipe.requirement.java.min, JavaVersion::new(min));
    assert_eq!(recipe.requirement.java.preferred, JavaVersion::new(min));
    assert_eq!(recipe.root_descriptor, checkout.canonical("build.gradle"));
}

#[test]
fn test_gradle_before_4_is_unsupported() {
    let checkout = gradle_checkout("3.9");
    let request = RecipeRequest::new(Gav::parse("org.example:lib:3.0").unwrap(), checkout.path());

    let err = engine().discover_recipe(&request).unwrap_err();
    assert!(matches!(
        err,
        RecipeError::Analysis(AnalysisError::UnsupportedToolVersion { ref version, .. }) if version == "3.9"
    ));
    assert_eq!(err.status(), RecipeStatus::Missing);
}

#[test]
fn test_full_recipe() {
    let checkout = two_module_maven();
    let tags = TagCandidates::new()
        .with_revision("a-1.0", "4f2c1e9")
        .with_revision("1.0", "77aa010")
        .with_revision("v0.9", "0011223");
    let request = RecipeRequest::new(Gav::parse("g:child:1.0").unwrap(), checkout.path())
        .with_tags(tags)
        .with_tag_mappings(vec![TagMapping::new(r"(.*)", "a-$1")]);

    let recipe = engine().discover_recipe(&request).unwrap();
    assert_eq!(recipe.coordinate.to_string(), "g:child:1.0");
    assert_eq!(recipe.root.to_string(), "g:a:1.0");
    assert_eq!(recipe.root_descriptor, checkout.canonical("pom.xml"));
    assert_eq!(recipe.scm_origin.as_deref(), Some("https://github.com/example/a"));

    let tag = recipe.tag.as_ref().unwrap();
    assert_eq!(tag.name, "a-1.0");
    assert_eq!(tag.revision.as_deref(), Some("4f2c1e9"));

    assert_eq!(recipe.requirement.tool, BuildSystemId::Maven);
    assert_eq!(recipe.requirement.java.preferred, JavaVersion::new(11));
    assert!(recipe.advisories.is_empty());

    let json = serde_json::to_value(&recipe).unwrap();
    assert_eq!(json["coordinate"]["artifactId"], "child");
    assert_eq!(json["requirement"]["tool"], "maven");
    assert_eq!(json["requirement"]["java"]["preferred"], 11);
    assert_eq!(json["tag"]["name"], "a-1.0");
    assert_eq!(json["invocation"][1], "install");
}

#[test]
fn test_checkout_without_descriptors() {
    let checkout = Checkout::new().file("README.md", "# docs only\n");
    let request = RecipeRequest::new(Gav::parse("g:a:1.0").unwrap(), checkout.path());

    let err = engine().discover_recipe(&request).unwrap_err();
    assert!(matches!(err, RecipeError::Discovery(DiscoveryError::EmptyProject { .. })));
}

#[test]
fn test_missing_checkout_is_failure() {
    let checkout = Checkout::new();
    let request = RecipeRequest::new(
        Gav::parse("g:a:1.0").unwrap(),
        checkout.path().join("does-not-exist"),
    );

    let err = engine().discover_recipe(&request).unwrap_err();
    assert!(matches!(err, RecipeError::Discovery(DiscoveryError::Io { .. })));
    assert_eq!(err.status(), RecipeStatus::Failed);
}
