//! Descriptor scanning and module linking
//!
//! Walks a checkout, parses every build descriptor and links the modules
//! into a [`ProjectGraph`]. Parents are linked only after the whole tree has
//! been read, so declaration order in the checkout never matters.

use super::graph::{Module, ProjectGraph};
use recipekit_core::config::RecipeConfig;
use recipekit_core::fs::{FileSystem, WalkOptions};
use recipekit_core::{DiscoveryError, Gav};
use recipekit_stack::interpolate::{has_placeholder, substitute};
use recipekit_stack::{BuildSystemId, DescriptorMatch, Interpolator, ParentRef, RawModule, StackRegistry};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, trace, warn};

#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    pub walk: WalkOptions,
    /// Supplies group/version (and the root artifact) a checkout never declares
    pub fallback: Option<Gav>,
    pub interpolation_depth: usize,
}

impl DiscoveryOptions {
    pub fn from_config(config: &RecipeConfig) -> Self {
        Self {
            walk: config.walk_options(),
            fallback: None,
            interpolation_depth: config.interpolation_depth,
        }
    }

    pub fn with_fallback(mut self, fallback: Gav) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self::from_config(&RecipeConfig::builtin())
    }
}

/// Discovers a checkout with the default build tool registry.
pub fn discover(
    fs: &dyn FileSystem,
    root: &Path,
    options: &DiscoveryOptions,
) -> Result<ProjectGraph, DiscoveryError> {
    let registry = StackRegistry::with_defaults();
    LayoutDiscoverer::new(fs, &registry, options.clone()).discover(root)
}

/// A parsed descriptor before parents are linked
struct Descriptor {
    path: PathBuf,
    rel_dir: PathBuf,
    build_system: BuildSystemId,
    raw: RawModule,
}

impl Descriptor {
    fn declared_parent(&self) -> (Option<&str>, Option<&str>) {
        match &self.raw.parent {
            ParentRef::Declared { group, version, .. } => (group.as_deref(), version.as_deref()),
            _ => (None, None),
        }
    }

    /// Coordinate as far as the descriptor alone determines it.
    fn provisional(&self) -> (Option<&str>, Option<&str>, Option<&str>) {
        let (parent_group, parent_version) = self.declared_parent();
        (
            non_empty(self.raw.group.as_deref()).or(parent_group),
            non_empty(self.raw.artifact.as_deref()),
            non_empty(self.raw.version.as_deref()).or(parent_version),
        )
    }
}

struct Resolved {
    coordinate: Gav,
    properties: BTreeMap<String, String>,
}

pub struct LayoutDiscoverer<'a> {
    fs: &'a dyn FileSystem,
    registry: &'a StackRegistry,
    options: DiscoveryOptions,
}

impl<'a> LayoutDiscoverer<'a> {
    pub fn new(fs: &'a dyn FileSystem, registry: &'a StackRegistry, options: DiscoveryOptions) -> Self {
        Self {
            fs,
            registry,
            options,
        }
    }

    pub fn discover(&self, root: &Path) -> Result<ProjectGraph, DiscoveryError> {
        let root = self.fs.canonicalize(root).map_err(|e| io_error(root, e))?;
        let files = self
            .fs
            .walk_files(&root, &self.options.walk)
            .map_err(|e| io_error(&root, e))?;

        let (build_system, selected) = self.select_descriptors(&root, &files)?;
        let descriptors = self.parse_descriptors(&root, selected)?;
        let root_index = descriptors
            .iter()
            .position(|d| d.rel_dir.as_os_str().is_empty())
            .ok_or_else(|| DiscoveryError::NoRootDescriptor { root: root.clone() })?;

        let parents = link_parents(&descriptors);
        detect_cycles(&descriptors, &parents)?;
        let resolved = self.resolve(&descriptors, &parents)?;

        warn_undeclared_modules(&descriptors);

        let mut modules: BTreeMap<Gav, Module> = BTreeMap::new();
        for (index, descriptor) in descriptors.iter().enumerate() {
            let own = &resolved[index];
            let module = Module {
                coordinate: own.coordinate.clone(),
                descriptor: descriptor.path.clone(),
                build_system: descriptor.build_system,
                properties: own.properties.clone(),
                parent: parents[index].map(|p| resolved[p].coordinate.clone()),
                external_parent: match parents[index] {
                    Some(_) => None,
                    None => external_parent(descriptor, &own.properties),
                },
                modules: descriptor.raw.modules.clone(),
                scm_connection: descriptor.raw.scm_connection.clone(),
                scm_url: descriptor.raw.scm_url.clone(),
            };

            if let Some(existing) = modules.get(&module.coordinate) {
                return Err(DiscoveryError::DuplicateModule {
                    coordinate: module.coordinate.clone(),
                    first: existing.descriptor.clone(),
                    second: module.descriptor.clone(),
                });
            }
            debug!(
                module = %module.coordinate,
                descriptor = %module.descriptor.display(),
                parent = ?module.parent.as_ref().map(|p| p.to_string()),
                "Resolved module"
            );
            modules.insert(module.coordinate.clone(), module);
        }

        let root_coordinate = resolved[root_index].coordinate.clone();
        info!(
            root = %root.display(),
            tool = %build_system,
            modules = modules.len(),
            coordinate = %root_coordinate,
            "Discovered project layout"
        );

        Ok(ProjectGraph::new(build_system, modules, root_coordinate, root))
    }

    /// Highest priority descriptor per directory, keyed by relative directory.
    fn select_descriptors(
        &self,
        root: &Path,
        files: &[PathBuf],
    ) -> Result<(BuildSystemId, BTreeMap<PathBuf, (DescriptorMatch, PathBuf)>), DiscoveryError> {
        let mut families = BTreeSet::new();
        let mut by_dir: BTreeMap<PathBuf, (DescriptorMatch, PathBuf)> = BTreeMap::new();

        for rel in files {
            let Some(name) = rel.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(found) = self.registry.match_descriptor(name) else {
                continue;
            };
            trace!(path = %rel.display(), tool = %found.build_system, "Descriptor found");
            families.insert(found.build_system);

            let dir = rel.parent().map(Path::to_path_buf).unwrap_or_default();
            let keep_existing = by_dir
                .get(&dir)
                .is_some_and(|(existing, _)| existing.priority >= found.priority);
            if !keep_existing {
                by_dir.insert(dir, (found, rel.clone()));
            }
        }

        let mut families = families.into_iter();
        let build_system = match (families.next(), families.len()) {
            (None, _) => {
                return Err(DiscoveryError::EmptyProject {
                    root: root.to_path_buf(),
                })
            }
            (Some(only), 0) => only,
            (Some(first), _) => {
                let tools = std::iter::once(first)
                    .chain(families)
                    .map(|id| id.key().to_string())
                    .collect();
                return Err(DiscoveryError::AmbiguousBuildTool { tools });
            }
        };

        Ok((build_system, by_dir))
    }

    fn parse_descriptors(
        &self,
        root: &Path,
        selected: BTreeMap<PathBuf, (DescriptorMatch, PathBuf)>,
    ) -> Result<Vec<Descriptor>, DiscoveryError> {
        let mut descriptors = Vec::with_capacity(selected.len());
        for (rel_dir, (found, rel)) in selected {
            let Some(build_system) = self.registry.get_build_system(found.build_system) else {
                continue;
            };
            let path = root.join(&rel);
            let raw = build_system.parse_descriptor(self.fs, &path)?;
            trace!(path = %path.display(), artifact = ?raw.artifact, "Parsed descriptor");
            descriptors.push(Descriptor {
                path,
                rel_dir,
                build_system: found.build_system,
                raw,
            });
        }
        Ok(descriptors)
    }

    /// Resolves coordinates and properties, parents before children.
    fn resolve(
        &self,
        descriptors: &[Descriptor],
        parents: &[Option<usize>],
    ) -> Result<Vec<Resolved>, DiscoveryError> {
        let mut order: Vec<usize> = (0..descriptors.len()).collect();
        order.sort_by_key(|&i| (depth(parents, i), i));

        let mut resolved: Vec<Option<Resolved>> = (0..descriptors.len()).map(|_| None).collect();
        for index in order {
            let parent = parents[index].and_then(|p| resolved[p].as_ref());
            let module = self.resolve_one(&descriptors[index], parent)?;
            resolved[index] = Some(module);
        }

        Ok(resolved.into_iter().flatten().collect())
    }

    fn resolve_one(
        &self,
        descriptor: &Descriptor,
        parent: Option<&Resolved>,
    ) -> Result<Resolved, DiscoveryError> {
        let mut properties = parent.map(|p| p.properties.clone()).unwrap_or_default();
        properties.extend(descriptor.raw.properties.clone());

        let raw = &descriptor.raw;
        let (declared_group, declared_version) = descriptor.declared_parent();
        let fallback = self.options.fallback.as_ref();
        let is_root = descriptor.rel_dir.as_os_str().is_empty();

        let group = non_empty(raw.group.as_deref())
            .or_else(|| parent.map(|p| p.coordinate.group()))
            .or(declared_group)
            .or_else(|| fallback.map(Gav::group))
            .ok_or_else(|| incomplete(descriptor, "groupId"))?;
        let artifact = non_empty(raw.artifact.as_deref())
            .or_else(|| fallback.filter(|_| is_root).map(Gav::artifact))
            .ok_or_else(|| incomplete(descriptor, "artifactId"))?;
        let version = non_empty(raw.version.as_deref())
            .or_else(|| parent.map(|p| p.coordinate.version()))
            .or(declared_version)
            .or_else(|| fallback.map(Gav::version))
            .ok_or_else(|| incomplete(descriptor, "version"))?;

        let expand = |value: &str| -> Result<String, DiscoveryError> {
            if !has_placeholder(value) {
                return Ok(value.to_string());
            }
            let mut interpolator = Interpolator::new(&properties, self.options.interpolation_depth);
            if let Some(parent) = parent {
                interpolator = interpolator
                    .with_builtin("project.parent.groupId", parent.coordinate.group())
                    .with_builtin("project.parent.version", parent.coordinate.version());
            }
            interpolator
                .interpolate(value)
                .map(|expanded| expanded.value)
                .map_err(|e| DiscoveryError::DescriptorParse {
                    path: descriptor.path.clone(),
                    message: e.to_string(),
                })
        };

        let coordinate = Gav::new(expand(group)?, expand(artifact)?, expand(version)?).map_err(|e| {
            DiscoveryError::DescriptorParse {
                path: descriptor.path.clone(),
                message: e.to_string(),
            }
        })?;

        Ok(Resolved {
            coordinate,
            properties,
        })
    }
}

/// Index of each descriptor's parent within the checkout.
fn link_parents(descriptors: &[Descriptor]) -> Vec<Option<usize>> {
    let by_path: HashMap<&Path, usize> = descriptors
        .iter()
        .enumerate()
        .map(|(i, d)| (d.path.as_path(), i))
        .collect();
    let by_dir: HashMap<&Path, usize> = descriptors
        .iter()
        .enumerate()
        .map(|(i, d)| (d.rel_dir.as_path(), i))
        .collect();

    descriptors
        .iter()
        .map(|descriptor| match &descriptor.raw.parent {
            ParentRef::None => None,
            ParentRef::Enclosing => {
                let mut dir = descriptor.rel_dir.parent();
                while let Some(candidate) = dir {
                    if let Some(&index) = by_dir.get(candidate) {
                        return Some(index);
                    }
                    dir = candidate.parent();
                }
                None
            }
            ParentRef::Declared {
                group,
                artifact,
                version,
                relative_path,
            } => {
                let matches: Vec<usize> = descriptors
                    .iter()
                    .enumerate()
                    .filter(|(_, other)| {
                        let (g, a, v) = other.provisional();
                        a == Some(artifact.as_str())
                            && (group.is_none() || g == group.as_deref())
                            && (version.is_none() || v == version.as_deref())
                    })
                    .map(|(i, _)| i)
                    .collect();
                if let [only] = matches.as_slice() {
                    return Some(*only);
                }

                let relative = relative_path.as_deref()?;
                let target = normalize(&descriptor.path.parent()?.join(relative));
                let index = by_path
                    .get(target.as_path())
                    .or_else(|| by_path.get(target.join("pom.xml").as_path()))
                    .copied()?;
                if non_empty(descriptors[index].raw.artifact.as_deref()) == Some(artifact.as_str()) {
                    Some(index)
                } else {
                    debug!(
                        descriptor = %descriptor.path.display(),
                        relative_path = relative,
                        "relativePath points at a different artifact"
                    );
                    None
                }
            }
        })
        .collect()
}

fn detect_cycles(descriptors: &[Descriptor], parents: &[Option<usize>]) -> Result<(), DiscoveryError> {
    for start in 0..descriptors.len() {
        let mut seen = BTreeSet::new();
        let mut current = Some(start);
        while let Some(index) = current {
            if !seen.insert(index) {
                return Err(DiscoveryError::ParentCycle {
                    path: descriptors[index].path.clone(),
                });
            }
            current = parents[index];
        }
    }
    Ok(())
}

fn depth(parents: &[Option<usize>], index: usize) -> usize {
    let mut depth = 0;
    let mut current = parents[index];
    while let Some(parent) = current {
        depth += 1;
        current = parents[parent];
    }
    depth
}

fn external_parent(descriptor: &Descriptor, properties: &BTreeMap<String, String>) -> Option<Gav> {
    match &descriptor.raw.parent {
        ParentRef::Declared {
            group: Some(group),
            artifact,
            version: Some(version),
            ..
        } => Gav::new(
            substitute(group, properties),
            substitute(artifact, properties),
            substitute(version, properties),
        )
        .ok(),
        _ => None,
    }
}

fn warn_undeclared_modules(descriptors: &[Descriptor]) {
    for descriptor in descriptors {
        let Some(dir) = descriptor.path.parent() else {
            continue;
        };
        for declared in &descriptor.raw.modules {
            let target = normalize(&dir.join(declared));
            let found = descriptors
                .iter()
                .any(|d| d.path == target || d.path.parent() == Some(target.as_path()));
            if !found {
                warn!(
                    descriptor = %descriptor.path.display(),
                    module = %declared,
                    "Declared module has no descriptor in the checkout"
                );
            }
        }
    }
}

/// Lexically resolves `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn incomplete(descriptor: &Descriptor, missing: &str) -> DiscoveryError {
    DiscoveryError::IncompleteCoordinate {
        path: descriptor.path.clone(),
        missing: missing.to_string(),
    }
}

fn io_error(path: &Path, error: impl fmt::Display) -> DiscoveryError {
    DiscoveryError::Io {
        path: path.to_path_buf(),
        message: format!("{:#}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipekit_core::MockFileSystem;

    fn pom(body: &str) -> String {
        format!("<project><modelVersion>4.0.0</modelVersion>{}</project>", body)
    }

    fn parent(group: &str, artifact: &str, version: &str) -> String {
        format!(
            "<parent><groupId>{}</groupId><artifactId>{}</artifactId><version>{}</version></parent>",
            group, artifact, version
        )
    }

    fn run(fs: &MockFileSystem) -> Result<ProjectGraph, DiscoveryError> {
        discover(fs, Path::new("/mock"), &DiscoveryOptions::default())
    }

    #[test]
    fn test_child_inherits_group_and_version() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "pom.xml",
            &pom("<groupId>g</groupId><artifactId>a</artifactId><version>1.0</version>\
                  <modules><module>child</module></modules>"),
        );
        fs.add_file(
            "child/pom.xml",
            &pom(&format!("{}<artifactId>child</artifactId>", parent("g", "a", "1.0"))),
        );

        let graph = run(&fs).unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.root().to_string(), "g:a:1.0");
        assert_eq!(graph.root_module().descriptor, PathBuf::from("/mock/pom.xml"));

        let child = graph.find_artifact("g", "child").unwrap();
        assert_eq!(child.coordinate.to_string(), "g:child:1.0");
        assert_eq!(child.parent.as_ref(), Some(graph.root()));
        assert_eq!(child.external_parent, None);
    }

    #[test]
    fn test_parent_found_by_relative_path() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "pom.xml",
            &pom("<groupId>g</groupId><artifactId>a</artifactId><version>${revision}</version>\
                  <properties><revision>2.0</revision></properties>"),
        );
        fs.add_file(
            "modules/lib/pom.xml",
            &pom("<parent><groupId>g</groupId><artifactId>a</artifactId>\
                  <version>${revision}-SNAPSHOT</version><relativePath>../../pom.xml</relativePath></parent>\
                  <artifactId>lib</artifactId>"),
        );

        let graph = run(&fs).unwrap();
        assert_eq!(graph.root().to_string(), "g:a:2.0");
        let lib = graph.find_artifact("g", "lib").unwrap();
        assert_eq!(lib.parent.as_ref(), Some(graph.root()));
        assert_eq!(lib.coordinate.version(), "2.0");
    }

    #[test]
    fn test_properties_overlay_root_first() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "pom.xml",
            &pom("<groupId>g</groupId><artifactId>a</artifactId><version>1</version>\
                  <properties><shared>root</shared><only.root>yes</only.root></properties>"),
        );
        fs.add_file(
            "b/pom.xml",
            &pom(&format!(
                "{}<artifactId>b</artifactId><properties><shared>child</shared></properties>",
                parent("g", "a", "1")
            )),
        );

        let graph = run(&fs).unwrap();
        let child = graph.find_artifact("g", "b").unwrap();
        assert_eq!(child.properties.get("shared").map(String::as_str), Some("child"));
        assert_eq!(child.properties.get("only.root").map(String::as_str), Some("yes"));
        assert_eq!(
            graph.root_module().properties.get("shared").map(String::as_str),
            Some("root")
        );
    }

    #[test]
    fn test_external_parent_supplies_coordinates() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "pom.xml",
            &pom(&format!(
                "{}<artifactId>service</artifactId>",
                parent("org.springframework.boot", "spring-boot-starter-parent", "3.2.0")
            )),
        );

        let graph = run(&fs).unwrap();
        let root = graph.root_module();
        assert_eq!(
            root.coordinate.to_string(),
            "org.springframework.boot:service:3.2.0"
        );
        assert_eq!(root.parent, None);
        assert_eq!(
            root.external_parent.as_ref().map(|p| p.to_string()).as_deref(),
            Some("org.springframework.boot:spring-boot-starter-parent:3.2.0")
        );
    }

    #[test]
    fn test_fallback_coordinate() {
        let fs = MockFileSystem::new();
        fs.add_file("pom.xml", &pom("<artifactId>bare</artifactId>"));

        let err = run(&fs).unwrap_err();
        assert!(matches!(err, DiscoveryError::IncompleteCoordinate { ref missing, .. } if missing == "groupId"));

        let options = DiscoveryOptions::default().with_fallback(Gav::parse("org.req:bare:4.1").unwrap());
        let graph = discover(&fs, Path::new("/mock"), &options).unwrap();
        assert_eq!(graph.root().to_string(), "org.req:bare:4.1");
    }

    #[test]
    fn test_gradle_subprojects_inherit_from_enclosing() {
        let fs = MockFileSystem::new();
        fs.add_file("settings.gradle", "rootProject.name = 'acme'\ninclude 'app'\n");
        fs.add_file("build.gradle", "group = 'org.acme'\nversion = '1.2'\n");
        fs.add_file("app/build.gradle", "dependencies {}\n");

        let graph = run(&fs).unwrap();
        assert_eq!(graph.build_system(), BuildSystemId::Gradle);
        assert_eq!(graph.root().to_string(), "org.acme:acme:1.2");
        assert_eq!(graph.root_module().descriptor, PathBuf::from("/mock/build.gradle"));

        let app = graph.find_artifact("org.acme", "app").unwrap();
        assert_eq!(app.coordinate.version(), "1.2");
        assert_eq!(app.parent.as_ref(), Some(graph.root()));
    }

    #[test]
    fn test_duplicate_coordinates() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "pom.xml",
            &pom("<groupId>g</groupId><artifactId>a</artifactId><version>1</version>"),
        );
        for dir in ["x", "y"] {
            fs.add_file(
                format!("{}/pom.xml", dir),
                &pom(&format!("{}<artifactId>dup</artifactId>", parent("g", "a", "1"))),
            );
        }

        match run(&fs).unwrap_err() {
            DiscoveryError::DuplicateModule {
                coordinate,
                first,
                second,
            } => {
                assert_eq!(coordinate.to_string(), "g:dup:1");
                assert_eq!(first, PathBuf::from("/mock/x/pom.xml"));
                assert_eq!(second, PathBuf::from("/mock/y/pom.xml"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parent_cycle() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "pom.xml",
            &pom(&format!(
                "{}<groupId>g</groupId><artifactId>a</artifactId><version>1</version>",
                parent("g", "b", "1")
            )),
        );
        fs.add_file(
            "b/pom.xml",
            &pom(&format!(
                "{}<groupId>g</groupId><artifactId>b</artifactId><version>1</version>",
                parent("g", "a", "1")
            )),
        );

        assert!(matches!(run(&fs).unwrap_err(), DiscoveryError::ParentCycle { .. }));
    }

    #[test]
    fn test_mixed_build_tools_rejected() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "pom.xml",
            &pom("<groupId>g</groupId><artifactId>a</artifactId><version>1</version>"),
        );
        fs.add_file("tools/build.gradle", "");

        match run(&fs).unwrap_err() {
            DiscoveryError::AmbiguousBuildTool { tools } => {
                assert_eq!(tools, vec!["maven", "gradle"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_and_rootless_checkouts() {
        let fs = MockFileSystem::new();
        fs.add_file("README.md", "nothing to build");
        assert!(matches!(run(&fs).unwrap_err(), DiscoveryError::EmptyProject { .. }));

        fs.add_file(
            "nested/pom.xml",
            &pom("<groupId>g</groupId><artifactId>a</artifactId><version>1</version>"),
        );
        assert!(matches!(run(&fs).unwrap_err(), DiscoveryError::NoRootDescriptor { .. }));
    }

    #[test]
    fn test_excluded_directories_are_ignored() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "pom.xml",
            &pom("<groupId>g</groupId><artifactId>a</artifactId><version>1</version>"),
        );
        fs.add_file("src/it/sample/pom.xml", &pom("<artifactId>a</artifactId>"));
        fs.add_file("target/classes/pom.xml", "not xml");

        let graph = run(&fs).unwrap();
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_module_named_build_is_discovered() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "pom.xml",
            &pom("<groupId>g</groupId><artifactId>a</artifactId><version>1.0</version>\
                  <modules><module>build</module></modules>"),
        );
        fs.add_file(
            "build/pom.xml",
            &pom(&format!("{}<artifactId>a-build</artifactId>", parent("g", "a", "1.0"))),
        );

        let graph = run(&fs).unwrap();
        assert_eq!(graph.len(), 2);
        let build = graph.find_artifact("g", "a-build").unwrap();
        assert_eq!(build.descriptor, PathBuf::from("/mock/build/pom.xml"));
        assert_eq!(build.parent.as_ref(), Some(graph.root()));
    }

    #[test]
    fn test_malformed_descriptor_names_file() {
        let fs = MockFileSystem::new();
        fs.add_file("pom.xml", "<project><groupId>g</project>");

        match run(&fs).unwrap_err() {
            DiscoveryError::DescriptorParse { path, .. } => {
                assert_eq!(path, PathBuf::from("/mock/pom.xml"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize(Path::new("/repo/modules/lib/../../pom.xml")),
            PathBuf::from("/repo/pom.xml")
        );
        assert_eq!(normalize(Path::new("/repo/./a")), PathBuf::from("/repo/a"));
    }
}
