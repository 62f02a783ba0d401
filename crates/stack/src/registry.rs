use crate::buildsystem::*;
use crate::BuildSystemId;
use recipekit_core::fs::FileSystem;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::trace;

/// Descriptor match for a single file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorMatch {
    pub build_system: BuildSystemId,
    pub priority: u8,
}

pub struct StackRegistry {
    build_systems: BTreeMap<BuildSystemId, Arc<dyn BuildSystem>>,
}

impl StackRegistry {
    pub fn new() -> Self {
        Self {
            build_systems: BTreeMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        for id in BuildSystemId::all_variants() {
            let bs: Arc<dyn BuildSystem> = match id {
                BuildSystemId::Maven => Arc::new(MavenBuildSystem),
                BuildSystemId::Gradle => Arc::new(GradleBuildSystem),
                BuildSystemId::Ant => Arc::new(AntBuildSystem),
                BuildSystemId::Sbt => Arc::new(SbtBuildSystem),
            };
            registry.register(bs);
        }

        registry
    }

    pub fn register(&mut self, build_system: Arc<dyn BuildSystem>) {
        self.build_systems.insert(build_system.id(), build_system);
    }

    pub fn get_build_system(&self, id: BuildSystemId) -> Option<&dyn BuildSystem> {
        self.build_systems.get(&id).map(|bs| bs.as_ref())
    }

    pub fn all_build_systems(&self) -> impl Iterator<Item = &dyn BuildSystem> {
        self.build_systems.values().map(|bs| bs.as_ref())
    }

    /// The build system that owns `filename` as a descriptor, if any.
    pub fn match_descriptor(&self, filename: &str) -> Option<DescriptorMatch> {
        self.all_build_systems().find_map(|bs| {
            bs.descriptor_priority(filename).map(|priority| DescriptorMatch {
                build_system: bs.id(),
                priority,
            })
        })
    }

    pub fn is_descriptor(&self, filename: &str) -> bool {
        self.match_descriptor(filename).is_some()
    }

    /// Every build system with a descriptor or marker file directly in `dir`,
    /// in registry order.
    pub fn detect_tools(&self, fs: &dyn FileSystem, dir: &Path) -> Vec<BuildSystemId> {
        self.all_build_systems()
            .filter(|bs| {
                let found = bs
                    .descriptor_patterns()
                    .iter()
                    .map(|p| p.filename)
                    .chain(bs.marker_files().iter().copied())
                    .find(|name| fs.is_file(&dir.join(name)));
                if let Some(name) = found {
                    trace!(dir = %dir.display(), file = name, tool = %bs.id(), "Tool marker found");
                }
                found.is_some()
            })
            .map(|bs| bs.id())
            .collect()
    }
}

impl Default for StackRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
