use super::advisory::Advisory;
use crate::discovery::{Module, ProjectGraph};
use recipekit_core::config::RecipeConfig;
use recipekit_core::fs::FileSystem;
use recipekit_core::{AnalysisError, Gav};
use recipekit_stack::{
    BuildSystem, BuildSystemId, GradleCompatibility, Interpolator, JavaRange, JavaVersion,
    StackRegistry, ToolVersion,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Tool and JDK a module builds with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolRequirement {
    pub tool: BuildSystemId,
    pub tool_version: Option<String>,
    pub java: JavaRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub requirement: ToolRequirement,
    /// Highest Java level the module declares or inherits, before clamping
    pub declared: Option<JavaVersion>,
    pub advisories: Vec<Advisory>,
}

/// Analyzes one module with the default tool registry.
pub fn analyze(
    fs: &dyn FileSystem,
    graph: &ProjectGraph,
    module: &Gav,
    config: &RecipeConfig,
) -> Result<Analysis, AnalysisError> {
    RequirementAnalyzer::from_config(Arc::new(StackRegistry::with_defaults()), config)
        .analyze(fs, graph, module)
}

/// Analyzes every module and merges the results.
pub fn analyze_project(
    fs: &dyn FileSystem,
    graph: &ProjectGraph,
    config: &RecipeConfig,
) -> Result<Analysis, AnalysisError> {
    RequirementAnalyzer::from_config(Arc::new(StackRegistry::with_defaults()), config)
        .analyze_project(fs, graph)
}

pub struct RequirementAnalyzer {
    registry: Arc<StackRegistry>,
    compat: GradleCompatibility,
    default_range: JavaRange,
    interpolation_depth: usize,
}

impl RequirementAnalyzer {
    pub fn from_config(registry: Arc<StackRegistry>, config: &RecipeConfig) -> Self {
        Self {
            registry,
            compat: GradleCompatibility::documented(),
            default_range: JavaRange::new(config.jdk_min, config.jdk_max, config.jdk_preferred),
            interpolation_depth: config.interpolation_depth,
        }
    }

    pub fn analyze(
        &self,
        fs: &dyn FileSystem,
        graph: &ProjectGraph,
        coordinate: &Gav,
    ) -> Result<Analysis, AnalysisError> {
        let module = graph
            .module(coordinate)
            .ok_or_else(|| AnalysisError::ModuleNotFound(coordinate.clone()))?;
        let mut advisories = Vec::new();

        if let Some(parent) = &module.external_parent {
            advisories.push(Advisory::ExternalParent {
                module: coordinate.clone(),
                parent: parent.clone(),
            });
        }

        let tool = self.detect_tool(fs, graph, module)?;
        let build_system = self
            .registry
            .get_build_system(tool)
            .ok_or_else(|| AnalysisError::UnregisteredTool {
                tool: tool.key().to_string(),
            })?;

        let declared = self.declared_java(fs, graph, build_system, module, &mut advisories)?;

        let tool_version = match build_system.detect_tool_version(fs, module.dir(), graph.checkout())? {
            Some(pinned) => Some(pinned),
            None => build_system.default_tool_version(declared),
        };
        let bounds = match &tool_version {
            Some(raw) => {
                let version = ToolVersion::parse(raw).ok_or_else(|| AnalysisError::InvalidToolVersion {
                    tool: tool.key().to_string(),
                    version: raw.clone(),
                })?;
                build_system.jdk_bounds(&version, &self.compat)?
            }
            None => None,
        };

        let base = match bounds {
            Some((min, max)) => JavaRange {
                min,
                max,
                preferred: min,
            },
            None => {
                let range = build_system.default_java_range(self.default_range);
                JavaRange {
                    preferred: range.clamp(range.preferred),
                    ..range
                }
            }
        };

        let mut java = base;
        if let Some(declared) = declared {
            java = build_system.level_range(declared, base);
            java.preferred = java.clamp(declared);
            if java.preferred != declared {
                advisories.push(Advisory::JavaLevelClamped {
                    module: coordinate.clone(),
                    declared,
                    selected: java.preferred,
                });
            }
        }

        for advisory in &advisories {
            warn!(module = %coordinate, "{}", advisory);
        }
        debug!(
            module = %coordinate,
            tool = %tool,
            tool_version = ?tool_version,
            java = %java,
            "Analyzed build requirement"
        );

        Ok(Analysis {
            requirement: ToolRequirement {
                tool,
                tool_version,
                java,
            },
            declared,
            advisories,
        })
    }

    /// Every module analyzed, then narrowed to a range all of them accept.
    /// Tool and tool version come from the root module.
    pub fn analyze_project(
        &self,
        fs: &dyn FileSystem,
        graph: &ProjectGraph,
    ) -> Result<Analysis, AnalysisError> {
        let root = self.analyze(fs, graph, graph.root())?;
        let mut min = root.requirement.java.min;
        let mut max = root.requirement.java.max;
        let mut declared = root.declared;
        let mut advisories = root.advisories.clone();

        for module in graph.modules().filter(|m| &m.coordinate != graph.root()) {
            let analysis = self.analyze(fs, graph, &module.coordinate)?;
            min = min.max(analysis.requirement.java.min);
            max = max.min(analysis.requirement.java.max);
            declared = declared.max(analysis.declared);
            advisories.extend(analysis.advisories);
        }

        if min > max {
            return Err(AnalysisError::IncompatibleModules {
                min: min.feature(),
                max: max.feature(),
            });
        }

        let mut java = JavaRange {
            min,
            max,
            preferred: min,
        };
        java.preferred = java.clamp(root.requirement.java.preferred);
        if let Some(declared) = declared {
            java.preferred = java.clamp(declared);
            let already_reported = advisories.iter().any(|a| {
                matches!(a, Advisory::JavaLevelClamped { declared: d, selected, .. }
                    if *d == declared && *selected == java.preferred)
            });
            if java.preferred != declared && !already_reported {
                advisories.push(Advisory::JavaLevelClamped {
                    module: graph.root().clone(),
                    declared,
                    selected: java.preferred,
                });
            }
        }

        debug!(
            project = %graph.root(),
            modules = graph.len(),
            java = %java,
            "Merged project requirement"
        );

        Ok(Analysis {
            requirement: ToolRequirement {
                java,
                ..root.requirement
            },
            declared,
            advisories,
        })
    }

    fn detect_tool(
        &self,
        fs: &dyn FileSystem,
        graph: &ProjectGraph,
        module: &Module,
    ) -> Result<BuildSystemId, AnalysisError> {
        let tools = self.registry.detect_tools(fs, module.dir());
        match tools.as_slice() {
            [] => Ok(graph.build_system()),
            [only] => Ok(*only),
            _ => Err(AnalysisError::AmbiguousBuildTool {
                dir: module.dir().to_path_buf(),
                tools: tools.iter().map(|t| t.key().to_string()).collect(),
            }),
        }
    }

    /// Highest Java level the module declares. A module that declares none
    /// inherits the declaration of its nearest ancestor. Values that cannot
    /// be resolved or read are reported and skipped.
    fn declared_java(
        &self,
        fs: &dyn FileSystem,
        graph: &ProjectGraph,
        build_system: &dyn BuildSystem,
        module: &Module,
        advisories: &mut Vec<Advisory>,
    ) -> Result<Option<JavaVersion>, AnalysisError> {
        let coordinate = &module.coordinate;
        let mut raw_levels =
            build_system.extract_java_version(&read_descriptor(fs, module)?, &module.properties);

        if raw_levels.is_empty() {
            for ancestor in graph.ancestors(coordinate).into_iter().rev().skip(1) {
                raw_levels = build_system
                    .extract_java_version(&read_descriptor(fs, ancestor)?, &module.properties);
                if !raw_levels.is_empty() {
                    debug!(module = %coordinate, from = %ancestor.coordinate, "Inherited Java level");
                    break;
                }
            }
        }

        let interpolator = Interpolator::new(&module.properties, self.interpolation_depth)
            .with_project(coordinate.group(), coordinate.artifact(), coordinate.version());

        let mut highest: Option<JavaVersion> = None;
        for raw in raw_levels {
            let expanded = interpolator.interpolate(&raw)?;
            if !expanded.is_complete() {
                for property in expanded.unresolved {
                    advisories.push(Advisory::UnresolvedProperty {
                        module: coordinate.clone(),
                        property,
                    });
                }
                continue;
            }

            match JavaVersion::parse(&expanded.value) {
                Some(version) => {
                    debug!(module = %coordinate, raw = %raw, %version, "Declared Java level");
                    highest = highest.max(Some(version));
                }
                None => advisories.push(Advisory::UnparsedJavaLevel {
                    module: coordinate.clone(),
                    value: expanded.value,
                }),
            }
        }

        Ok(highest)
    }
}

fn read_descriptor(fs: &dyn FileSystem, module: &Module) -> Result<String, AnalysisError> {
    fs.read_to_string(&module.descriptor)
        .map_err(|e| AnalysisError::Io {
            path: module.descriptor.clone(),
            message: format!("{:#}", e),
        })
}
