use crate::discovery::Module;
use crate::error::RecipeError;
use crate::pipeline::context::RecipeContext;
use crate::pipeline::phase_trait::WorkflowPhase;
use crate::recipe::Recipe;
use crate::scm::normalize_scm_url;
use recipekit_core::{AnalysisError, Gav};
use recipekit_stack::Interpolator;
use tracing::debug;

pub struct AssemblePhase;

impl WorkflowPhase for AssemblePhase {
    fn name(&self) -> &'static str {
        "AssemblePhase"
    }

    fn execute(&self, context: &mut RecipeContext) -> Result<(), RecipeError> {
        let graph = context.graph(self.name())?;
        let analysis = context.analysis(self.name())?;
        let root = graph.root_module();
        let requested = &context.request.coordinate;
        let overrides = &context.request.overrides;

        let tool = analysis.requirement.tool;
        let build_system = context.stack_registry.get_build_system(tool).ok_or_else(|| {
            AnalysisError::UnregisteredTool {
                tool: tool.key().to_string(),
            }
        })?;
        let invocation = overrides.invocation(build_system.build_invocation());

        let built = graph
            .find_artifact(requested.group(), requested.artifact())
            .unwrap_or(root);
        let enforce_version = overrides.enforced_version(requested, &built.coordinate);
        debug!(invocation = ?invocation, enforce_version = ?enforce_version, "Build invocation");

        let recipe = Recipe {
            coordinate: requested.clone(),
            tag: context.tag.clone(),
            requirement: analysis.requirement.clone(),
            invocation,
            enforce_version,
            root: root.coordinate.clone(),
            root_descriptor: root.descriptor.clone(),
            scm_origin: scm_origin(root, requested, context.config.interpolation_depth),
            advisories: analysis.advisories.clone(),
        };

        context.recipe = Some(recipe);
        Ok(())
    }
}

/// Repository declared by the root descriptor, with `project.version` read
/// as the requested version.
fn scm_origin(root: &Module, requested: &Gav, depth: usize) -> Option<String> {
    let declared = root.scm_connection.as_deref().or_else(|| {
        root.scm_url
            .as_deref()
            .filter(|url| url.contains("github.com"))
    })?;

    let interpolator = Interpolator::new(&root.properties, depth).with_project(
        root.coordinate.group(),
        root.coordinate.artifact(),
        requested.version(),
    );
    let expanded = match interpolator.interpolate(declared) {
        Ok(expanded) => expanded.value,
        Err(e) => {
            debug!(scm = declared, error = %e, "Cannot expand SCM location");
            return None;
        }
    };

    let origin = normalize_scm_url(&expanded);
    debug!(scm = declared, origin = ?origin, "SCM origin");
    origin
}
