use crate::analysis::RequirementAnalyzer;
use crate::error::RecipeError;
use crate::pipeline::context::RecipeContext;
use crate::pipeline::phase_trait::WorkflowPhase;
use tracing::debug;

pub struct RequirementPhase;

impl WorkflowPhase for RequirementPhase {
    fn name(&self) -> &'static str {
        "RequirementPhase"
    }

    fn execute(&self, context: &mut RecipeContext) -> Result<(), RecipeError> {
        let graph = context.graph(self.name())?;
        let analyzer =
            RequirementAnalyzer::from_config(context.stack_registry.clone(), &context.config);
        let requested = &context.request.coordinate;

        let analysis = match graph.find_artifact(requested.group(), requested.artifact()) {
            Some(module) => {
                debug!(module = %module.coordinate, "Analyzing requested module");
                analyzer.analyze(context.fs.as_ref(), graph, &module.coordinate)?
            }
            None => {
                debug!(requested = %requested, "Requested artifact not in checkout, analyzing whole project");
                analyzer.analyze_project(context.fs.as_ref(), graph)?
            }
        };

        context.analysis = Some(analysis);
        Ok(())
    }
}
