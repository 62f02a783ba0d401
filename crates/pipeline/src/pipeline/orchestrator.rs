use super::context::RecipeContext;
use super::phase_trait::WorkflowPhase;
use super::phases::{
    assemble::AssemblePhase, layout::LayoutPhase, requirement::RequirementPhase, tag::TagPhase,
};
use crate::error::RecipeError;
use crate::recipe::Recipe;
use std::time::Instant;
use tracing::{info, warn};

pub struct PipelineOrchestrator {
    phases: Vec<Box<dyn WorkflowPhase>>,
}

impl Default for PipelineOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineOrchestrator {
    pub fn new() -> Self {
        Self {
            phases: vec![
                Box::new(LayoutPhase),
                Box::new(RequirementPhase),
                Box::new(TagPhase),
                Box::new(AssemblePhase),
            ],
        }
    }

    pub fn phase_names(&self) -> Vec<&'static str> {
        self.phases.iter().map(|p| p.name()).collect()
    }

    pub fn execute(&self, context: &mut RecipeContext) -> Result<Recipe, RecipeError> {
        let start = Instant::now();
        info!(
            coordinate = %context.request.coordinate,
            checkout = %context.request.checkout.display(),
            "Starting recipe discovery"
        );

        for phase in &self.phases {
            let phase_name = phase.name();
            info!(phase = %phase_name, "Starting phase");

            let phase_start = Instant::now();
            if let Err(e) = phase.execute(context) {
                warn!(phase = %phase_name, status = ?e.status(), error = %e, "Phase failed");
                return Err(e);
            }

            info!(
                phase = %phase_name,
                duration_ms = phase_start.elapsed().as_millis(),
                "Phase complete"
            );
        }

        let recipe = context.recipe.take().ok_or(RecipeError::PhaseOrder {
            phase: "PipelineOrchestrator",
            missing: "recipe",
        })?;

        info!(
            coordinate = %recipe.coordinate,
            tool = %recipe.requirement.tool,
            java = %recipe.requirement.java,
            tag = ?recipe.tag.as_ref().map(|t| t.name.as_str()),
            total_time_ms = start.elapsed().as_millis(),
            "Recipe discovery complete"
        );

        Ok(recipe)
    }
}
