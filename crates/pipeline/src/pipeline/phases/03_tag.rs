use crate::error::RecipeError;
use crate::pipeline::context::RecipeContext;
use crate::pipeline::phase_trait::WorkflowPhase;
use crate::scm::TagResolver;
use tracing::debug;

pub struct TagPhase;

impl WorkflowPhase for TagPhase {
    fn name(&self) -> &'static str {
        "TagPhase"
    }

    fn execute(&self, context: &mut RecipeContext) -> Result<(), RecipeError> {
        let Some(candidates) = &context.request.tags else {
            debug!("No tag candidates supplied, skipping tag resolution");
            return Ok(());
        };

        let resolver = TagResolver::from_config(&context.config);
        let tag = resolver.resolve_with_mappings(
            context.request.coordinate.version(),
            candidates,
            &context.request.tag_mappings,
        )?;
        context.tag = Some(tag);
        Ok(())
    }
}
