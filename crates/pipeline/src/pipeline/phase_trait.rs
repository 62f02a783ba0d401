use super::context::RecipeContext;
use crate::error::RecipeError;

/// One step of recipe discovery. Phases run in a fixed order and hand their
/// results to later phases through the context.
pub trait WorkflowPhase: Send + Sync {
    fn name(&self) -> &'static str;

    fn execute(&self, context: &mut RecipeContext) -> Result<(), RecipeError>;
}
