use crate::discovery::{DiscoveryOptions, LayoutDiscoverer};
use crate::error::RecipeError;
use crate::pipeline::context::RecipeContext;
use crate::pipeline::phase_trait::WorkflowPhase;
use tracing::debug;

pub struct LayoutPhase;

impl WorkflowPhase for LayoutPhase {
    fn name(&self) -> &'static str {
        "LayoutPhase"
    }

    fn execute(&self, context: &mut RecipeContext) -> Result<(), RecipeError> {
        // The requested coordinate fills whatever the checkout never declares.
        let options = DiscoveryOptions::from_config(&context.config)
            .with_fallback(context.request.coordinate.clone());
        let discoverer =
            LayoutDiscoverer::new(context.fs.as_ref(), context.stack_registry.as_ref(), options);

        let graph = discoverer.discover(&context.request.checkout)?;
        debug!(
            root = %graph.root(),
            modules = graph.len(),
            "Layout ready"
        );
        context.graph = Some(graph);
        Ok(())
    }
}
