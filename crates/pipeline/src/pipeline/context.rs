use crate::analysis::Analysis;
use crate::discovery::ProjectGraph;
use crate::engine::RecipeRequest;
use crate::error::RecipeError;
use crate::recipe::Recipe;
use crate::scm::ResolvedTag;
use recipekit_core::config::RecipeConfig;
use recipekit_core::fs::FileSystem;
use recipekit_stack::StackRegistry;
use std::sync::Arc;

/// State threaded through the phases of one discovery request
pub struct RecipeContext {
    pub request: RecipeRequest,
    pub config: RecipeConfig,
    pub fs: Arc<dyn FileSystem>,
    pub stack_registry: Arc<StackRegistry>,
    pub graph: Option<ProjectGraph>,
    pub analysis: Option<Analysis>,
    pub tag: Option<ResolvedTag>,
    pub recipe: Option<Recipe>,
}

impl RecipeContext {
    pub fn new(
        request: RecipeRequest,
        config: RecipeConfig,
        fs: Arc<dyn FileSystem>,
        stack_registry: Arc<StackRegistry>,
    ) -> Self {
        Self {
            request,
            config,
            fs,
            stack_registry,
            graph: None,
            analysis: None,
            tag: None,
            recipe: None,
        }
    }

    pub fn graph(&self, phase: &'static str) -> Result<&ProjectGraph, RecipeError> {
        self.graph.as_ref().ok_or(RecipeError::PhaseOrder {
            phase,
            missing: "project graph",
        })
    }

    pub fn analysis(&self, phase: &'static str) -> Result<&Analysis, RecipeError> {
        self.analysis.as_ref().ok_or(RecipeError::PhaseOrder {
            phase,
            missing: "build requirement",
        })
    }
}
