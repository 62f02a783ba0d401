use crate::error::RecipeError;
use crate::pipeline::{PipelineOrchestrator, RecipeContext};
use crate::recipe::{Recipe, RecipeOverrides};
use crate::scm::{TagCandidates, TagMapping};
use recipekit_core::config::RecipeConfig;
use recipekit_core::fs::{FileSystem, RealFileSystem};
use recipekit_core::Gav;
use recipekit_stack::StackRegistry;
use std::path::PathBuf;
use std::sync::Arc;

/// A coordinate to find a recipe for, and the checkout to find it in
#[derive(Debug, Clone)]
pub struct RecipeRequest {
    pub coordinate: Gav,
    pub checkout: PathBuf,
    /// Tags of the source repository; tag resolution is skipped when absent
    pub tags: Option<TagCandidates>,
    pub tag_mappings: Vec<TagMapping>,
    pub overrides: RecipeOverrides,
}

impl RecipeRequest {
    pub fn new(coordinate: Gav, checkout: impl Into<PathBuf>) -> Self {
        Self {
            coordinate,
            checkout: checkout.into(),
            tags: None,
            tag_mappings: Vec::new(),
            overrides: RecipeOverrides::default(),
        }
    }

    pub fn with_tags(mut self, tags: TagCandidates) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_tag_mappings(mut self, mappings: Vec<TagMapping>) -> Self {
        self.tag_mappings = mappings;
        self
    }

    pub fn with_overrides(mut self, overrides: RecipeOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Entry point: turns a [`RecipeRequest`] into a [`Recipe`].
///
/// The engine holds no per-request state, so one instance can serve
/// concurrent requests against different checkouts.
pub struct RecipeEngine {
    fs: Arc<dyn FileSystem>,
    stack_registry: Arc<StackRegistry>,
    config: RecipeConfig,
    orchestrator: PipelineOrchestrator,
}

impl RecipeEngine {
    pub fn new(config: RecipeConfig) -> Result<Self, RecipeError> {
        Self::with_filesystem(Arc::new(RealFileSystem::new()), config)
    }

    pub fn with_filesystem(fs: Arc<dyn FileSystem>, config: RecipeConfig) -> Result<Self, RecipeError> {
        config.validate()?;
        Ok(Self {
            fs,
            stack_registry: Arc::new(StackRegistry::with_defaults()),
            config,
            orchestrator: PipelineOrchestrator::new(),
        })
    }

    pub fn with_registry(mut self, stack_registry: Arc<StackRegistry>) -> Self {
        self.stack_registry = stack_registry;
        self
    }

    pub fn config(&self) -> &RecipeConfig {
        &self.config
    }

    pub fn discover_recipe(&self, request: &RecipeRequest) -> Result<Recipe, RecipeError> {
        let mut context = RecipeContext::new(
            request.clone(),
            self.config.clone(),
            self.fs.clone(),
            self.stack_registry.clone(),
        );
        self.orchestrator.execute(&mut context)
    }
}
