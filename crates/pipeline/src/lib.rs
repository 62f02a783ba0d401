//! Build recipe discovery
//!
//! Given a checkout and the coordinate a build was requested for, the
//! engine finds the project's modules, works out which build tool and JDK
//! range they need and picks the tag the version was released from. The
//! result is a [`Recipe`], or a typed error that says why there is none.

pub mod analysis;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod recipe;
pub mod scm;

pub use analysis::{analyze, analyze_project, Advisory, Analysis, ToolRequirement};
pub use discovery::{discover, DiscoveryOptions, Module, ProjectGraph};
pub use engine::{RecipeEngine, RecipeRequest};
pub use error::{RecipeError, RecipeStatus};
pub use pipeline::{PipelineOrchestrator, RecipeContext, WorkflowPhase};
pub use recipe::{Recipe, RecipeOverrides};
pub use scm::{resolve_tag, ResolvedTag, TagCandidates, TagMapping, TagResolver};
