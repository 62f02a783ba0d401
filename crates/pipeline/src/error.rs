use recipekit_core::{AnalysisError, ConfigError, CoordinateError, DiscoveryError, TagResolutionError};
use serde::Serialize;
use thiserror::Error;

/// Outcome reported for a build request that produced no recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeStatus {
    /// The checkout admits no single well-justified recipe
    Missing,
    /// The engine could not run to a conclusion
    Failed,
}

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Tag(#[from] TagResolutionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{phase} requires {missing}, which no earlier phase produced")]
    PhaseOrder {
        phase: &'static str,
        missing: &'static str,
    },
}

impl RecipeError {
    pub fn status(&self) -> RecipeStatus {
        match self {
            RecipeError::Discovery(DiscoveryError::Io { .. })
            | RecipeError::Analysis(AnalysisError::Io { .. })
            | RecipeError::Analysis(AnalysisError::UnregisteredTool { .. })
            | RecipeError::Coordinate(_)
            | RecipeError::Config(_)
            | RecipeError::PhaseOrder { .. } => RecipeStatus::Failed,
            RecipeError::Discovery(_) | RecipeError::Analysis(_) | RecipeError::Tag(_) => {
                RecipeStatus::Missing
            }
        }
    }
}
