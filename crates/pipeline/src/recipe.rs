use crate::analysis::{Advisory, ToolRequirement};
use crate::scm::ResolvedTag;
use recipekit_core::Gav;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How to build one requested coordinate from a checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// The coordinate the recipe was requested for
    pub coordinate: Gav,
    /// Revision to check out; absent when no tags were supplied
    pub tag: Option<ResolvedTag>,
    pub requirement: ToolRequirement,
    /// Build tool arguments, without the executable
    pub invocation: Vec<String>,
    /// Version the build must be forced to produce
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce_version: Option<String>,
    /// Coordinate of the checkout's root module
    pub root: Gav,
    /// Absolute path of the root module's descriptor
    pub root_descriptor: PathBuf,
    pub scm_origin: Option<String>,
    pub advisories: Vec<Advisory>,
}

/// Per-artifact adjustments kept alongside tag mappings in the recipe database
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeOverrides {
    /// Appended to the tool's standard arguments
    pub additional_args: Vec<String>,
    /// Replaces the tool's standard arguments. Takes precedence over
    /// `additional_args`.
    pub alternative_args: Vec<String>,
    /// Force the requested version when the checkout declares another
    pub enforce_version: bool,
}

impl RecipeOverrides {
    pub fn invocation(&self, standard: Vec<String>) -> Vec<String> {
        if !self.alternative_args.is_empty() {
            return self.alternative_args.clone();
        }
        let mut args = standard;
        args.extend(self.additional_args.iter().cloned());
        args
    }

    /// The requested version, when enforcement is on and the checkout
    /// declares a different one.
    pub fn enforced_version(&self, requested: &Gav, declared: &Gav) -> Option<String> {
        (self.enforce_version && requested.version() != declared.version())
            .then(|| requested.version().to_string())
    }
}
