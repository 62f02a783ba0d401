//! Module graph of one checkout
//!
//! Modules live in a map keyed by coordinate and refer to their parent by
//! coordinate.

use recipekit_core::Gav;
use recipekit_stack::BuildSystemId;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A module with its coordinate and properties fully resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub coordinate: Gav,
    /// Absolute path of the descriptor that defines the module
    pub descriptor: PathBuf,
    pub build_system: BuildSystemId,
    /// Properties visible to the module, ancestors overlaid root first
    pub properties: BTreeMap<String, String>,
    /// Parent inside the checkout
    pub parent: Option<Gav>,
    /// Parent declared by the descriptor but not present in the checkout
    pub external_parent: Option<Gav>,
    pub modules: Vec<String>,
    pub scm_connection: Option<String>,
    pub scm_url: Option<String>,
}

impl Module {
    pub fn dir(&self) -> &Path {
        self.descriptor.parent().unwrap_or(Path::new(""))
    }
}

/// Every module of one checkout, keyed by coordinate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectGraph {
    build_system: BuildSystemId,
    modules: BTreeMap<Gav, Module>,
    root: Gav,
    checkout: PathBuf,
}

impl ProjectGraph {
    pub(crate) fn new(
        build_system: BuildSystemId,
        modules: BTreeMap<Gav, Module>,
        root: Gav,
        checkout: PathBuf,
    ) -> Self {
        Self {
            build_system,
            modules,
            root,
            checkout,
        }
    }

    pub fn build_system(&self) -> BuildSystemId {
        self.build_system
    }

    pub fn root(&self) -> &Gav {
        &self.root
    }

    /// Canonical checkout directory the graph was discovered from
    pub fn checkout(&self) -> &Path {
        &self.checkout
    }

    pub fn root_module(&self) -> &Module {
        // The root is inserted before the graph is constructed.
        &self.modules[&self.root]
    }

    pub fn module(&self, coordinate: &Gav) -> Option<&Module> {
        self.modules.get(coordinate)
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    pub fn children_of(&self, coordinate: &Gav) -> Vec<&Module> {
        self.modules
            .values()
            .filter(|m| m.parent.as_ref() == Some(coordinate))
            .collect()
    }

    /// The chain from the outermost ancestor down to `coordinate` itself.
    pub fn ancestors(&self, coordinate: &Gav) -> Vec<&Module> {
        let mut chain = Vec::new();
        let mut current = self.modules.get(coordinate);
        while let Some(module) = current {
            if chain.len() > self.modules.len() {
                break;
            }
            chain.push(module);
            current = module.parent.as_ref().and_then(|p| self.modules.get(p));
        }
        chain.reverse();
        chain
    }

    /// Module with the given group and artifact, at whatever version the
    /// checkout declares.
    pub fn find_artifact(&self, group: &str, artifact: &str) -> Option<&Module> {
        self.modules
            .values()
            .find(|m| m.coordinate.group() == group && m.coordinate.artifact() == artifact)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
