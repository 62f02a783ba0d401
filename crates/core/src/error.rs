//! Error taxonomy for recipe discovery
//!
//! Every failure is terminal for the request that produced it. The engine is
//! deterministic, so nothing here is retried internally.

use crate::gav::Gav;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    #[error("invalid coordinate '{input}': {reason}")]
    Invalid { input: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error("empty project: no build descriptors found under {root:?}")]
    EmptyProject { root: PathBuf },

    #[error("no root descriptor at {root:?}")]
    NoRootDescriptor { root: PathBuf },

    #[error("failed to parse descriptor {path:?}: {message}")]
    DescriptorParse { path: PathBuf, message: String },

    #[error("duplicate module {coordinate} declared by {first:?} and {second:?}")]
    DuplicateModule {
        coordinate: Gav,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("ambiguous build tool: descriptors for {} found", tools.join(", "))]
    AmbiguousBuildTool { tools: Vec<String> },

    #[error("parent cycle detected at {path:?}")]
    ParentCycle { path: PathBuf },

    #[error("cannot resolve {missing} for module {path:?}")]
    IncompleteCoordinate { path: PathBuf, missing: String },

    #[error("I/O error at {path:?}: {message}")]
    Io { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("property cycle: {}", chain.join(" -> "))]
    PropertyCycle { chain: Vec<String> },

    #[error("unsupported {tool} version {version}")]
    UnsupportedToolVersion { tool: String, version: String },

    #[error("invalid {tool} version '{version}'")]
    InvalidToolVersion { tool: String, version: String },

    #[error("ambiguous build tool in {dir:?}: {}", tools.join(", "))]
    AmbiguousBuildTool { dir: PathBuf, tools: Vec<String> },

    #[error("modules require incompatible JDKs: minimum {min} exceeds maximum {max}")]
    IncompatibleModules { min: u32, max: u32 },

    #[error("no capability registered for build tool {tool}")]
    UnregisteredTool { tool: String },

    #[error("module {0} is not part of the project graph")]
    ModuleNotFound(Gav),

    #[error("I/O error at {path:?}: {message}")]
    Io { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagResolutionError {
    #[error("no matching tag for version {version}")]
    NoMatch { version: String },

    #[error("ambiguous tag match for version {version}: {}", candidates.join(", "))]
    Ambiguous {
        version: String,
        candidates: Vec<String>,
    },

    #[error("invalid tag mapping pattern '{pattern}': {message}")]
    InvalidMapping { pattern: String, message: String },
}
