use recipekit_core::Gav;
use recipekit_stack::JavaVersion;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A condition worth reporting that does not fail the analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Advisory {
    /// The declared Java level lies outside what the build tool supports
    #[serde(rename_all = "camelCase")]
    JavaLevelClamped {
        module: Gav,
        declared: JavaVersion,
        selected: JavaVersion,
    },
    UnresolvedProperty { module: Gav, property: String },
    UnparsedJavaLevel { module: Gav, value: String },
    /// The parent is not part of the checkout, so its properties are unknown
    ExternalParent { module: Gav, parent: Gav },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::JavaLevelClamped {
                module,
                declared,
                selected,
            } => write!(
                f,
                "{}: declared Java {} is outside the supported range, using {}",
                module, declared, selected
            ),
            Advisory::UnresolvedProperty { module, property } => {
                write!(f, "{}: property '{}' is not defined", module, property)
            }
            Advisory::UnparsedJavaLevel { module, value } => {
                write!(f, "{}: cannot read Java level '{}'", module, value)
            }
            Advisory::ExternalParent { module, parent } => {
                write!(f, "{}: parent {} is outside the checkout", module, parent)
            }
        }
    }
}
