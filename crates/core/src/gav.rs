//! Artifact coordinates (`group:artifact:version`)
//!
//! A [`Gav`] is the join key used by every other component: the discoverer
//! indexes modules by it, the analyzer looks modules up by it and recipes are
//! keyed on it. Its invariants (three non-empty parts) hold for every value
//! that exists, so downstream lookups never see partial coordinates.

use crate::error::CoordinateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGav", into = "RawGav")]
pub struct Gav {
    group: String,
    artifact: String,
    version: String,
}

impl Gav {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, CoordinateError> {
        let gav = Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        };

        for (part, value) in [
            ("group", &gav.group),
            ("artifact", &gav.artifact),
            ("version", &gav.version),
        ] {
            if value.trim().is_empty() {
                return Err(CoordinateError::Invalid {
                    input: gav.to_string(),
                    reason: format!("{} is empty", part),
                });
            }
        }

        Ok(gav)
    }

    /// Parses a colon-delimited `group:artifact:version` string.
    pub fn parse(input: &str) -> Result<Self, CoordinateError> {
        let parts: Vec<&str> = input.split(':').collect();
        if parts.len() != 3 {
            return Err(CoordinateError::Invalid {
                input: input.to_string(),
                reason: format!("expected 3 segments, found {}", parts.len()),
            });
        }

        Self::new(parts[0], parts[1], parts[2]).map_err(|_| CoordinateError::Invalid {
            input: input.to_string(),
            reason: "segments must not be empty".to_string(),
        })
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Same group and artifact at another version.
    pub fn with_version(&self, version: impl Into<String>) -> Result<Self, CoordinateError> {
        Self::new(self.group.clone(), self.artifact.clone(), version)
    }

    /// Same group and artifact, ignoring the version.
    pub fn same_artifact(&self, other: &Gav) -> bool {
        self.group == other.group && self.artifact == other.artifact
    }
}

impl fmt::Display for Gav {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

impl FromStr for Gav {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGav {
    group_id: String,
    artifact_id: String,
    version: String,
}

impl TryFrom<RawGav> for Gav {
    type Error = CoordinateError;

    fn try_from(raw: RawGav) -> Result<Self, Self::Error> {
        Gav::new(raw.group_id, raw.artifact_id, raw.version)
    }
}

impl From<Gav> for RawGav {
    fn from(gav: Gav) -> Self {
        Self {
            group_id: gav.group,
            artifact_id: gav.artifact,
            version: gav.version,
        }
    }
}
