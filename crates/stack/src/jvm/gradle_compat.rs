//! JDK compatibility of Gradle releases
//!
//! Two ordered threshold tables, highest release first: the oldest JDK a
//! Gradle release can build with, and the newest JDK it can run on. A
//! release maps to the first row whose threshold it meets.

use super::{JavaVersion, ToolVersion};
use recipekit_core::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JdkThreshold {
    /// First Gradle release (major, minor) the row applies to
    pub since: (u32, u32),
    pub jdk: u32,
}

const fn row(major: u32, minor: u32, jdk: u32) -> JdkThreshold {
    JdkThreshold {
        since: (major, minor),
        jdk,
    }
}

const MINIMUM_JDK: &[JdkThreshold] = &[row(7, 3, 17), row(5, 0, 11), row(4, 0, 7)];

const MAXIMUM_JDK: &[JdkThreshold] = &[
    row(8, 14, 24),
    row(8, 10, 23),
    row(8, 8, 22),
    row(8, 5, 21),
    row(8, 3, 20),
    row(7, 6, 19),
    row(7, 5, 18),
    row(7, 3, 17),
    row(7, 0, 16),
    row(6, 7, 15),
    row(6, 3, 14),
    row(6, 0, 13),
    row(5, 4, 12),
    row(5, 0, 11),
    row(4, 7, 10),
    row(4, 3, 9),
];

const MAXIMUM_JDK_FLOOR: u32 = 8;

#[derive(Debug, Clone, Copy)]
pub struct GradleCompatibility {
    minimum: &'static [JdkThreshold],
    maximum: &'static [JdkThreshold],
    maximum_floor: u32,
}

impl GradleCompatibility {
    /// Tables as published in the Gradle compatibility matrix.
    pub const fn documented() -> Self {
        Self {
            minimum: MINIMUM_JDK,
            maximum: MAXIMUM_JDK,
            maximum_floor: MAXIMUM_JDK_FLOOR,
        }
    }

    /// `None` when the release predates every supported row.
    pub fn min_jdk(&self, version: &ToolVersion) -> Option<JavaVersion> {
        lookup(self.minimum, version).map(JavaVersion::new)
    }

    pub fn max_jdk(&self, version: &ToolVersion) -> JavaVersion {
        JavaVersion::new(lookup(self.maximum, version).unwrap_or(self.maximum_floor))
    }

    pub fn jdk_bounds(
        &self,
        version: &ToolVersion,
    ) -> Result<(JavaVersion, JavaVersion), AnalysisError> {
        let min = self
            .min_jdk(version)
            .ok_or_else(|| AnalysisError::UnsupportedToolVersion {
                tool: "gradle".to_string(),
                version: version.to_string(),
            })?;
        Ok((min, self.max_jdk(version)))
    }
}

impl Default for GradleCompatibility {
    fn default() -> Self {
        Self::documented()
    }
}

fn lookup(table: &[JdkThreshold], version: &ToolVersion) -> Option<u32> {
    table
        .iter()
        .find(|t| version.at_least(t.since.0, t.since.1))
        .map(|t| t.jdk)
}
