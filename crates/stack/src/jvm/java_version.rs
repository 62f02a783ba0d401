use serde::{Deserialize, Serialize};
use std::fmt;

/// A Java feature release (`8`, `11`, `17`, ...).
///
/// Legacy `1.x` spellings normalize to `x`, so `1.8` and `8` are the same level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JavaVersion(u32);

impl JavaVersion {
    pub const fn new(feature: u32) -> Self {
        Self(feature)
    }

    pub fn feature(&self) -> u32 {
        self.0
    }

    /// Parses the spellings build descriptors use for a language level:
    /// `8`, `1.8`, `17.0.2`, `JavaVersion.VERSION_1_8`, `VERSION_17` and any of
    /// those wrapped in quotes.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim().trim_matches(|c: char| c == '"' || c == '\'').trim();
        let unprefixed = trimmed
            .strip_prefix("JavaVersion.")
            .unwrap_or(trimmed);
        let normalized = match unprefixed.strip_prefix("VERSION_") {
            Some(rest) => rest.replace('_', "."),
            None => unprefixed.to_string(),
        };

        let mut segments = normalized.split('.');
        let first = leading_number(segments.next()?)?;
        let feature = if first == 1 {
            match segments.next() {
                Some(second) => leading_number(second)?,
                None => 1,
            }
        } else {
            first
        };

        (feature > 0).then_some(Self(feature))
    }
}

fn leading_number(segment: &str) -> Option<u32> {
    let end = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());
    segment[..end].parse().ok()
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive JDK range a build can run on, plus the release to prefer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavaRange {
    pub min: JavaVersion,
    pub max: JavaVersion,
    pub preferred: JavaVersion,
}

impl JavaRange {
    pub fn new(min: u32, max: u32, preferred: u32) -> Self {
        Self {
            min: JavaVersion(min),
            max: JavaVersion(max),
            preferred: JavaVersion(preferred),
        }
    }

    pub fn contains(&self, version: JavaVersion) -> bool {
        self.min <= version && version <= self.max
    }

    /// Nearest version inside the range.
    pub fn clamp(&self, version: JavaVersion) -> JavaVersion {
        version.max(self.min).min(self.max)
    }

    /// Narrows the range to JDKs that still compile `level`. Level 5 and
    /// older cap the range at 8, level 6 caps it at 11, later levels raise
    /// the minimum to the level. The result never drops below `min` or
    /// exceeds `max`.
    pub fn for_level(&self, level: JavaVersion) -> JavaRange {
        let mut range = *self;
        match level.feature() {
            0..=5 => range.max = range.max.min(JAVA_8).max(range.min),
            6 => range.max = range.max.min(JAVA_11).max(range.min),
            _ => range.min = range.clamp(level),
        }
        range.preferred = range.clamp(range.preferred);
        range
    }
}

const JAVA_8: JavaVersion = JavaVersion::new(8);
const JAVA_11: JavaVersion = JavaVersion::new(11);

impl fmt::Display for JavaRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={} (preferred {})", self.min, self.max, self.preferred)
    }
}
