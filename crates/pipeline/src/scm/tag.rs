//! Version to tag resolution
//!
//! A version matches a tag when the tag, or the tag without a single leading
//! `v`/`V` before a digit, equals either the version or the version with one
//! release qualifier (`.Final`, ...) removed. Exactly one tag may match. Tags
//! themselves are never qualifier-stripped.

use recipekit_core::config::RecipeConfig;
use recipekit_core::TagResolutionError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

/// Tags available in the source repository, each with the revision it
/// points at when the caller knows it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagCandidates(BTreeMap<String, Option<String>>);

impl TagCandidates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, revision: Option<String>) {
        self.0.insert(name.into(), revision);
    }

    pub fn with_revision(mut self, name: impl Into<String>, revision: impl Into<String>) -> Self {
        self.insert(name, Some(revision.into()));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn revision(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|r| r.as_deref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TagCandidates {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(|name| (name.into(), None)).collect())
    }
}

/// Explicit version-to-tag rule kept alongside a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagMapping {
    /// Regex that must match the whole version
    pub pattern: String,
    /// Tag template; `$0`..`$n` are replaced by capture groups
    pub tag: String,
}

impl TagMapping {
    pub fn new(pattern: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            tag: tag.into(),
        }
    }

    /// The tag this mapping yields for `version`, if the pattern matches.
    pub fn apply(&self, version: &str) -> Result<Option<String>, TagResolutionError> {
        let anchored = format!("^(?:{})$", self.pattern);
        let re = Regex::new(&anchored).map_err(|e| TagResolutionError::InvalidMapping {
            pattern: self.pattern.clone(),
            message: e.to_string(),
        })?;

        let Some(caps) = re.captures(version) else {
            return Ok(None);
        };

        // Highest group first so `$1` never clobbers the prefix of `$10`.
        let mut tag = self.tag.clone();
        for index in (0..caps.len()).rev() {
            let value = caps.get(index).map(|m| m.as_str()).unwrap_or_default();
            tag = tag.replace(&format!("${}", index), value);
        }
        Ok(Some(tag))
    }

    fn is_constant(&self) -> bool {
        !self.tag.contains('$')
    }
}

/// A selected tag and the revision it points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTag {
    pub name: String,
    pub revision: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TagResolver {
    qualifiers: Vec<String>,
}

impl TagResolver {
    pub fn new(qualifiers: Vec<String>) -> Self {
        Self { qualifiers }
    }

    pub fn from_config(config: &RecipeConfig) -> Self {
        Self::new(config.release_qualifiers.clone())
    }

    /// The literal version, then the version without its release qualifier.
    pub fn version_forms(&self, version: &str) -> Vec<String> {
        let mut forms = vec![version.to_string()];
        let stripped = self
            .qualifiers
            .iter()
            .filter(|q| !q.is_empty())
            .find_map(|q| version.strip_suffix(q.as_str()))
            .filter(|s| !s.is_empty());
        if let Some(stripped) = stripped {
            if stripped != version {
                forms.push(stripped.to_string());
            }
        }
        forms
    }

    pub fn resolve_tag(
        &self,
        version: &str,
        candidates: &TagCandidates,
    ) -> Result<String, TagResolutionError> {
        let forms = self.version_forms(version);
        let matched: BTreeSet<&str> = candidates
            .names()
            .filter(|tag| {
                let hit = comparison_forms(tag)
                    .iter()
                    .any(|form| forms.iter().any(|v| v == form));
                if hit {
                    trace!(tag, version, "Tag matches version");
                }
                hit
            })
            .collect();

        let mut matched = matched.into_iter();
        match (matched.next(), matched.next()) {
            (Some(tag), None) => {
                debug!(version, tag, "Resolved tag");
                Ok(tag.to_string())
            }
            (None, _) => Err(TagResolutionError::NoMatch {
                version: version.to_string(),
            }),
            (Some(first), Some(second)) => Err(TagResolutionError::Ambiguous {
                version: version.to_string(),
                candidates: [first, second]
                    .into_iter()
                    .chain(matched)
                    .map(str::to_string)
                    .collect(),
            }),
        }
    }

    /// Tries `mappings` in order before falling back to [`Self::resolve_tag`].
    /// A mapped tag is accepted when it exists among the candidates, or when
    /// the mapping's template is a constant ref.
    pub fn resolve_with_mappings(
        &self,
        version: &str,
        candidates: &TagCandidates,
        mappings: &[TagMapping],
    ) -> Result<ResolvedTag, TagResolutionError> {
        for mapping in mappings {
            let Some(tag) = mapping.apply(version)? else {
                continue;
            };
            if candidates.contains(&tag) || mapping.is_constant() {
                debug!(version, tag = %tag, pattern = %mapping.pattern, "Resolved tag from mapping");
                return Ok(ResolvedTag {
                    revision: candidates.revision(&tag).map(str::to_string),
                    name: tag,
                });
            }
            trace!(tag = %tag, pattern = %mapping.pattern, "Mapped tag not present");
        }

        let name = self.resolve_tag(version, candidates)?;
        Ok(ResolvedTag {
            revision: candidates.revision(&name).map(str::to_string),
            name,
        })
    }
}

impl Default for TagResolver {
    fn default() -> Self {
        Self::from_config(&RecipeConfig::builtin())
    }
}

/// Resolves with the built-in release qualifiers.
pub fn resolve_tag(version: &str, candidates: &TagCandidates) -> Result<String, TagResolutionError> {
    TagResolver::default().resolve_tag(version, candidates)
}

/// The tag itself, plus the tag without a `v`/`V` prefix when a digit follows.
fn comparison_forms(tag: &str) -> Vec<&str> {
    let mut forms = vec![tag];
    let mut chars = tag.chars();
    if let (Some('v' | 'V'), Some(next)) = (chars.next(), chars.next()) {
        if next.is_ascii_digit() {
            forms.push(&tag[1..]);
        }
    }
    forms
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    fn tags(names: &[&str]) -> TagCandidates {
        names.iter().copied().collect()
    }

    #[parameterized(
        exact = { "1.0", &["1.0", "1.0.Alpha1", "1.0.1"], "1.0" },
        v_prefixed = { "1.0", &["v1.0", "1.0.Alpha1", "1.0.1"], "v1.0" },
        noise_ignored = { "4.9.3", &["antlr4-master-4.9.3", "4.9.3-rc1", "4.9.3"], "4.9.3" },
        final_stripped = { "1.0.Final", &["1.0", "1.1"], "1.0" },
        final_stripped_with_noise = { "1.0.Final", &["1.0", "1.0.a1"], "1.0" },
        upper_v = { "2.3.1", &["V2.3.1", "2.3.10"], "V2.3.1" },
        release_qualifier = { "5.3.2.RELEASE", &["v5.3.2", "v5.3.20"], "v5.3.2" },
        qualified_tag_exact = { "1.0.Final", &["1.0.Final", "0.9"], "1.0.Final" },
    )]
    fn test_resolves(version: &str, names: &[&str], expected: &str) {
        assert_eq!(resolve_tag(version, &tags(names)).unwrap(), expected);
    }

    #[parameterized(
        only_prereleases = { "1.0", &["1.0.Beta1", "1.0.Alpha1"] },
        qualified_tag_not_stripped = { "1.0", &["1.0.Final", "1.0.Alpha1"] },
        empty = { "1.0", &[] },
        word_after_v = { "ersion-1", &["version-1"] },
    )]
    fn test_no_match(version: &str, names: &[&str]) {
        assert_eq!(
            resolve_tag(version, &tags(names)).unwrap_err(),
            TagResolutionError::NoMatch {
                version: version.to_string()
            }
        );
    }

    #[test]
    fn test_ambiguous_lists_candidates() {
        let err = resolve_tag("1.0", &tags(&["v1.0", "1.0", "2.0"])).unwrap_err();
        assert_eq!(
            err,
            TagResolutionError::Ambiguous {
                version: "1.0".to_string(),
                candidates: vec!["1.0".to_string(), "v1.0".to_string()],
            }
        );
    }

    #[test]
    fn test_literal_and_stripped_forms_both_matching_is_ambiguous() {
        let err = resolve_tag("1.0.Final", &tags(&["1.0", "1.0.Final"])).unwrap_err();
        assert!(matches!(err, TagResolutionError::Ambiguous { .. }));
    }

    #[test]
    fn test_version_forms() {
        let resolver = TagResolver::default();
        assert_eq!(resolver.version_forms("1.0"), vec!["1.0"]);
        assert_eq!(resolver.version_forms("1.0.Final"), vec!["1.0.Final", "1.0"]);
        assert_eq!(resolver.version_forms(".Final"), vec![".Final"]);
        assert_eq!(resolver.version_forms("1.0.final"), vec!["1.0.final"]);
    }

    #[test]
    fn test_custom_qualifiers() {
        let resolver = TagResolver::new(vec!["-jre".to_string()]);
        assert_eq!(
            resolver.resolve_tag("33.0-jre", &tags(&["v33.0", "33.1"])).unwrap(),
            "v33.0"
        );
    }

    #[test]
    fn test_idempotent() {
        let candidates = tags(&["v1.0", "1.0.Alpha1", "1.0.1"]);
        let first = resolve_tag("1.0", &candidates);
        let second = resolve_tag("1.0", &candidates);
        assert_eq!(first, second);
    }

    #[test]
    fn test_mapping_with_groups() {
        let candidates = TagCandidates::new()
            .with_revision("rel_2_5_1", "abc123")
            .with_revision("2.5.1", "def456");
        let mappings = [TagMapping::new(r"(\d+)\.(\d+)\.(\d+)", "rel_$1_$2_$3")];

        let resolved = TagResolver::default()
            .resolve_with_mappings("2.5.1", &candidates, &mappings)
            .unwrap();
        assert_eq!(
            resolved,
            ResolvedTag {
                name: "rel_2_5_1".to_string(),
                revision: Some("abc123".to_string()),
            }
        );
    }

    #[test]
    fn test_mapping_constant_ref_needs_no_tag() {
        let mappings = [TagMapping::new(r"1\..*", "release-1.x")];
        let resolved = TagResolver::default()
            .resolve_with_mappings("1.4", &tags(&["1.3"]), &mappings)
            .unwrap();
        assert_eq!(resolved.name, "release-1.x");
        assert_eq!(resolved.revision, None);
    }

    #[test]
    fn test_mapping_falls_back_to_heuristic() {
        let candidates = TagCandidates::new().with_revision("v3.1", "0badc0de");
        let mappings = [
            TagMapping::new(r"(.*)", "project-$1"),
            TagMapping::new(r"2\..*", "legacy"),
        ];

        let resolved = TagResolver::default()
            .resolve_with_mappings("3.1", &candidates, &mappings)
            .unwrap();
        assert_eq!(resolved.name, "v3.1");
        assert_eq!(resolved.revision.as_deref(), Some("0badc0de"));
    }

    #[test]
    fn test_mapping_pattern_must_match_whole_version() {
        let mapping = TagMapping::new(r"\d+", "n$0");
        assert_eq!(mapping.apply("12").unwrap().as_deref(), Some("n12"));
        assert_eq!(mapping.apply("12.1").unwrap(), None);
    }

    #[test]
    fn test_invalid_mapping() {
        let mappings = [TagMapping::new("(unclosed", "x")];
        let err = TagResolver::default()
            .resolve_with_mappings("1.0", &tags(&["1.0"]), &mappings)
            .unwrap_err();
        assert!(matches!(err, TagResolutionError::InvalidMapping { .. }));
    }

    #[test]
    fn test_candidates_serialize_as_map() {
        let candidates = TagCandidates::new().with_revision("v1", "abc");
        assert_eq!(
            serde_json::to_string(&candidates).unwrap(),
            r#"{"v1":"abc"}"#
        );
    }
}
