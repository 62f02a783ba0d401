//! `${name}` property interpolation
//!
//! Values are expanded recursively against a module's resolved property map.
//! The built-in `project.*` / `pom.*` coordinate properties take precedence
//! over declared properties of the same name. A placeholder with no definition is left verbatim and reported
//! so the caller can surface it.

use recipekit_core::AnalysisError;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"))
}

/// Result of expanding one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpolated {
    pub value: String,
    /// Placeholder names that had no definition, in order of appearance
    pub unresolved: Vec<String>,
}

impl Interpolated {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

pub struct Interpolator<'a> {
    properties: &'a BTreeMap<String, String>,
    builtins: BTreeMap<String, String>,
    max_depth: usize,
}

impl<'a> Interpolator<'a> {
    pub fn new(properties: &'a BTreeMap<String, String>, max_depth: usize) -> Self {
        Self {
            properties,
            builtins: BTreeMap::new(),
            max_depth,
        }
    }

    /// Registers `project.groupId`, `project.artifactId`, `project.version`
    /// and their `pom.*` aliases.
    pub fn with_project(mut self, group: &str, artifact: &str, version: &str) -> Self {
        for prefix in ["project", "pom"] {
            self.builtins
                .insert(format!("{}.groupId", prefix), group.to_string());
            self.builtins
                .insert(format!("{}.artifactId", prefix), artifact.to_string());
            self.builtins
                .insert(format!("{}.version", prefix), version.to_string());
        }
        self
    }

    pub fn with_builtin(mut self, name: &str, value: &str) -> Self {
        self.builtins.insert(name.to_string(), value.to_string());
        self
    }

    pub fn interpolate(&self, raw: &str) -> Result<Interpolated, AnalysisError> {
        let mut unresolved = Vec::new();
        let mut chain = Vec::new();
        let value = self.expand(raw, &mut chain, &mut unresolved)?;
        Ok(Interpolated { value, unresolved })
    }

    /// `project.*` and `pom.*` builtins cannot be redefined by a property.
    fn lookup(&self, name: &str) -> Option<&str> {
        let reserved = name.starts_with("project.") || name.starts_with("pom.");
        let builtin = self.builtins.get(name);
        if reserved && builtin.is_some() {
            return builtin.map(String::as_str);
        }
        self.properties
            .get(name)
            .or(builtin)
            .map(String::as_str)
    }

    fn expand(
        &self,
        text: &str,
        chain: &mut Vec<String>,
        unresolved: &mut Vec<String>,
    ) -> Result<String, AnalysisError> {
        let re = placeholder();
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for caps in re.captures_iter(text) {
            let (whole, name) = match (caps.get(0), caps.get(1)) {
                (Some(w), Some(n)) => (w, n.as_str().trim()),
                _ => continue,
            };
            out.push_str(&text[last..whole.start()]);
            last = whole.end();

            match self.lookup(name) {
                Some(value) => {
                    if chain.iter().any(|c| c == name) || chain.len() >= self.max_depth {
                        let mut cycle = chain.clone();
                        cycle.push(name.to_string());
                        return Err(AnalysisError::PropertyCycle { chain: cycle });
                    }
                    chain.push(name.to_string());
                    let expanded = self.expand(value, chain, unresolved)?;
                    chain.pop();
                    out.push_str(&expanded);
                }
                None => {
                    if !unresolved.iter().any(|u| u == name) {
                        unresolved.push(name.to_string());
                    }
                    out.push_str(whole.as_str());
                }
            }
        }

        out.push_str(&text[last..]);
        Ok(out)
    }
}

/// Single-pass substitution that leaves unknown placeholders in place and
/// never fails. Used where a partially resolved value is still useful.
pub fn substitute(text: &str, properties: &BTreeMap<String, String>) -> String {
    placeholder()
        .replace_all(text, |caps: &Captures<'_>| {
            properties
                .get(caps[1].trim())
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

pub fn has_placeholder(text: &str) -> bool {
    placeholder().is_match(text)
}
