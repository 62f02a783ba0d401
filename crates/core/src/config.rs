use crate::fs::WalkOptions;
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_MAX_SCAN_DEPTH: usize = 32;
const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "target",
    ".gradle",
    "node_modules",
    "src/test/resources",
    "src/it",
];
const DEFAULT_RELEASE_QUALIFIERS: &[&str] = &[".Final", ".RELEASE", ".GA"];
const DEFAULT_JDK_MIN: u32 = 8;
const DEFAULT_JDK_MAX: u32 = 17;
const DEFAULT_JDK_PREFERRED: u32 = 11;
const DEFAULT_INTERPOLATION_DEPTH: usize = 16;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeConfig {
    pub max_scan_depth: usize,
    pub excluded_dirs: Vec<String>,
    pub release_qualifiers: Vec<String>,
    pub jdk_min: u32,
    pub jdk_max: u32,
    pub jdk_preferred: u32,
    pub interpolation_depth: usize,
    pub log_level: String,
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn owned(defaults: &[&str]) -> Vec<String> {
    defaults.iter().map(|s| s.to_string()).collect()
}

fn env_number<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::ParseError {
                field: key.to_string(),
                error: format!("'{}': {}", raw, e),
            }),
        Err(_) => Ok(None),
    }
}

impl Default for RecipeConfig {
    /// Reads `RECIPEKIT_*` variables, falling back to built-in defaults for
    /// anything unset or malformed. Use [`RecipeConfig::from_env`] to reject
    /// malformed values instead.
    fn default() -> Self {
        let max_scan_depth = env::var("RECIPEKIT_MAX_SCAN_DEPTH")
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_SCAN_DEPTH);

        let excluded_dirs = env::var("RECIPEKIT_EXCLUDED_DIRS")
            .map(|v| parse_list(&v))
            .unwrap_or_else(|_| owned(DEFAULT_EXCLUDED_DIRS));

        let release_qualifiers = env::var("RECIPEKIT_RELEASE_QUALIFIERS")
            .map(|v| parse_list(&v))
            .unwrap_or_else(|_| owned(DEFAULT_RELEASE_QUALIFIERS));

        let jdk_min = env::var("RECIPEKIT_JDK_MIN")
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_JDK_MIN);

        let jdk_max = env::var("RECIPEKIT_JDK_MAX")
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_JDK_MAX);

        let jdk_preferred = env::var("RECIPEKIT_JDK_PREFERRED")
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_JDK_PREFERRED);

        let interpolation_depth = env::var("RECIPEKIT_INTERPOLATION_DEPTH")
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_INTERPOLATION_DEPTH);

        let log_level = env::var("RECIPEKIT_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            max_scan_depth,
            excluded_dirs,
            release_qualifiers,
            jdk_min,
            jdk_max,
            jdk_preferred,
            interpolation_depth,
            log_level,
        }
    }
}

impl RecipeConfig {
    /// Built-in defaults, ignoring the environment.
    pub fn builtin() -> Self {
        Self {
            max_scan_depth: DEFAULT_MAX_SCAN_DEPTH,
            excluded_dirs: owned(DEFAULT_EXCLUDED_DIRS),
            release_qualifiers: owned(DEFAULT_RELEASE_QUALIFIERS),
            jdk_min: DEFAULT_JDK_MIN,
            jdk_max: DEFAULT_JDK_MAX,
            jdk_preferred: DEFAULT_JDK_PREFERRED,
            interpolation_depth: DEFAULT_INTERPOLATION_DEPTH,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Strict variant of [`Default`]: malformed numeric variables are errors,
    /// and the result is validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(v) = env_number("RECIPEKIT_MAX_SCAN_DEPTH")? {
            config.max_scan_depth = v;
        }
        if let Some(v) = env_number("RECIPEKIT_JDK_MIN")? {
            config.jdk_min = v;
        }
        if let Some(v) = env_number("RECIPEKIT_JDK_MAX")? {
            config.jdk_max = v;
        }
        if let Some(v) = env_number("RECIPEKIT_JDK_PREFERRED")? {
            config.jdk_preferred = v;
        }
        if let Some(v) = env_number("RECIPEKIT_INTERPOLATION_DEPTH")? {
            config.interpolation_depth = v;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_scan_depth == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max scan depth must be at least 1".to_string(),
            ));
        }
        if self.max_scan_depth > 256 {
            return Err(ConfigError::ValidationFailed(
                "Max scan depth cannot exceed 256".to_string(),
            ));
        }

        if self.jdk_min == 0 {
            return Err(ConfigError::ValidationFailed(
                "Minimum JDK must be at least 1".to_string(),
            ));
        }
        if self.jdk_min > self.jdk_max {
            return Err(ConfigError::ValidationFailed(format!(
                "Minimum JDK {} exceeds maximum JDK {}",
                self.jdk_min, self.jdk_max
            )));
        }
        if self.jdk_preferred < self.jdk_min || self.jdk_preferred > self.jdk_max {
            return Err(ConfigError::ValidationFailed(format!(
                "Preferred JDK {} is outside {}..={}",
                self.jdk_preferred, self.jdk_min, self.jdk_max
            )));
        }

        if self.interpolation_depth == 0 {
            return Err(ConfigError::ValidationFailed(
                "Interpolation depth must be at least 1".to_string(),
            ));
        }
        if self.interpolation_depth > 64 {
            return Err(ConfigError::ValidationFailed(
                "Interpolation depth cannot exceed 64".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            max_depth: self.max_scan_depth,
            excluded_dirs: self.excluded_dirs.clone(),
        }
    }
}

impl fmt::Display for RecipeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Recipekit Configuration:")?;
        writeln!(f, "  Max Scan Depth: {}", self.max_scan_depth)?;
        writeln!(f, "  Excluded Dirs: {}", self.excluded_dirs.join(", "))?;
        writeln!(
            f,
            "  Release Qualifiers: {}",
            self.release_qualifiers.join(", ")
        )?;
        writeln!(
            f,
            "  JDK Range: {}..={} (preferred {})",
            self.jdk_min, self.jdk_max, self.jdk_preferred
        )?;
        writeln!(f, "  Interpolation Depth: {}", self.interpolation_depth)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
