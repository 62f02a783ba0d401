//! FileSystem trait definition

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Controls which files a tree walk yields
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Maximum directory depth below the walk root
    pub max_depth: usize,
    /// Directory names or relative sub-paths (e.g. `src/it`) that are never entered
    pub excluded_dirs: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_depth: 32,
            excluded_dirs: Vec::new(),
        }
    }
}

impl WalkOptions {
    /// True if any contiguous run of `rel_dir` components equals an excluded entry.
    pub fn is_excluded(&self, rel_dir: &Path) -> bool {
        let components: Vec<&str> = rel_dir
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .collect();

        self.excluded_dirs.iter().any(|excluded| {
            let pattern: Vec<&str> = excluded.split('/').filter(|s| !s.is_empty()).collect();
            !pattern.is_empty()
                && components
                    .windows(pattern.len())
                    .any(|window| window == pattern.as_slice())
        })
    }
}

/// Abstraction over file system operations for testability
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Canonicalize a path
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    /// All files below `root`, as paths relative to `root`, sorted.
    fn walk_files(&self, root: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_single_component() {
        let options = WalkOptions {
            excluded_dirs: vec!["target".to_string()],
            ..Default::default()
        };
        assert!(options.is_excluded(Path::new("target")));
        assert!(options.is_excluded(Path::new("module/target/classes")));
        assert!(!options.is_excluded(Path::new("module/targets")));
    }

    #[test]
    fn test_excluded_nested_pattern() {
        let options = WalkOptions {
            excluded_dirs: vec!["src/it".to_string()],
            ..Default::default()
        };
        assert!(options.is_excluded(Path::new("core/src/it/simple")));
        assert!(!options.is_excluded(Path::new("core/src/main")));
        assert!(!options.is_excluded(Path::new("it")));
    }
}
