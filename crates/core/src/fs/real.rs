use super::{FileSystem, WalkOptions};
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).context(format!("Failed to read file {:?}", path))
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        path.canonicalize()
            .context(format!("Failed to canonicalize path {:?}", path))
    }

    fn walk_files(&self, root: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            anyhow::bail!("Not a directory: {:?}", root);
        }

        let walk_root = root.to_path_buf();
        let filter_options = options.clone();
        let mut files = Vec::new();

        // Only the configured exclusions apply; ignore files are not read.
        for result in WalkBuilder::new(root)
            .max_depth(Some(options.max_depth))
            .hidden(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .ignore(false)
            .parents(false)
            .follow_links(false)
            .filter_entry(move |entry| {
                let rel = entry.path().strip_prefix(&walk_root).unwrap_or(entry.path());
                !(entry.file_type().is_some_and(|t| t.is_dir()) && filter_options.is_excluded(rel))
            })
            .build()
        {
            let entry = result.with_context(|| format!("Failed to walk {:?}", root))?;

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let rel_path = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .to_path_buf();
            trace!(path = %rel_path.display(), "Walked file");
            files.push(rel_path);
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::create_dir_all(base.join("module/target")).unwrap();
        fs::create_dir(base.join(".git")).unwrap();
        fs::File::create(base.join("pom.xml"))
            .unwrap()
            .write_all(b"<project/>")
            .unwrap();
        fs::File::create(base.join("module/pom.xml"))
            .unwrap()
            .write_all(b"<project/>")
            .unwrap();
        fs::File::create(base.join("module/target/pom.xml"))
            .unwrap()
            .write_all(b"<project/>")
            .unwrap();
        fs::File::create(base.join(".git/HEAD"))
            .unwrap()
            .write_all(b"ref: refs/heads/main")
            .unwrap();

        dir
    }

    #[test]
    fn test_exists_and_kinds() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.exists(temp.path()));
        assert!(fs.is_dir(&temp.path().join("module")));
        assert!(fs.is_file(&temp.path().join("pom.xml")));
        assert!(!fs.exists(&temp.path().join("nonexistent")));
    }

    #[test]
    fn test_read_to_string() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let content = fs.read_to_string(&temp.path().join("pom.xml")).unwrap();
        assert_eq!(content, "<project/>");
        assert!(fs.read_to_string(&temp.path().join("missing.xml")).is_err());
    }

    #[test]
    fn test_walk_files_skips_excluded_dirs() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();
        let options = WalkOptions {
            max_depth: 10,
            excluded_dirs: vec![".git".to_string(), "target".to_string()],
        };

        let files = fs.walk_files(temp.path(), &options).unwrap();
        assert_eq!(
            files,
            vec![PathBuf::from("module/pom.xml"), PathBuf::from("pom.xml")]
        );
    }

    #[test]
    fn test_walk_files_respects_max_depth() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();
        let options = WalkOptions {
            max_depth: 1,
            excluded_dirs: vec![".git".to_string()],
        };

        let files = fs.walk_files(temp.path(), &options).unwrap();
        assert_eq!(files, vec![PathBuf::from("pom.xml")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_files_fails_on_unreadable_dir() {
        use std::os::unix::fs::PermissionsExt;

        let temp = create_test_dir();
        let locked = temp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let readable = fs::read_dir(&locked).is_ok();
        let result = RealFileSystem::new().walk_files(temp.path(), &WalkOptions::default());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // Permission bits do not apply to a privileged user.
        if readable {
            return;
        }
        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to walk"));
    }

    #[test]
    fn test_canonicalize() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let canonical = fs.canonicalize(temp.path()).unwrap();
        assert!(canonical.is_absolute());
    }
}
