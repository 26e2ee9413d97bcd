//! File-system layer.
//!
//! Thin wrappers over `std::fs` that attach the failing path to every error.
//! The generator owns its output paths outright: nothing here merges with
//! what was there before.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{GenError, Result};

#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    pub fn read_to_string(&self, relative: &Path) -> Result<String> {
        let path = self.resolve(relative);
        fs::read_to_string(&path).map_err(|e| GenError::fs(path, e))
    }

    /// Remove `relative` and everything under it; a missing directory is fine.
    pub fn remove_dir(&self, relative: &Path) -> Result<()> {
        let path = self.resolve(relative);
        match fs::remove_dir_all(&path) {
            Ok(()) => {
                debug!("Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GenError::fs(path, e)),
        }
    }

    pub fn remove_file(&self, relative: &Path) -> Result<()> {
        let path = self.resolve(relative);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GenError::fs(path, e)),
        }
    }

    pub fn create_dir(&self, relative: &Path) -> Result<()> {
        let path = self.resolve(relative);
        fs::create_dir_all(&path).map_err(|e| GenError::fs(path, e))
    }

    /// Write `contents`, creating parent directories as needed.
    pub fn write(&self, relative: &Path, contents: &str) -> Result<PathBuf> {
        let path = self.resolve(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| GenError::fs(parent, e))?;
        }
        fs::write(&path, contents).map_err(|e| GenError::fs(&path, e))?;
        debug!("Wrote {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDir::new(dir.path());

        let written = out
            .write(Path::new("components/button.js"), "export {};\n")
            .unwrap();
        assert_eq!(written, dir.path().join("components/button.js"));
        assert_eq!(
            out.read_to_string(Path::new("components/button.js")).unwrap(),
            "export {};\n"
        );
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDir::new(dir.path());
        out.remove_dir(Path::new("components")).unwrap();
        out.remove_file(Path::new("index.js")).unwrap();
    }

    #[test]
    fn test_remove_dir_is_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDir::new(dir.path());
        out.write(Path::new("components/nested/a.js"), "").unwrap();

        out.remove_dir(Path::new("components")).unwrap();
        assert!(!dir.path().join("components").exists());
    }

    #[test]
    fn test_read_missing_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDir::new(dir.path());
        let err = out.read_to_string(Path::new("nope.json")).unwrap_err();
        assert!(err.to_string().contains("nope.json"));
    }
}
